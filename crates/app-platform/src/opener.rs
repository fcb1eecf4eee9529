//! External URL opening
//!
//! The router never renders foreign content itself. Anything it cannot
//! handle in-app is passed to a [`UrlOpener`], which on a real device is the
//! operating system's URL handler.

use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use thiserror::Error;
use url::Url;

/// Errors raised while handing a URL to the platform
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The string is not an absolute URL the platform can open
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The platform launcher could not be started
    #[error("Failed to launch URL handler: {0}")]
    Launch(#[from] std::io::Error),

    /// No launcher is known for this operating system
    #[error("Opening URLs is not supported on this platform")]
    Unsupported,
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Capability to open a URL outside the application
pub trait UrlOpener {
    /// Hand `url` to the platform
    fn open_url(&mut self, url: &str) -> Result<()>;
}

impl<T: UrlOpener + ?Sized> UrlOpener for Box<T> {
    fn open_url(&mut self, url: &str) -> Result<()> {
        (**self).open_url(url)
    }
}

/// Parse `url` as an absolute URL the platform can open
///
/// Relative paths, blank input and URLs with nothing after the scheme are
/// rejected. Surrounding or embedded whitespace is rejected rather than
/// silently stripped.
pub fn validate_url(url: &str) -> Result<Url> {
    let invalid = || PlatformError::InvalidUrl(url.to_string());

    if url.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.cannot_be_a_base() && parsed.path().is_empty() {
        return Err(invalid());
    }

    Ok(parsed)
}

/// Opens URLs with the operating system's default handler
///
/// The launcher runs in the background; a detached thread reaps it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    /// Create a new system opener
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "linux")]
    fn command(url: &str) -> Result<Command> {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        Ok(cmd)
    }

    #[cfg(target_os = "macos")]
    fn command(url: &str) -> Result<Command> {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        Ok(cmd)
    }

    // Not `cmd /C start`: cmd.exe would interpret `&` and `|` in the URL
    #[cfg(target_os = "windows")]
    fn command(url: &str) -> Result<Command> {
        let mut cmd = Command::new("rundll32");
        cmd.args(["url.dll,FileProtocolHandler", url]);
        Ok(cmd)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    fn command(_url: &str) -> Result<Command> {
        Err(PlatformError::Unsupported)
    }

    /// Start the launcher and wait for it on a background thread
    fn spawn_detached(mut cmd: Command) -> Result<JoinHandle<()>> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        let mut child = cmd.spawn()?;

        Ok(std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                tracing::warn!(error = %e, "URL handler did not exit cleanly");
            }
        }))
    }
}

impl UrlOpener for SystemOpener {
    fn open_url(&mut self, url: &str) -> Result<()> {
        let parsed = validate_url(url)?;

        Self::spawn_detached(Self::command(parsed.as_str())?)?;

        tracing::debug!(url = parsed.as_str(), "handed URL to system opener");
        Ok(())
    }
}

/// Opener that records every URL instead of launching anything
///
/// Used by headless hosts and tests. Invalid URLs are rejected the same way
/// the system opener rejects them, and are not recorded.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    opened: Vec<String>,
}

impl RecordingOpener {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, oldest first
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    /// Most recently opened URL
    pub fn last(&self) -> Option<&str> {
        self.opened.last().map(String::as_str)
    }

    /// Forget recorded URLs
    pub fn clear(&mut self) {
        self.opened.clear();
    }
}

impl UrlOpener for RecordingOpener {
    fn open_url(&mut self, url: &str) -> Result<()> {
        validate_url(url)?;
        self.opened.push(url.to_string());
        Ok(())
    }
}
