//! Ello Router
//!
//! Deep link routing and session-gated navigation for the Ello client.
//! This crate re-exports the workspace crates as one API:
//!
//! - [`app_ui`] - link classification, the router and the navigation model
//! - [`app_state`] - session state derived from authentication signals
//! - [`app_platform`] - handing links to the host platform
//!
//! A host wires them together by feeding [`AuthEvent`]s to a
//! [`SessionTracker`] and forwarding each [`SessionTransition`] to
//! [`DeepLinkRouter::on_session_transition`], so links that arrive during
//! login are replayed once it completes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_platform::{self, PlatformError, RecordingOpener, SystemOpener, UrlOpener};
pub use app_state::{self, AuthEvent, SessionState, SessionTracker, SessionTransition};
pub use app_ui::{
    self, ConfigError, DeepLinkParser, DeepLinkRouter, DeepLinkTarget, Interstitial,
    InterstitialChoice, NavigationPresenter, NavigationState, NavigationTab, NotificationFilter,
    PendingIntent, PushPayload, RootScreen, RouteOutcome, RouterConfig, Screen, ScreenPresenter,
    StreamFilter,
};

use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a `tracing` subscriber that writes to stderr
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a `tracing` subscriber whose output the test harness captures
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_test_writer()
        .try_init();
}
