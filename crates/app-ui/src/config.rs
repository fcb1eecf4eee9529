//! Router configuration
//!
//! Which hosts and schemes count as "ours", and which site paths are never
//! handled in-app. Loaded from JSON or built in code.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A field holds an unusable value
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Site paths that exist on the web but have no in-app screen
const DEFAULT_EXTERNAL_PATHS: &[&str] = &[
    "about",
    "api",
    "auth",
    "beta-public-profiles",
    "confirm",
    "downloads",
    "faq",
    "forgot-password",
    "invite",
    "manifesto",
    "password-reset",
    "privacy",
    "subscribe",
    "terms",
    "unsubscribe",
    "who-made-this",
];

/// Deep link router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    /// Web hosts whose URLs are handled in-app
    pub web_hosts: Vec<String>,
    /// Custom URI scheme registered by the app (without `://`)
    pub app_scheme: String,
    /// Base URL used to resolve relative help pages for the in-app browser
    pub web_base_url: String,
    /// First path segments that always open externally
    pub external_paths: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            web_hosts: vec!["ello.co".to_string(), "www.ello.co".to_string()],
            app_scheme: "ello".to_string(),
            web_base_url: "https://ello.co".to_string(),
            external_paths: DEFAULT_EXTERNAL_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RouterConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the recognized web hosts
    pub fn web_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.web_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the app URI scheme
    pub fn app_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.app_scheme = scheme.into();
        self
    }

    /// Set the web base URL
    pub fn web_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_base_url = url.into();
        self
    }

    /// Add a site path that must open externally
    pub fn external_path(mut self, path: impl Into<String>) -> Self {
        self.external_paths.push(path.into());
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.app_scheme.is_empty()
            || !self
                .app_scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(ConfigError::Invalid {
                field: "appScheme",
                reason: format!("'{}' is not a URI scheme", self.app_scheme),
            });
        }

        if let Some(host) = self.web_hosts.iter().find(|h| h.is_empty() || h.contains('/')) {
            return Err(ConfigError::Invalid {
                field: "webHosts",
                reason: format!("'{}' is not a host name", host),
            });
        }

        self.base_url()?;

        Ok(())
    }

    /// Parsed web base URL, which relative links resolve against
    pub fn base_url(&self) -> Result<Url> {
        let invalid = |reason: String| ConfigError::Invalid {
            field: "webBaseUrl",
            reason,
        };

        let url = Url::parse(&self.web_base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(url),
            _ => Err(invalid("must be an http(s) URL".to_string())),
        }
    }

    /// Whether `host` is one of the recognized web hosts
    ///
    /// Takes a bare host as returned by [`Url::host_str`], without a port.
    pub fn is_web_host(&self, host: &str) -> bool {
        self.web_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    /// Whether `scheme` is the app's own scheme
    pub fn is_app_scheme(&self, scheme: &str) -> bool {
        self.app_scheme.eq_ignore_ascii_case(scheme)
    }

    /// Whether a first path segment always opens externally
    pub fn is_external_path(&self, segment: &str) -> bool {
        self.external_paths.iter().any(|p| p.eq_ignore_ascii_case(segment))
    }
}
