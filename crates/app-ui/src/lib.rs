//! Navigation layer for Ello Router
//!
//! This crate turns deep links into navigation: it classifies links, gates
//! them on the login session, and dispatches them to screen operations.
//!
//! # Modules
//!
//! - [`deep_link`] - Link classification into [`DeepLinkTarget`]s
//! - [`router`] - Session-gated dispatch and the deferred-link slot
//! - [`presenter`] - The screen-show seam and a state-backed implementation
//! - [`navigation`] - Tabs, stacks, modals and root screens
//! - [`config`] - Hosts, scheme and external paths
//!
//! # Example
//!
//! ```rust
//! use app_platform::RecordingOpener;
//! use app_state::SessionState;
//! use app_ui::{DeepLinkRouter, NavigationPresenter, NavigationTab, RouteOutcome};
//!
//! let mut presenter = NavigationPresenter::new();
//! presenter.show_main();
//!
//! let mut router = DeepLinkRouter::new(presenter, RecordingOpener::new());
//! let outcome = router.route("discover/trending", SessionState::LoggedIn);
//!
//! assert!(matches!(outcome, RouteOutcome::Dispatched(_)));
//! assert_eq!(router.presenter().state().active_tab, NavigationTab::Discover);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deep_link;
pub mod navigation;
pub mod presenter;
pub mod router;

// Re-export commonly used types
pub use config::{ConfigError, RouterConfig};

pub use deep_link::{DeepLinkParser, DeepLinkTarget, LinkParams, NotificationFilter, StreamFilter};

pub use navigation::{
    NavigationStack, NavigationState, NavigationTab, RootScreen, Screen, StackEntry,
};

pub use presenter::{Interstitial, InterstitialChoice, NavigationPresenter, ScreenPresenter};

pub use router::{DeepLinkRouter, PendingIntent, PushPayload, RouteOutcome};
