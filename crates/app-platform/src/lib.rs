//! Platform-specific code for Ello Router
//!
//! This crate wraps the host platform's capabilities that the navigation
//! layer hands work off to. Currently that is opening a URL outside the app
//! (system browser or the registered handler for its scheme).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod opener;

pub use opener::{PlatformError, RecordingOpener, Result, SystemOpener, UrlOpener};
