//! Application state management for Ello Router
//!
//! This crate tracks the authentication session as observed from outside
//! signals. Consumers read the derived [`session::SessionState`]; nothing here
//! initiates a login or logout.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;

pub use session::{AuthEvent, SessionState, SessionTracker, SessionTransition};
