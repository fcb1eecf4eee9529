//! Session state derived from authentication signals
//!
//! The authentication flow lives elsewhere (login screen, token store, API
//! client). This module only folds the signals those components emit into a
//! coarse [`SessionState`] and reports when it changes, so navigation can
//! react to a login completing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No session and no login in flight
    #[default]
    LoggedOut,
    /// A stored token was found or credentials were submitted; the current
    /// user has not loaded yet
    LoggingIn,
    /// The current user is loaded and the main screen is available
    LoggedIn,
}

impl SessionState {
    /// Whether the session is fully established
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }

    /// Whether a login is in flight
    pub fn is_logging_in(&self) -> bool {
        matches!(self, SessionState::LoggingIn)
    }

    /// Stable name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::LoggedOut => "logged_out",
            SessionState::LoggingIn => "logging_in",
            SessionState::LoggedIn => "logged_in",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication signals observed from the rest of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthEvent {
    /// A password-based token was found in storage at startup
    TokenRestored,
    /// The user submitted credentials on the login or join screen
    LoginStarted,
    /// Credentials were accepted
    LoginSucceeded,
    /// The current user profile finished loading
    CurrentUserLoaded,
    /// Login or current-user loading failed
    LoginFailed,
    /// The server rejected the stored token
    TokenInvalidated,
    /// The user logged out
    LoggedOut,
}

impl AuthEvent {
    /// State the session moves to after this event
    pub fn target_state(&self) -> SessionState {
        match self {
            AuthEvent::TokenRestored | AuthEvent::LoginStarted => SessionState::LoggingIn,
            AuthEvent::LoginSucceeded | AuthEvent::CurrentUserLoaded => SessionState::LoggedIn,
            AuthEvent::LoginFailed | AuthEvent::TokenInvalidated | AuthEvent::LoggedOut => {
                SessionState::LoggedOut
            }
        }
    }
}

/// A change of session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTransition {
    /// State before the change
    pub from: SessionState,
    /// State after the change
    pub to: SessionState,
}

impl SessionTransition {
    /// True exactly when this transition completes a login
    pub fn entered_logged_in(&self) -> bool {
        self.to == SessionState::LoggedIn && self.from != SessionState::LoggedIn
    }

    /// True when this transition ends a session or a login attempt
    pub fn entered_logged_out(&self) -> bool {
        self.to == SessionState::LoggedOut && self.from != SessionState::LoggedOut
    }
}

/// Folds [`AuthEvent`]s into the current [`SessionState`]
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    state: SessionState,
}

impl SessionTracker {
    /// Create a tracker in the logged-out state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker starting from a known state
    pub fn with_state(state: SessionState) -> Self {
        Self { state }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply an event, returning the transition if the state changed
    pub fn apply(&mut self, event: AuthEvent) -> Option<SessionTransition> {
        let next = event.target_state();
        if next == self.state {
            tracing::trace!(?event, state = %self.state, "auth event left session unchanged");
            return None;
        }

        let transition = SessionTransition {
            from: self.state,
            to: next,
        };
        self.state = next;

        tracing::debug!(
            ?event,
            from = %transition.from,
            to = %transition.to,
            "session state changed"
        );

        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_logged_out() {
        let tracker = SessionTracker::new();
        assert_eq!(tracker.state(), SessionState::LoggedOut);
        assert!(!tracker.state().is_logged_in());
    }

    #[test]
    fn test_startup_with_stored_token() {
        let mut tracker = SessionTracker::new();

        let t = tracker.apply(AuthEvent::TokenRestored).unwrap();
        assert_eq!(t.from, SessionState::LoggedOut);
        assert_eq!(t.to, SessionState::LoggingIn);
        assert!(!t.entered_logged_in());

        let t = tracker.apply(AuthEvent::CurrentUserLoaded).unwrap();
        assert!(t.entered_logged_in());
        assert!(tracker.state().is_logged_in());
    }

    #[test]
    fn test_repeated_event_yields_no_transition() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.apply(AuthEvent::LoginStarted).is_some());
        assert!(tracker.apply(AuthEvent::TokenRestored).is_none());
        assert!(tracker.apply(AuthEvent::LoginSucceeded).is_some());
        assert!(tracker.apply(AuthEvent::CurrentUserLoaded).is_none());
    }

    #[test]
    fn test_failed_login_returns_to_logged_out() {
        let mut tracker = SessionTracker::new();
        tracker.apply(AuthEvent::LoginStarted);

        let t = tracker.apply(AuthEvent::LoginFailed).unwrap();
        assert!(t.entered_logged_out());
        assert!(!t.entered_logged_in());
        assert_eq!(tracker.state(), SessionState::LoggedOut);
    }

    #[test]
    fn test_logged_out_directly_into_logged_in() {
        let mut tracker = SessionTracker::new();
        let t = tracker.apply(AuthEvent::LoginSucceeded).unwrap();
        assert!(t.entered_logged_in());
    }

    #[test]
    fn test_logout_and_token_invalidation() {
        let mut tracker = SessionTracker::with_state(SessionState::LoggedIn);
        let t = tracker.apply(AuthEvent::TokenInvalidated).unwrap();
        assert_eq!(t.from, SessionState::LoggedIn);
        assert!(t.entered_logged_out());
        assert!(tracker.apply(AuthEvent::LoggedOut).is_none());
    }

    #[test]
    fn test_session_state_serialization() {
        let json = serde_json::to_string(&SessionState::LoggingIn).unwrap();
        assert_eq!(json, "\"loggingIn\"");
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SessionState::LoggingIn);
        assert_eq!(SessionState::LoggedIn.to_string(), "logged_in");
    }
}
