//! Deep link router
//!
//! Given a link and the current [`SessionState`], the router either
//! dispatches to a screen, hands the link to the platform, asks a logged-out
//! user how to continue, or parks the link until login completes.
//!
//! At most one link is parked at a time. A newer link replaces an older one,
//! and the parked link is consumed exactly once when the session enters
//! [`SessionState::LoggedIn`].

use app_platform::UrlOpener;
use app_state::{SessionState, SessionTransition};
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::deep_link::{DeepLinkParser, DeepLinkTarget, NotificationFilter};
use crate::navigation::{NavigationTab, Screen};
use crate::presenter::{Interstitial, InterstitialChoice, ScreenPresenter};

/// Push notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Deep link the notification opens, e.g. `ello://notifications/posts/12`
    pub application_target: String,
}

impl PushPayload {
    /// Create a payload for a target link
    pub fn new(application_target: impl Into<String>) -> Self {
        Self {
            application_target: application_target.into(),
        }
    }
}

/// A navigation request waiting for login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PendingIntent {
    /// A link the user opened
    Path(String),
    /// A push notification the user tapped
    Push(PushPayload),
}

impl PendingIntent {
    /// Link to replay
    pub fn path(&self) -> &str {
        match self {
            PendingIntent::Path(path) => path,
            PendingIntent::Push(payload) => &payload.application_target,
        }
    }

    fn into_path(self) -> String {
        match self {
            PendingIntent::Path(path) => path,
            PendingIntent::Push(payload) => payload.application_target,
        }
    }
}

/// What routing a link did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The link was handed to the platform opener
    OpenedExternally {
        /// Link passed to the opener
        url: String,
        /// Whether the platform accepted it
        opened: bool,
    },
    /// Stored until login completes
    Deferred,
    /// The login-or-open-externally prompt is on screen
    AwaitingChoice,
    /// Stored, and the login screen is up
    LoginRequested,
    /// A screen operation ran for this target
    Dispatched(DeepLinkTarget),
    /// Nothing to do (already there, no tab bar, or no user)
    Ignored,
}

/// Session-gated deep link dispatcher
pub struct DeepLinkRouter<P, O> {
    parser: DeepLinkParser,
    presenter: P,
    opener: O,
    pending: Option<PendingIntent>,
    current_user: Option<String>,
}

impl<P, O> DeepLinkRouter<P, O>
where
    P: ScreenPresenter,
    O: UrlOpener,
{
    /// Create a router with the default configuration
    pub fn new(presenter: P, opener: O) -> Self {
        Self::with_config(RouterConfig::default(), presenter, opener)
    }

    /// Create a router with a custom configuration
    pub fn with_config(config: RouterConfig, presenter: P, opener: O) -> Self {
        Self {
            parser: DeepLinkParser::new(config),
            presenter,
            opener,
            pending: None,
            current_user: None,
        }
    }

    /// Classify a link without acting on it
    pub fn classify(&self, path: &str) -> DeepLinkTarget {
        self.parser.classify(path)
    }

    /// Route a link given the current session
    pub fn route(&mut self, path: &str, session: SessionState) -> RouteOutcome {
        let target = self.parser.classify(path);
        tracing::info!(path, kind = target.kind(), %session, "deep link visited");

        if !target.loads_in_app() {
            return self.open_externally(path);
        }

        match session {
            SessionState::LoggingIn => {
                self.defer(PendingIntent::Path(path.to_string()));
                RouteOutcome::Deferred
            }
            SessionState::LoggedOut => {
                if target.requires_session() {
                    self.presenter.present_interstitial(&Interstitial::new(path));
                    RouteOutcome::AwaitingChoice
                } else {
                    self.show_auth_screen(target)
                }
            }
            SessionState::LoggedIn => self.dispatch(target, path),
        }
    }

    /// Resolve the login-or-open-externally prompt for `path`
    pub fn choose(&mut self, path: &str, choice: InterstitialChoice) -> RouteOutcome {
        tracing::debug!(path, ?choice, "interstitial resolved");
        match choice {
            InterstitialChoice::LogInAndView => {
                self.defer(PendingIntent::Path(path.to_string()));
                self.presenter.show_login_screen();
                RouteOutcome::LoginRequested
            }
            InterstitialChoice::OpenExternally => self.open_externally(path),
        }
    }

    /// Route a tapped push notification
    ///
    /// Unless the user is logged in with the tab bar showing, the payload
    /// is parked and replayed by the next [`resume_pending`](Self::resume_pending).
    pub fn route_push(&mut self, payload: PushPayload, session: SessionState) -> RouteOutcome {
        if session.is_logged_in() && self.presenter.is_main_visible() {
            return self.route(&payload.application_target, session);
        }

        tracing::info!(
            target_path = %payload.application_target,
            %session,
            "push notification deferred until login"
        );
        self.defer(PendingIntent::Push(payload));
        RouteOutcome::Deferred
    }

    /// Replay the parked link once the session is logged in
    ///
    /// The slot is emptied before the replay, whatever the replay does.
    /// Returns `None` if the session is not logged in or nothing is parked.
    pub fn resume_pending(&mut self, session: SessionState) -> Option<RouteOutcome> {
        if !session.is_logged_in() {
            return None;
        }

        let intent = self.pending.take()?;
        let path = intent.into_path();
        tracing::info!(path = %path, "replaying deferred deep link");

        Some(self.route(&path, session))
    }

    /// React to a session change; replays the parked link on login
    pub fn on_session_transition(&mut self, transition: SessionTransition) -> Option<RouteOutcome> {
        if transition.entered_logged_in() {
            self.resume_pending(transition.to)
        } else {
            None
        }
    }

    /// Record who is logged in
    pub fn set_current_user(&mut self, username: Option<String>) {
        self.current_user = username;
    }

    /// Username of the logged-in user
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Parked navigation request
    pub fn pending(&self) -> Option<&PendingIntent> {
        self.pending.as_ref()
    }

    /// Router configuration
    pub fn config(&self) -> &RouterConfig {
        self.parser.config()
    }

    /// Screen presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable screen presenter
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Platform opener
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Mutable platform opener
    pub fn opener_mut(&mut self) -> &mut O {
        &mut self.opener
    }

    fn defer(&mut self, intent: PendingIntent) {
        tracing::debug!(path = intent.path(), "deep link deferred");
        if let Some(previous) = self.pending.replace(intent) {
            tracing::debug!(previous = previous.path(), "superseded deferred deep link");
        }
    }

    fn open_externally(&mut self, url: &str) -> RouteOutcome {
        let opened = match self.opener.open_url(url) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to open link externally");
                false
            }
        };

        RouteOutcome::OpenedExternally {
            url: url.to_string(),
            opened,
        }
    }

    fn show_auth_screen(&mut self, target: DeepLinkTarget) -> RouteOutcome {
        if let Some(PendingIntent::Push(payload)) = &self.pending {
            tracing::debug!(
                target_path = %payload.application_target,
                "auth screen shown; dropping parked push notification"
            );
            self.pending = None;
        }

        match target {
            DeepLinkTarget::Join => self.presenter.show_join_screen(),
            DeepLinkTarget::Login => self.presenter.show_login_screen(),
            _ => return RouteOutcome::Ignored,
        }
        RouteOutcome::Dispatched(target)
    }

    fn dispatch(&mut self, target: DeepLinkTarget, path: &str) -> RouteOutcome {
        if !self.presenter.is_main_visible() {
            tracing::debug!(path, "main screen not visible; deep link dropped");
            return RouteOutcome::Ignored;
        }

        match &target {
            DeepLinkTarget::Root | DeepLinkTarget::Join | DeepLinkTarget::Login => {
                return RouteOutcome::Ignored;
            }
            DeepLinkTarget::Discover { category } => {
                self.presenter.select_tab(NavigationTab::Discover);
                if let Some(category) = category {
                    self.presenter.show_discover_category(category);
                }
            }
            DeepLinkTarget::Invitations => {
                self.presenter.select_tab(NavigationTab::Discover);
                self.presenter.show_invite_friends();
            }
            DeepLinkTarget::Stream { filter } => {
                self.presenter.select_tab(NavigationTab::Stream);
                self.presenter.show_stream(*filter);
            }
            DeepLinkTarget::Notifications { category } => {
                self.presenter.select_tab(NavigationTab::Notifications);
                self.presenter
                    .show_notifications(NotificationFilter::from_category(category.as_deref()));
            }
            DeepLinkTarget::Onboarding => match &self.current_user {
                Some(user) => self.presenter.show_onboarding(user),
                None => return RouteOutcome::Ignored,
            },
            DeepLinkTarget::Profile { user, is_slug } => {
                self.presenter.push_screen(Screen::Profile {
                    user_param: Screen::lookup_param(user, *is_slug),
                    deep_link_path: Some(path.to_string()),
                });
            }
            DeepLinkTarget::Post { id, is_slug } => {
                self.presenter.push_screen(Screen::PostDetail {
                    post_param: Screen::lookup_param(id, *is_slug),
                    deep_link_path: Some(path.to_string()),
                });
            }
            DeepLinkTarget::ProfileFollowers { username } => {
                let is_current_user = self.is_current_user(username);
                self.presenter.push_screen(Screen::ProfileFollowers {
                    username: username.clone(),
                    is_current_user,
                });
            }
            DeepLinkTarget::ProfileFollowing { username } => {
                let is_current_user = self.is_current_user(username);
                self.presenter.push_screen(Screen::ProfileFollowing {
                    username: username.clone(),
                    is_current_user,
                });
            }
            DeepLinkTarget::ProfileLoves { username } => {
                let is_current_user = self.is_current_user(username);
                self.presenter.push_screen(Screen::ProfileLoves {
                    username: username.clone(),
                    is_current_user,
                });
            }
            DeepLinkTarget::Search { terms } => {
                self.presenter.push_screen(Screen::Search {
                    terms: terms.clone(),
                });
            }
            DeepLinkTarget::Settings => self.presenter.push_screen(Screen::Settings),
            DeepLinkTarget::WebView { url } => self.presenter.show_web_view(url),
            DeepLinkTarget::External { .. } => return self.open_externally(path),
        }

        RouteOutcome::Dispatched(target)
    }

    fn is_current_user(&self, username: &str) -> bool {
        self.current_user
            .as_deref()
            .is_some_and(|me| me.eq_ignore_ascii_case(username))
    }
}
