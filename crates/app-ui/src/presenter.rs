//! Screen presentation seam
//!
//! The router decides *what* to show; a [`ScreenPresenter`] shows it. Each
//! operation takes only the data its screen needs. [`NavigationPresenter`]
//! implements the seam on top of [`NavigationState`].

use serde::{Deserialize, Serialize};

use crate::deep_link::{NotificationFilter, StreamFilter};
use crate::navigation::{NavigationState, NavigationTab, RootScreen, Screen};

// =============================================================================
// Interstitial
// =============================================================================

/// Options offered to a logged-out user who followed a deep link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterstitialChoice {
    /// Log in, then continue to the link
    LogInAndView,
    /// Open the link in the system browser
    OpenExternally,
}

impl InterstitialChoice {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            InterstitialChoice::LogInAndView => "Login and view",
            InterstitialChoice::OpenExternally => "Open in browser",
        }
    }
}

/// The login-or-open-externally prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interstitial {
    /// Link the user followed; shown as the prompt message
    pub path: String,
}

impl Interstitial {
    /// Create a prompt for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Choices in display order
    pub fn choices(&self) -> [InterstitialChoice; 2] {
        [InterstitialChoice::LogInAndView, InterstitialChoice::OpenExternally]
    }
}

// =============================================================================
// Presenter
// =============================================================================

/// Named screen-show operations the router dispatches to
#[cfg_attr(test, mockall::automock)]
pub trait ScreenPresenter {
    /// Whether the tabbed main screen is on screen
    fn is_main_visible(&self) -> bool;

    /// Select a tab
    fn select_tab(&mut self, tab: NavigationTab);

    /// Return the discover tab to its root and show a category
    fn show_discover_category(&mut self, category: &str);

    /// Set the stream tab's sub-filter
    fn show_stream(&mut self, filter: StreamFilter);

    /// Set the notifications tab's category filter
    fn show_notifications(&mut self, filter: NotificationFilter);

    /// Start the invite-friends flow
    fn show_invite_friends(&mut self);

    /// Replace the root with the login screen
    fn show_login_screen(&mut self);

    /// Replace the root with the join screen
    fn show_join_screen(&mut self);

    /// Present onboarding for the logged-in user
    fn show_onboarding(&mut self, username: &str);

    /// Push a screen onto the selected tab's stack
    fn push_screen(&mut self, screen: Screen);

    /// Present the in-app browser
    fn show_web_view(&mut self, url: &str);

    /// Ask a logged-out user how to continue
    fn present_interstitial(&mut self, prompt: &Interstitial);
}

/// Presenter backed by [`NavigationState`]
///
/// Tab-level filters live beside the navigation state because they are view
/// settings rather than stack entries.
#[derive(Debug, Clone, Default)]
pub struct NavigationPresenter {
    state: NavigationState,
    discover_category: Option<String>,
    stream_filter: Option<StreamFilter>,
    notification_filter: NotificationFilter,
    invite_requested: bool,
    onboarding_user: Option<String>,
    interstitial: Option<Interstitial>,
}

impl NavigationPresenter {
    /// Create a presenter on the startup screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the main tab bar (called by the host once the user is loaded)
    pub fn show_main(&mut self) {
        self.state.show_root(RootScreen::Main);
        self.interstitial = None;
    }

    /// Return to the startup screen
    pub fn show_startup(&mut self) {
        self.state.show_root(RootScreen::Startup);
        self.discover_category = None;
        self.stream_filter = None;
        self.notification_filter = NotificationFilter::All;
    }

    /// Underlying navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Mutable navigation state
    pub fn state_mut(&mut self) -> &mut NavigationState {
        &mut self.state
    }

    /// Category the discover tab is drilled into
    pub fn discover_category(&self) -> Option<&str> {
        self.discover_category.as_deref()
    }

    /// Stream sub-filter, if one was set
    pub fn stream_filter(&self) -> Option<StreamFilter> {
        self.stream_filter
    }

    /// Notifications category filter
    pub fn notification_filter(&self) -> NotificationFilter {
        self.notification_filter
    }

    /// Whether the invite flow was started
    pub fn invite_requested(&self) -> bool {
        self.invite_requested
    }

    /// User onboarding was presented for
    pub fn onboarding_user(&self) -> Option<&str> {
        self.onboarding_user.as_deref()
    }

    /// Prompt currently on screen
    pub fn interstitial(&self) -> Option<&Interstitial> {
        self.interstitial.as_ref()
    }

    /// Dismiss the prompt, returning it
    pub fn take_interstitial(&mut self) -> Option<Interstitial> {
        self.interstitial.take()
    }
}

impl ScreenPresenter for NavigationPresenter {
    fn is_main_visible(&self) -> bool {
        self.state.is_main_visible()
    }

    fn select_tab(&mut self, tab: NavigationTab) {
        self.state.switch_tab(tab);
    }

    fn show_discover_category(&mut self, category: &str) {
        self.state.pop_to_root(NavigationTab::Discover);
        self.discover_category = Some(category.to_string());
    }

    fn show_stream(&mut self, filter: StreamFilter) {
        self.stream_filter = Some(filter);
    }

    fn show_notifications(&mut self, filter: NotificationFilter) {
        self.notification_filter = filter;
    }

    fn show_invite_friends(&mut self) {
        self.invite_requested = true;
    }

    fn show_login_screen(&mut self) {
        self.interstitial = None;
        self.state.show_root(RootScreen::Login);
    }

    fn show_join_screen(&mut self) {
        self.interstitial = None;
        self.state.show_root(RootScreen::Join);
    }

    fn show_onboarding(&mut self, username: &str) {
        self.onboarding_user = Some(username.to_string());
        self.state.present_modal(Screen::Onboarding);
    }

    fn push_screen(&mut self, screen: Screen) {
        if !self.state.navigate(screen) {
            tracing::debug!("no tab bar to push onto; screen dropped");
        }
    }

    fn show_web_view(&mut self, url: &str) {
        self.state.present_modal(Screen::WebView {
            url: url.to_string(),
        });
    }

    fn present_interstitial(&mut self, prompt: &Interstitial) {
        self.interstitial = Some(prompt.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interstitial_choices() {
        let prompt = Interstitial::new("profile/alice");
        assert_eq!(
            prompt.choices(),
            [InterstitialChoice::LogInAndView, InterstitialChoice::OpenExternally]
        );
        assert_eq!(InterstitialChoice::LogInAndView.label(), "Login and view");
    }

    #[test]
    fn test_presenter_starts_without_tab_bar() {
        let mut presenter = NavigationPresenter::new();
        assert!(!presenter.is_main_visible());

        presenter.select_tab(NavigationTab::Discover);
        presenter.push_screen(Screen::Settings);
        assert_eq!(presenter.state().active_tab, NavigationTab::Stream);
        assert!(presenter.state().current_screen().is_none());
    }

    #[test]
    fn test_discover_category_pops_discover_stack() {
        let mut presenter = NavigationPresenter::new();
        presenter.show_main();
        presenter.select_tab(NavigationTab::Discover);
        presenter.push_screen(Screen::Settings);

        presenter.show_discover_category("art");
        assert_eq!(presenter.discover_category(), Some("art"));
        assert_eq!(presenter.state().current_screen(), Some(&Screen::Discover));
    }

    #[test]
    fn test_login_screen_clears_prompt() {
        let mut presenter = NavigationPresenter::new();
        presenter.present_interstitial(&Interstitial::new("alice"));
        assert!(presenter.interstitial().is_some());

        presenter.show_login_screen();
        assert!(presenter.interstitial().is_none());
        assert_eq!(presenter.state().root, RootScreen::Login);
    }

    #[test]
    fn test_modals() {
        let mut presenter = NavigationPresenter::new();
        presenter.show_main();
        presenter.show_web_view("https://ello.co/wtf");
        assert_eq!(
            presenter.state().current_screen(),
            Some(&Screen::WebView {
                url: "https://ello.co/wtf".to_string()
            })
        );

        presenter.state_mut().dismiss_modal();
        presenter.show_onboarding("alice");
        assert_eq!(presenter.onboarding_user(), Some("alice"));
        assert_eq!(presenter.state().current_screen(), Some(&Screen::Onboarding));
    }

    #[test]
    fn test_show_startup_resets_filters() {
        let mut presenter = NavigationPresenter::new();
        presenter.show_main();
        presenter.show_stream(StreamFilter::Noise);
        presenter.show_notifications(NotificationFilter::Loves);

        presenter.show_startup();
        assert!(presenter.stream_filter().is_none());
        assert_eq!(presenter.notification_filter(), NotificationFilter::All);
        assert!(!presenter.is_main_visible());
    }
}
