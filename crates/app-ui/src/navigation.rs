//! Navigation model for Ello Router
//!
//! This module provides the screen graph that deep links land in:
//! - Root screen swapping (startup, login, join, main tabs)
//! - Tab navigation
//! - Per-tab navigation stacks
//! - Modal presentation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Screens
// =============================================================================

/// Screens that can appear on a navigation stack or as a modal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params")]
pub enum Screen {
    // Tab roots
    /// Discover tab root
    Discover,
    /// Notifications tab root
    Notifications,
    /// Stream tab root
    Stream,
    /// Current user's profile tab root
    CurrentProfile,
    /// Post composer tab root
    Omnibar,

    // Pushed detail screens
    /// Profile view
    Profile {
        /// Lookup parameter: `~username` or a numeric id
        user_param: String,
        /// Deep link that opened this screen
        #[serde(skip_serializing_if = "Option::is_none")]
        deep_link_path: Option<String>,
    },
    /// Post detail view
    PostDetail {
        /// Lookup parameter: `~token` or a numeric id
        post_param: String,
        /// Deep link that opened this screen
        #[serde(skip_serializing_if = "Option::is_none")]
        deep_link_path: Option<String>,
    },
    /// Followers list
    ProfileFollowers {
        /// Username whose followers are listed
        username: String,
        /// The list belongs to the logged-in user
        is_current_user: bool,
    },
    /// Following list
    ProfileFollowing {
        /// Username whose follows are listed
        username: String,
        /// The list belongs to the logged-in user
        is_current_user: bool,
    },
    /// Loved posts list
    ProfileLoves {
        /// Username whose loves are listed
        username: String,
        /// The list belongs to the logged-in user
        is_current_user: bool,
    },
    /// Search
    Search {
        /// Terms to search posts for immediately
        #[serde(skip_serializing_if = "Option::is_none")]
        terms: Option<String>,
    },
    /// Settings
    Settings,

    // Modals
    /// Onboarding flow
    Onboarding,
    /// In-app browser
    WebView {
        /// URL being shown
        url: String,
    },
}

impl Screen {
    /// Lookup parameter for a user or post identifier
    ///
    /// Slugs are prefixed with `~`; numeric ids are used as-is.
    pub fn lookup_param(identifier: &str, is_slug: bool) -> String {
        if is_slug {
            format!("~{}", identifier)
        } else {
            identifier.to_string()
        }
    }
}

// =============================================================================
// Root Screens
// =============================================================================

/// Which top-level controller fills the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RootScreen {
    /// Logo and login/join buttons
    #[default]
    Startup,
    /// Login form
    Login,
    /// Join form
    Join,
    /// Tab bar with per-tab stacks
    Main,
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Discover tab
    Discover,
    /// Notifications tab
    Notifications,
    /// Primary stream tab
    #[default]
    Stream,
    /// Current user's profile
    Profile,
    /// Composer
    Omnibar,
}

impl NavigationTab {
    /// Get the root screen for this tab
    pub fn root_screen(&self) -> Screen {
        match self {
            NavigationTab::Discover => Screen::Discover,
            NavigationTab::Notifications => Screen::Notifications,
            NavigationTab::Stream => Screen::Stream,
            NavigationTab::Profile => Screen::CurrentProfile,
            NavigationTab::Omnibar => Screen::Omnibar,
        }
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 5] {
        [
            NavigationTab::Discover,
            NavigationTab::Notifications,
            NavigationTab::Stream,
            NavigationTab::Profile,
            NavigationTab::Omnibar,
        ]
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The screen
    pub screen: Screen,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Navigation stack for a tab
///
/// Never empty: the root entry cannot be popped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    pushed: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root screen
    pub fn new(root: Screen) -> Self {
        Self {
            root: StackEntry::new(root),
            pushed: Vec::new(),
        }
    }

    /// Push a screen onto the stack
    pub fn push(&mut self, screen: Screen) {
        self.pushed.push(StackEntry::new(screen));
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.pushed.clear();
    }

    /// Get the current (top) screen
    pub fn current(&self) -> &Screen {
        &self.pushed.last().unwrap_or(&self.root).screen
    }

    /// Get stack depth, counting the root
    pub fn depth(&self) -> usize {
        self.pushed.len() + 1
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Top-level screen
    pub root: RootScreen,
    /// Current active tab (meaningful when `root` is `Main`)
    pub active_tab: NavigationTab,
    /// Stacks for each tab
    pub tab_stacks: HashMap<NavigationTab, NavigationStack>,
    /// Modal stack (overlays on top of everything else)
    pub modal_stack: Vec<StackEntry>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            root: RootScreen::Startup,
            active_tab: NavigationTab::default(),
            tab_stacks: Self::fresh_stacks(),
            modal_stack: Vec::new(),
        }
    }
}

impl NavigationState {
    /// Create a new navigation state on the startup screen
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_stacks() -> HashMap<NavigationTab, NavigationStack> {
        NavigationTab::all()
            .into_iter()
            .map(|tab| (tab, NavigationStack::new(tab.root_screen())))
            .collect()
    }

    /// Whether the tab bar is on screen
    pub fn is_main_visible(&self) -> bool {
        self.root == RootScreen::Main
    }

    /// Swap the top-level screen
    ///
    /// Entering `Main` starts from fresh tab stacks; leaving it discards them.
    pub fn show_root(&mut self, root: RootScreen) {
        if self.root == root {
            return;
        }
        self.root = root;
        self.tab_stacks = Self::fresh_stacks();
        self.active_tab = NavigationTab::default();
        self.modal_stack.clear();
    }

    /// Get the stack for a tab
    pub fn stack(&self, tab: NavigationTab) -> Option<&NavigationStack> {
        self.tab_stacks.get(&tab)
    }

    /// Get the current stack for the active tab
    pub fn current_stack(&self) -> Option<&NavigationStack> {
        self.tab_stacks.get(&self.active_tab)
    }

    /// Get the current screen, considering modals
    ///
    /// `None` while the tab bar is not visible and no modal is presented.
    pub fn current_screen(&self) -> Option<&Screen> {
        if let Some(modal) = self.modal_stack.last() {
            return Some(&modal.screen);
        }
        if !self.is_main_visible() {
            return None;
        }
        self.current_stack().map(NavigationStack::current)
    }

    /// Push a screen onto the active tab's stack
    ///
    /// Does nothing unless the tab bar is visible.
    pub fn navigate(&mut self, screen: Screen) -> bool {
        if !self.is_main_visible() {
            return false;
        }
        match self.tab_stacks.get_mut(&self.active_tab) {
            Some(stack) => {
                stack.push(screen);
                true
            }
            None => false,
        }
    }

    /// Switch to a tab
    pub fn switch_tab(&mut self, tab: NavigationTab) -> bool {
        if !self.is_main_visible() {
            return false;
        }
        self.active_tab = tab;
        true
    }

    /// Pop a tab's stack back to its root
    pub fn pop_to_root(&mut self, tab: NavigationTab) {
        if let Some(stack) = self.tab_stacks.get_mut(&tab) {
            stack.pop_to_root();
        }
    }

    /// Present a modal
    pub fn present_modal(&mut self, screen: Screen) {
        self.modal_stack.push(StackEntry::new(screen));
    }

    /// Dismiss the top modal
    pub fn dismiss_modal(&mut self) -> bool {
        self.modal_stack.pop().is_some()
    }

    /// Check if any modals are presented
    pub fn has_modals(&self) -> bool {
        !self.modal_stack.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn main_state() -> NavigationState {
        let mut state = NavigationState::new();
        state.show_root(RootScreen::Main);
        state
    }

    #[test]
    fn test_lookup_param() {
        assert_eq!(Screen::lookup_param("alice", true), "~alice");
        assert_eq!(Screen::lookup_param("42", false), "42");
    }

    #[test]
    fn test_navigation_tab_root_screens() {
        assert_eq!(NavigationTab::Discover.root_screen(), Screen::Discover);
        assert_eq!(NavigationTab::Profile.root_screen(), Screen::CurrentProfile);
        assert_eq!(NavigationTab::all().len(), 5);
    }

    #[test]
    fn test_navigation_stack_push_and_pop_to_root() {
        let mut stack = NavigationStack::new(Screen::Stream);
        assert_eq!(stack.depth(), 1);

        stack.push(Screen::Settings);
        stack.push(Screen::Search { terms: None });
        assert_eq!(stack.depth(), 3);
        assert_eq!(*stack.current(), Screen::Search { terms: None });

        stack.pop_to_root();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.current(), Screen::Stream);

        // Root survives repeated pops
        stack.pop_to_root();
        assert_eq!(*stack.current(), Screen::Stream);
    }

    #[test]
    fn test_startup_state_has_no_current_screen() {
        let mut state = NavigationState::new();
        assert!(!state.is_main_visible());
        assert!(state.current_screen().is_none());

        // Tab operations are ignored without a tab bar
        assert!(!state.switch_tab(NavigationTab::Discover));
        assert!(!state.navigate(Screen::Settings));
        assert_eq!(state.active_tab, NavigationTab::Stream);
    }

    #[test]
    fn test_navigate_and_switch_tab() {
        let mut state = main_state();
        assert_eq!(state.current_screen(), Some(&Screen::Stream));

        assert!(state.switch_tab(NavigationTab::Discover));
        assert!(state.navigate(Screen::Settings));
        assert_eq!(state.current_screen(), Some(&Screen::Settings));
        assert_eq!(state.current_stack().map(NavigationStack::depth), Some(2));

        state.pop_to_root(NavigationTab::Discover);
        assert_eq!(state.current_screen(), Some(&Screen::Discover));
    }

    #[test]
    fn test_modal_over_stack() {
        let mut state = main_state();
        state.present_modal(Screen::Onboarding);
        assert!(state.has_modals());
        assert_eq!(state.current_screen(), Some(&Screen::Onboarding));

        assert!(state.dismiss_modal());
        assert!(!state.has_modals());
        assert!(!state.dismiss_modal());
        assert_eq!(state.current_screen(), Some(&Screen::Stream));
    }

    #[test]
    fn test_show_root_resets_stacks() {
        let mut state = main_state();
        state.navigate(Screen::Settings);
        state.show_root(RootScreen::Login);
        assert!(!state.is_main_visible());

        state.show_root(RootScreen::Main);
        assert_eq!(state.current_screen(), Some(&Screen::Stream));
        assert_eq!(state.current_stack().map(NavigationStack::depth), Some(1));
    }

    #[test]
    fn test_navigation_state_serialization() {
        let state = main_state();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.active_tab, parsed.active_tab);
        assert_eq!(parsed.root, RootScreen::Main);
    }
}
