//! Menu configuration for the tray.
//!
//! The menu carries a disabled title row showing the tag, followed by
//! Pause, Stop, Statistics, Settings and Quit. The action entries are
//! placeholders: clicking them is logged and has no effect on the session.

use std::fmt;

// ============================================================================
// MenuAction
// ============================================================================

/// Entries in the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Pause,
    Stop,
    Statistics,
    Settings,
    Quit,
}

impl MenuAction {
    /// All entries in display order.
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Pause,
        MenuAction::Stop,
        MenuAction::Statistics,
        MenuAction::Settings,
        MenuAction::Quit,
    ];

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Pause => "Pause",
            MenuAction::Stop => "Stop",
            MenuAction::Statistics => "Statistics",
            MenuAction::Settings => "Settings",
            MenuAction::Quit => "Quit",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// MenuItemConfig / MenuConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
}

impl MenuItemConfig {
    /// Creates a new menu item configuration.
    pub fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
        }
    }
}

/// Complete menu layout.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Title row (always disabled, shows the tag)
    pub title: MenuItemConfig,
    /// Action rows in display order
    pub actions: Vec<(MenuAction, MenuItemConfig)>,
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds the menu layout for a session.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the menu for a session working on `tag`.
    pub fn build(&self, tag: &str) -> MenuConfig {
        MenuConfig {
            title: MenuItemConfig::new(format!("Work on: '{}'", tag), false),
            actions: MenuAction::ALL
                .into_iter()
                .map(|action| (action, MenuItemConfig::new(action.label(), true)))
                .collect(),
        }
    }

    /// Handles a click on an entry. Entries are placeholders, so this only
    /// logs the click.
    pub fn handle_click(&self, action: MenuAction) {
        tracing::info!(action = %action, "tray menu entry clicked (no action bound)");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod menu_action_tests {
        use super::*;

        #[test]
        fn test_labels() {
            let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
            assert_eq!(
                labels,
                vec!["Pause", "Stop", "Statistics", "Settings", "Quit"]
            );
        }

        #[test]
        fn test_display() {
            assert_eq!(MenuAction::Statistics.to_string(), "Statistics");
        }
    }

    mod menu_builder_tests {
        use super::*;

        #[test]
        fn test_title_row_shows_tag() {
            let config = MenuBuilder::new().build("Writing");
            assert_eq!(config.title.text, "Work on: 'Writing'");
            assert!(!config.title.enabled);
        }

        #[test]
        fn test_all_actions_present_and_enabled() {
            let config = MenuBuilder::new().build("x");
            assert_eq!(config.actions.len(), 5);
            assert!(config.actions.iter().all(|(_, item)| item.enabled));
            assert_eq!(config.actions[0].0, MenuAction::Pause);
            assert_eq!(config.actions[4].1.text, "Quit");
        }

        #[test]
        fn test_handle_click_is_noop() {
            let builder = MenuBuilder::default();
            for action in MenuAction::ALL {
                builder.handle_click(action);
            }
        }
    }
}
