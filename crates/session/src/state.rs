// crates/session/src/state.rs
//! Session states

use shelfkeeper_core::Domain;

/// Where the session is; transitions happen only through menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    MainMenu,
    AddFlow,
    LibraryFlow,
    SettingsFlow,
    Exit,
}

impl MenuState {
    /// States reachable from the main menu, in display order
    pub const MAIN_CHOICES: [MenuState; 4] = [
        MenuState::AddFlow,
        MenuState::LibraryFlow,
        MenuState::SettingsFlow,
        MenuState::Exit,
    ];

    /// Main menu label for this state
    pub fn label(&self, domain: Domain) -> String {
        match self {
            MenuState::MainMenu => "Main menu".to_string(),
            MenuState::AddFlow => format!("Add a new {}", domain.noun()),
            MenuState::LibraryFlow => "View/Manage Library".to_string(),
            MenuState::SettingsFlow => "Settings".to_string(),
            MenuState::Exit => "Exit".to_string(),
        }
    }

    /// Whether the state needs catalog and store access
    pub fn needs_services(&self) -> bool {
        matches!(self, MenuState::AddFlow | MenuState::LibraryFlow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_choices_end_with_exit() {
        assert_eq!(MenuState::MAIN_CHOICES.last(), Some(&MenuState::Exit));
        assert!(!MenuState::MAIN_CHOICES.contains(&MenuState::MainMenu));
    }

    #[test]
    fn test_labels_use_domain_noun() {
        assert_eq!(MenuState::AddFlow.label(Domain::Books), "Add a new book");
        assert_eq!(MenuState::AddFlow.label(Domain::Games), "Add a new game");
    }

    #[test]
    fn test_needs_services() {
        assert!(MenuState::AddFlow.needs_services());
        assert!(!MenuState::SettingsFlow.needs_services());
    }
}
