use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Everything a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    PlaySelected,
    TrackOptions,
    Locate,
    Retry,
    NextTrack,
    PreviousTrack,
    Close,
}

impl Action {
    /// Actions still accepted while a popup covers the list.
    fn allowed_in_popup(self) -> bool {
        matches!(self, Action::Quit | Action::Close)
    }
}

#[derive(Debug)]
pub struct KeyBinds {
    map: HashMap<(KeyModifiers, KeyCode), Action>,
}

impl KeyBinds {
    pub fn new(map: HashMap<(KeyModifiers, KeyCode), Action>) -> Self {
        Self { map }
    }

    /// Resolve a key press. While a popup is open only closing actions pass.
    pub fn handle_key(&self, key: KeyEvent, popup_open: bool) -> Option<Action> {
        let action = self.lookup(key)?;
        if popup_open && !action.allowed_in_popup() {
            return None;
        }
        Some(action)
    }

    fn lookup(&self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = self.map.get(&(key.modifiers, key.code)) {
            return Some(*action);
        }
        // Terminals disagree on whether uppercase letters carry SHIFT
        match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                let toggled = key.modifiers ^ KeyModifiers::SHIFT;
                self.map.get(&(toggled, key.code)).copied()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::BindsConfig;

    fn binds() -> KeyBinds {
        let (map, _) = BindsConfig::default().build_key_map();
        KeyBinds::new(map)
    }

    #[test]
    fn test_plain_key_resolves() {
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(binds().handle_key(key, false), Some(Action::ScrollDown));
    }

    #[test]
    fn test_uppercase_without_shift_modifier() {
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE);
        assert_eq!(binds().handle_key(key, false), Some(Action::GoToBottom));
    }

    #[test]
    fn test_popup_blocks_list_actions() {
        let binds = binds();
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(binds.handle_key(down, true), None);
        assert_eq!(binds.handle_key(esc, true), Some(Action::Close));
    }
}
