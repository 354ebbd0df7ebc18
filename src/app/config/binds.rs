use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::app::binds::Action;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindsConfig {
    #[serde(default = "BindsConfig::default_quit")]
    pub quit: Vec<String>,
    #[serde(default = "BindsConfig::default_scroll_up")]
    pub scroll_up: Vec<String>,
    #[serde(default = "BindsConfig::default_scroll_down")]
    pub scroll_down: Vec<String>,
    #[serde(default = "BindsConfig::default_page_up")]
    pub page_up: Vec<String>,
    #[serde(default = "BindsConfig::default_page_down")]
    pub page_down: Vec<String>,
    #[serde(default = "BindsConfig::default_go_to_top")]
    pub go_to_top: Vec<String>,
    #[serde(default = "BindsConfig::default_go_to_bottom")]
    pub go_to_bottom: Vec<String>,
    #[serde(default = "BindsConfig::default_play_selected")]
    pub play_selected: Vec<String>,
    #[serde(default = "BindsConfig::default_track_options")]
    pub track_options: Vec<String>,
    #[serde(default = "BindsConfig::default_locate")]
    pub locate: Vec<String>,
    #[serde(default = "BindsConfig::default_retry")]
    pub retry: Vec<String>,
    #[serde(default = "BindsConfig::default_next")]
    pub next: Vec<String>,
    #[serde(default = "BindsConfig::default_previous")]
    pub previous: Vec<String>,
    #[serde(default = "BindsConfig::default_close")]
    pub close: Vec<String>,
}

impl BindsConfig {
    fn default_quit() -> Vec<String> {
        vec!["q".to_string(), "ctrl-c".to_string()]
    }

    fn default_scroll_up() -> Vec<String> {
        vec!["k".to_string(), "up".to_string()]
    }

    fn default_scroll_down() -> Vec<String> {
        vec!["j".to_string(), "down".to_string()]
    }

    fn default_page_up() -> Vec<String> {
        vec!["ctrl-u".to_string(), "pageup".to_string()]
    }

    fn default_page_down() -> Vec<String> {
        vec!["ctrl-d".to_string(), "pagedown".to_string()]
    }

    fn default_go_to_top() -> Vec<String> {
        vec!["g".to_string(), "home".to_string()]
    }

    fn default_go_to_bottom() -> Vec<String> {
        vec!["shift-g".to_string(), "end".to_string()]
    }

    fn default_play_selected() -> Vec<String> {
        vec!["enter".to_string()]
    }

    fn default_track_options() -> Vec<String> {
        vec!["o".to_string()]
    }

    fn default_locate() -> Vec<String> {
        vec!["l".to_string()]
    }

    fn default_retry() -> Vec<String> {
        vec!["r".to_string()]
    }

    fn default_next() -> Vec<String> {
        vec!["n".to_string()]
    }

    fn default_previous() -> Vec<String> {
        vec!["p".to_string()]
    }

    fn default_close() -> Vec<String> {
        vec!["esc".to_string()]
    }

    /// Parse a key string like "ctrl-d", "shift-g" or "enter".
    pub fn parse_keybinding(key_str: &str) -> Option<(KeyModifiers, KeyCode)> {
        let key_str = key_str.to_lowercase();

        // Special case for standalone "-" character
        if key_str == "-" {
            return Some((KeyModifiers::NONE, KeyCode::Char('-')));
        }

        let parts: Vec<&str> = key_str.split('-').collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts {
            match *part {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match *key_part {
            "esc" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "delete" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
            c if c.chars().count() == 1 => {
                let ch = c.chars().next()?;
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(ch.to_ascii_uppercase())
                } else {
                    KeyCode::Char(ch)
                }
            }
            _ => return None,
        };

        Some((modifiers, code))
    }

    fn bindings(&self) -> [(&[String], Action); 14] {
        [
            (self.quit.as_slice(), Action::Quit),
            (self.scroll_up.as_slice(), Action::ScrollUp),
            (self.scroll_down.as_slice(), Action::ScrollDown),
            (self.page_up.as_slice(), Action::PageUp),
            (self.page_down.as_slice(), Action::PageDown),
            (self.go_to_top.as_slice(), Action::GoToTop),
            (self.go_to_bottom.as_slice(), Action::GoToBottom),
            (self.play_selected.as_slice(), Action::PlaySelected),
            (self.track_options.as_slice(), Action::TrackOptions),
            (self.locate.as_slice(), Action::Locate),
            (self.retry.as_slice(), Action::Retry),
            (self.next.as_slice(), Action::NextTrack),
            (self.previous.as_slice(), Action::PreviousTrack),
            (self.close.as_slice(), Action::Close),
        ]
    }

    /// Build the key map, returning warnings for strings that failed to parse.
    pub fn build_key_map(&self) -> (HashMap<(KeyModifiers, KeyCode), Action>, Vec<String>) {
        let mut map = HashMap::new();
        let mut warnings = Vec::new();

        for (keys, action) in self.bindings() {
            for key in keys {
                match Self::parse_keybinding(key) {
                    Some(binding) => {
                        if let Some(previous) = map.insert(binding, action) {
                            warnings.push(format!(
                                "Key '{}' bound to both {:?} and {:?}",
                                key, previous, action
                            ));
                        }
                    }
                    None => warnings.push(format!("Invalid key binding for {:?}: '{}'", action, key)),
                }
            }
        }

        (map, warnings)
    }

    /// First configured key for `action`, for on-screen hints.
    pub fn hint(&self, action: Action) -> String {
        self.bindings()
            .into_iter()
            .find(|(_, bound)| *bound == action)
            .and_then(|(keys, _)| keys.first().cloned())
            .unwrap_or_default()
    }
}

impl Default for BindsConfig {
    fn default() -> Self {
        Self {
            quit: Self::default_quit(),
            scroll_up: Self::default_scroll_up(),
            scroll_down: Self::default_scroll_down(),
            page_up: Self::default_page_up(),
            page_down: Self::default_page_down(),
            go_to_top: Self::default_go_to_top(),
            go_to_bottom: Self::default_go_to_bottom(),
            play_selected: Self::default_play_selected(),
            track_options: Self::default_track_options(),
            locate: Self::default_locate(),
            retry: Self::default_retry(),
            next: Self::default_next(),
            previous: Self::default_previous(),
            close: Self::default_close(),
        }
    }
}
