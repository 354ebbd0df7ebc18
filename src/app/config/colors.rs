use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Background of the locate button when no highlight color is configured
const LOCATE_BUTTON_FALLBACK: Color = Color::Rgb(0xFF, 0x6B, 0x35);

/// Strength of the primary tint behind the playing row when `list_active` is unset
const ACTIVE_ROW_TINT: f32 = 0.12;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorsConfig {
    #[serde(default = "ColorsConfig::default_primary")]
    pub primary: String,
    #[serde(default = "ColorsConfig::default_text")]
    pub text: String,
    /// Accent for the playing row; falls back to `primary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_highlight: Option<String>,
    #[serde(default = "ColorsConfig::default_text_secondary")]
    pub text_secondary: String,
    /// Tag badge background; falls back to `card`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default = "ColorsConfig::default_card")]
    pub card: String,
    /// Playing row background; falls back to a primary tint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_active: Option<String>,
    #[serde(default = "ColorsConfig::default_local")]
    pub local: String,
    #[serde(default = "ColorsConfig::default_background")]
    pub background: String,
    #[serde(default = "ColorsConfig::default_frame")]
    pub frame: String,
}

impl ColorsConfig {
    fn default_primary() -> String {
        "#F17D34".to_string()
    }

    fn default_text() -> String {
        "#E6E6E6".to_string()
    }

    fn default_text_secondary() -> String {
        "#9A9A9A".to_string()
    }

    fn default_card() -> String {
        "#3A3A3A".to_string()
    }

    fn default_local() -> String {
        "#11659A".to_string()
    }

    fn default_background() -> String {
        "#1C1C1C".to_string()
    }

    fn default_frame() -> String {
        "#5C5C5C".to_string()
    }

    /// Parse a hex color string like "#FF5500" into RGB values
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    fn color(hex: &str, fallback: Color) -> Color {
        Self::parse_hex(hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(fallback)
    }

    fn optional(hex: &Option<String>) -> Option<Color> {
        hex.as_deref()
            .filter(|hex| !hex.is_empty())
            .and_then(Self::parse_hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
    }

    /// Resolve configured strings into a [`Palette`].
    pub fn palette(&self) -> Palette {
        Palette {
            primary: Self::color(&self.primary, Color::LightRed),
            text: Self::color(&self.text, Color::White),
            text_highlight: Self::optional(&self.text_highlight),
            text_secondary: Self::color(&self.text_secondary, Color::Gray),
            border: Self::optional(&self.border),
            card: Self::color(&self.card, Color::DarkGray),
            list_active: Self::optional(&self.list_active),
            local: Self::color(&self.local, Color::Blue),
            background: Self::color(&self.background, Color::Black),
            frame: Self::color(&self.frame, Color::Gray),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            primary: Self::default_primary(),
            text: Self::default_text(),
            text_highlight: None,
            text_secondary: Self::default_text_secondary(),
            border: None,
            card: Self::default_card(),
            list_active: None,
            local: Self::default_local(),
            background: Self::default_background(),
            frame: Self::default_frame(),
        }
    }
}

/// Colors keyed by semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub text: Color,
    pub text_highlight: Option<Color>,
    pub text_secondary: Color,
    pub border: Option<Color>,
    pub card: Color,
    pub list_active: Option<Color>,
    pub local: Color,
    pub background: Color,
    pub frame: Color,
}

impl Default for Palette {
    fn default() -> Self {
        ColorsConfig::default().palette()
    }
}

impl Palette {
    /// Accent used for everything "now playing".
    pub fn highlight(&self) -> Color {
        self.text_highlight.unwrap_or(self.primary)
    }

    pub fn title(&self, highlighted: bool) -> Color {
        if highlighted { self.highlight() } else { self.text }
    }

    pub fn description(&self, highlighted: bool) -> Color {
        if highlighted {
            self.highlight()
        } else {
            self.text_secondary
        }
    }

    pub fn tag_background(&self, highlighted: bool) -> Color {
        if highlighted {
            self.highlight()
        } else {
            self.border.unwrap_or(self.card)
        }
    }

    pub fn tag_text(&self, highlighted: bool) -> Color {
        if highlighted {
            Color::White
        } else {
            self.text_secondary
        }
    }

    /// Background of the playing row.
    pub fn active_row(&self) -> Color {
        self.list_active.unwrap_or_else(|| {
            crate::app::ui::utils::blend(self.primary, self.background, ACTIVE_ROW_TINT)
        })
    }

    pub fn locate_button(&self) -> Color {
        self.text_highlight.unwrap_or(LOCATE_BUTTON_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(ColorsConfig::parse_hex("#FF5500"), Some((255, 85, 0)));
        assert_eq!(ColorsConfig::parse_hex("11659a"), Some((17, 101, 154)));
        assert_eq!(ColorsConfig::parse_hex("#FFF"), None);
        assert_eq!(ColorsConfig::parse_hex("#GG0000"), None);
    }

    #[test]
    fn test_highlight_falls_back_to_primary() {
        let palette = ColorsConfig::default().palette();
        assert_eq!(palette.highlight(), palette.primary);
        assert_eq!(palette.title(true), palette.primary);
        assert_eq!(palette.title(false), palette.text);
        assert_eq!(palette.locate_button(), LOCATE_BUTTON_FALLBACK);
    }

    #[test]
    fn test_explicit_highlight_wins() {
        let colors = ColorsConfig {
            text_highlight: Some("#00FF00".to_string()),
            ..Default::default()
        };
        let palette = colors.palette();
        assert_eq!(palette.highlight(), Color::Rgb(0, 255, 0));
        assert_eq!(palette.description(true), Color::Rgb(0, 255, 0));
        assert_eq!(palette.locate_button(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_tag_background_falls_back_to_card() {
        let palette = ColorsConfig::default().palette();
        assert_eq!(palette.tag_background(false), palette.card);

        let colors = ColorsConfig {
            border: Some("#101010".to_string()),
            ..Default::default()
        };
        assert_eq!(
            colors.palette().tag_background(false),
            Color::Rgb(16, 16, 16)
        );
    }

    #[test]
    fn test_empty_optional_is_unset() {
        let colors = ColorsConfig {
            list_active: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(colors.palette().list_active, None);
    }
}
