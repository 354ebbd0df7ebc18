use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within the given display width, handling Unicode properly.
///
/// Appends an ellipsis when something was cut off.
pub fn truncate_by_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width + 1 > max_width {
            break;
        }
        result.push(ch);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Mix `fg` into `bg`; `alpha` 1.0 gives `fg`.
///
/// Non-RGB colors cannot be mixed and snap to whichever side dominates.
pub fn blend(fg: Color, bg: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f32 + (f as f32 - b as f32) * alpha).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if alpha >= 0.5 => fg,
        _ => bg,
    }
}

/// Helper function to center a rect within another rect
pub fn center_area(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

/// Rect of `width`×`height` anchored to the bottom-right corner of `area`,
/// inset by `right` columns and `bottom` lines.
pub fn bottom_right(area: Rect, width: u16, height: u16, right: u16, bottom: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area
        .x
        .saturating_add(area.width.saturating_sub(width.saturating_add(right)));
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height.saturating_add(bottom)));
    Rect {
        x: x.max(area.x),
        y: y.max(area.y),
        width,
        height,
    }
}
