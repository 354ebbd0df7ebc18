use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::app::config::Palette;
use crate::app::ui::utils::truncate_by_width;

/// Cells between the title and the badge
const BADGE_GAP: usize = 1;

/// Title followed by an optional pill-shaped tag badge.
///
/// The title gets whatever width the badge leaves over and is truncated to
/// it. An absent or empty tag renders no badge.
pub fn title_and_tag<'a>(
    title: &str,
    tag: Option<&str>,
    highlighted: bool,
    palette: &Palette,
    width: usize,
) -> Line<'a> {
    let mut title_style = Style::default().fg(palette.title(highlighted));
    if highlighted {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let badge = tag.filter(|tag| !tag.is_empty()).map(|tag| format!(" {} ", tag));
    let badge_width = badge
        .as_ref()
        .map(|badge| badge.width() + BADGE_GAP)
        .unwrap_or(0);

    // The badge gives way first when space is tight
    let badge = badge.filter(|_| badge_width < width);
    let title_width = match badge {
        Some(_) => width - badge_width,
        None => width,
    };

    let mut spans = vec![Span::styled(
        truncate_by_width(title, title_width),
        title_style,
    )];

    if let Some(badge) = badge {
        spans.push(Span::raw(" ".repeat(BADGE_GAP)));
        spans.push(Span::styled(
            badge,
            Style::default()
                .fg(palette.tag_text(highlighted))
                .bg(palette.tag_background(highlighted))
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}
