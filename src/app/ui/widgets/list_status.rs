use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::config::Palette;
use crate::app::services::RequestState;

/// Placeholder shown instead of rows when the list is empty.
pub fn list_empty<'a>(state: RequestState, retry_key: &str, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(empty_lines(state, retry_key, palette)).centered()
}

fn empty_lines<'a>(state: RequestState, retry_key: &str, palette: &Palette) -> Vec<Line<'a>> {
    let secondary = Style::default().fg(palette.text_secondary);
    match state {
        RequestState::PendingFirstPage | RequestState::PendingRestPage => {
            vec![Line::from(Span::styled("Loading…", secondary))]
        }
        RequestState::Error => vec![
            Line::from(Span::styled(
                "Failed to load",
                Style::default().fg(palette.highlight()),
            )),
            Line::from(Span::styled(format!("Press {} to retry", retry_key), secondary)),
        ],
        RequestState::Idle | RequestState::PartlyDone | RequestState::Finished => {
            vec![Line::from(Span::styled(
                "Nothing here yet",
                secondary.add_modifier(Modifier::ITALIC),
            ))]
        }
    }
}

/// Footer line below the last row; `None` when there is nothing to say.
pub fn list_footer<'a>(
    state: RequestState,
    retry_key: &str,
    palette: &Palette,
) -> Option<Line<'a>> {
    let secondary = Style::default().fg(palette.text_secondary);
    let line = match state {
        state if state.is_loading() => Line::from(Span::styled("Loading more…", secondary)),
        RequestState::Error => Line::from(vec![
            Span::styled("Load failed ", Style::default().fg(palette.highlight())),
            Span::styled(format!("({} to retry)", retry_key), secondary),
        ]),
        RequestState::Finished => Line::from(Span::styled(
            "── end of list ──",
            secondary.add_modifier(Modifier::DIM),
        )),
        _ => return None,
    };
    Some(line.centered())
}
