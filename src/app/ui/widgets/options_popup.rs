use ratatui::{
    Frame,
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::config::Palette;
use crate::app::ui::utils::{center_area, truncate_by_width};
use crate::track::{SheetRef, Track};

/// Render the track options sheet centered on screen.
pub fn render_options_popup(
    frame: &mut Frame<'_>,
    track: &Track,
    sheet: Option<&SheetRef>,
    is_local: bool,
    palette: &Palette,
) {
    let area = center_area(
        frame.area(),
        Constraint::Percentage(60),
        Constraint::Length(9),
    );
    let text_width = area.width.saturating_sub(4) as usize;

    let label = Style::default().fg(palette.text_secondary);
    let value = Style::default().fg(palette.text);
    let field = |name: &'static str, text: &str| {
        Line::from(vec![
            Span::styled(format!(" {:<8}", name), label),
            Span::styled(truncate_by_width(text, text_width.saturating_sub(9)), value),
        ])
    };

    let mut lines = vec![
        field("Title", &track.title),
        field("Artist", &track.artist),
        field("Album", track.album.as_deref().unwrap_or("-")),
        field("Source", &format!("{} / {}", track.platform, track.id)),
        field("Local", if is_local { "yes" } else { "no" }),
    ];
    if let Some(sheet) = sheet {
        lines.push(field("Sheet", &sheet.title));
    }
    lines.push(Line::from(Span::styled("Esc to close", label)).centered());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.highlight()))
        .title(Line::from(" Options ").fg(palette.highlight()))
        .style(Style::default().bg(palette.background));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
