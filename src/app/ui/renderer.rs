use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::app::binds::Action;
use crate::app::config::Palette;
use crate::app::services::{LocalStore, PlaybackEngine};
use crate::app::ui::utils::truncate_by_width;
use crate::app::ui::widgets::render_options_popup;
use crate::track::Track;

/// Now-playing line above the list
fn render_now_playing(frame: &mut Frame, area: Rect, current: Option<&Track>, palette: &Palette) {
    let line = match current {
        Some(track) => {
            let width = area.width.saturating_sub(4) as usize;
            let text = format!("{} · {}", track.title, track.description());
            Line::from(vec![
                Span::styled(" ♫ ", Style::default().fg(palette.highlight())),
                Span::styled(
                    truncate_by_width(&text, width),
                    Style::default().fg(palette.text),
                ),
            ])
        }
        None => Line::from(Span::styled(
            " Nothing playing",
            Style::default().fg(palette.text_secondary),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Key hints below the list
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(app.palette.highlight());
    let label = Style::default().fg(app.palette.text_secondary);

    let spans: Vec<Span> = [
        (Action::PlaySelected, "play"),
        (Action::TrackOptions, "options"),
        (Action::Locate, "locate"),
        (Action::NextTrack, "next"),
        (Action::PreviousTrack, "prev"),
        (Action::Quit, "quit"),
    ]
    .into_iter()
    .flat_map(|(action, name)| {
        [
            Span::styled(format!(" {}", app.config.binds.hint(action)), key),
            Span::styled(format!(" {} ", name), label),
        ]
    })
    .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render config warnings popup centered on screen
fn render_config_warnings_popup(frame: &mut Frame, warnings: &[String], palette: &Palette) {
    let area = frame.area();

    let title = " Config Warnings ";
    let footer = "Press any key to close";

    let max_content_width = warnings
        .iter()
        .map(|w| w.width())
        .max()
        .unwrap_or(20)
        .max(title.width())
        .max(footer.width());

    // Content + padding (2 on each side) + borders (1 on each side)
    let popup_width = (max_content_width + 6).min(area.width.saturating_sub(4) as usize) as u16;
    let text_width = popup_width.saturating_sub(4) as usize;

    // Warnings + blank line after title + blank line before footer + footer + borders
    let popup_height = (warnings.len() + 5).min(area.height.saturating_sub(4) as usize) as u16;

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(warnings.iter().map(|warning| {
        Line::from(Span::styled(
            format!(" {}", truncate_by_width(warning, text_width)),
            Style::default().fg(palette.text),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(footer, Style::default().fg(palette.primary))).centered(),
    );

    let popup_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.highlight()))
        .title(Line::from(title).fg(palette.primary))
        .style(Style::default().bg(palette.background));

    frame.render_widget(
        Paragraph::new(lines)
            .block(popup_block)
            .alignment(Alignment::Left),
        popup_area,
    );
}

/// Renders the user interface.
pub fn render(frame: &mut Frame<'_>, app: &mut App, now: Instant) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.palette.background)),
        area,
    );

    let [top, middle, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let current = app.player.current_track();
    render_now_playing(frame, top, current, &app.palette);

    app.list.render(
        frame,
        middle,
        &app.palette,
        current,
        &app.library,
        &app.catalog,
        &app.hints,
        now,
    );

    render_help(frame, bottom, app);

    if let Some((track, sheet)) = app.popup.current() {
        render_options_popup(frame, track, sheet, app.library.is_local(track), &app.palette);
    }

    if app.show_config_warnings_popup && !app.config_warnings.is_empty() {
        render_config_warnings_popup(frame, &app.config_warnings, &app.palette);
    }
}
