use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::config::Palette;
use crate::app::ui::utils::{blend, bottom_right};

const LABEL: &str = " ⌖ ";
const BUTTON_WIDTH: u16 = 7;
const BUTTON_HEIGHT: u16 = 3;
const RIGHT_INSET: u16 = 2;
const BOTTOM_INSET: u16 = 1;

/// Area the locate button occupies inside `list_area`.
pub fn locate_button_area(list_area: Rect) -> Rect {
    bottom_right(list_area, BUTTON_WIDTH, BUTTON_HEIGHT, RIGHT_INSET, BOTTOM_INSET)
}

/// Draw the floating locate button faded to `opacity`.
pub fn render_locate_button(
    frame: &mut Frame<'_>,
    list_area: Rect,
    opacity: f32,
    key_hint: &str,
    palette: &Palette,
) {
    if opacity <= 0.0 {
        return;
    }
    let area = locate_button_area(list_area);
    if area.width < BUTTON_WIDTH || area.height < BUTTON_HEIGHT {
        return;
    }

    let button = blend(palette.locate_button(), palette.background, opacity);
    let glyph = blend(Color::Rgb(0xFF, 0xFF, 0xFF), palette.background, opacity);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(button))
        .title_bottom(Line::from(Span::styled(
            key_hint.to_string(),
            Style::default().fg(button),
        )))
        .style(Style::default().bg(palette.background));

    let label = Paragraph::new(Line::from(Span::styled(
        LABEL,
        Style::default()
            .fg(glyph)
            .bg(button)
            .add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(label, area);
}
