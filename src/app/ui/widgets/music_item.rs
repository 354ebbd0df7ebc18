use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use unicode_width::UnicodeWidthStr;

use crate::app::config::Palette;
use crate::app::services::{OptionsPanel, PlaybackEngine};
use crate::app::ui::utils::truncate_by_width;
use crate::app::ui::widgets::title_tag::title_and_tag;
use crate::track::{SheetRef, Track};

/// Width of the ordinal / now-playing column
const DECORATION_WIDTH: usize = 5;
const NOW_PLAYING_GLYPH: &str = "♫";
const LOCAL_GLYPH: &str = "✔ ";
const MORE_ICON: &str = " ⋮";
const ACCENT_BAR: &str = "▎";
const SELECTED_MARK: &str = "›";

/// What the leading column of a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecoration {
    Ordinal(usize),
    NowPlaying,
}

impl RowDecoration {
    /// The column only exists when an ordinal is supplied; a playing row
    /// swaps its ordinal for the glyph.
    pub fn resolve(ordinal: Option<usize>, is_playing: bool) -> Option<Self> {
        let ordinal = ordinal?;
        Some(if is_playing {
            RowDecoration::NowPlaying
        } else {
            RowDecoration::Ordinal(ordinal)
        })
    }

    fn label(self) -> String {
        match self {
            RowDecoration::Ordinal(n) => format!("{:^width$}", n, width = DECORATION_WIDTH),
            RowDecoration::NowPlaying => {
                format!("{:^width$}", NOW_PLAYING_GLYPH, width = DECORATION_WIDTH)
            }
        }
    }
}

/// One two-line track row: title + tag, then artist/album.
pub struct MusicItem<'a> {
    track: &'a Track,
    palette: &'a Palette,
    index: Option<usize>,
    playing: bool,
    local: bool,
    selected: bool,
    show_more_icon: bool,
    width: usize,
}

impl<'a> MusicItem<'a> {
    pub fn new(track: &'a Track, palette: &'a Palette, width: usize) -> Self {
        Self {
            track,
            palette,
            index: None,
            playing: false,
            local: false,
            selected: false,
            show_more_icon: true,
            width,
        }
    }

    pub fn index(mut self, index: Option<usize>) -> Self {
        self.index = index;
        self
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn show_more_icon(mut self, show: bool) -> Self {
        self.show_more_icon = show;
        self
    }

    pub fn decoration(&self) -> Option<RowDecoration> {
        RowDecoration::resolve(self.index, self.playing)
    }

    /// Build the two lines of the row.
    pub fn lines(&self) -> [Line<'static>; 2] {
        let palette = self.palette;
        let highlighted = self.playing;

        let lead = if highlighted {
            Span::styled(ACCENT_BAR, Style::default().fg(palette.highlight()))
        } else if self.selected {
            Span::styled(SELECTED_MARK, Style::default().fg(palette.text))
        } else {
            Span::raw(" ")
        };

        let decoration = self.decoration();
        let decoration_width = if decoration.is_some() {
            DECORATION_WIDTH
        } else {
            1
        };
        let more_width = if self.show_more_icon {
            MORE_ICON.width()
        } else {
            0
        };
        let content_width = self
            .width
            .saturating_sub(lead.width() + decoration_width + more_width);

        let decoration_span = match decoration {
            Some(decoration) => {
                let mut style = Style::default().fg(palette.title(highlighted));
                style = if highlighted {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style.add_modifier(Modifier::ITALIC)
                };
                Span::styled(decoration.label(), style)
            }
            None => Span::raw(" "),
        };

        let title = title_and_tag(
            &self.track.title,
            self.track.display_tag(),
            highlighted,
            palette,
            content_width,
        );

        let mut first: Vec<Span<'static>> = vec![lead.clone(), decoration_span];
        let title_width = title.width();
        first.extend(title.spans);
        if self.show_more_icon {
            first.push(Span::raw(" ".repeat(content_width.saturating_sub(title_width))));
            first.push(Span::styled(
                MORE_ICON,
                Style::default().fg(palette.text_secondary),
            ));
        }

        let mut second: Vec<Span<'static>> =
            vec![lead, Span::raw(" ".repeat(decoration_width))];
        let mut description_width = content_width;
        if self.local {
            second.push(Span::styled(LOCAL_GLYPH, Style::default().fg(palette.local)));
            description_width = description_width.saturating_sub(LOCAL_GLYPH.width());
        }
        second.push(Span::styled(
            truncate_by_width(&self.track.description(), description_width),
            Style::default().fg(palette.description(highlighted)),
        ));

        [Line::from(first), Line::from(second)]
    }

    pub fn row_style(&self) -> Style {
        if self.playing {
            Style::default().bg(self.palette.active_row())
        } else if self.selected {
            Style::default().bg(self.palette.card)
        } else {
            Style::default()
        }
    }

    pub fn into_list_item(self) -> ListItem<'static> {
        let style = self.row_style();
        ListItem::new(Vec::from(self.lines())).style(style)
    }
}

/// Activate a row: the custom handler if given, otherwise play the track.
pub fn press(
    track: &Track,
    on_press: Option<&mut dyn FnMut(&Track)>,
    engine: &mut dyn PlaybackEngine,
) {
    match on_press {
        Some(handler) => handler(track),
        None => {
            log::debug!("Playing {}", track.row_key());
            engine.play(track);
        }
    }
}

/// Long-press a row: the custom handler if given, otherwise open its options.
pub fn long_press(
    track: &Track,
    on_long_press: Option<&mut dyn FnMut(&Track)>,
    sheet: Option<&SheetRef>,
    panels: &mut dyn OptionsPanel,
) {
    match on_long_press {
        Some(handler) => handler(track),
        None => open_options(track, sheet, panels),
    }
}

/// The "more" icon: always opens the options panel.
pub fn open_options(track: &Track, sheet: Option<&SheetRef>, panels: &mut dyn OptionsPanel) {
    log::debug!("Opening options for {}", track.row_key());
    panels.show_track_options(track, sheet);
}
