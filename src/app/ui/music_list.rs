//! The music list: a virtualized track list with a now-playing highlight,
//! load-more / retry plumbing and the locate overlay.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, List, ListItem, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

use crate::app::config::{ListConfig, Palette};
use crate::app::services::{DataSource, LocalStore, PlaybackEngine, RequestState, Services};
use crate::app::ui::locate::{LocateOutcome, LocateOverlay};
use crate::app::ui::viewport::Viewport;
use crate::app::ui::widgets::locate_button::locate_button_area;
use crate::app::ui::widgets::{
    MusicItem, list_empty, list_footer, music_item, render_locate_button,
};
use crate::track::{SheetRef, Track, is_current};

/// Lines per track row (title line + description line)
pub const ROW_HEIGHT: u16 = 2;

/// Rows narrower than this drop the "more" icon
const MORE_ICON_MIN_WIDTH: usize = 24;

pub type ItemPressHandler = Box<dyn FnMut(&Track, &[Track], &mut dyn PlaybackEngine)>;
pub type ItemLongPressHandler = Box<dyn FnMut(&Track, &mut dyn PlaybackEngine)>;

/// Press handler that plays only the pressed track, leaving the queue alone.
pub fn play_pressed_only() -> ItemPressHandler {
    Box::new(|track: &Track, _: &[Track], engine: &mut dyn PlaybackEngine| {
        music_item::press(track, None, engine)
    })
}

/// Long-press handler that plays the track instead of opening its options.
pub fn play_on_long_press() -> ItemLongPressHandler {
    Box::new(|track: &Track, engine: &mut dyn PlaybackEngine| {
        music_item::press(track, None, engine)
    })
}

/// A scroll gesture coming from the keyboard or the mouse wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollInput {
    /// Move the selection by n rows
    Select(isize),
    /// Move the selection by n pages
    Page(isize),
    Top,
    Bottom,
    /// Scroll the viewport by n rows without moving the selection
    Wheel(isize),
}

/// Key hints shown inside the list.
#[derive(Debug, Clone, Default)]
pub struct ListHints {
    pub retry: String,
    pub locate: String,
}

pub struct MusicList {
    tracks: Vec<Track>,
    viewport: Viewport,
    overlay: LocateOverlay,
    header: Option<String>,
    sheet: Option<SheetRef>,
    show_index: bool,
    end_reached_threshold: f32,
    /// Row count at which load-more last fired; a new page re-arms it
    end_reached_at_len: Option<usize>,
    on_item_press: Option<ItemPressHandler>,
    on_item_long_press: Option<ItemLongPressHandler>,
    /// Inner area of the last render, for mouse hit testing
    list_area: Option<Rect>,
}

impl MusicList {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            tracks: Vec::new(),
            viewport: Viewport::new(ROW_HEIGHT),
            overlay: LocateOverlay::new(
                Duration::from_millis(config.locate_hide_delay_ms),
                Duration::from_millis(config.locate_fade_ms),
                ROW_HEIGHT as usize,
            ),
            header: None,
            sheet: None,
            show_index: config.show_index,
            end_reached_threshold: config.end_reached_threshold.max(0.0),
            end_reached_at_len: None,
            on_item_press: None,
            on_item_long_press: None,
            list_area: None,
        }
    }

    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    pub fn with_sheet(mut self, sheet: Option<SheetRef>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Replace the default press behavior (play with the list as queue).
    pub fn with_item_press(mut self, handler: ItemPressHandler) -> Self {
        self.on_item_press = Some(handler);
        self
    }

    /// Replace the default long-press behavior (open the options panel).
    pub fn with_item_long_press(mut self, handler: ItemLongPressHandler) -> Self {
        self.on_item_long_press = Some(handler);
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn overlay(&self) -> &LocateOverlay {
        &self.overlay
    }

    pub fn sheet(&self) -> Option<&SheetRef> {
        self.sheet.as_ref()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.viewport
            .selected()
            .and_then(|index| self.tracks.get(index))
    }

    /// Replace the rows, keeping the selection on the same track when possible.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        let selected_key = self.selected_track().map(Track::row_key);

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            let key = track.row_key();
            if !seen.insert(key) {
                log::warn!("Duplicate row key in music list: {}", track.row_key());
            }
        }

        log::debug!("Music list updated: {} -> {} rows", self.tracks.len(), tracks.len());
        self.tracks = tracks;
        self.viewport.set_len(self.tracks.len());

        if let Some(index) = selected_key
            .and_then(|key| self.tracks.iter().position(|track| track.row_key() == key))
        {
            self.viewport.select(index);
        }
    }

    /// Apply a scroll gesture: it begins a drag, moves, and ends the drag.
    pub fn scroll(&mut self, input: ScrollInput, current: Option<&Track>, now: Instant) {
        self.overlay
            .on_drag_start(now, current.is_some(), self.tracks.len());

        let page = self.viewport.page_size();
        match input {
            ScrollInput::Select(delta) => self.viewport.move_selection(delta),
            ScrollInput::Page(pages) => self.viewport.move_selection(pages * page),
            ScrollInput::Top => self.viewport.select(0),
            ScrollInput::Bottom => self.viewport.select(self.tracks.len().saturating_sub(1)),
            ScrollInput::Wheel(delta) => self.viewport.scroll_by(delta),
        }

        match input {
            // Wheel scrolling coasts; keyboard scrolling stops where it lands
            ScrollInput::Wheel(_) => self.overlay.on_momentum_end(now),
            _ => self.overlay.on_drag_end(now),
        }
    }

    /// Call `load_more` when the viewport is near the end of the content.
    ///
    /// Only fires while the source is idle or partly done, and at most once
    /// per row count.
    pub fn check_end_reached(&mut self, data: &mut dyn DataSource) -> bool {
        if self.tracks.is_empty() || !self.viewport.is_measured() {
            return false;
        }
        if self.end_reached_at_len == Some(self.tracks.len()) {
            return false;
        }

        let threshold = self.end_reached_threshold * self.viewport.visible_rows() as f32;
        if self.viewport.rows_below() as f32 > threshold {
            return false;
        }

        let state = data.request_state();
        if !state.accepts_load_more() {
            log::trace!("End reached while {:?}; not loading more", state);
            return false;
        }

        log::debug!("End of list reached at {} rows, loading more", self.tracks.len());
        self.end_reached_at_len = Some(self.tracks.len());
        data.load_more();
        true
    }

    /// Retry a failed request.
    pub fn retry(&mut self, data: &mut dyn DataSource) {
        if data.request_state() == RequestState::Error {
            log::info!("Retrying failed request");
            self.end_reached_at_len = None;
            data.retry();
        }
    }

    /// Trigger the locate action if the button is on screen.
    pub fn activate_locate(
        &mut self,
        current: Option<&Track>,
        now: Instant,
    ) -> Option<LocateOutcome> {
        if !self.overlay.is_on_screen() {
            return None;
        }
        let outcome = self
            .overlay
            .locate(&self.tracks, current, &mut self.viewport, now);
        if let Some(index) = outcome.index() {
            self.viewport.mark_selected(index);
        }
        Some(outcome)
    }

    /// Whether a mouse click at (`column`, `row`) hits the locate button.
    pub fn hits_locate_button(&self, column: u16, row: u16) -> bool {
        self.overlay.is_on_screen()
            && self
                .list_area
                .is_some_and(|area| locate_button_area(area).contains(Position::new(column, row)))
    }

    /// Row index under a mouse position.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.viewport.offset() + ((row - area.y) / ROW_HEIGHT) as usize;
        (index < self.tracks.len()).then_some(index)
    }

    pub fn select(&mut self, index: usize) {
        self.viewport.select(index);
    }

    pub fn press_selected(&mut self, services: &mut Services<'_>) {
        let Some(index) = self.viewport.selected() else {
            return;
        };
        let Some(track) = self.tracks.get(index) else {
            return;
        };
        let tracks = &self.tracks;
        log::debug!(
            "Pressed {} ({})",
            track.row_key(),
            if services.local.is_local(track) { "local" } else { "remote" }
        );

        match self.on_item_press.as_mut() {
            Some(handler) => handler(track, tracks, &mut *services.engine),
            None => {
                log::debug!("Playing {} with {} tracks as queue", track.row_key(), tracks.len());
                services.engine.play_replacing_queue(track, tracks);
            }
        }
    }

    pub fn long_press_selected(&mut self, services: &mut Services<'_>) {
        let Some(track) = self.viewport.selected().and_then(|i| self.tracks.get(i)) else {
            return;
        };
        let sheet = self.sheet.as_ref();
        match self.on_item_long_press.as_mut() {
            Some(handler) => {
                let engine = &mut *services.engine;
                let mut with_engine = |t: &Track| handler(t, &mut *engine);
                music_item::long_press(track, Some(&mut with_engine), sheet, services.panels);
            }
            None => music_item::long_press(track, None, sheet, services.panels),
        }
    }

    pub fn open_options_selected(&mut self, services: &mut Services<'_>) {
        if let Some(track) = self.selected_track() {
            music_item::open_options(track, self.sheet.as_ref(), services.panels);
        }
    }

    /// Advance animations and timers. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant, data: &mut dyn DataSource) -> bool {
        let scrolling = self.viewport.is_animating();
        self.viewport.tick(now);
        let overlay_changed = self.overlay.tick(now);
        let loading = self.check_end_reached(data);
        scrolling || overlay_changed || loading || self.is_animating()
    }

    /// Whether something on screen is animating and wants frequent redraws.
    pub fn is_animating(&self) -> bool {
        use crate::app::ui::locate::OverlayPhase;
        self.viewport.is_animating()
            || matches!(
                self.overlay.phase(),
                OverlayPhase::Appearing | OverlayPhase::Disappearing
            )
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlay.next_deadline()
    }

    /// Tear the view down; releases the overlay timer.
    pub fn dispose(&mut self) {
        self.overlay.dispose();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        palette: &Palette,
        current: Option<&Track>,
        local: &dyn LocalStore,
        data: &dyn DataSource,
        hints: &ListHints,
        now: Instant,
    ) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.frame));
        if let Some(header) = &self.header {
            block = block.title(Line::from(format!(" {} ", header)).fg(palette.text).bold());
        }
        block = block.title(
            Line::from(Span::styled(
                format!(" {} ", self.tracks.len()),
                Style::default().fg(palette.text_secondary),
            ))
            .right_aligned(),
        );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let state = data.request_state();
        if self.tracks.is_empty() {
            self.viewport.measure(inner.height);
            self.list_area = Some(inner);
            let [_, middle, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Fill(1),
            ])
            .areas(inner);
            frame.render_widget(list_empty(state, &hints.retry, palette), middle);
            return;
        }

        let [list_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
        self.viewport.measure(list_area.height);
        self.list_area = Some(list_area);

        let range = self.viewport.visible_range();
        let selected = self.viewport.selected();
        let row_width = list_area.width.saturating_sub(1) as usize;
        let items: Vec<ListItem> = self.tracks[range.clone()]
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let index = range.start + i;
                MusicItem::new(track, palette, row_width)
                    .index(self.show_index.then_some(index + 1))
                    .playing(is_current(track, current))
                    .local(local.is_local(track))
                    .selected(selected == Some(index))
                    .show_more_icon(row_width >= MORE_ICON_MIN_WIDTH)
                    .into_list_item()
            })
            .collect();
        frame.render_widget(List::new(items), list_area);

        if let Some(footer) = list_footer(state, &hints.retry, palette) {
            frame.render_widget(footer, footer_area);
        }

        if self.tracks.len() > self.viewport.visible_rows() {
            let mut scrollbar_state =
                ScrollbarState::new(self.viewport.rows_below() + self.viewport.offset())
                    .position(self.viewport.offset());
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None)
                    .style(Style::default().fg(palette.text_secondary)),
                list_area,
                &mut scrollbar_state,
            );
        }

        render_locate_button(
            frame,
            list_area,
            self.overlay.opacity(now),
            &hints.locate,
            palette,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::mock::{NoLocal, RecordingData, RecordingEngine, RecordingPanels};
    use crate::app::ui::locate::OverlayPhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> ListConfig {
        ListConfig::default()
    }

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new("p", &i.to_string(), &format!("Song {}", i), "Artist"))
            .collect()
    }

    fn list_with(n: usize, height: u16) -> MusicList {
        let mut list = MusicList::new(&config());
        list.set_tracks(tracks(n));
        list.viewport.measure(height);
        list
    }

    #[test]
    fn test_two_track_scenario() {
        let t0 = Instant::now();
        let mut list = MusicList::new(&config());
        list.set_tracks(vec![
            Track::new("a", "1", "One", "A"),
            Track::new("b", "2", "Two", "B"),
        ]);
        list.viewport.measure(2);
        let playing = Track::new("b", "2", "Two", "B");

        let highlighted: Vec<bool> = list
            .tracks()
            .iter()
            .map(|track| is_current(track, Some(&playing)))
            .collect();
        assert_eq!(highlighted, vec![false, true]);

        list.scroll(ScrollInput::Wheel(0), Some(&playing), t0);
        let outcome = list.activate_locate(Some(&playing), t0 + Duration::from_millis(10));
        assert_eq!(outcome, Some(LocateOutcome::ScrolledToIndex(1)));
        assert_eq!(list.viewport().selected(), Some(1));
        list.tick(t0 + Duration::from_millis(500), &mut RecordingData::default());
        assert_eq!(list.viewport().offset(), 1);
    }

    #[test]
    fn test_locate_twice_during_fade_out_scrolls_twice() {
        let t0 = Instant::now();
        let mut list = list_with(10, 6);
        let playing = Track::new("p", "5", "Song 5", "Artist");
        list.scroll(ScrollInput::Wheel(1), Some(&playing), t0);
        list.tick(t0 + Duration::from_millis(250), &mut RecordingData::default());
        assert_eq!(list.overlay().phase(), OverlayPhase::Visible);

        let first = list.activate_locate(Some(&playing), t0 + Duration::from_millis(300));
        assert_eq!(first, Some(LocateOutcome::ScrolledToIndex(5)));
        assert_eq!(list.overlay().phase(), OverlayPhase::Disappearing);

        let second = list.activate_locate(Some(&playing), t0 + Duration::from_millis(310));
        assert_eq!(second, Some(LocateOutcome::ScrolledToIndex(5)));

        list.tick(t0 + Duration::from_millis(600), &mut RecordingData::default());
        assert_eq!(list.overlay().phase(), OverlayPhase::Hidden);
        assert_eq!(list.activate_locate(Some(&playing), t0 + Duration::from_millis(610)), None);
    }

    #[test]
    fn test_locate_button_clickable_until_faded_out() {
        let t0 = Instant::now();
        let mut list = list_with(10, 6);
        let area = Rect::new(0, 0, 40, 6);
        list.list_area = Some(area);
        let button = locate_button_area(area);
        let playing = Track::new("p", "5", "Song 5", "Artist");
        assert!(!list.hits_locate_button(button.x, button.y));

        list.scroll(ScrollInput::Wheel(1), Some(&playing), t0);
        assert!(list.hits_locate_button(button.x, button.y));
        list.activate_locate(Some(&playing), t0 + Duration::from_millis(100));
        assert_eq!(list.overlay().phase(), OverlayPhase::Disappearing);
        assert!(list.hits_locate_button(button.x, button.y));

        list.tick(t0 + Duration::from_millis(400), &mut RecordingData::default());
        assert!(!list.hits_locate_button(button.x, button.y));
    }

    #[test]
    fn test_long_press_handler_can_play() {
        let mut list = MusicList::new(&config()).with_item_long_press(play_on_long_press());
        list.set_tracks(tracks(3));
        list.select(2);

        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.long_press_selected(&mut services);
        assert_eq!(engine.played, vec!["p-2".to_string()]);
        assert!(panels.shown.is_empty());
    }

    #[test]
    fn test_locate_ignored_while_hidden() {
        let mut list = list_with(10, 6);
        let playing = Track::new("p", "5", "Song 5", "Artist");
        assert_eq!(list.activate_locate(Some(&playing), Instant::now()), None);
        assert_eq!(list.viewport().offset(), 0);
    }

    #[test]
    fn test_scroll_shows_overlay_only_with_current() {
        let t0 = Instant::now();
        let mut list = list_with(10, 6);
        list.scroll(ScrollInput::Select(1), None, t0);
        assert_eq!(list.overlay().phase(), OverlayPhase::Hidden);

        let playing = Track::new("p", "5", "Song 5", "Artist");
        list.scroll(ScrollInput::Select(1), Some(&playing), t0);
        assert_eq!(list.overlay().phase(), OverlayPhase::Appearing);
        assert!(list.overlay().timer().is_armed());
    }

    #[test]
    fn test_empty_list_never_shows_overlay() {
        let t0 = Instant::now();
        let mut list = list_with(0, 10);
        let playing = Track::new("p", "5", "Song 5", "Artist");
        list.scroll(ScrollInput::Wheel(3), Some(&playing), t0);
        list.scroll(ScrollInput::Bottom, Some(&playing), t0);
        assert_eq!(list.overlay().phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn test_load_more_gated_by_state() {
        let mut list = list_with(3, 10);

        let mut data = RecordingData {
            state: RequestState::PendingRestPage,
            ..Default::default()
        };
        assert!(!list.check_end_reached(&mut data));
        assert_eq!(data.load_more_calls, 0);

        data.state = RequestState::Error;
        assert!(!list.check_end_reached(&mut data));
        assert_eq!(data.load_more_calls, 0);

        data.state = RequestState::Idle;
        assert!(list.check_end_reached(&mut data));
        assert!(!list.check_end_reached(&mut data));
        assert_eq!(data.load_more_calls, 1);
    }

    #[test]
    fn test_load_more_rearms_after_new_page() {
        let mut list = list_with(3, 10);
        let mut data = RecordingData {
            state: RequestState::PartlyDone,
            ..Default::default()
        };
        list.check_end_reached(&mut data);
        list.set_tracks(tracks(4));
        list.check_end_reached(&mut data);
        assert_eq!(data.load_more_calls, 2);
    }

    #[test]
    fn test_load_more_waits_for_end() {
        let mut list = list_with(100, 20);
        let mut data = RecordingData::default();
        assert!(!list.check_end_reached(&mut data));

        list.scroll(ScrollInput::Bottom, None, Instant::now());
        assert!(list.check_end_reached(&mut data));
        assert_eq!(data.load_more_calls, 1);
    }

    #[test]
    fn test_retry_only_on_error() {
        let mut list = list_with(3, 10);
        let mut data = RecordingData::default();
        list.retry(&mut data);
        assert_eq!(data.retry_calls, 0);
        data.state = RequestState::Error;
        list.retry(&mut data);
        assert_eq!(data.retry_calls, 1);
    }

    #[test]
    fn test_press_replaces_queue_by_default() {
        let mut list = list_with(3, 10);
        list.select(2);
        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.press_selected(&mut services);
        assert_eq!(engine.replaced, vec![("p-2".to_string(), 3)]);
        assert!(engine.played.is_empty());
    }

    #[test]
    fn test_press_plays_single_track_with_handler() {
        let mut list = MusicList::new(&config()).with_item_press(play_pressed_only());
        list.set_tracks(tracks(3));
        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.press_selected(&mut services);
        assert_eq!(engine.played, vec!["p-0".to_string()]);
        assert!(engine.replaced.is_empty());
    }

    #[test]
    fn test_custom_press_handler_gets_list() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut list = MusicList::new(&config()).with_item_press(Box::new(move |track: &Track, all: &[Track], _: &mut dyn PlaybackEngine| {
            sink.borrow_mut().push((track.id.clone(), all.len()));
        }));
        list.set_tracks(tracks(4));
        list.select(1);

        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.press_selected(&mut services);
        assert_eq!(*seen.borrow(), vec![("1".to_string(), 4)]);
        assert!(engine.replaced.is_empty());
    }

    #[test]
    fn test_long_press_opens_options_with_sheet() {
        let sheet = SheetRef {
            platform: "local".to_string(),
            id: "mix".to_string(),
            title: "Mix".to_string(),
        };
        let mut list = MusicList::new(&config()).with_sheet(Some(sheet));
        list.set_tracks(tracks(2));

        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.long_press_selected(&mut services);
        assert_eq!(
            panels.shown,
            vec![("p-0".to_string(), Some("mix".to_string()))]
        );
    }

    #[test]
    fn test_custom_long_press_handler_replaces_options() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let mut list = MusicList::new(&config())
            .with_item_long_press(Box::new(move |_: &Track, _: &mut dyn PlaybackEngine| {
                *counter.borrow_mut() += 1
            }));
        list.set_tracks(tracks(2));

        let mut engine = RecordingEngine::default();
        let mut panels = RecordingPanels::default();
        let mut services = Services {
            engine: &mut engine,
            local: &NoLocal,
            panels: &mut panels,
        };
        list.long_press_selected(&mut services);
        list.open_options_selected(&mut services);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(panels.shown.len(), 1);
    }

    #[test]
    fn test_selection_follows_track_across_updates() {
        let mut list = list_with(5, 10);
        list.select(3);
        let mut reordered = tracks(5);
        reordered.reverse();
        list.set_tracks(reordered);
        assert_eq!(list.selected_track().map(|t| t.id.as_str()), Some("3"));
    }
}
