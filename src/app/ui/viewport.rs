//! Virtualized list viewport.
//!
//! Tracks which rows are on screen, the selected row and an optional
//! animated scroll. Only rows inside [`Viewport::visible_range`] are turned
//! into widgets by the renderer.

use std::ops::Range;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::animation::Tween;

/// Duration of an animated scroll.
const SCROLL_ANIMATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollError {
    #[error("viewport has not been measured yet (target row {index})")]
    NotMeasured { index: usize },
    #[error("row {index} is outside the list ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("offset {offset} is outside the content ({content} lines)")]
    OffsetOutOfRange { offset: usize, content: usize },
}

/// Scroll commands the locate overlay issues against a list.
pub trait ListScroller {
    /// Scroll so that `index` sits at `view_position` (0.0 = top edge,
    /// 1.0 = bottom edge) of the viewport.
    fn scroll_to_index(
        &mut self,
        index: usize,
        view_position: f32,
        animated: bool,
        now: Instant,
    ) -> Result<(), ScrollError>;

    /// Scroll to an absolute line offset.
    fn scroll_to_offset(
        &mut self,
        offset: usize,
        animated: bool,
        now: Instant,
    ) -> Result<(), ScrollError>;
}

#[derive(Debug)]
pub struct Viewport {
    len: usize,
    row_height: u16,
    /// Inner height in lines, known after the first render
    height: Option<u16>,
    offset: usize,
    scroll: Option<Tween>,
    selected: Option<usize>,
}

impl Viewport {
    pub fn new(row_height: u16) -> Self {
        Self {
            len: 0,
            row_height: row_height.max(1),
            height: None,
            offset: 0,
            scroll: None,
            selected: None,
        }
    }

    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_measured(&self) -> bool {
        self.height.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_some()
    }

    /// Number of whole rows that fit in the viewport.
    pub fn visible_rows(&self) -> usize {
        match self.height {
            Some(height) => (height / self.row_height).max(1) as usize,
            None => 0,
        }
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.visible_rows()).min(self.len);
        self.offset.min(end)..end
    }

    /// Rows left below the viewport.
    pub fn rows_below(&self) -> usize {
        self.len.saturating_sub(self.offset + self.visible_rows())
    }

    fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.visible_rows().max(1))
    }

    /// Record the inner height from the latest render.
    pub fn measure(&mut self, height: u16) {
        if self.height != Some(height) {
            log::trace!("Viewport measured: {} lines", height);
        }
        self.height = Some(height);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the row count after the data changed.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.offset = self.offset.min(self.max_offset());
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(selected) => Some(selected.min(len - 1)),
            None => Some(0),
        };
    }

    /// Advance an animated scroll.
    pub fn tick(&mut self, now: Instant) {
        if let Some(tween) = self.scroll {
            self.offset = (tween.value(now).round().max(0.0) as usize).min(self.max_offset());
            if tween.is_finished(now) {
                self.scroll = None;
            }
        }
    }

    fn jump_to(&mut self, offset: usize) {
        self.scroll = None;
        self.offset = offset.min(self.max_offset());
    }

    fn move_to(&mut self, offset: usize, animated: bool, now: Instant) {
        let offset = offset.min(self.max_offset());
        if animated && offset != self.offset {
            self.scroll = Some(Tween::new(
                self.offset as f32,
                offset as f32,
                now,
                SCROLL_ANIMATION,
            ));
        } else {
            self.jump_to(offset);
        }
    }

    /// Scroll the viewport without touching the selection (mouse wheel).
    pub fn scroll_by(&mut self, delta: isize) {
        let offset = self.offset.saturating_add_signed(delta);
        self.jump_to(offset);
    }

    pub fn select(&mut self, index: usize) {
        if self.len == 0 {
            self.selected = None;
            return;
        }
        let index = index.min(self.len - 1);
        self.selected = Some(index);
        self.ensure_visible(index);
    }

    /// Select `index` without scrolling (the caller already scrolled).
    pub fn mark_selected(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
        }
    }

    /// Move the selection by `delta` rows, clamping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let current = self.selected.unwrap_or(0);
        self.select(current.saturating_add_signed(delta));
    }

    pub fn page_size(&self) -> isize {
        self.visible_rows().max(1) as isize
    }

    fn ensure_visible(&mut self, index: usize) {
        let rows = self.visible_rows().max(1);
        if index < self.offset {
            self.jump_to(index);
        } else if index >= self.offset + rows {
            self.jump_to(index + 1 - rows);
        }
    }
}

impl ListScroller for Viewport {
    fn scroll_to_index(
        &mut self,
        index: usize,
        view_position: f32,
        animated: bool,
        now: Instant,
    ) -> Result<(), ScrollError> {
        if self.height.is_none() {
            return Err(ScrollError::NotMeasured { index });
        }
        if index >= self.len {
            return Err(ScrollError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let rows_above = (view_position.clamp(0.0, 1.0)
            * self.visible_rows().saturating_sub(1) as f32)
            .round() as usize;
        self.move_to(index.saturating_sub(rows_above), animated, now);
        Ok(())
    }

    fn scroll_to_offset(
        &mut self,
        offset: usize,
        animated: bool,
        now: Instant,
    ) -> Result<(), ScrollError> {
        let content = self.len * self.row_height as usize;
        if offset >= content {
            return Err(ScrollError::OffsetOutOfRange { offset, content });
        }
        self.move_to(offset / self.row_height as usize, animated, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(len: usize, height: u16) -> Viewport {
        let mut viewport = Viewport::new(2);
        viewport.set_len(len);
        viewport.measure(height);
        viewport
    }

    #[test]
    fn test_visible_range_is_bounded_by_height() {
        let viewport = measured(100, 20);
        assert_eq!(viewport.visible_rows(), 10);
        assert_eq!(viewport.visible_range(), 0..10);
        assert_eq!(viewport.rows_below(), 90);
    }

    #[test]
    fn test_unmeasured_viewport_rejects_index_scroll() {
        let mut viewport = Viewport::new(2);
        viewport.set_len(10);
        let err = viewport
            .scroll_to_index(3, 0.0, false, Instant::now())
            .unwrap_err();
        assert_eq!(err, ScrollError::NotMeasured { index: 3 });
    }

    #[test]
    fn test_offset_scroll_works_before_measure() {
        let mut viewport = Viewport::new(2);
        viewport.set_len(10);
        viewport.scroll_to_offset(6, false, Instant::now()).unwrap();
        assert_eq!(viewport.offset(), 3);
        assert!(viewport.scroll_to_offset(20, false, Instant::now()).is_err());
    }

    #[test]
    fn test_scroll_to_index_places_row_at_top() {
        let mut viewport = measured(100, 20);
        viewport.scroll_to_index(42, 0.0, false, Instant::now()).unwrap();
        assert_eq!(viewport.offset(), 42);
    }

    #[test]
    fn test_scroll_to_index_clamps_near_end() {
        let mut viewport = measured(12, 20);
        viewport.scroll_to_index(11, 0.0, false, Instant::now()).unwrap();
        assert_eq!(viewport.offset(), 2);
    }

    #[test]
    fn test_animated_scroll_settles() {
        let start = Instant::now();
        let mut viewport = measured(100, 20);
        viewport.scroll_to_index(40, 0.0, true, start).unwrap();
        assert!(viewport.is_animating());
        viewport.tick(start + Duration::from_millis(75));
        assert!(viewport.offset() > 0 && viewport.offset() < 40);
        viewport.tick(start + SCROLL_ANIMATION);
        assert_eq!(viewport.offset(), 40);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn test_selection_stays_visible() {
        let mut viewport = measured(100, 20);
        viewport.select(25);
        assert_eq!(viewport.selected(), Some(25));
        assert!(viewport.visible_range().contains(&25));
        viewport.move_selection(-100);
        assert_eq!(viewport.selected(), Some(0));
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_set_len_clamps_selection() {
        let mut viewport = measured(100, 20);
        viewport.select(90);
        viewport.set_len(5);
        assert_eq!(viewport.selected(), Some(4));
        viewport.set_len(0);
        assert_eq!(viewport.selected(), None);
    }
}
