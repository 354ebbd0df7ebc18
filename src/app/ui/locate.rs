//! Locate overlay: a fading button that scrolls the list back to the
//! currently playing row.
//!
//! The overlay appears when a scroll gesture starts (and something from the
//! list is playing), hides itself a fixed delay after scrolling stops and
//! hides immediately once activated. All methods take the current
//! [`Instant`] so the main loop (and tests) drive time explicitly.

use std::time::{Duration, Instant};

use super::animation::Tween;
use super::viewport::ListScroller;
use crate::track::{Track, position_of_current};

/// Default delay before the overlay hides after scrolling stops
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Default fade in/out duration
pub const DEFAULT_FADE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

/// Single-shot auto-hide timer owned by one overlay.
#[derive(Debug, Default)]
pub struct HideTimer {
    deadline: Option<Instant>,
}

impl HideTimer {
    /// Arm the timer, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        if self.is_armed() {
            log::trace!("Hide timer cancelled");
        }
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// What a locate activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Nothing from the list is playing
    NotFound,
    ScrolledToIndex(usize),
    /// Index scroll failed; fell back to a line offset
    ScrolledToOffset(usize),
    /// Both scroll attempts failed
    Failed(usize),
}

impl LocateOutcome {
    /// Index of the located row, if one was found.
    pub fn index(self) -> Option<usize> {
        match self {
            LocateOutcome::NotFound => None,
            LocateOutcome::ScrolledToIndex(index)
            | LocateOutcome::ScrolledToOffset(index)
            | LocateOutcome::Failed(index) => Some(index),
        }
    }
}

#[derive(Debug)]
pub struct LocateOverlay {
    phase: OverlayPhase,
    opacity: Tween,
    timer: HideTimer,
    hide_delay: Duration,
    fade: Duration,
    estimated_row_height: usize,
}

impl LocateOverlay {
    pub fn new(hide_delay: Duration, fade: Duration, estimated_row_height: usize) -> Self {
        Self {
            phase: OverlayPhase::Hidden,
            opacity: Tween::settled(0.0, Instant::now()),
            timer: HideTimer::default(),
            hide_delay,
            fade,
            estimated_row_height,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether the overlay is fading in or fully shown.
    pub fn is_shown(&self) -> bool {
        matches!(self.phase, OverlayPhase::Appearing | OverlayPhase::Visible)
    }

    /// Whether the button is drawn and accepts activation, fade-out included.
    pub fn is_on_screen(&self) -> bool {
        self.phase != OverlayPhase::Hidden
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            OverlayPhase::Hidden => 0.0,
            _ => self.opacity.value(now),
        }
    }

    pub fn timer(&self) -> &HideTimer {
        &self.timer
    }

    /// Earliest instant at which [`LocateOverlay::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let animation_end = match self.phase {
            OverlayPhase::Appearing | OverlayPhase::Disappearing => Some(self.opacity.ends_at()),
            _ => None,
        };
        match (animation_end, self.timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn fade_to(&mut self, target: f32, now: Instant) {
        let current = self.opacity(now);
        self.opacity = Tween::new(current, target, now, self.fade);
    }

    fn show(&mut self, now: Instant) {
        match self.phase {
            OverlayPhase::Hidden => {
                log::debug!("Locate overlay appearing");
                self.fade_to(1.0, now);
                self.phase = OverlayPhase::Appearing;
            }
            // A running fade-out finishes before the overlay can come back
            OverlayPhase::Disappearing => {
                log::trace!("Locate overlay still fading out");
            }
            OverlayPhase::Appearing | OverlayPhase::Visible => {}
        }
    }

    fn hide(&mut self, now: Instant) {
        if self.is_shown() {
            log::debug!("Locate overlay disappearing");
            self.fade_to(0.0, now);
            self.phase = OverlayPhase::Disappearing;
        }
    }

    pub fn on_drag_start(&mut self, now: Instant, has_current: bool, len: usize) {
        if has_current && len > 0 {
            self.show(now);
        }
        self.timer.cancel();
    }

    pub fn on_drag_end(&mut self, now: Instant) {
        if self.is_shown() {
            self.timer.arm(now, self.hide_delay);
        }
    }

    pub fn on_momentum_end(&mut self, now: Instant) {
        self.on_drag_end(now);
    }

    /// Settle finished fades and fire the hide timer.
    ///
    /// Returns true when the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.phase;

        if self.timer.fire_if_due(now) {
            log::trace!("Locate overlay hide timer fired");
            self.hide(now);
        }

        if self.opacity.is_finished(now) {
            self.phase = match self.phase {
                OverlayPhase::Appearing => OverlayPhase::Visible,
                OverlayPhase::Disappearing => OverlayPhase::Hidden,
                phase => phase,
            };
        }

        before != self.phase
    }

    /// Scroll `scroller` to the currently playing track and start hiding.
    pub fn locate(
        &mut self,
        tracks: &[Track],
        current: Option<&Track>,
        scroller: &mut dyn ListScroller,
        now: Instant,
    ) -> LocateOutcome {
        let outcome = match position_of_current(tracks, current) {
            None => LocateOutcome::NotFound,
            Some(index) => match scroller.scroll_to_index(index, 0.0, true, now) {
                Ok(()) => LocateOutcome::ScrolledToIndex(index),
                Err(e) => {
                    log::warn!("Failed to scroll to index {}: {}", index, e);
                    let offset = index * self.estimated_row_height;
                    match scroller.scroll_to_offset(offset, true, now) {
                        Ok(()) => LocateOutcome::ScrolledToOffset(index),
                        Err(e) => {
                            log::warn!("Failed to scroll to offset {}: {}", offset, e);
                            LocateOutcome::Failed(index)
                        }
                    }
                }
            },
        };
        log::debug!("Locate current track: {:?}", outcome);

        self.hide(now);
        self.timer.cancel();
        outcome
    }

    /// Release the timer and reset to hidden (view teardown).
    pub fn dispose(&mut self) {
        self.timer.cancel();
        self.phase = OverlayPhase::Hidden;
        self.opacity = Tween::settled(0.0, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ui::viewport::ScrollError;

    #[derive(Debug, PartialEq)]
    enum Command {
        Index(usize),
        Offset(usize),
    }

    #[derive(Default)]
    struct FakeScroller {
        fail_index: bool,
        fail_offset: bool,
        commands: Vec<Command>,
    }

    impl ListScroller for FakeScroller {
        fn scroll_to_index(
            &mut self,
            index: usize,
            _view_position: f32,
            _animated: bool,
            _now: Instant,
        ) -> Result<(), ScrollError> {
            if self.fail_index {
                return Err(ScrollError::NotMeasured { index });
            }
            self.commands.push(Command::Index(index));
            Ok(())
        }

        fn scroll_to_offset(
            &mut self,
            offset: usize,
            _animated: bool,
            _now: Instant,
        ) -> Result<(), ScrollError> {
            if self.fail_offset {
                return Err(ScrollError::OffsetOutOfRange { offset, content: 0 });
            }
            self.commands.push(Command::Offset(offset));
            Ok(())
        }
    }

    fn overlay() -> LocateOverlay {
        LocateOverlay::new(DEFAULT_HIDE_DELAY, DEFAULT_FADE, 2)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sample() -> Vec<Track> {
        vec![Track::new("a", "1", "One", "A"), Track::new("b", "2", "Two", "B")]
    }

    #[test]
    fn test_drag_start_shows_and_fades_in() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, true, 2);
        assert_eq!(overlay.phase(), OverlayPhase::Appearing);
        assert!(overlay.opacity(t0 + ms(100)) > 0.0);
        assert!(overlay.tick(t0 + ms(200)));
        assert_eq!(overlay.phase(), OverlayPhase::Visible);
        assert_eq!(overlay.opacity(t0 + ms(200)), 1.0);
    }

    #[test]
    fn test_empty_list_never_appears() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        for i in 0..5 {
            overlay.on_drag_start(t0 + ms(i * 100), true, 0);
            overlay.on_drag_end(t0 + ms(i * 100 + 50));
            overlay.on_momentum_end(t0 + ms(i * 100 + 60));
            overlay.tick(t0 + ms(i * 100 + 70));
            assert_eq!(overlay.phase(), OverlayPhase::Hidden);
        }
        assert!(!overlay.timer().is_armed());
    }

    #[test]
    fn test_nothing_playing_never_appears() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, false, 10);
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn test_hides_after_delay() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, true, 2);
        overlay.tick(t0 + ms(200));
        overlay.on_drag_end(t0 + ms(300));
        assert!(overlay.timer().is_armed());

        overlay.tick(t0 + ms(3200));
        assert_eq!(overlay.phase(), OverlayPhase::Visible);

        overlay.tick(t0 + ms(3300));
        assert_eq!(overlay.phase(), OverlayPhase::Disappearing);
        overlay.tick(t0 + ms(3500));
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn test_drag_start_cancels_pending_timer() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, true, 2);
        overlay.on_drag_end(t0 + ms(100));
        overlay.on_drag_start(t0 + ms(1000), true, 2);
        assert!(!overlay.timer().is_armed());

        overlay.tick(t0 + ms(5000));
        assert!(overlay.is_shown());
    }

    #[test]
    fn test_drag_in_progress_keeps_overlay() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, true, 2);
        overlay.tick(t0 + ms(3000));
        overlay.on_drag_start(t0 + ms(3000), true, 2);
        overlay.tick(t0 + ms(3001));
        assert_eq!(overlay.phase(), OverlayPhase::Visible);
    }

    #[test]
    fn test_momentum_end_rearms_timer() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.on_drag_start(t0, true, 2);
        overlay.on_drag_end(t0 + ms(100));
        overlay.on_momentum_end(t0 + ms(2000));
        assert_eq!(overlay.timer().deadline(), Some(t0 + ms(5000)));
        overlay.tick(t0 + ms(3500));
        assert!(overlay.is_shown());
    }

    #[test]
    fn test_locate_scrolls_to_matching_index() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller::default();
        let playing = Track::new("b", "2", "Two", "B");
        overlay.on_drag_start(t0, true, 2);

        let outcome = overlay.locate(&sample(), Some(&playing), &mut scroller, t0 + ms(50));
        assert_eq!(outcome, LocateOutcome::ScrolledToIndex(1));
        assert_eq!(scroller.commands, vec![Command::Index(1)]);
        assert_eq!(overlay.phase(), OverlayPhase::Disappearing);
        assert!(!overlay.timer().is_armed());
    }

    #[test]
    fn test_locate_without_match_is_noop() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller::default();
        let playing = Track::new("c", "3", "Three", "C");

        let outcome = overlay.locate(&sample(), Some(&playing), &mut scroller, t0);
        assert_eq!(outcome, LocateOutcome::NotFound);
        assert!(scroller.commands.is_empty());

        let outcome = overlay.locate(&sample(), None, &mut scroller, t0);
        assert_eq!(outcome, LocateOutcome::NotFound);
        assert!(scroller.commands.is_empty());
    }

    #[test]
    fn test_locate_falls_back_to_offset() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller {
            fail_index: true,
            ..Default::default()
        };
        let playing = Track::new("b", "2", "Two", "B");

        let outcome = overlay.locate(&sample(), Some(&playing), &mut scroller, t0);
        assert_eq!(outcome, LocateOutcome::ScrolledToOffset(1));
        assert_eq!(scroller.commands, vec![Command::Offset(2)]);
    }

    #[test]
    fn test_locate_swallows_double_failure() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller {
            fail_index: true,
            fail_offset: true,
            ..Default::default()
        };
        let playing = Track::new("b", "2", "Two", "B");
        overlay.on_drag_start(t0, true, 2);

        let outcome = overlay.locate(&sample(), Some(&playing), &mut scroller, t0);
        assert_eq!(outcome, LocateOutcome::Failed(1));
        assert!(scroller.commands.is_empty());
        assert_eq!(overlay.phase(), OverlayPhase::Disappearing);
    }

    #[test]
    fn test_locate_twice_is_not_deduplicated() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller::default();
        let playing = Track::new("b", "2", "Two", "B");
        overlay.on_drag_start(t0, true, 2);
        overlay.on_drag_end(t0 + ms(10));

        overlay.locate(&sample(), Some(&playing), &mut scroller, t0 + ms(20));
        overlay.locate(&sample(), Some(&playing), &mut scroller, t0 + ms(30));
        assert_eq!(scroller.commands, vec![Command::Index(1), Command::Index(1)]);

        overlay.tick(t0 + ms(500));
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
        assert!(!overlay.timer().is_armed());
    }

    #[test]
    fn test_drag_start_while_disappearing_finishes_fade() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        let mut scroller = FakeScroller::default();
        overlay.on_drag_start(t0, true, 2);
        overlay.tick(t0 + ms(200));
        overlay.locate(&sample(), None, &mut scroller, t0 + ms(300));
        assert_eq!(overlay.phase(), OverlayPhase::Disappearing);

        overlay.on_drag_start(t0 + ms(350), true, 2);
        assert_eq!(overlay.phase(), OverlayPhase::Disappearing);
        assert!(overlay.is_on_screen());
        assert!(!overlay.timer().is_armed());

        overlay.on_drag_end(t0 + ms(360));
        assert!(!overlay.timer().is_armed());

        assert!(overlay.tick(t0 + ms(500)));
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
        assert!(!overlay.is_on_screen());

        // The next gesture after the fade shows it again
        overlay.on_drag_start(t0 + ms(600), true, 2);
        assert_eq!(overlay.phase(), OverlayPhase::Appearing);
    }

    #[test]
    fn test_next_deadline_and_dispose() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        assert_eq!(overlay.next_deadline(), None);
        overlay.on_drag_start(t0, true, 2);
        assert_eq!(overlay.next_deadline(), Some(t0 + ms(200)));
        overlay.tick(t0 + ms(200));
        overlay.on_drag_end(t0 + ms(250));
        assert_eq!(overlay.next_deadline(), Some(t0 + ms(3250)));

        overlay.dispose();
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
        assert_eq!(overlay.next_deadline(), None);
    }
}
