//! Collaborators the list components talk to.
//!
//! The components only read from or send commands to these; the binary wires
//! in the in-memory implementations from [`crate::app::demo`].

use crate::track::{SheetRef, Track};

/// Coarse state of the data-fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    PendingFirstPage,
    PendingRestPage,
    PartlyDone,
    Finished,
    Error,
}

impl RequestState {
    /// Whether a "load more" request may be issued in this state.
    pub fn accepts_load_more(self) -> bool {
        matches!(self, RequestState::Idle | RequestState::PartlyDone)
    }

    pub fn is_loading(self) -> bool {
        matches!(
            self,
            RequestState::PendingFirstPage | RequestState::PendingRestPage
        )
    }
}

pub trait PlaybackEngine {
    fn current_track(&self) -> Option<&Track>;
    fn play(&mut self, track: &Track);
    fn play_replacing_queue(&mut self, track: &Track, queue: &[Track]);
}

pub trait LocalStore {
    fn is_local(&self, track: &Track) -> bool;
}

pub trait OptionsPanel {
    fn show_track_options(&mut self, track: &Track, sheet: Option<&SheetRef>);
}

pub trait DataSource {
    fn request_state(&self) -> RequestState;
    fn load_more(&mut self);
    fn retry(&mut self);
}

/// Bundle of collaborators handed to the presenter for one interaction.
pub struct Services<'a> {
    pub engine: &'a mut dyn PlaybackEngine,
    pub local: &'a dyn LocalStore,
    pub panels: &'a mut dyn OptionsPanel,
}

#[cfg(test)]
pub mod mock {
    //! Recording collaborators for unit tests.

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingEngine {
        pub current: Option<Track>,
        pub played: Vec<String>,
        pub replaced: Vec<(String, usize)>,
    }

    impl PlaybackEngine for RecordingEngine {
        fn current_track(&self) -> Option<&Track> {
            self.current.as_ref()
        }

        fn play(&mut self, track: &Track) {
            self.played.push(track.row_key());
        }

        fn play_replacing_queue(&mut self, track: &Track, queue: &[Track]) {
            self.replaced.push((track.row_key(), queue.len()));
        }
    }

    #[derive(Debug, Default)]
    pub struct NoLocal;

    impl LocalStore for NoLocal {
        fn is_local(&self, _track: &Track) -> bool {
            false
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingPanels {
        pub shown: Vec<(String, Option<String>)>,
    }

    impl OptionsPanel for RecordingPanels {
        fn show_track_options(&mut self, track: &Track, sheet: Option<&SheetRef>) {
            self.shown
                .push((track.row_key(), sheet.map(|sheet| sheet.id.clone())));
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingData {
        pub state: RequestState,
        pub load_more_calls: usize,
        pub retry_calls: usize,
    }

    impl DataSource for RecordingData {
        fn request_state(&self) -> RequestState {
            self.state
        }

        fn load_more(&mut self) {
            self.load_more_calls += 1;
        }

        fn retry(&mut self) {
            self.retry_calls += 1;
        }
    }
}
