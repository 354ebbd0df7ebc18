use crate::app::services::PlaybackEngine;
use crate::track::{Track, is_same_track};

/// In-memory play queue standing in for a real playback engine.
#[derive(Debug, Default)]
pub struct QueuePlayer {
    queue: Vec<Track>,
    position: Option<usize>,
}

impl QueuePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Move through the queue, wrapping at both ends.
    fn step(&mut self, delta: isize) {
        if self.queue.is_empty() {
            return;
        }
        let len = self.queue.len() as isize;
        let current = self.position.map_or(-1, |p| p as isize);
        let next = (current + delta).rem_euclid(len) as usize;
        self.position = Some(next);
        log::info!("Now playing: {}", self.queue[next].row_key());
    }
}

impl PlaybackEngine for QueuePlayer {
    fn current_track(&self) -> Option<&Track> {
        self.position.and_then(|p| self.queue.get(p))
    }

    /// Play `track`, enqueueing it after the current track if it is new.
    fn play(&mut self, track: &Track) {
        let index = match self.queue.iter().position(|t| is_same_track(t, track)) {
            Some(index) => index,
            None => {
                let index = self.position.map_or(self.queue.len(), |p| p + 1);
                self.queue.insert(index, track.clone());
                index
            }
        };
        self.position = Some(index);
        log::info!("Now playing: {}", track.row_key());
    }

    fn play_replacing_queue(&mut self, track: &Track, queue: &[Track]) {
        self.queue = queue.to_vec();
        match self.queue.iter().position(|t| is_same_track(t, track)) {
            Some(index) => self.position = Some(index),
            None => {
                self.queue.insert(0, track.clone());
                self.position = Some(0);
            }
        }
        log::info!(
            "Queue replaced with {} tracks, now playing: {}",
            self.queue.len(),
            track.row_key()
        );
    }
}
