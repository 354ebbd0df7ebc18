use std::collections::HashSet;

use crate::app::services::LocalStore;
use crate::track::Track;

/// Tracks considered downloaded, keyed by row key.
#[derive(Debug, Default)]
pub struct LocalLibrary {
    keys: HashSet<String>,
}

impl LocalLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, platform: &str, id: &str) {
        self.keys.insert(format!("{}-{}", platform, id));
    }

    /// Add entries written as row keys (`platform-id`). Returns the ones
    /// that could not be split.
    pub fn extend_row_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut rejected = Vec::new();
        for key in keys {
            match key.split_once('-') {
                Some((platform, id)) if !platform.is_empty() && !id.is_empty() => {
                    self.keys.insert(key.to_string());
                }
                _ => rejected.push(key),
            }
        }
        rejected
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl LocalStore for LocalLibrary {
    fn is_local(&self, track: &Track) -> bool {
        self.keys.contains(&track.row_key())
    }
}
