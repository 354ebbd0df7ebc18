use serde::{Deserialize, Serialize};

/// One playable item as produced by the catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub platform: String,
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Identity of a track: the (platform, id) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackKey<'a> {
    pub platform: &'a str,
    pub id: &'a str,
}

impl Track {
    pub fn new(platform: &str, id: &str, title: &str, artist: &str) -> Self {
        Self {
            platform: platform.to_string(),
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            tag: None,
        }
    }

    pub fn with_album(mut self, album: &str) -> Self {
        self.album = Some(album.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn identity(&self) -> TrackKey<'_> {
        TrackKey {
            platform: &self.platform,
            id: &self.id,
        }
    }

    /// Stable row key used by the list viewport.
    pub fn row_key(&self) -> String {
        format!("{}-{}", self.platform, self.id)
    }

    /// Label shown in the tag badge. Falls back to the platform name.
    pub fn display_tag(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .or(Some(self.platform.as_str()))
            .filter(|tag| !tag.is_empty())
    }

    /// "artist - album" description line
    pub fn description(&self) -> String {
        match &self.album {
            Some(album) if !album.is_empty() => format!("{} - {}", self.artist, album),
            _ => self.artist.clone(),
        }
    }
}

/// Reference to the sheet (playlist) a list is showing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetRef {
    pub platform: String,
    pub id: String,
    pub title: String,
}

/// Returns true when both tracks share the same (platform, id) pair.
pub fn is_same_track(a: &Track, b: &Track) -> bool {
    a.identity() == b.identity()
}

/// Returns true when `track` is the one the engine reports as playing.
pub fn is_current(track: &Track, current: Option<&Track>) -> bool {
    current.is_some_and(|current| is_same_track(track, current))
}

/// Position of the currently playing track inside `tracks`.
pub fn position_of_current(tracks: &[Track], current: Option<&Track>) -> Option<usize> {
    let current = current?;
    tracks.iter().position(|track| is_same_track(track, current))
}
