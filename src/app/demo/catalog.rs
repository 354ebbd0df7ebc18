//! Paged catalog: serves a fixed track list one page at a time.
//!
//! Requests complete after a simulated latency and can be configured to fail
//! every n-th time, so the list's loading, error and retry states can all be
//! exercised without a backend.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::app::config::CatalogConfig;
use crate::app::services::{DataSource, RequestState};
use crate::track::{SheetRef, Track};

const SAMPLE_ARTISTS: &[(&str, &str)] = &[
    ("Aurora Lane", "Northbound"),
    ("The Quiet Hours", "Lanterns"),
    ("Kiyo", "Paper Planets"),
    ("Marrow & Moss", "Field Notes"),
    ("Sundial", "Long Afternoon"),
];

const SAMPLE_TITLES: &[&str] = &[
    "First Light",
    "Glass Harbor",
    "Slow Machines",
    "Orchard",
    "Signal Fires",
    "Undertow",
    "Small Hours",
    "Paper Boats",
];

const SAMPLE_PLATFORMS: &[&str] = &["qq", "netease", "kugou"];

const SAMPLE_LEN: usize = 64;

/// On-disk catalog format.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sheet: Option<SheetRef>,
    /// Row keys of tracks available offline
    #[serde(default)]
    local: Vec<String>,
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    /// Set on the first poll after the request was issued
    ready_at: Option<Instant>,
}

#[derive(Debug)]
pub struct PagedCatalog {
    all: Vec<Track>,
    loaded: usize,
    page_size: usize,
    latency: Duration,
    fail_every: u32,
    completed_requests: u32,
    state: RequestState,
    pending: Option<PendingRequest>,
    sheet: Option<SheetRef>,
    local: Vec<String>,
}

impl PagedCatalog {
    pub fn new(tracks: Vec<Track>, config: &CatalogConfig) -> Self {
        Self {
            all: tracks,
            loaded: 0,
            page_size: config.page_size.max(1),
            latency: Duration::from_millis(config.latency_ms),
            fail_every: config.fail_every,
            completed_requests: 0,
            state: RequestState::Idle,
            pending: None,
            sheet: None,
            local: Vec::new(),
        }
    }

    /// Built-in catalog used when no file is configured.
    pub fn sample(config: &CatalogConfig) -> Self {
        let tracks = (0..SAMPLE_LEN)
            .map(|i| {
                let (artist, album) = SAMPLE_ARTISTS[i % SAMPLE_ARTISTS.len()];
                let title = SAMPLE_TITLES[i % SAMPLE_TITLES.len()];
                let platform = SAMPLE_PLATFORMS[i % SAMPLE_PLATFORMS.len()];
                let track = Track::new(platform, &format!("{:04}", i + 1), title, artist)
                    .with_album(album);
                if i % 5 == 0 { track.with_tag("HQ") } else { track }
            })
            .collect();

        let mut catalog = Self::new(tracks, config);
        catalog.sheet = Some(SheetRef {
            platform: "local".to_string(),
            id: "sample".to_string(),
            title: "Sample Mix".to_string(),
        });
        catalog.local = catalog
            .all
            .iter()
            .step_by(7)
            .map(Track::row_key)
            .collect();
        catalog
    }

    /// Load a TOML catalog file.
    pub fn from_file(path: &Path, config: &CatalogConfig) -> color_eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents, config)
    }

    pub fn from_toml(contents: &str, config: &CatalogConfig) -> color_eyre::Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        let mut catalog = Self::new(file.tracks, config);
        catalog.sheet = file.sheet;
        catalog.local = file.local;
        Ok(catalog)
    }

    /// Tracks delivered so far.
    pub fn tracks(&self) -> &[Track] {
        &self.all[..self.loaded]
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sheet(&self) -> Option<&SheetRef> {
        self.sheet.as_ref()
    }

    /// Row keys the catalog marks as available offline.
    pub fn local_keys(&self) -> impl Iterator<Item = &str> {
        self.local.iter().map(String::as_str)
    }

    /// Request the first page.
    pub fn start(&mut self) {
        if self.loaded == 0 && self.pending.is_none() {
            self.request();
        }
    }

    fn request(&mut self) {
        self.state = if self.loaded == 0 {
            RequestState::PendingFirstPage
        } else {
            RequestState::PendingRestPage
        };
        self.pending = Some(PendingRequest { ready_at: None });
        log::debug!("Catalog request issued ({:?})", self.state);
    }

    /// When the pending request completes, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.and_then(|pending| pending.ready_at)
    }

    /// Complete the pending request once its latency has elapsed.
    /// Returns true when the state or the delivered tracks changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let ready_at = *pending.ready_at.get_or_insert(now + self.latency);
        if now < ready_at {
            return false;
        }

        self.pending = None;
        self.completed_requests += 1;

        if self.fail_every > 0 && self.completed_requests % self.fail_every == 0 {
            log::warn!(
                "Catalog request {} failed (simulated), {} of {} tracks loaded",
                self.completed_requests,
                self.loaded,
                self.all.len()
            );
            self.state = RequestState::Error;
            return true;
        }

        self.loaded = (self.loaded + self.page_size).min(self.all.len());
        self.state = if self.loaded < self.all.len() {
            RequestState::PartlyDone
        } else {
            RequestState::Finished
        };
        log::debug!(
            "Catalog page delivered: {}/{} tracks ({:?})",
            self.loaded,
            self.all.len(),
            self.state
        );
        true
    }
}

impl DataSource for PagedCatalog {
    fn request_state(&self) -> RequestState {
        self.state
    }

    fn load_more(&mut self) {
        if self.state.accepts_load_more() && self.loaded < self.all.len() {
            self.request();
        }
    }

    fn retry(&mut self) {
        if self.state == RequestState::Error {
            self.request();
        }
    }
}
