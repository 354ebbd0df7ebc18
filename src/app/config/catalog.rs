use serde::{Deserialize, Serialize};

/// Settings for the bundled paged catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog file to browse; the built-in sample is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Rows delivered per page
    #[serde(default = "CatalogConfig::default_page_size")]
    pub page_size: usize,
    /// Simulated latency of each page request
    #[serde(default = "CatalogConfig::default_latency_ms")]
    pub latency_ms: u64,
    /// Fail every n-th page request (0 disables)
    #[serde(default)]
    pub fail_every: u32,
}

impl CatalogConfig {
    fn default_page_size() -> usize {
        20
    }

    fn default_latency_ms() -> u64 {
        400
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: Self::default_page_size(),
            latency_ms: Self::default_latency_ms(),
            fail_every: 0,
        }
    }
}
