use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Level names accepted by the `level` option
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// `[logging]` section. Logs go to a file; the terminal belongs to the list.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_enabled")]
    pub enabled: bool,
    /// One of off, error, warn, info, debug, trace
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// Mirror log lines to stdout (they draw over the list)
    #[serde(default)]
    pub log_to_console: bool,
    /// Keep the previous session's lines instead of starting a fresh file
    #[serde(default)]
    pub append_to_file: bool,
    #[serde(default = "LoggingConfig::default_rotate_logs")]
    pub rotate_logs: bool,
    /// File size in MB at which the log rotates
    #[serde(default = "LoggingConfig::default_rotation_size_mb")]
    pub rotation_size_mb: u64,
    /// Rotated files kept next to the active one
    #[serde(default = "LoggingConfig::default_keep_log_files")]
    pub keep_log_files: u32,
    /// Write here instead of `<data dir>/tracklist/logs/tracklist.log`
    #[serde(default)]
    pub custom_log_path: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_level() -> String {
        "info".to_string()
    }

    fn default_rotate_logs() -> bool {
        true
    }

    fn default_rotation_size_mb() -> u64 {
        2
    }

    fn default_keep_log_files() -> u32 {
        3
    }

    /// The configured level, lowercased, or the default when it is not a level name.
    pub fn effective_level(&self) -> String {
        let level = self.level.trim().to_lowercase();
        if LEVELS.contains(&level.as_str()) {
            level
        } else {
            Self::default_level()
        }
    }

    /// Rotation threshold in bytes; never zero.
    pub fn rotation_bytes(&self) -> u64 {
        self.rotation_size_mb.max(1) * 1024 * 1024
    }

    /// Where the active log file lives.
    pub fn log_file_path(&self) -> PathBuf {
        match &self.custom_log_path {
            Some(path) => path.clone(),
            None => crate::app::logging::get_log_directory().join("tracklist.log"),
        }
    }

    /// Values that parse but cannot be used as written.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !LEVELS.contains(&self.level.trim().to_lowercase().as_str()) {
            warnings.push(format!(
                "Unknown log level '{}' (expected one of: {}), using '{}'",
                self.level,
                LEVELS.join(", "),
                Self::default_level()
            ));
        }
        if self.rotate_logs && self.rotation_size_mb == 0 {
            warnings.push("logging.rotation_size_mb must be at least 1, using 1".to_string());
        }
        warnings
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            level: Self::default_level(),
            log_to_console: false,
            append_to_file: false,
            rotate_logs: Self::default_rotate_logs(),
            rotation_size_mb: Self::default_rotation_size_mb(),
            keep_log_files: Self::default_keep_log_files(),
            custom_log_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_is_normalized() {
        let config = LoggingConfig {
            level: " DEBUG ".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.effective_level(), "debug");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_level_falls_back_with_warning() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.effective_level(), "info");
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Unknown log level 'verbose'"));
    }

    #[test]
    fn test_zero_rotation_size_is_clamped() {
        let config = LoggingConfig {
            rotation_size_mb: 0,
            ..LoggingConfig::default()
        };
        assert_eq!(config.rotation_bytes(), 1024 * 1024);
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_log_file_path_prefers_custom_path() {
        let config = LoggingConfig {
            custom_log_path: Some(PathBuf::from("/tmp/tracklist-test.log")),
            ..LoggingConfig::default()
        };
        assert_eq!(config.log_file_path(), PathBuf::from("/tmp/tracklist-test.log"));

        let default_path = LoggingConfig::default().log_file_path();
        assert!(default_path.ends_with("tracklist.log"));
    }
}
