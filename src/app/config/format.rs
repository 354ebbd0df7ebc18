use crate::app::config::{BindsConfig, CatalogConfig, ColorsConfig, ListConfig, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub binds: BindsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

const KNOWN_LIST_FIELDS: &[&str] = &[
    "show_index",
    "replace_queue_on_press",
    "long_press_plays",
    "end_reached_threshold",
    "locate_hide_delay_ms",
    "locate_fade_ms",
    "wheel_step",
];

const KNOWN_COLORS_FIELDS: &[&str] = &[
    "primary",
    "text",
    "text_highlight",
    "text_secondary",
    "border",
    "card",
    "list_active",
    "local",
    "background",
    "frame",
];

const KNOWN_BINDS_FIELDS: &[&str] = &[
    "quit",
    "scroll_up",
    "scroll_down",
    "page_up",
    "page_down",
    "go_to_top",
    "go_to_bottom",
    "play_selected",
    "track_options",
    "locate",
    "retry",
    "next",
    "previous",
    "close",
];

const KNOWN_LOGGING_FIELDS: &[&str] = &[
    "enabled",
    "level",
    "log_to_console",
    "append_to_file",
    "rotate_logs",
    "rotation_size_mb",
    "keep_log_files",
    "custom_log_path",
];

const KNOWN_CATALOG_FIELDS: &[&str] = &["path", "page_size", "latency_ms", "fail_every"];

const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    ("list", KNOWN_LIST_FIELDS),
    ("colors", KNOWN_COLORS_FIELDS),
    ("binds", KNOWN_BINDS_FIELDS),
    ("logging", KNOWN_LOGGING_FIELDS),
    ("catalog", KNOWN_CATALOG_FIELDS),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Closest candidate within a few edits, for "did you mean" hints
fn find_similar<'a>(unknown: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let unknown_lower = unknown.to_lowercase();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein_distance(&unknown_lower, &candidate.to_lowercase());
            let threshold = (unknown.len().max(candidate.len()) / 2).max(3);
            (distance <= threshold).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

fn format_unknown_section(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("Unknown config section: [{}] (did you mean: [{}]?)", key, s),
        None => format!("Unknown config section: [{}]", key),
    }
}

fn format_unknown_option(section: &str, key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(
            "Unknown option in [{}]: {} (did you mean: {}?)",
            section, key, s
        ),
        None => format!("Unknown option in [{}]: {}", section, key),
    }
}

impl Config {
    /// Returns the default config file path based on the platform:
    /// - Linux: ~/.config/tracklist/config.toml (XDG_CONFIG_HOME)
    /// - macOS: ~/Library/Application Support/tracklist/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\tracklist\config.toml
    pub fn default_config_path() -> color_eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        Ok(config_dir.join("tracklist").join("config.toml"))
    }

    /// Load the config, creating a default file when none exists.
    ///
    /// Unknown keys and parse failures become warnings; a broken file falls
    /// back to the defaults instead of aborting startup.
    pub fn load(config_path: Option<PathBuf>) -> color_eyre::Result<(Self, Vec<String>)> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }

            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_path, &toml_string)?;

            // The logger is not up yet; main logs this again once it is
            eprintln!("Created default config file at: {}", config_path.display());

            return Ok((default_config, Vec::new()));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse config text, collecting warnings instead of failing.
    pub fn parse(contents: &str) -> (Self, Vec<String>) {
        let mut warnings = Self::check_unknown_fields(contents);

        let config = match toml::from_str::<Config>(contents) {
            Ok(config) => config,
            Err(e) => {
                warnings.push(format!("Failed to parse config file, using defaults: {}", e));
                Config::default()
            }
        };
        warnings.extend(config.logging.validate());

        (config, warnings)
    }

    /// Check for unknown fields in the config file and return warnings
    fn check_unknown_fields(contents: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        let table: toml::Table = match toml::from_str(contents) {
            Ok(t) => t,
            Err(_) => return warnings,
        };

        for (key, value) in &table {
            let Some((section, fields)) = KNOWN_SECTIONS.iter().find(|(name, _)| name == key)
            else {
                let suggestion = find_similar(key, KNOWN_SECTIONS.iter().map(|(name, _)| *name));
                warnings.push(format_unknown_section(key, suggestion));
                continue;
            };

            if let toml::Value::Table(section_table) = value {
                for field in section_table.keys() {
                    if !fields.contains(&field.as_str()) {
                        let suggestion = find_similar(field, fields.iter().copied());
                        warnings.push(format_unknown_option(section, field, suggestion));
                    }
                }
            }
        }

        warnings
    }

    /// Generate a default config file at the specified path
    pub fn generate_default(path: PathBuf) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(color_eyre::eyre::eyre!(
                "Config file already exists at: {}",
                path.display()
            ));
        }

        let default_config = Config::default();
        let toml_string = toml::to_string_pretty(&default_config)?;
        std::fs::write(&path, &toml_string)?;

        println!("Generated default config at: {}", path.display());
        Ok(())
    }
}
