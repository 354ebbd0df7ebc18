use crate::app::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, Naming};
use std::path::{Path, PathBuf};

/// Initialize the logger for the application
pub fn init_logger(config: &LoggingConfig) -> Result<(), FlexiLoggerError> {
    let level = if cfg!(debug_assertions) {
        "debug".to_string()
    } else {
        config.effective_level()
    };

    let file_spec = match &config.custom_log_path {
        Some(path) => FileSpec::try_from(path.clone())?,
        None => FileSpec::default()
            .directory(get_log_directory())
            .basename("tracklist")
            .suppress_timestamp(),
    };

    let mut logger = Logger::try_with_str(&level)?
        .log_to_file(file_spec)
        .format_for_files(custom_log_format)
        .use_utc();

    if config.append_to_file {
        logger = logger.append();
    }

    if config.rotate_logs {
        logger = logger.rotate(
            Criterion::Size(config.rotation_bytes()),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(config.keep_log_files as usize),
        );
    }

    // Console output would draw over the TUI unless explicitly requested
    if config.log_to_console {
        logger = logger.log_to_stdout();
    }

    logger.start()?;
    log::info!("Logger initialized with level: {}", level);
    log::info!("Log file location: {}", config.log_file_path().display());

    Ok(())
}

/// Per-user log directory: `<local data dir>/tracklist/logs`
pub fn get_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tracklist")
        .join("logs")
}

/// One line per record: UTC timestamp, padded level, module target
fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:<5} {}: {}",
        now.now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target().trim_start_matches("tracklist::"),
        record.args()
    )
}

/// Ensure the log file's directory exists
pub fn ensure_log_directory(config: &LoggingConfig) -> color_eyre::Result<()> {
    let log_dir = match config.log_file_path().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => return Ok(()),
    };
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }
    Ok(())
}

/// Log application startup information
pub fn log_startup_info() {
    log::info!(
        "tracklist {} starting ({}/{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}

pub fn log_shutdown_info() {
    log::info!("tracklist shutting down");
}

/// Log configuration loading
pub fn log_config_loading(config_path: &Path, created: bool) {
    if created {
        log::info!("Created default config file at: {}", config_path.display());
    } else {
        log::info!("Loaded config file from: {}", config_path.display());
    }
}

/// Log where the list data comes from
pub fn log_catalog_source(source: &str, tracks: usize, page_size: usize) {
    log::info!(
        "Catalog loaded from {}: {} tracks, {} per page",
        source,
        tracks,
        page_size
    );
}

/// Log user interactions for debugging
pub fn log_user_interaction(action: &str, context: Option<&str>) {
    match context {
        Some(ctx) => log::debug!("User action: {} - {}", action, ctx),
        None => log::debug!("User action: {}", action),
    }
}
