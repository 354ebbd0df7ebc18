// Module declarations
mod app;
mod track;

use app::cli::Args;
use app::config::Config;
use app::{
    App, AppConstructor, AppMainLoop,
    terminal::{init_terminal, install_panic_hook, restore_terminal},
};
use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Handle --generate-config option
    if let Some(path) = &args.generate_config {
        let config_path = if path.is_dir() || path.to_str() == Some(".") {
            path.join("config.toml")
        } else {
            path.clone()
        };
        Config::generate_default(config_path)?;
        return Ok(());
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let config_existed = config_path.exists();

    let (config, config_warnings) = Config::load(Some(config_path.clone()))?;

    let logging_enabled = config.logging.enabled;
    if logging_enabled {
        app::logging::ensure_log_directory(&config.logging)?;
        app::logging::init_logger(&config.logging)?;
        app::logging::log_startup_info();
        app::logging::log_config_loading(&config_path, !config_existed);

        for warning in &config_warnings {
            log::warn!("{}", warning);
        }
    }

    let mut app = App::new_with_config(config, args)?;

    // File warnings first, then the ones found while building the app
    let mut warnings = config_warnings;
    warnings.append(&mut app.config_warnings);
    app.show_config_warnings_popup = !warnings.is_empty();
    app.config_warnings = warnings;

    install_panic_hook();
    let terminal = init_terminal()?;
    let result = app.run(terminal).await;

    if logging_enabled {
        app::logging::log_shutdown_info();
    }

    restore_terminal()?;
    result
}
