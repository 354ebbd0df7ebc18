use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "tracklist")]
#[command(version)]
#[command(about = "A terminal music list with now-playing locate", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog file to browse (overrides config)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write a default config to the given path (or directory) and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,

    /// Show row numbers: "on" or "off" (overrides config)
    #[arg(short, long, value_parser = parse_on_off)]
    pub show_index: Option<bool>,
}

/// Parse "on" or "off" string to boolean
fn parse_on_off(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("Invalid value '{}': expected 'on' or 'off'", s)),
    }
}
