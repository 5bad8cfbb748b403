use std::path::PathBuf;

use clap::Parser;

/// Ridge-Deck: multi-pane terminal dashboard (file list, preview, resizable panes)
#[derive(Parser, Debug, Clone)]
#[command(name = "ridge-deck")]
#[command(author = "RidgetopAI")]
#[command(version)]
#[command(about = "Multi-pane terminal dashboard with mouse-driven panes", long_about = None)]
pub struct Cli {
    /// Directory shown in the file pane
    #[arg(short = 'C', long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Read config.toml and theme.toml from this directory
    #[arg(long, value_name = "DIR", env = "RIDGE_DECK_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Override the double-click window from the config file
    #[arg(long, value_name = "MS")]
    pub double_click_ms: Option<u64>,

    /// Built-in theme (default, vibrant). Overrides theme.toml.
    #[arg(long)]
    pub theme: Option<String>,

    /// Write default config files and exit
    #[arg(long, default_value_t = false)]
    pub write_default_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
