use color_eyre::eyre::Result;

use ridge_deck::app::{terminal, App, Overrides};
use ridge_deck::cli::Cli;
use ridge_deck::config::ConfigManager;
use ridge_deck::error::DeckError;
use ridge_deck::logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let config_manager = match &cli.config_dir {
        Some(dir) if !dir.exists() && !cli.write_default_config => {
            return Err(DeckError::ConfigNotFound { path: dir.clone() }.into());
        }
        Some(dir) => ConfigManager::with_dir(dir.clone()),
        None => ConfigManager::new()?,
    };

    if cli.write_default_config {
        let written = config_manager.write_default_configs()?;
        if written.is_empty() {
            println!("Config files already exist in {}", config_manager.config_dir().display());
        }
        for path in written {
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let general = &config_manager.app_config().general;
    let level = cli.log_level.clone().unwrap_or_else(|| general.log_level.clone());
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| general.log_file.clone())
        .or_else(logging::default_log_path)
        .ok_or_else(|| DeckError::Logging("Could not determine log file location".to_string()))?;
    let _log_guard = logging::init(&level, &log_file)?;

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let root = root.canonicalize()?;
    let overrides = Overrides::from_cli(&cli)?;

    // Dropped after the app, so the terminal is restored even on error.
    let (terminal, _terminal_guard) = terminal::enter()?;
    let mut app = App::new(terminal, config_manager, root, overrides)?;
    app.run()?;

    Ok(())
}
