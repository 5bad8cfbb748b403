//! File-backed tracing setup. The terminal belongs to the TUI, so nothing is
//! ever written to stdout or stderr once the app is running.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{DeckError, Result};

const LOG_FILE: &str = "ridge-deck.log";

/// Default log location: `<data_dir>/ridge-deck/ridge-deck.log`.
pub fn default_log_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_local_dir().join("ridge-deck").join(LOG_FILE))
}

/// `RUST_LOG` wins over `level` when it is set and parses.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init(level: &str, log_file: &Path) -> Result<WorkerGuard> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(build_filter(level))
        .try_init()
        .map_err(|e| DeckError::Logging(e.to_string()))?;

    tracing::info!(path = %log_file.display(), "logging initialised");
    Ok(guard)
}
