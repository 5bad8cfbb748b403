use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant, SystemTime};

use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};

use crate::error::{DeckError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Changed(PathBuf),
    Error(String),
}

pub struct ConfigWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<ConfigEvent>,
}

impl ConfigWatcher {
    pub fn new(config_dir: &Path, debounce_ms: u64) -> Result<Self> {
        let (tx, rx) = channel::<ConfigEvent>();

        let debouncer = Self::setup_watcher(config_dir, tx, debounce_ms)?;

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    fn setup_watcher(
        config_dir: &Path,
        tx: Sender<ConfigEvent>,
        debounce_ms: u64,
    ) -> Result<Debouncer<RecommendedWatcher>> {
        let mut debouncer = new_debouncer(
            Duration::from_millis(debounce_ms),
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    for event in events {
                        if Self::is_config_file(&event.path) {
                            let _ = tx.send(ConfigEvent::Changed(event.path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(ConfigEvent::Error(format!("{:?}", e)));
                }
            },
        )
        .map_err(|e| DeckError::Config(format!("Failed to create watcher: {}", e)))?;

        if config_dir.exists() {
            debouncer
                .watcher()
                .watch(config_dir, RecursiveMode::NonRecursive)
                .map_err(|e| DeckError::Config(format!("Failed to watch config dir: {}", e)))?;
        }

        Ok(debouncer)
    }

    fn is_config_file(path: &Path) -> bool {
        let extension = path.extension().and_then(|e| e.to_str());
        matches!(extension, Some("toml"))
    }

    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.rx.try_recv().ok()
    }

    pub fn poll_events(&self) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

/// mtime polling for filesystems where notify is unavailable.
pub struct TickBasedWatcher {
    config_dir: PathBuf,
    last_check: Instant,
    check_interval: Duration,
    file_mtimes: HashMap<PathBuf, SystemTime>,
}

impl TickBasedWatcher {
    pub fn new(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        let mut watcher = Self {
            config_dir,
            last_check: Instant::now(),
            check_interval: Duration::from_millis(check_interval_ms),
            file_mtimes: HashMap::new(),
        };
        watcher.scan_files();
        watcher
    }

    fn scan_files(&mut self) {
        for (path, mtime) in self.current_mtimes() {
            self.file_mtimes.insert(path, mtime);
        }
    }

    fn current_mtimes(&self) -> Vec<(PathBuf, SystemTime)> {
        let Ok(entries) = std::fs::read_dir(&self.config_dir) else {
            return Vec::new();
        };

        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| ConfigWatcher::is_config_file(path))
            .filter_map(|path| {
                let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((path, mtime))
            })
            .collect()
    }

    pub fn check(&mut self) -> Vec<ConfigEvent> {
        if self.last_check.elapsed() < self.check_interval {
            return Vec::new();
        }
        self.last_check = Instant::now();

        let mut events = Vec::new();
        for (path, mtime) in self.current_mtimes() {
            let changed = self
                .file_mtimes
                .get(&path)
                .map(|&old_mtime| mtime != old_mtime)
                .unwrap_or(true);

            if changed {
                self.file_mtimes.insert(path.clone(), mtime);
                events.push(ConfigEvent::Changed(path));
            }
        }
        events
    }
}

pub enum ConfigWatcherMode {
    Notify(ConfigWatcher),
    Tick(TickBasedWatcher),
}

impl ConfigWatcherMode {
    pub fn notify(config_dir: &Path, debounce_ms: u64) -> Result<Self> {
        Ok(Self::Notify(ConfigWatcher::new(config_dir, debounce_ms)?))
    }

    pub fn tick(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        Self::Tick(TickBasedWatcher::new(config_dir, check_interval_ms))
    }

    /// Prefer notify; fall back to mtime polling if it cannot be set up.
    pub fn best_effort(config_dir: &Path, debounce_ms: u64) -> Self {
        match Self::notify(config_dir, debounce_ms) {
            Ok(watcher) => watcher,
            Err(e) => {
                tracing::warn!("{}; polling config dir instead", e);
                Self::tick(config_dir.to_path_buf(), debounce_ms.max(250))
            }
        }
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        match self {
            Self::Notify(watcher) => watcher.poll_events(),
            Self::Tick(watcher) => watcher.check(),
        }
    }
}
