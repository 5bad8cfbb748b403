mod mouse;
mod theme;
mod watcher;

pub use mouse::MouseConfig;
pub use theme::{HexColor, Theme};
pub use watcher::{ConfigEvent, ConfigWatcherMode};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::error::{DeckError, Result};

const CONFIG_DIR: &str = "ridge-deck";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub mouse: MouseConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub watch_config: bool,
    pub config_watch_debounce_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            log_level: "info".to_string(),
            log_file: None,
            watch_config: true,
            config_watch_debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the file pane on startup, in cells.
    pub sidebar_width: u16,
    pub min_sidebar_width: u16,
    /// Widest the file pane may be dragged, as a percentage of the screen.
    pub max_sidebar_percent: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 30,
            min_sidebar_width: 12,
            max_sidebar_percent: 80,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme: Theme,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(Self::default_config_dir()?))
    }

    /// Load from an explicit directory (`--config-dir`, tests).
    pub fn with_dir(config_dir: PathBuf) -> Self {
        let app_config = Self::load_app_config(&config_dir);
        let theme = Self::load_theme(&config_dir);

        Self {
            config_dir,
            app_config,
            theme,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn reload_all(&mut self) {
        self.app_config = Self::load_app_config(&self.config_dir);
        self.theme = Self::load_theme(&self.config_dir);
    }

    pub fn reload_file(&mut self, path: &Path) {
        let file_name = path.file_name().and_then(|n| n.to_str());

        match file_name {
            Some(MAIN_CONFIG_FILE) => {
                self.app_config = Self::load_app_config(&self.config_dir);
            }
            Some(THEME_FILE) => {
                self.theme = Self::load_theme(&self.config_dir);
            }
            _ => {
                self.reload_all();
            }
        }
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| DeckError::Config("Could not determine config directory".to_string()))
    }

    fn load_app_config(config_dir: &Path) -> AppConfig {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_theme(config_dir: &Path) -> Theme {
        let path = config_dir.join(THEME_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| DeckError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    /// Write `config.toml` and `theme.toml` with default values, leaving
    /// existing files alone. Returns the paths that were written.
    pub fn write_default_configs(&self) -> Result<Vec<PathBuf>> {
        self.ensure_config_dir()?;
        let mut written = Vec::new();

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| DeckError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)
                .map_err(|e| DeckError::Config(format!("Failed to write config: {}", e)))?;
            written.push(main_path);
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| DeckError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| DeckError::Config(format!("Failed to write theme: {}", e)))?;
            written.push(theme_path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.tick_interval_ms, 500);
        assert!(config.general.watch_config);
        assert_eq!(config.mouse, MouseConfig::default());
        assert_eq!(config.layout.sidebar_width, 30);
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[mouse]"));
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.mouse, config.mouse);
        assert_eq!(parsed.layout, config.layout);
    }

    #[test]
    fn test_missing_dir_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().join("absent"));
        assert_eq!(manager.app_config().mouse, MouseConfig::default());
        assert_eq!(manager.theme().name, "default");
    }

    #[test]
    fn test_loads_mouse_table() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(MAIN_CONFIG_FILE),
            "[mouse]\ndouble_click_ms = 250\nscroll_delta = 1\n",
        )
        .unwrap();

        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        let mouse = &manager.app_config().mouse;
        assert_eq!(mouse.double_click_ms, 250);
        assert_eq!(mouse.scroll_delta, 1);
        assert_eq!(mouse.double_click_distance, 1);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(MAIN_CONFIG_FILE), "not valid toml {{{").unwrap();

        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(manager.app_config().mouse, MouseConfig::default());
    }

    #[test]
    fn test_reload_file_picks_up_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MAIN_CONFIG_FILE);
        let mut manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(manager.app_config().mouse.double_click_ms, 400);

        std::fs::write(&path, "[mouse]\ndouble_click_ms = 600\n").unwrap();
        manager.reload_file(&path);
        assert_eq!(manager.app_config().mouse.double_click_ms, 600);
    }

    #[test]
    fn test_write_default_configs_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().join("ridge-deck"));

        let written = manager.write_default_configs().unwrap();
        assert_eq!(written.len(), 2);
        assert!(manager.config_dir().join(MAIN_CONFIG_FILE).exists());

        let again = manager.write_default_configs().unwrap();
        assert!(again.is_empty());
    }
}
