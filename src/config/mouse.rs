use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable gesture thresholds, read from the `[mouse]` table of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Longest gap between two presses that still counts as a double-click.
    pub double_click_ms: u64,
    /// How far (in cells, either axis) the second press may land from the first.
    pub double_click_distance: u16,
    /// Rows (or columns) reported per wheel tick.
    pub scroll_delta: u16,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 400,
            double_click_distance: 1,
            scroll_delta: 3,
        }
    }
}

impl MouseConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mouse_config() {
        let config = MouseConfig::default();
        assert_eq!(config.double_click_window(), Duration::from_millis(400));
        assert_eq!(config.double_click_distance, 1);
        assert_eq!(config.scroll_delta, 3);
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config: MouseConfig = toml::from_str("double_click_ms = 250").unwrap();
        assert_eq!(config.double_click_ms, 250);
        assert_eq!(config.scroll_delta, 3);
    }
}
