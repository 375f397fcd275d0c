//! User configuration from `~/.arcade/config.json`.
//!
//! Every field has a default, so a partial or missing file is fine. A file
//! that does not parse is logged and ignored.

use crate::error::Result;
use crate::flappy::types::FlappyConfig;
use crate::snake::types::SnakeConfig;
use crate::utils::persistence::{load_json_at_or_default, save_path};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Width of the container the canvases are fitted into (logical px).
    pub container_width: u32,
    /// Target display frames per second.
    pub frame_rate_hz: u32,
    /// Start with sound on.
    pub sound_enabled: bool,
    pub snake: SnakeConfig,
    pub flappy: FlappyConfig,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            container_width: 620,
            frame_rate_hz: 60,
            sound_enabled: false,
            snake: SnakeConfig::default(),
            flappy: FlappyConfig::default(),
        }
    }
}

impl ArcadeConfig {
    /// Load from the default location, falling back to defaults. On first
    /// run the defaults are written out so there is a file to edit.
    pub fn load() -> Self {
        match save_path(CONFIG_FILE) {
            Ok(path) if !path.exists() => {
                let config = Self::default();
                if let Err(e) = config.save_to(&path) {
                    tracing::warn!(error = %e, "could not write default config");
                }
                config
            }
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no config directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_at_or_default(path)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Time budget of one display frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate_hz.clamp(1, 240)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArcadeError;

    #[test]
    fn test_defaults() {
        let config = ArcadeConfig::default();
        assert_eq!(config.container_width, 620);
        assert!(!config.sound_enabled);
        assert_eq!(config.frame_budget(), Duration::from_millis(16));
        assert_eq!(config.snake.initial_interval_ms, 150.0);
        assert_eq!(config.flappy.gravity, 0.5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "sound_enabled": true, "snake": { "show_grid": false } }"#,
        )
        .unwrap();

        let config = ArcadeConfig::load_from(&path);
        assert!(config.sound_enabled);
        assert!(!config.snake.show_grid);
        assert_eq!(config.snake.cell_px, 20.0);
        assert_eq!(config.frame_rate_hz, 60);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "sound = on").unwrap();
        assert_eq!(ArcadeConfig::load_from(&path), ArcadeConfig::default());
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = ArcadeConfig::default();
        config.flappy.pipe_gap = 170.0;
        config.frame_rate_hz = 30;
        config.save_to(&path).unwrap();

        let loaded = ArcadeConfig::load_from(&path);
        assert_eq!(loaded.flappy.pipe_gap, 170.0);
        assert_eq!(loaded.frame_rate_hz, 30);
        assert_eq!(loaded.snake, config.snake);
    }

    #[test]
    fn test_save_into_file_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let err = ArcadeConfig::default()
            .save_to(&blocker.join(CONFIG_FILE))
            .unwrap_err();
        assert!(matches!(err, ArcadeError::Io(_)));
    }

    #[test]
    fn test_frame_budget_clamps_rate() {
        let config = ArcadeConfig {
            frame_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_budget(), Duration::from_secs(1));
    }
}
