use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::schedule::GridMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeekendMode {
    #[default]
    Auto,    // Only when today or a block falls on Sat/Sun
    Always,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    #[serde(default = "default_block_height")]
    pub block_height: f32,
    #[serde(default)]
    pub weekend_mode: WeekendMode,
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_row_height() -> f32 {
    60.0
}

fn default_block_height() -> f32 {
    80.0
}

fn default_categories() -> Vec<String> {
    vec![
        "Deep Work".to_string(),
        "Meetings".to_string(),
        "Breaks".to_string(),
        "Personal".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_scale: default_font_scale(),
            log_level: default_log_level(),
            row_height: default_row_height(),
            block_height: default_block_height(),
            weekend_mode: WeekendMode::Auto,
            default_categories: default_categories(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Missing file means defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    pub fn grid_metrics(&self) -> GridMetrics {
        let defaults = GridMetrics::default();
        // Non-positive sizes would collapse the grid
        let positive_or = |value: f32, fallback: f32| if value > 0.0 { value } else { fallback };
        GridMetrics {
            row_height: positive_or(self.row_height, defaults.row_height),
            block_height: positive_or(self.block_height, defaults.block_height),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "stretch", "planner")
            .context("Could not determine config directory")
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.default_categories.len(), 4);
        assert_eq!(config.grid_metrics(), GridMetrics::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            row_height: 48.0,
            weekend_mode: WeekendMode::Always,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.row_height, 48.0);
        assert_eq!(loaded.weekend_mode, WeekendMode::Always);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "block_height": -1.0, "log_level": "debug" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.font_scale, 1.0);
        assert_eq!(config.grid_metrics().block_height, 80.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
