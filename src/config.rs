use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub library_path: PathBuf,
    pub default_show_id: i64,
    pub log_level: String,
    /// Scroll distance in pixels over which the header fully collapses.
    pub collapse_distance: f32,
    pub fab_animation_ms: u64,
    /// Minimum age of the loaded library before a non-forced refresh reloads it.
    pub refresh_interval_secs: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_path: data_dir().join("library.json"),
            default_show_id: 1,
            log_level: "info".to_string(),
            collapse_distance: 260.0,
            fab_animation_ms: 200,
            refresh_interval_secs: 300,
            window_width: 480.0,
            window_height: 860.0,
        }
    }
}

/// Uses SHOWDETAILS_DATA_DIR env var, or falls back to ./data/
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SHOWDETAILS_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        PathBuf::from("data")
    }
}

/// Uses SHOWDETAILS_CONFIG_DIR env var, or the platform config directory.
pub fn config_path() -> PathBuf {
    let dir = if let Ok(dir) = std::env::var("SHOWDETAILS_CONFIG_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::config_dir()
            .map(|d| d.join("showdetails"))
            .unwrap_or_else(data_dir)
    };
    dir.join("config.json")
}

impl AppConfig {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"collapse_distance": 120.0, "default_show_id": 7}"#)
            .unwrap();
        assert_eq!(config.collapse_distance, 120.0);
        assert_eq!(config.default_show_id, 7);
        assert_eq!(config.fab_animation_ms, AppConfig::default().fab_animation_ms);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("showdetails-missing-config/config.json");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(AppConfig::from_json(r#"{"fab_animation_ms": "slow"}"#).is_err());
    }
}
