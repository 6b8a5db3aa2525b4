//! Configuration types for the robot service

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overrides `gameMap.baseUrl`, creating the section if absent
pub const GAME_MAP_URL_ENV: &str = "ROBOT_GAME_MAP_URL";

pub const DEFAULT_GAME_MAP_TIMEOUT_MS: u64 = 5_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_GAME_MAP_TIMEOUT_MS
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the map service lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMapConfig {
    pub base_url: String,

    /// Applied to both connecting and the whole request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl GameMapConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_GAME_MAP_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Robots are kept in memory when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Top-level configuration file (JSON)
///
/// ```json
/// {
///   "gameMap": { "baseUrl": "http://localhost:8080", "timeoutMs": 5000 },
///   "storage": { "directory": "./robots" }
/// }
/// ```
///
/// Without a `gameMap` section the static demo map is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub game_map: Option<GameMapConfig>,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ROBOT_GAME_MAP_URL` if it is set
    pub fn with_env_overrides(self) -> Self {
        self.with_game_map_url(std::env::var(GAME_MAP_URL_ENV).ok())
    }

    fn with_game_map_url(mut self, url: Option<String>) -> Self {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return self;
        };
        match self.game_map.as_mut() {
            Some(game_map) => game_map.base_url = url,
            None => self.game_map = Some(GameMapConfig::new(url)),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "gameMap": { "baseUrl": "http://map:8080" },
            "storage": { "directory": "/var/lib/robots" }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();

        let game_map = config.game_map.unwrap();
        assert_eq!(game_map.base_url, "http://map:8080");
        assert_eq!(game_map.timeout_ms, 5_000);
        assert_eq!(
            config.storage.directory,
            Some(PathBuf::from("/var/lib/robots"))
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.game_map.is_none());
        assert!(config.storage.directory.is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gameMap": {{"baseUrl": "http://localhost:9000", "timeoutMs": 250}}}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.game_map.unwrap().timeout_ms, 250);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = AppConfig::from_file(Path::new("/nonexistent/robot.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let broken = AppConfig::from_file(file.path());
        assert!(matches!(broken, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_game_map_url_override() {
        let config = AppConfig::default().with_game_map_url(Some("http://other:1".to_string()));
        assert_eq!(
            config.game_map,
            Some(GameMapConfig::new("http://other:1"))
        );

        let mut base = AppConfig::default();
        base.game_map = Some(GameMapConfig {
            base_url: "http://map:8080".to_string(),
            timeout_ms: 100,
        });
        let config = base.with_game_map_url(Some("http://other:1".to_string()));
        let game_map = config.game_map.unwrap();
        assert_eq!(game_map.base_url, "http://other:1");
        assert_eq!(game_map.timeout_ms, 100);

        let untouched = AppConfig::default().with_game_map_url(Some("  ".to_string()));
        assert!(untouched.game_map.is_none());
    }
}
