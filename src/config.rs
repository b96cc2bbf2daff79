//! Configuration management for todo-accounts.
//!
//! This module handles the optional `todo-config.yaml` file which selects
//! the database file and toggles the debug event log.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the base directory.
pub const CONFIG_FILE_PATH: &str = "todo-config.yaml";

/// Default database filename.
pub const DEFAULT_DATABASE_PATH: &str = "todo.db";

/// Default event log filename.
pub const DEFAULT_EVENT_LOG_PATH: &str = "todo-events.jsonl";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Path to the `SQLite` database file, relative to the base directory
    /// unless absolute.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Append account and task events to a JSONL log.
    #[serde(default)]
    pub debug_logging: bool,

    /// Where the event log is written. None means `todo-events.jsonl`
    /// in the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log_path: Option<PathBuf>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { database_path: default_database_path(), debug_logging: false, event_log_path: None }
    }
}

impl AppConfig {
    /// Load config from a specific base directory, falling back to defaults
    /// when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// The database path resolved against the base directory.
    #[must_use]
    pub fn resolved_database_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.database_path)
    }

    /// The event log path resolved against the base directory.
    #[must_use]
    pub fn resolved_event_log_path(&self, base_dir: &Path) -> PathBuf {
        self.event_log_path.as_ref().map_or_else(
            || base_dir.join(DEFAULT_EVENT_LOG_PATH),
            |path| base_dir.join(path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_path, PathBuf::from("todo.db"));
        assert!(!config.debug_logging);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            database_path: PathBuf::from("data/tasks.sqlite3"),
            debug_logging: true,
            event_log_path: Some(PathBuf::from("logs/events.jsonl")),
        };

        config.save_to(dir.path()).unwrap();
        assert!(AppConfig::config_path(dir.path()).exists());

        let loaded = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_PATH), "debug_logging: true\n").unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert!(config.debug_logging);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert!(config.event_log_path.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_PATH), "").unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_PATH), "debug_logging: [not, a, bool").unwrap();

        let result = AppConfig::load_from(dir.path());
        assert!(matches!(result, Err(crate::error::Error::Yaml(_))));
    }

    #[test]
    fn test_resolved_paths() {
        let base = Path::new("/srv/todo");
        let config = AppConfig::default();
        assert_eq!(config.resolved_database_path(base), PathBuf::from("/srv/todo/todo.db"));
        assert_eq!(
            config.resolved_event_log_path(base),
            PathBuf::from("/srv/todo/todo-events.jsonl")
        );

        let config = AppConfig {
            database_path: PathBuf::from("/var/lib/todo.db"),
            event_log_path: Some(PathBuf::from("events.jsonl")),
            ..Default::default()
        };
        // Absolute paths win over the base directory.
        assert_eq!(config.resolved_database_path(base), PathBuf::from("/var/lib/todo.db"));
        assert_eq!(config.resolved_event_log_path(base), PathBuf::from("/srv/todo/events.jsonl"));
    }
}
