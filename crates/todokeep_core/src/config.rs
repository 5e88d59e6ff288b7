//! Runtime configuration for stores and logging.
//!
//! # Responsibility
//! - Hold storage keys and database location used by `TodoStore`/`ThemeStore`.
//! - Resolve overrides from the process environment.
//!
//! # Invariants
//! - Defaults match the keys existing payloads were written under.
//! - Blank environment values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Storage key holding the serialized folder tree.
pub const DATA_STORAGE_KEY: &str = "todolist-data";
/// Storage key holding the active theme id.
pub const THEME_STORAGE_KEY: &str = "todolist-theme";
/// Database file name used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "todokeep.sqlite3";

pub const ENV_DB_PATH: &str = "TODOKEEP_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TODOKEEP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOKEEP_LOG_DIR";

/// Store location and storage keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file; `None` means "caller decides" (CLI falls back to cwd).
    pub db_path: Option<PathBuf>,
    pub data_key: String,
    pub theme_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            data_key: DATA_STORAGE_KEY.to_string(),
            theme_key: THEME_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds config from defaults plus `TODOKEEP_DB_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: non_blank(lookup(ENV_DB_PATH)).map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Returns the configured database path or `default` when unset.
    pub fn db_path_or(&self, default: impl Into<PathBuf>) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| default.into())
    }
}

/// Logging level and directory, consumed by `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// Builds config from `TODOKEEP_LOG_LEVEL` and `TODOKEEP_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: non_blank(lookup(ENV_LOG_LEVEL)).unwrap_or(defaults.level),
            log_dir: non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
