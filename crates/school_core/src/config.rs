//! Environment-driven configuration for store and logging.
//!
//! # Responsibility
//! - Resolve the database file path and logging settings once, up front.
//! - Keep outer layers from reaching for hidden global store locations.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - Resolution never touches the filesystem.

use crate::db::{open_db, DbResult};
use crate::logging::default_log_level;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SCHOOL_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SCHOOL_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SCHOOL_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "school.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`; validated by `init_logging`.
    pub log_level: String,
    /// Rolling log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl SchoolConfig {
    /// Reads `SCHOOL_DB_PATH`, `SCHOOL_LOG_LEVEL` and `SCHOOL_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Opens the configured database file with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }
}
