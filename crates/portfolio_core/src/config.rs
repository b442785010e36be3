//! Runtime configuration for storage location and logging.
//!
//! # Responsibility
//! - Read settings from `PORTFOLIO_*` environment variables, with
//!   command-line values taking precedence.
//! - Normalize and validate user-supplied paths.
//! - Open the configured store, degrading to a detached facade on failure.

use crate::logging::default_log_level;
use crate::storage::{KeyValueBackend, SafeStorage, SqliteBackend};
use log::{error, info};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "PORTFOLIO_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "PORTFOLIO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PORTFOLIO_LOG_DIR";

/// Where the key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// No store at all; every facade call takes its fallback path.
    Detached,
    /// SQLite database file.
    File(PathBuf),
}

/// Facade over whichever backend the location selects.
pub type DynStorage = SafeStorage<Box<dyn KeyValueBackend>>;

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub storage: StorageLocation,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::Detached,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Builds the configuration from `PORTFOLIO_*` variables.
    ///
    /// # Errors
    /// - Returns an error when a path variable is empty or relative.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(db_path) = lookup(ENV_DB_PATH) {
            config.storage = StorageLocation::File(normalize_path(ENV_DB_PATH, &db_path)?);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_ascii_lowercase();
        }
        if let Some(log_dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = Some(normalize_path(ENV_LOG_DIR, &log_dir)?);
        }

        Ok(config)
    }

    /// Replaces settings with explicitly supplied values.
    ///
    /// # Errors
    /// - Returns an error when `db` or `log_dir` is empty or relative.
    pub fn with_overrides(
        mut self,
        db: Option<&str>,
        log_level: Option<&str>,
        log_dir: Option<&str>,
    ) -> Result<Self, String> {
        if let Some(raw) = db {
            self.storage = StorageLocation::File(normalize_path("--db", raw)?);
        }
        if let Some(level) = log_level {
            self.log_level = level.trim().to_ascii_lowercase();
        }
        if let Some(raw) = log_dir {
            self.log_dir = Some(normalize_path("--log-dir", raw)?);
        }
        Ok(self)
    }
}

/// Requires a non-empty absolute path.
pub fn normalize_path(label: &str, raw: &str) -> Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("{label} must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

/// Opens the store at `location`.
///
/// A database that cannot be opened yields a detached facade, so callers keep
/// working with defaults.
pub fn open_storage(location: &StorageLocation) -> DynStorage {
    match location {
        StorageLocation::Detached => SafeStorage::detached(),
        StorageLocation::File(path) => match SqliteBackend::open(path) {
            Ok(backend) => {
                info!(
                    "event=storage_open module=config status=ok path={}",
                    path.display()
                );
                let backend: Box<dyn KeyValueBackend> = Box::new(backend);
                SafeStorage::new(backend)
            }
            Err(err) => {
                error!(
                    "event=storage_open module=config status=error path={} error_code=open_failed error={}",
                    path.display(),
                    err
                );
                SafeStorage::detached()
            }
        },
    }
}
