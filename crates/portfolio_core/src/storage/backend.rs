//! Raw key-value backend contract.
//!
//! # Responsibility
//! - Describe the synchronous string store the facade wraps.
//! - Surface backend failures as typed errors; the facade decides how to recover.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by a raw key-value backend.
#[derive(Debug)]
pub enum BackendError {
    /// Write rejected because the store would grow past its byte quota.
    QuotaExceeded {
        key: String,
        requested_bytes: usize,
        quota_bytes: usize,
    },
    Db(DbError),
    /// Store exists but refuses access (locked down, disabled, poisoned).
    Unavailable(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                requested_bytes,
                quota_bytes,
            } => write!(
                f,
                "quota exceeded writing `{key}`: {requested_bytes} bytes requested, quota is {quota_bytes}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for BackendError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string-to-string store, the shape of a browser `Storage`.
pub trait KeyValueBackend {
    /// Returns the raw value at `key`, or `None` when no entry exists.
    fn get(&self, key: &str) -> BackendResult<Option<String>>;
    /// Inserts or overwrites the raw value at `key`.
    fn set(&self, key: &str, value: &str) -> BackendResult<()>;
    /// Deletes the entry at `key`; deleting a missing key succeeds.
    fn remove(&self, key: &str) -> BackendResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        (**self).remove(key)
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        (**self).remove(key)
    }
}
