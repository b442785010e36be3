//! SQLite file behind `SqliteBackend`.
//!
//! A store is a single `kv_entries` table: the string key, the JSON text
//! written by the facade and an `updated_at` millisecond stamp.
//! [`open_db`] turns on WAL and a busy timeout, then runs [`migrations`]
//! before handing out the connection.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A file stamped by a newer build is refused with [`DbError::NewerSchema`],
//!   so its rows are never rewritten by an older layout.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `user_version` is past the last migration this build ships.
    NewerSchema { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NewerSchema { found, supported } => write!(
                f,
                "kv_entries schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
