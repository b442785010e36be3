//! Persistent key-value storage.
//!
//! # Responsibility
//! - Wrap a synchronous string store behind a facade that never fails.
//! - Provide in-memory and SQLite backends.
//! - Stamp stored content with a schema version.
//!
//! # Invariants
//! - Facade calls never panic and never return errors; failures degrade to
//!   defaults or no-ops and are logged.

pub mod backend;
mod facade;
pub mod memory;
pub mod schema;
pub mod sqlite;

pub use backend::{BackendError, BackendResult, KeyValueBackend};
pub use facade::{Lookup, SafeStorage, PROBE_KEY};
pub use memory::MemoryBackend;
pub use schema::{ensure_schema, SchemaStatus, CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
pub use sqlite::SqliteBackend;
