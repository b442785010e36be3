//! Version stamp for stored content.
//!
//! Collections stay plain JSON arrays; the version lives in its own key so
//! readers can tell an old layout from a future one before decoding.

use super::backend::KeyValueBackend;
use super::facade::{Lookup, SafeStorage};
use log::{info, warn};

/// Key holding the stored-content schema version as a JSON integer.
pub const SCHEMA_VERSION_KEY: &str = "__portfolio_schema_version__";
/// Layout version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Store cannot be used; nothing was checked.
    Unavailable,
    /// No stamp existed; content is treated as current and the stamp was written.
    Stamped,
    Current,
    /// Stamp is newer than this build or cannot be decoded. Writers must back off.
    Unsupported { stored: Option<u32>, supported: u32 },
}

impl SchemaStatus {
    /// Whether collections may be read and written under this status.
    pub fn allows_writes(self) -> bool {
        matches!(self, Self::Stamped | Self::Current)
    }
}

/// Checks the schema stamp, writing it when absent.
pub fn ensure_schema<B: KeyValueBackend>(storage: &SafeStorage<B>) -> SchemaStatus {
    match storage.lookup::<u32>(SCHEMA_VERSION_KEY) {
        Lookup::Unavailable => SchemaStatus::Unavailable,
        Lookup::Missing => {
            storage.set_item(SCHEMA_VERSION_KEY, &CURRENT_SCHEMA_VERSION);
            info!(
                "event=schema_check module=storage status=stamped version={CURRENT_SCHEMA_VERSION}"
            );
            SchemaStatus::Stamped
        }
        Lookup::Found(version) if version <= CURRENT_SCHEMA_VERSION => SchemaStatus::Current,
        Lookup::Found(version) => {
            warn!(
                "event=schema_check module=storage status=unsupported stored={version} supported={CURRENT_SCHEMA_VERSION}"
            );
            SchemaStatus::Unsupported {
                stored: Some(version),
                supported: CURRENT_SCHEMA_VERSION,
            }
        }
        Lookup::Unreadable => {
            warn!(
                "event=schema_check module=storage status=unsupported stored=unreadable supported={CURRENT_SCHEMA_VERSION}"
            );
            SchemaStatus::Unsupported {
                stored: None,
                supported: CURRENT_SCHEMA_VERSION,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, SchemaStatus, CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
    use crate::storage::{MemoryBackend, SafeStorage};

    #[test]
    fn first_check_stamps_then_reports_current() {
        let storage = SafeStorage::new(MemoryBackend::new());
        assert_eq!(ensure_schema(&storage), SchemaStatus::Stamped);
        assert_eq!(ensure_schema(&storage), SchemaStatus::Current);
        assert_eq!(
            storage.get_item(SCHEMA_VERSION_KEY, 0_u32),
            CURRENT_SCHEMA_VERSION
        );
    }

    #[test]
    fn future_version_is_unsupported() {
        let storage = SafeStorage::new(MemoryBackend::new());
        storage.set_item(SCHEMA_VERSION_KEY, &(CURRENT_SCHEMA_VERSION + 1));

        let status = ensure_schema(&storage);
        assert!(!status.allows_writes());
        assert_eq!(
            status,
            SchemaStatus::Unsupported {
                stored: Some(CURRENT_SCHEMA_VERSION + 1),
                supported: CURRENT_SCHEMA_VERSION,
            }
        );
    }

    #[test]
    fn detached_store_is_unavailable() {
        let storage = SafeStorage::<MemoryBackend>::detached();
        assert_eq!(ensure_schema(&storage), SchemaStatus::Unavailable);
    }
}
