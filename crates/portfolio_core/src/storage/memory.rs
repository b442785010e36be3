//! In-memory backend with an optional byte quota.

use super::backend::{BackendError, BackendResult, KeyValueBackend};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Process-local key-value store.
///
/// Quota accounting counts UTF-8 bytes of keys plus values, so an overwrite
/// only charges the size difference.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes growing it past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns the raw stored text, bypassing any decoding.
    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Sorted key listing.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
        entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut entries = self.entries.borrow_mut();
        if let Some(quota_bytes) = self.quota_bytes {
            let released = entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let requested_bytes = Self::used_bytes(&entries) - released + key.len() + value.len();
            if requested_bytes > quota_bytes {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    requested_bytes,
                    quota_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBackend;
    use crate::storage::backend::{BackendError, KeyValueBackend};

    #[test]
    fn quota_rejects_growth_and_keeps_previous_value() {
        let backend = MemoryBackend::with_quota(12);
        backend.set("k", "small").unwrap();

        let err = backend.set("k", "far too large").unwrap_err();
        assert!(matches!(
            err,
            BackendError::QuotaExceeded {
                quota_bytes: 12,
                ..
            }
        ));
        assert_eq!(backend.raw_get("k").as_deref(), Some("small"));
    }

    #[test]
    fn overwrite_only_charges_the_difference() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("abc", "1234567").unwrap();
        backend.set("abc", "7654321").unwrap();
        assert_eq!(backend.raw_get("abc").as_deref(), Some("7654321"));
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let backend = MemoryBackend::new();
        backend.remove("nothing").unwrap();
        assert!(backend.is_empty());
    }
}
