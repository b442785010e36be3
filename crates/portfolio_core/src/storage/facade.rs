//! Safe storage facade.
//!
//! # Responsibility
//! - Detect whether the wrapped store can be used right now.
//! - Encode values as JSON on write and decode on read.
//! - Convert every failure into "proceed with a safe default".
//!
//! # Invariants
//! - `is_available`, `get_item`, `set_item` and `remove_item` never return
//!   errors and never panic.
//! - Every operation re-probes availability before touching the store.
//! - No retries: a failed call is final for that call.

use super::backend::KeyValueBackend;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Sentinel key written and removed by the availability probe.
pub const PROBE_KEY: &str = "__storage_probe__";
const PROBE_VALUE: &str = "test";

/// Result of a read that keeps failure kinds apart.
///
/// `SafeStorage::get_item` collapses every non-`Found` case to the caller's
/// default; hydration needs the distinction to decide whether seeding is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Store is absent or failed the probe.
    Unavailable,
    /// No entry at the key.
    Missing,
    Found(T),
    /// Entry exists but could not be read or decoded.
    Unreadable,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Unavailable | Self::Missing | Self::Unreadable => None,
        }
    }
}

/// Never-failing JSON facade over a key-value backend.
///
/// A facade built with [`SafeStorage::detached`] models an environment with
/// no store at all (for example server-side rendering).
#[derive(Debug)]
pub struct SafeStorage<B> {
    backend: Option<B>,
}

impl<B: KeyValueBackend> SafeStorage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a facade with no underlying store.
    pub fn detached() -> Self {
        Self { backend: None }
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Probes the store with a sentinel write followed by a delete.
    pub fn is_available(&self) -> bool {
        self.usable_backend().is_some()
    }

    /// Returns the decoded value at `key`, or `default_value` on any failure.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str, default_value: T) -> T {
        self.lookup(key).found().unwrap_or(default_value)
    }

    /// Encodes `value` as JSON and writes it at `key`.
    ///
    /// Unavailable stores, encoding errors and backend errors (quota included)
    /// are logged and swallowed.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(backend) = self.usable_backend() else {
            warn!("event=storage_write module=storage status=skipped key={key} reason=unavailable");
            return;
        };

        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=storage_write module=storage status=error key={key} error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match backend.set(key, encoded.as_str()) {
            Ok(()) => debug!(
                "event=storage_write module=storage status=ok key={key} bytes={}",
                encoded.len()
            ),
            Err(err) => error!(
                "event=storage_write module=storage status=error key={key} error_code=write_failed error={err}"
            ),
        }
    }

    /// Deletes the entry at `key`; no-op when the store is unavailable.
    pub fn remove_item(&self, key: &str) {
        let Some(backend) = self.usable_backend() else {
            warn!("event=storage_remove module=storage status=skipped key={key} reason=unavailable");
            return;
        };

        if let Err(err) = backend.remove(key) {
            error!(
                "event=storage_remove module=storage status=error key={key} error_code=remove_failed error={err}"
            );
        }
    }

    /// Reads `key` and reports which failure kind, if any, occurred.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        let Some(backend) = self.usable_backend() else {
            return Lookup::Unavailable;
        };

        let raw = match backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Missing,
            Err(err) => {
                error!(
                    "event=storage_read module=storage status=error key={key} error_code=read_failed error={err}"
                );
                return Lookup::Unreadable;
            }
        };

        match serde_json::from_str::<T>(raw.as_str()) {
            Ok(value) => Lookup::Found(value),
            Err(err) => {
                warn!(
                    "event=storage_read module=storage status=error key={key} error_code=parse_failed error={err}"
                );
                Lookup::Unreadable
            }
        }
    }

    fn usable_backend(&self) -> Option<&B> {
        let backend = self.backend.as_ref()?;
        if let Err(err) = backend.set(PROBE_KEY, PROBE_VALUE) {
            debug!("event=storage_probe module=storage status=unavailable stage=write error={err}");
            return None;
        }
        if let Err(err) = backend.remove(PROBE_KEY) {
            debug!("event=storage_probe module=storage status=unavailable stage=remove error={err}");
            return None;
        }
        Some(backend)
    }
}
