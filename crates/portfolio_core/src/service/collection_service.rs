//! Collection hydration.
//!
//! # Responsibility
//! - Load a stored collection, reattach non-serializable fields and append
//!   default records the stored copy does not know about yet.
//! - Decide when the reconciled collection is written back.
//!
//! # Invariants
//! - Stored records keep their order; missing defaults are appended after
//!   them in default order.
//! - Records present only in storage are never dropped.
//! - Natural keys are unique in every reconciled collection.
//! - No write is issued while the stored schema is unsupported.

use crate::model::experience::Experience;
use crate::model::project::Project;
use crate::model::skill::{skill_categories, Skill};
use crate::model::icon::Icon;
use crate::storage::{ensure_schema, KeyValueBackend, Lookup, SafeStorage, SchemaStatus};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

pub type HydrationResult<T> = Result<T, HydrationError>;

/// Hydration precondition failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationError {
    /// Two default records share a natural key.
    DuplicateDefaultKey {
        collection: &'static str,
        key: String,
    },
}

impl Display for HydrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDefaultKey { collection, key } => {
                write!(f, "default `{collection}` collection repeats key `{key}`")
            }
        }
    }
}

impl Error for HydrationError {}

/// When a section writes its reconciled collection back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBack {
    /// Only the first-ever load (seeding) writes.
    SeedOnly,
    /// Every mount writes the reconciled collection.
    Always,
}

/// A record that lives in a persisted, default-backed collection.
pub trait CollectionRecord: Serialize + DeserializeOwned + Clone {
    type Key: Eq + Hash + Clone + Display;

    /// Storage key of the whole collection.
    const STORAGE_KEY: &'static str;
    const WRITE_BACK: WriteBack;

    fn natural_key(&self) -> Self::Key;

    /// Restores fields that cannot round-trip through storage.
    ///
    /// `default` is the default record with the same natural key, if any.
    fn reattach(&mut self, _default: Option<&Self>) {}
}

impl CollectionRecord for Skill {
    type Key = String;

    const STORAGE_KEY: &'static str = "skills";
    const WRITE_BACK: WriteBack = WriteBack::SeedOnly;

    fn natural_key(&self) -> String {
        self.name.clone()
    }

    fn reattach(&mut self, default: Option<&Self>) {
        self.icon = default.map_or(Icon::FALLBACK, |default| default.icon);
    }
}

impl CollectionRecord for Experience {
    type Key = u32;

    const STORAGE_KEY: &'static str = "experiences";
    const WRITE_BACK: WriteBack = WriteBack::Always;

    fn natural_key(&self) -> u32 {
        self.id
    }
}

impl CollectionRecord for Project {
    type Key = u32;

    const STORAGE_KEY: &'static str = "projects";
    const WRITE_BACK: WriteBack = WriteBack::SeedOnly;

    fn natural_key(&self) -> u32 {
        self.id
    }
}

/// Fails on the first repeated natural key in `records`.
pub fn validate_unique_keys<T: CollectionRecord>(records: &[T]) -> HydrationResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let key = record.natural_key();
        if !seen.insert(key.clone()) {
            return Err(HydrationError::DuplicateDefaultKey {
                collection: T::STORAGE_KEY,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<T> {
    pub items: Vec<T>,
    /// Default records appended because storage did not have them.
    pub appended: usize,
    /// Stored records dropped because an earlier record had the same key.
    pub dropped_duplicates: usize,
}

/// Merges a stored collection with its defaults.
///
/// Every stored record gets `reattach` with its matching default. Defaults
/// whose key is absent from `stored` are appended in default order.
pub fn reconcile<T: CollectionRecord>(stored: Vec<T>, defaults: &[T]) -> Reconciled<T> {
    let defaults_by_key: HashMap<T::Key, &T> = defaults
        .iter()
        .map(|record| (record.natural_key(), record))
        .collect();

    let mut seen: HashSet<T::Key> = HashSet::with_capacity(stored.len() + defaults.len());
    let mut items = Vec::with_capacity(stored.len() + defaults.len());
    let mut dropped_duplicates = 0;

    for mut record in stored {
        let key = record.natural_key();
        if !seen.insert(key.clone()) {
            warn!(
                "event=collection_reconcile module=hydration status=dropped collection={} key={} reason=duplicate_key",
                T::STORAGE_KEY,
                key
            );
            dropped_duplicates += 1;
            continue;
        }
        record.reattach(defaults_by_key.get(&key).copied());
        items.push(record);
    }

    let kept = items.len();
    for default in defaults {
        if seen.insert(default.natural_key()) {
            items.push(default.clone());
        }
    }

    Reconciled {
        appended: items.len() - kept,
        items,
        dropped_duplicates,
    }
}

/// Where a hydrated collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// Nothing was stored; defaults were used and persisted.
    Seeded,
    /// A stored collection was reconciled.
    Stored,
    /// Stored content could not be decoded; defaults were used and the
    /// stored value was left untouched.
    Unreadable,
    /// No usable store; defaults were used.
    Unavailable,
    /// Stored schema is newer than this build; defaults were used read-only.
    Incompatible,
}

impl HydrationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seeded => "seeded",
            Self::Stored => "stored",
            Self::Unreadable => "unreadable",
            Self::Unavailable => "unavailable",
            Self::Incompatible => "incompatible",
        }
    }
}

/// Result of hydrating one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationOutcome<T> {
    pub items: Vec<T>,
    pub source: HydrationSource,
    pub appended: usize,
    /// Whether a write of the collection was issued.
    pub wrote_back: bool,
}

/// Hydration entry point bound to one storage facade.
///
/// The schema stamp is checked once, at construction.
pub struct CollectionService<'s, B> {
    storage: &'s SafeStorage<B>,
    schema: SchemaStatus,
}

impl<'s, B: KeyValueBackend> CollectionService<'s, B> {
    pub fn new(storage: &'s SafeStorage<B>) -> Self {
        let schema = ensure_schema(storage);
        Self { storage, schema }
    }

    pub fn schema_status(&self) -> SchemaStatus {
        self.schema
    }

    pub fn storage(&self) -> &'s SafeStorage<B> {
        self.storage
    }

    /// Loads and reconciles `T`'s collection against `defaults`.
    ///
    /// # Contract
    /// - Missing key: defaults are persisted and returned.
    /// - Stored key: reconciled per [`reconcile`]; written back only for
    ///   `WriteBack::Always` records.
    /// - Unreadable content or unavailable store: defaults are returned and
    ///   nothing is written, whatever the record's [`WriteBack`] policy.
    ///
    /// # Errors
    /// - `DuplicateDefaultKey` when `defaults` repeats a natural key.
    pub fn hydrate<T: CollectionRecord>(
        &self,
        defaults: &[T],
    ) -> HydrationResult<HydrationOutcome<T>> {
        validate_unique_keys(defaults)?;

        let outcome = if let SchemaStatus::Unsupported { .. } = self.schema {
            HydrationOutcome {
                items: defaults.to_vec(),
                source: HydrationSource::Incompatible,
                appended: 0,
                wrote_back: false,
            }
        } else {
            self.hydrate_compatible(defaults)
        };

        info!(
            "event=collection_hydrate module=hydration status=ok collection={} source={} items={} appended={} wrote_back={}",
            T::STORAGE_KEY,
            outcome.source.as_str(),
            outcome.items.len(),
            outcome.appended,
            outcome.wrote_back
        );
        Ok(outcome)
    }

    /// Persists an edited collection.
    ///
    /// Skipped with a warning while the stored schema is unsupported.
    pub fn save<T: CollectionRecord>(&self, items: &[T]) {
        if let SchemaStatus::Unsupported { .. } = self.schema {
            warn!(
                "event=collection_save module=hydration status=skipped collection={} reason=unsupported_schema",
                T::STORAGE_KEY
            );
            return;
        }
        self.storage.set_item(T::STORAGE_KEY, items);
    }

    /// Removes `T`'s stored collection so the next hydration reseeds it.
    pub fn reset<T: CollectionRecord>(&self) {
        self.storage.remove_item(T::STORAGE_KEY);
        info!(
            "event=collection_reset module=hydration status=ok collection={}",
            T::STORAGE_KEY
        );
    }

    fn hydrate_compatible<T: CollectionRecord>(&self, defaults: &[T]) -> HydrationOutcome<T> {
        let always = T::WRITE_BACK == WriteBack::Always;

        let (items, appended) = match self.storage.lookup::<Vec<T>>(T::STORAGE_KEY) {
            Lookup::Unavailable => {
                return HydrationOutcome {
                    items: defaults.to_vec(),
                    source: HydrationSource::Unavailable,
                    appended: 0,
                    wrote_back: false,
                };
            }
            Lookup::Missing => {
                self.storage.set_item(T::STORAGE_KEY, defaults);
                return HydrationOutcome {
                    items: defaults.to_vec(),
                    source: HydrationSource::Seeded,
                    appended: 0,
                    wrote_back: true,
                };
            }
            Lookup::Unreadable => {
                warn!(
                    "event=collection_hydrate module=hydration status=degraded collection={} reason=unreadable write_back=skipped",
                    T::STORAGE_KEY
                );
                return HydrationOutcome {
                    items: defaults.to_vec(),
                    source: HydrationSource::Unreadable,
                    appended: 0,
                    wrote_back: false,
                };
            }
            Lookup::Found(stored) => {
                let reconciled = reconcile(stored, defaults);
                (reconciled.items, reconciled.appended)
            }
        };

        if always {
            self.storage.set_item(T::STORAGE_KEY, items.as_slice());
        }

        HydrationOutcome {
            items,
            source: HydrationSource::Stored,
            appended,
            wrote_back: always,
        }
    }
}

/// In-memory collection owned by one content section.
///
/// Starts out holding the defaults and hydrates at most once.
#[derive(Debug, Clone)]
pub struct ContentSection<T> {
    defaults: Vec<T>,
    items: Vec<T>,
    source: Option<HydrationSource>,
}

pub type SkillsSection = ContentSection<Skill>;
pub type ExperienceSection = ContentSection<Experience>;
pub type ProjectsSection = ContentSection<Project>;

impl<T: CollectionRecord> ContentSection<T> {
    pub fn new(defaults: Vec<T>) -> Self {
        Self {
            items: defaults.clone(),
            defaults,
            source: None,
        }
    }

    /// Hydrates the section on first mount.
    ///
    /// Returns `Ok(false)` without touching storage when already mounted.
    pub fn mount<B: KeyValueBackend>(
        &mut self,
        service: &CollectionService<'_, B>,
    ) -> HydrationResult<bool> {
        if self.source.is_some() {
            return Ok(false);
        }

        let outcome = service.hydrate(&self.defaults)?;
        self.items = outcome.items;
        self.source = Some(outcome.source);
        Ok(true)
    }

    pub fn is_mounted(&self) -> bool {
        self.source.is_some()
    }

    /// How the current items were obtained; `None` before mount.
    pub fn source(&self) -> Option<HydrationSource> {
        self.source
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the collection after an edit and writes it through.
    pub fn replace<B: KeyValueBackend>(&mut self, items: Vec<T>, service: &CollectionService<'_, B>) {
        service.save(&items);
        self.items = items;
    }
}

impl ContentSection<Skill> {
    /// Distinct skill categories in display order.
    pub fn categories(&self) -> Vec<&str> {
        skill_categories(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::{reconcile, validate_unique_keys, HydrationError};
    use crate::model::icon::Icon;
    use crate::model::skill::Skill;

    #[test]
    fn duplicate_default_keys_are_rejected() {
        let defaults = vec![
            Skill::new("React", "frontend", 80, Icon::Code),
            Skill::new("React", "frontend", 70, Icon::Box),
        ];
        let err = validate_unique_keys(&defaults).unwrap_err();
        assert_eq!(
            err,
            HydrationError::DuplicateDefaultKey {
                collection: "skills",
                key: "React".to_string(),
            }
        );
    }

    #[test]
    fn repeated_stored_key_keeps_first_occurrence() {
        let stored = vec![
            Skill::new("Go", "backend", 40, Icon::FALLBACK),
            Skill::new("Go", "backend", 90, Icon::FALLBACK),
        ];
        let reconciled = reconcile(stored, &[]);
        assert_eq!(reconciled.items.len(), 1);
        assert_eq!(reconciled.items[0].level, 40);
        assert_eq!(reconciled.dropped_duplicates, 1);
    }
}
