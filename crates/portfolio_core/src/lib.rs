//! Core of the portfolio site: a never-failing persistent key-value facade
//! and the hydration of editable content collections on top of it.

pub mod config;
pub mod content;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::{open_storage, DynStorage, RuntimeConfig, StorageLocation};
pub use content::{default_experiences, default_projects, default_skills, validate_catalog};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::experience::{timeline_icon, Experience};
pub use model::icon::Icon;
pub use model::project::Project;
pub use model::skill::{filter_by_category, skill_categories, Skill};
pub use model::theme::Theme;
pub use service::collection_service::{
    reconcile, validate_unique_keys, CollectionRecord, CollectionService, ContentSection,
    ExperienceSection, HydrationError, HydrationOutcome, HydrationResult, HydrationSource,
    ProjectsSection, Reconciled, SkillsSection, WriteBack,
};
pub use service::theme_service::{ThemeService, THEME_KEY};
pub use storage::{
    BackendError, BackendResult, KeyValueBackend, Lookup, MemoryBackend, SafeStorage,
    SchemaStatus, SqliteBackend,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
