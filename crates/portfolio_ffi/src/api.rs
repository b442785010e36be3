//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the storage facade, section hydration and theme preference to the UI shell.
//! - Flatten core records into view structs with string icon names.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Until `configure_storage` succeeds, every call behaves as a detached store.

use log::warn;
use portfolio_core::{
    core_version as core_version_inner, default_experiences, default_projects, default_skills,
    init_logging as init_logging_inner, open_storage, ping as ping_inner, timeline_icon,
    CollectionRecord, CollectionService, DynStorage, Lookup, StorageLocation, Theme,
    ThemeService,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STORAGE_DB_FILE_NAME: &str = "portfolio_store.sqlite3";
static STORAGE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
/// Repeating the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the directory holding the persistent store.
///
/// Input semantics:
/// - `data_dir`: absolute directory; the database file is created inside it.
///
/// # FFI contract
/// - First successful call wins; later calls with a different directory fail.
/// - Returns an empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage(data_dir: String) -> String {
    let dir = match portfolio_core::config::normalize_path("data_dir", data_dir.as_str()) {
        Ok(dir) => dir,
        Err(err) => return err,
    };
    if let Err(err) = std::fs::create_dir_all(&dir) {
        return format!("failed to create data directory `{}`: {err}", dir.display());
    }

    let db_path = dir.join(STORAGE_DB_FILE_NAME);
    let active = STORAGE_DB_PATH.get_or_init(|| db_path.clone());
    if *active != db_path {
        return format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            db_path.display()
        );
    }
    String::new()
}

/// Whether the configured store can currently be written and read.
#[flutter_rust_bridge::frb(sync)]
pub fn storage_is_available() -> bool {
    with_storage(|storage| storage.is_available())
}

/// Returns the JSON stored at `key`, or `default_json` verbatim when the
/// entry is missing, unreadable or the store is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn storage_get_item(key: String, default_json: String) -> String {
    with_storage(
        |storage| match storage.lookup::<serde_json::Value>(key.as_str()) {
            Lookup::Found(value) => value.to_string(),
            Lookup::Missing | Lookup::Unreadable | Lookup::Unavailable => default_json,
        },
    )
}

/// Stores `value_json` at `key`.
///
/// Returns an error message only when `value_json` is not valid JSON; store
/// failures are swallowed by the facade.
#[flutter_rust_bridge::frb(sync)]
pub fn storage_set_item(key: String, value_json: String) -> String {
    let value = match serde_json::from_str::<serde_json::Value>(value_json.as_str()) {
        Ok(value) => value,
        Err(err) => return format!("invalid JSON value for `{key}`: {err}"),
    };
    with_storage(|storage| storage.set_item(key.as_str(), &value));
    String::new()
}

#[flutter_rust_bridge::frb(sync)]
pub fn storage_remove_item(key: String) {
    with_storage(|storage| storage.remove_item(key.as_str()));
}

/// Skill card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillView {
    pub name: String,
    pub category: String,
    pub level: u8,
    /// Kebab-case icon asset name.
    pub icon: String,
}

/// Experience timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceView {
    pub id: u32,
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub icon: String,
}

/// Project card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub demo_url: String,
    pub github_url: String,
    pub category: Option<String>,
}

/// Hydrates the skills section.
#[flutter_rust_bridge::frb(sync)]
pub fn load_skills() -> Vec<SkillView> {
    hydrate_or_defaults(default_skills())
        .into_iter()
        .map(|skill| SkillView {
            name: skill.name,
            category: skill.category,
            level: skill.level,
            icon: skill.icon.as_str().to_string(),
        })
        .collect()
}

/// Hydrates the experience timeline.
#[flutter_rust_bridge::frb(sync)]
pub fn load_experiences() -> Vec<ExperienceView> {
    hydrate_or_defaults(default_experiences())
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ExperienceView {
            id: entry.id,
            role: entry.role,
            company: entry.company,
            duration: entry.duration,
            description: entry.description,
            technologies: entry.technologies,
            icon: timeline_icon(index).as_str().to_string(),
        })
        .collect()
}

/// Hydrates the project gallery.
#[flutter_rust_bridge::frb(sync)]
pub fn load_projects() -> Vec<ProjectView> {
    hydrate_or_defaults(default_projects())
        .into_iter()
        .map(|project| ProjectView {
            id: project.id,
            title: project.title,
            description: project.description,
            image: project.image,
            tags: project.tags,
            demo_url: project.demo_url,
            github_url: project.github_url,
            category: project.category,
        })
        .collect()
}

/// Returns `"light"` or `"dark"`.
#[flutter_rust_bridge::frb(sync)]
pub fn load_theme(system_prefers_dark: bool) -> String {
    with_storage(|storage| ThemeService::new(storage).load(system_prefers_dark))
        .as_str()
        .to_string()
}

/// Flips the current theme, persists it and returns the new value.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_theme(system_prefers_dark: bool) -> String {
    let next: Theme = with_storage(|storage| {
        let themes = ThemeService::new(storage);
        themes.toggle(themes.load(system_prefers_dark))
    });
    next.as_str().to_string()
}

fn with_storage<R>(run: impl FnOnce(&DynStorage) -> R) -> R {
    let location = STORAGE_DB_PATH
        .get()
        .map_or(StorageLocation::Detached, |path| {
            StorageLocation::File(path.clone())
        });
    let storage = open_storage(&location);
    run(&storage)
}

fn hydrate_or_defaults<T: CollectionRecord>(defaults: Vec<T>) -> Vec<T> {
    with_storage(|storage| {
        match CollectionService::new(storage).hydrate(&defaults) {
            Ok(outcome) => outcome.items,
            Err(err) => {
                warn!(
                    "event=ffi_hydrate module=ffi status=error collection={} error={}",
                    T::STORAGE_KEY,
                    err
                );
                defaults.clone()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{
        load_experiences, load_skills, load_theme, ping, storage_get_item, storage_is_available,
        storage_set_item,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn unconfigured_storage_behaves_as_detached() {
        assert!(!storage_is_available());
        assert_eq!(
            storage_get_item("theme".to_string(), "\"light\"".to_string()),
            "\"light\""
        );
        assert_eq!(load_theme(true), "dark");
    }

    #[test]
    fn set_item_rejects_invalid_json() {
        let message = storage_set_item("theme".to_string(), "{oops".to_string());
        assert!(message.contains("invalid JSON"));
    }

    #[test]
    fn sections_load_defaults_with_icon_names() {
        let skills = load_skills();
        assert_eq!(skills[0].name, "HTML & CSS");
        assert_eq!(skills[0].icon, "file-code");

        let experiences = load_experiences();
        assert_eq!(experiences[1].icon, "briefcase");
    }
}
