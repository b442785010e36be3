use portfolio_core::storage::PROBE_KEY;
use portfolio_core::{
    BackendError, BackendResult, Experience, KeyValueBackend, MemoryBackend, Project, SafeStorage,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    value: i64,
}

/// Memory store whose reads and writes can be switched to fail.
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    fail_removes: Cell<bool>,
}

impl KeyValueBackend for FlakyBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(BackendError::Unavailable("read blocked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        if self.fail_writes.get() {
            return Err(BackendError::Unavailable("write blocked".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        if self.fail_removes.get() {
            return Err(BackendError::Unavailable("remove blocked".to_string()));
        }
        self.inner.remove(key)
    }
}

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Test Project".to_string(),
            description: "A test project for storage functionality".to_string(),
            image: "/test-image.png".to_string(),
            tags: vec!["React".to_string(), "TypeScript".to_string()],
            demo_url: "https://example.com".to_string(),
            github_url: "https://github.com/test/project".to_string(),
            category: Some("frontend".to_string()),
        },
        Project {
            id: 2,
            title: "Another Test Project".to_string(),
            description: "Another test project".to_string(),
            image: "/test-image-2.png".to_string(),
            tags: vec!["WordPress".to_string(), "PHP".to_string()],
            demo_url: "https://example2.com".to_string(),
            github_url: "https://github.com/test/project2".to_string(),
            category: Some("wordpress".to_string()),
        },
    ]
}

#[test]
fn set_then_get_returns_the_written_value() {
    let storage = SafeStorage::new(MemoryBackend::new());
    let sample = Sample {
        name: "test".to_string(),
        value: 123,
    };

    storage.set_item("sample", &sample);
    let loaded = storage.get_item(
        "sample",
        Sample {
            name: String::new(),
            value: 0,
        },
    );
    assert_eq!(loaded, sample);

    let projects = sample_projects();
    storage.set_item("projects", &projects);
    let loaded: Vec<Project> = storage.get_item("projects", Vec::new());
    assert_eq!(loaded, projects);
    assert_eq!(loaded[1].category.as_deref(), Some("wordpress"));
}

#[test]
fn unicode_content_survives_storage() {
    let storage = SafeStorage::new(MemoryBackend::new());
    let text = "émojis 🚀, special chars & \"quotes\"".to_string();

    storage.set_item("text", &text);
    assert_eq!(storage.get_item("text", String::new()), text);
}

#[test]
fn missing_key_returns_default() {
    let storage = SafeStorage::new(MemoryBackend::new());
    assert_eq!(storage.get_item("never-written", 42_u32), 42);
    assert_eq!(
        storage.get_item::<Vec<Project>>("projects", Vec::new()),
        Vec::<Project>::new()
    );
}

#[test]
fn corrupt_content_returns_default_exactly() {
    let backend = MemoryBackend::new();
    backend.set("experiences", "{not json").unwrap();
    let storage = SafeStorage::new(&backend);

    let defaults = portfolio_core::default_experiences();
    let loaded: Vec<Experience> = storage.get_item("experiences", defaults.clone());
    assert_eq!(loaded, defaults);
    assert_eq!(backend.raw_get("experiences").as_deref(), Some("{not json"));
}

#[test]
fn wrong_shape_returns_default() {
    let backend = MemoryBackend::new();
    backend.set("projects", r#"{"id": 1}"#).unwrap();
    let storage = SafeStorage::new(&backend);

    let loaded: Vec<Project> = storage.get_item("projects", Vec::new());
    assert!(loaded.is_empty());
}

#[test]
fn detached_store_is_unavailable_and_inert() {
    let storage = SafeStorage::<MemoryBackend>::detached();

    assert!(!storage.is_available());
    assert_eq!(storage.get_item("test", "default".to_string()), "default");
    storage.set_item("projects", &sample_projects());
    storage.remove_item("projects");
    assert_eq!(
        storage.get_item::<Vec<Project>>("projects", Vec::new()),
        Vec::<Project>::new()
    );
}

#[test]
fn failing_writes_make_store_unavailable_without_panicking() {
    let backend = FlakyBackend::default();
    let storage = SafeStorage::new(&backend);
    assert!(storage.is_available());

    backend.fail_writes.set(true);
    assert!(!storage.is_available());
    storage.set_item("key", &"value");
    assert!(backend.inner.raw_get("key").is_none());
}

#[test]
fn quota_exhaustion_is_swallowed_and_keeps_previous_value() {
    // Room for the probe entry and a small value, not a project list.
    let backend = MemoryBackend::with_quota(64);
    let storage = SafeStorage::new(&backend);

    storage.set_item("projects", &Vec::<Project>::new());
    storage.set_item("projects", &sample_projects());

    assert!(storage.is_available());
    assert_eq!(backend.raw_get("projects").as_deref(), Some("[]"));
    assert!(backend.raw_get(PROBE_KEY).is_none());
}

#[test]
fn failing_reads_return_default() {
    let backend = FlakyBackend::default();
    let storage = SafeStorage::new(&backend);
    storage.set_item("count", &7_u32);

    backend.fail_reads.set(true);
    assert!(storage.is_available());
    assert_eq!(storage.get_item("count", 0_u32), 0);
}

#[test]
fn remove_deletes_entry_and_swallows_failures() {
    let backend = FlakyBackend::default();
    let storage = SafeStorage::new(&backend);
    storage.set_item("theme", &"dark");

    storage.remove_item("theme");
    assert!(backend.inner.raw_get("theme").is_none());

    storage.set_item("theme", &"light");
    backend.fail_removes.set(true);
    storage.remove_item("theme");
    assert!(!storage.is_available());
    assert_eq!(backend.inner.raw_get("theme").as_deref(), Some("\"light\""));
}
