use portfolio_core::{
    default_skills, CollectionService, KeyValueBackend, SafeStorage, Skill, SkillsSection,
    SqliteBackend, Theme, ThemeService,
};

#[test]
fn set_overwrites_and_remove_is_idempotent() {
    let backend = SqliteBackend::open_in_memory().unwrap();

    backend.set("theme", "\"light\"").unwrap();
    backend.set("theme", "\"dark\"").unwrap();
    assert_eq!(backend.get("theme").unwrap().as_deref(), Some("\"dark\""));

    backend.remove("theme").unwrap();
    backend.remove("theme").unwrap();
    assert_eq!(backend.get("theme").unwrap(), None);
}

#[test]
fn keys_are_listed_in_sorted_order() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    backend.set("skills", "[]").unwrap();
    backend.set("experiences", "[]").unwrap();
    backend.set("projects", "[]").unwrap();

    assert_eq!(
        backend.keys().unwrap(),
        vec!["experiences", "projects", "skills"]
    );
}

#[test]
fn probe_sentinel_is_not_persisted() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    let storage = SafeStorage::new(&backend);

    assert!(storage.is_available());
    assert!(backend.keys().unwrap().is_empty());
}

#[test]
fn content_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.db");

    {
        let storage = SafeStorage::new(SqliteBackend::open(&path).unwrap());
        let service = CollectionService::new(&storage);
        let mut section = SkillsSection::new(default_skills());
        section.mount(&service).unwrap();

        let mut edited = section.items().to_vec();
        edited[0].level = 99;
        edited.push(Skill::new("Rust", "backend", 40, portfolio_core::Icon::FALLBACK));
        section.replace(edited, &service);

        ThemeService::new(&storage).set(Theme::Dark);
    }

    let storage = SafeStorage::new(SqliteBackend::open(&path).unwrap());
    let service = CollectionService::new(&storage);
    let mut section = SkillsSection::new(default_skills());
    section.mount(&service).unwrap();

    assert_eq!(section.items()[0].level, 99);
    assert_eq!(section.items().len(), default_skills().len() + 1);
    assert!(section.items().iter().any(|skill| skill.name == "Rust"));
    assert_eq!(ThemeService::new(&storage).load(false), Theme::Dark);
}
