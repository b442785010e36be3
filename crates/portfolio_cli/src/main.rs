//! Command-line access to the portfolio store.
//!
//! # Responsibility
//! - Probe, read, write and remove store entries from a shell.
//! - Run section hydration and theme changes against a real database.
//!
//! Settings come from `PORTFOLIO_*` variables; flags override them. Without
//! a database path the store is detached, so every command shows the
//! fallback behavior the UI would get.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use portfolio_core::config::ENV_DB_PATH;
use portfolio_core::{
    default_experiences, default_projects, default_skills, init_logging, open_storage,
    validate_catalog, CollectionRecord, CollectionService, DynStorage, HydrationOutcome,
    KeyValueBackend, Lookup, RuntimeConfig, Skill, ThemeService,
};
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(name = "portfolio", version, about = "Inspect and edit the portfolio content store")]
struct Cli {
    /// Absolute path of the SQLite store [env: PORTFOLIO_DB_PATH].
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log level for file logging (trace|debug|info|warn|error) [env: PORTFOLIO_LOG_LEVEL].
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files [env: PORTFOLIO_LOG_DIR].
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage information.
    Ping,
    /// Report whether the store can be written and read.
    Probe,
    /// Print the JSON stored at KEY.
    Get { key: String },
    /// Store a JSON value at KEY.
    Set { key: String, value: String },
    /// Delete the entry at KEY.
    Remove { key: String },
    /// Hydrate a content section and print the result.
    Hydrate {
        #[arg(value_enum)]
        section: Section,
        /// Remove the stored collection first so it is reseeded.
        #[arg(long)]
        reset: bool,
    },
    /// Print or toggle the theme preference.
    Theme {
        #[arg(long)]
        toggle: bool,
        /// Host color-scheme preference used when nothing is stored.
        #[arg(long)]
        prefers_dark: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Section {
    Skills,
    Experiences,
    Projects,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env()
        .and_then(|config| {
            config.with_overrides(
                cli.db.as_deref(),
                cli.log_level.as_deref(),
                cli.log_dir.as_deref(),
            )
        })
        .map_err(anyhow::Error::msg)?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level.as_str(), &log_dir.to_string_lossy())
            .map_err(anyhow::Error::msg)?;
    }

    let storage = open_storage(&config.storage);

    match cli.command {
        Command::Ping => {
            println!("portfolio_core ping={}", portfolio_core::ping());
            println!("portfolio_core version={}", portfolio_core::core_version());
        }
        Command::Probe => {
            println!("available={}", storage.is_available());
        }
        Command::Get { key } => match storage.lookup::<serde_json::Value>(key.as_str()) {
            Lookup::Found(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Lookup::Missing => bail!("no entry at `{key}`"),
            Lookup::Unreadable => bail!("entry at `{key}` is not valid JSON"),
            Lookup::Unavailable => bail!("store is unavailable"),
        },
        Command::Set { key, value } => {
            let value: serde_json::Value = serde_json::from_str(value.as_str())
                .with_context(|| format!("value for `{key}` is not valid JSON"))?;
            ensure_available(&storage)?;
            storage.set_item(key.as_str(), &value);
        }
        Command::Remove { key } => {
            ensure_available(&storage)?;
            storage.remove_item(key.as_str());
        }
        Command::Hydrate { section, reset } => {
            validate_catalog()?;
            let service = CollectionService::new(&storage);
            match section {
                Section::Skills => run_hydrate(&service, default_skills(), reset, with_icon)?,
                Section::Experiences => {
                    run_hydrate(&service, default_experiences(), reset, as_stored)?
                }
                Section::Projects => run_hydrate(&service, default_projects(), reset, as_stored)?,
            }
        }
        Command::Theme {
            toggle,
            prefers_dark,
        } => {
            let themes = ThemeService::new(&storage);
            let mut theme = themes.load(prefers_dark);
            if toggle {
                theme = themes.toggle(theme);
            }
            println!("{}", theme.as_str());
        }
    }

    Ok(())
}

fn ensure_available(storage: &DynStorage) -> Result<()> {
    if !storage.is_available() {
        bail!("store is unavailable; pass --db or set {ENV_DB_PATH}");
    }
    Ok(())
}

/// Adds display-only fields to one serialized record.
type Annotate<T> = fn(&T, &mut Map<String, Value>);

fn as_stored<T>(_: &T, _: &mut Map<String, Value>) {}

/// Icons are skipped by serde, so the reattached one is added by name.
fn with_icon(skill: &Skill, row: &mut Map<String, Value>) {
    row.insert("icon".to_string(), Value::from(skill.icon.as_str()));
}

fn run_hydrate<T: CollectionRecord>(
    service: &CollectionService<'_, Box<dyn KeyValueBackend>>,
    defaults: Vec<T>,
    reset: bool,
    annotate: Annotate<T>,
) -> Result<()> {
    if reset {
        service.reset::<T>();
    }
    let outcome = service.hydrate(&defaults)?;
    let report = hydration_report(&outcome, annotate)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn hydration_report<T: CollectionRecord>(
    outcome: &HydrationOutcome<T>,
    annotate: Annotate<T>,
) -> Result<Value> {
    let mut items = Vec::with_capacity(outcome.items.len());
    for item in &outcome.items {
        let mut row = serde_json::to_value(item)?;
        if let Value::Object(fields) = &mut row {
            annotate(item, fields);
        }
        items.push(row);
    }

    let mut report = Map::new();
    report.insert("source".to_string(), Value::from(outcome.source.as_str()));
    report.insert("appended".to_string(), Value::from(outcome.appended));
    report.insert("wrote_back".to_string(), Value::from(outcome.wrote_back));
    report.insert("items".to_string(), Value::Array(items));
    Ok(Value::Object(report))
}

#[cfg(test)]
mod tests {
    use super::{as_stored, hydration_report, with_icon};
    use portfolio_core::{
        default_projects, default_skills, CollectionService, Icon, MemoryBackend, SafeStorage,
    };

    #[test]
    fn skills_report_names_reattached_icons() {
        let storage = SafeStorage::new(MemoryBackend::new());
        let service = CollectionService::new(&storage);
        let defaults = default_skills();

        let outcome = service.hydrate(&defaults).unwrap();
        let report = hydration_report(&outcome, with_icon).unwrap();

        assert_eq!(report["source"], "seeded");
        let items = report["items"].as_array().unwrap();
        assert_eq!(items.len(), defaults.len());
        for (row, skill) in items.iter().zip(&defaults) {
            assert_eq!(row["name"], skill.name.as_str());
            assert_eq!(row["icon"], skill.icon.as_str());
        }
        assert!(defaults.iter().any(|skill| skill.icon != Icon::FALLBACK));
    }

    #[test]
    fn other_sections_are_reported_as_stored() {
        let storage = SafeStorage::new(MemoryBackend::new());
        let service = CollectionService::new(&storage);

        let outcome = service.hydrate(&default_projects()).unwrap();
        let report = hydration_report(&outcome, as_stored).unwrap();

        assert_eq!(report["wrote_back"], true);
        let first = &report["items"][0];
        assert!(first.get("icon").is_none());
        assert_eq!(first["title"], default_projects()[0].title.as_str());
    }
}
