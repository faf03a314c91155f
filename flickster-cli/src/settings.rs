//! Where the movie database lives.
//!
//! The only persisted setting is the database path, kept in
//! `~/.config/flickster/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/home/me/movies.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

const DATABASE_TABLE: &str = "database";
const PATH_KEY: &str = "path";

pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("flickster").join("settings.toml")
}

/// `movies.db` under the platform data directory.
pub(crate) fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("flickster").join("movies.db")
}

/// `--db` first, then the saved path, then `default_database_path()`.
pub(crate) fn resolve_database_path(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_database_path_with(cli_override, &settings_path())
}

fn resolve_database_path_with(cli_override: Option<PathBuf>, settings: &Path) -> PathBuf {
    cli_override
        .or_else(|| load_database_path(settings))
        .unwrap_or_else(default_database_path)
}

/// Parsed settings document, or `None` if the file is absent or not TOML.
fn read_document(settings: &Path) -> Option<toml::Value> {
    std::fs::read_to_string(settings).ok()?.parse().ok()
}

fn load_database_path(settings: &Path) -> Option<PathBuf> {
    let doc = read_document(settings)?;
    let path = doc.get(DATABASE_TABLE)?.get(PATH_KEY)?.as_str()?;
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Save the database path, or clear it with `None`.
pub(crate) fn save_database_path(path: Option<&Path>) -> io::Result<()> {
    save_database_path_to(&settings_path(), path)
}

/// Only `database.path` is touched; any other keys in the file survive.
fn save_database_path_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc =
        read_document(settings).unwrap_or_else(|| toml::Value::Table(Default::default()));

    let database = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?
        .entry(DATABASE_TABLE)
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;

    match path {
        Some(p) => {
            database.insert(
                PATH_KEY.to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            database.remove(PATH_KEY);
        }
    }

    write_atomically(settings, &doc)
}

/// Write through a sibling temp file and rename it into place.
fn write_atomically(settings: &Path, doc: &toml::Value) -> io::Result<()> {
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, settings)
}

/// The settings file re-serialized for `config show`.
pub(crate) fn load_settings_string() -> Option<String> {
    toml::to_string_pretty(&read_document(&settings_path())?).ok()
}
