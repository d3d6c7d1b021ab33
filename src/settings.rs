//! Persistent picker settings
//!
//! A small typed key-value store. Values live in a single SQLite table so
//! the base folder, last picked location and one-shot flags survive between
//! runs.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::log_debug;
use crate::storage::DirectorySource;

pub const KEY_BASE_PATH: &str = "basePath";
pub const KEY_LAST_FOLDER_URI: &str = "lastFolderUri";
pub const KEY_SHOW_RATIONALE: &str = "showRationaleOnce";
pub const KEY_BREADCRUMB_STATE: &str = "breadcrumbState";

/// String-valued key-value storage with typed helpers on top
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(match self.get(key)?.as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        })
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }

    fn base_path(&self) -> Result<Option<PathBuf>> {
        Ok(self.get(KEY_BASE_PATH)?.map(PathBuf::from))
    }

    fn set_base_path(&self, path: &Path) -> Result<()> {
        self.set(KEY_BASE_PATH, &path.to_string_lossy())
    }

    fn last_folder_uri(&self) -> Result<Option<String>> {
        self.get(KEY_LAST_FOLDER_URI)
    }

    fn set_last_folder_uri(&self, uri: &str) -> Result<()> {
        self.set(KEY_LAST_FOLDER_URI, uri)
    }

    /// Whether the folder-chooser explanation is still due (defaults to true)
    fn show_rationale_once(&self) -> Result<bool> {
        self.get_bool(KEY_SHOW_RATIONALE, true)
    }

    /// Read the rationale flag and clear it: true exactly once
    fn take_rationale_flag(&self) -> Result<bool> {
        let show = self.show_rationale_once()?;
        if show {
            self.set_bool(KEY_SHOW_RATIONALE, false)?;
        }
        Ok(show)
    }

    fn breadcrumb_state(&self) -> Result<Option<String>> {
        self.get(KEY_BREADCRUMB_STATE)
    }

    fn set_breadcrumb_state(&self, json: Option<&str>) -> Result<()> {
        match json {
            Some(json) => self.set(KEY_BREADCRUMB_STATE, json),
            None => self.remove(KEY_BREADCRUMB_STATE),
        }
    }

    /// The stored base directory, if it still exists and can be listed.
    ///
    /// A lost base directory is forgotten so the next start behaves like
    /// the first run.
    fn restore_base_dir(&self, source: &dyn DirectorySource) -> Result<Option<PathBuf>> {
        let path = match self.base_path()? {
            Some(path) => path,
            None => return Ok(None),
        };

        if source.is_dir(&path) && source.read_dir(&path).is_ok() {
            return Ok(Some(path));
        }

        log_debug(&format!("restore_base_dir: {} is gone, clearing", path.display()));
        self.remove(KEY_BASE_PATH)?;
        self.remove(KEY_BREADCRUMB_STATE)?;
        Ok(None)
    }
}

pub struct SettingsDb {
    conn: Connection,
}

impl SettingsDb {
    /// Open (or create) the settings database under the platform data dir
    pub fn new() -> Result<Self> {
        let dir = Self::get_data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Self::open(&dir.join("settings.db"))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open settings database {}", path.display()))?;
        let db = SettingsDb { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = SettingsDb { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn get_data_dir() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join("filepick"),
            None => std::env::temp_dir().join("filepick"),
        }
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;
        Ok(())
    }
}

impl SettingsStore for SettingsDb {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let db = SettingsDb::new_in_memory().unwrap();
        assert_eq!(db.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let db = SettingsDb::new_in_memory().unwrap();
        db.set_last_folder_uri("file:///a").unwrap();
        db.set_last_folder_uri("file:///b").unwrap();
        assert_eq!(db.last_folder_uri().unwrap().as_deref(), Some("file:///b"));
    }

    #[test]
    fn test_bool_default_and_garbage() {
        let db = SettingsDb::new_in_memory().unwrap();
        assert!(db.get_bool("flag", true).unwrap());
        db.set("flag", "maybe").unwrap();
        assert!(!db.get_bool("flag", false).unwrap());
    }

    #[test]
    fn test_take_rationale_flag_once() {
        let db = SettingsDb::new_in_memory().unwrap();
        assert!(db.take_rationale_flag().unwrap());
        assert!(!db.take_rationale_flag().unwrap());
        assert!(!db.show_rationale_once().unwrap());
    }
}
