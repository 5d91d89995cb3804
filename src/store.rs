//! Durable key-value persistence for application state.
//!
//! Each state slice is stored as a JSON blob under a well-known string key,
//! written after every mutation. There is no transactional grouping across
//! slices; a crash between writes can leave slices from different moments.

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Well-known storage keys, kept identical to the original blob names so
/// exported data stays recognizable.
pub mod keys {
    /// All tasks.
    pub const TASKS: &str = "homely-tasks";
    /// Service providers.
    pub const SERVICE_PROVIDERS: &str = "homely-serviceProviders";
    /// Inventory items.
    pub const INVENTORY_ITEMS: &str = "homely-inventoryItems";
    /// Tenants.
    pub const TENANTS: &str = "homely-tenants";
    /// Dark-mode flag.
    pub const DARK_MODE: &str = "homely-isDarkMode";
    /// Registered users keyed by ID.
    pub const USER_STORE: &str = "homely-userStore";
}

/// Trait for durable key-value persistence.
///
/// The production implementation is `SQLite`-backed; tests use an in-memory
/// mock. Typed load/save helpers are layered on top of the raw string
/// operations.
pub trait PersistencePort {
    /// Load the raw JSON blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn load_raw(&self, key: &str) -> Result<Option<String>>;

    /// Store a raw JSON blob under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn save_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Load and deserialize the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the blob is not valid JSON
    /// for `T`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.load_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store fails.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.save_raw(key, &serde_json::to_string(value)?)
    }
}

/// SQLite-backed key-value store.
///
/// Each operation opens a new connection to the database file. This avoids
/// thread safety issues and is acceptable for the low frequency of state
/// writes.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create a store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        // Ensure parent directory exists
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute_batch(
            r"
            -- String-keyed JSON blobs, one row per state slice
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl PersistencePort for SqliteStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Load a slice, falling back to `seed` when the key is absent or the blob
/// does not parse. Parse failures are logged and never propagate: corrupt
/// state must not prevent startup.
pub fn load_or_seed<T, P, F>(store: &P, key: &str, seed: F) -> T
where
    T: DeserializeOwned,
    P: PersistencePort,
    F: FnOnce() -> T,
{
    match store.load_raw(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "corrupt persisted blob, using seed data");
                seed()
            }
        },
        Ok(None) => seed(),
        Err(err) => {
            tracing::warn!(key, %err, "failed to read persisted blob, using seed data");
            seed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::state::seed_tasks;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("homely.sqlite3")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_store_creates_database() {
        let (_dir, store) = create_test_store();
        assert!(store.db_path().exists());
    }

    #[test]
    fn test_raw_round_trip_and_overwrite() {
        let (_dir, store) = create_test_store();

        assert!(store.load_raw("k").unwrap().is_none());

        store.save_raw("k", "true").unwrap();
        assert_eq!(store.load_raw("k").unwrap().as_deref(), Some("true"));

        store.save_raw("k", "false").unwrap();
        assert_eq!(store.load_raw("k").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_typed_round_trip_tasks() {
        let (_dir, store) = create_test_store();
        let tasks = seed_tasks(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        store.save(keys::TASKS, &tasks).unwrap();
        let loaded: Vec<Task> = store.load(keys::TASKS).unwrap().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_keys_are_distinct() {
        let (_dir, store) = create_test_store();
        store.save(keys::DARK_MODE, &true).unwrap();
        assert!(store.load::<bool>(keys::TASKS).unwrap().is_none());
    }

    #[test]
    fn test_load_or_seed_on_missing_key() {
        let (_dir, store) = create_test_store();
        let value: Vec<Task> = load_or_seed(&store, keys::TASKS, || {
            seed_tasks(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        });
        assert_eq!(value.len(), 7);
    }

    #[test]
    fn test_load_or_seed_on_corrupt_blob() {
        let (_dir, store) = create_test_store();
        store.save_raw(keys::TASKS, "{not valid json").unwrap();
        let value: Vec<Task> = load_or_seed(&store, keys::TASKS, Vec::new);
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_or_seed_keeps_valid_blob() {
        let (_dir, store) = create_test_store();
        let tasks = seed_tasks(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        store.save(keys::TASKS, &tasks).unwrap();
        let value: Vec<Task> = load_or_seed(&store, keys::TASKS, Vec::new);
        assert_eq!(value, tasks);
    }
}
