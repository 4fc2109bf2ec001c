use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use super::error::StoreError;
use crate::db::{self, DatabaseError};

/// String key/value storage the history is persisted into.
pub trait SettingsStore: Send {
    /// Value stored under `key`, `None` if never set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Settings persisted in the `user_preferences` table of the app database.
pub struct SqliteSettingsStore {
    conn: Connection,
}

impl SqliteSettingsStore {
    /// Wrap an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (and migrate) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_database(path)?))
    }

    /// Fresh in-memory database; contents vanish with the store.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(db::open_memory_database()?))
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(db::get_user_preference(&self.conn, key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(db::set_user_preference(&self.conn, key, value)?)
    }
}

/// Process-local settings. Clones share the same map, so a test can hand one
/// clone to a store and inspect or reload through another.
#[derive(Clone, Default)]
pub struct MemorySettingsStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn SettingsStore) {
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn memory_store_contract() {
        exercise(&MemorySettingsStore::new());
    }

    #[test]
    fn sqlite_store_contract() {
        exercise(&SqliteSettingsStore::in_memory().unwrap());
    }

    #[test]
    fn memory_clones_share_state() {
        let a = MemorySettingsStore::new();
        let b = a.clone();
        a.set("shared", "yes").unwrap();
        assert_eq!(b.get("shared").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");
        {
            let store = SqliteSettingsStore::open(&path).unwrap();
            store.set("k", "persisted").unwrap();
        }
        let store = SqliteSettingsStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
    }

    // Verify the trait is object-safe (can be used as `dyn Trait`)
    #[test]
    fn settings_store_is_object_safe() {
        fn _assert_store(_: &dyn SettingsStore) {}
        let boxed: Box<dyn SettingsStore> = Box::new(MemorySettingsStore::new());
        _assert_store(boxed.as_ref());
    }
}
