use crate::sqlite_store::SqliteStore;
use messenger_domain::{PreferenceStore, PreferenceValue};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// SQLite-backed preference store.
///
/// Reads come from a map loaded at open time. Writes update the map before
/// returning and queue the durable write on the worker, so a settings rebuild
/// right after a write already sees the new value.
pub struct SqlitePreferences {
    store: SqliteStore,
    cache: Mutex<HashMap<String, PreferenceValue>>,
}

impl SqlitePreferences {
    pub fn open(store: SqliteStore) -> anyhow::Result<Self> {
        let cache = store.load_preferences()?;
        tracing::debug!(count = cache.len(), "preferences loaded");
        Ok(Self {
            store,
            cache: Mutex::new(cache),
        })
    }

    /// Blocks until queued writes are on disk.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.store.flush()
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    // The write is queued while the cache lock is held so the worker applies
    // writes to one key in the same order the cache saw them.
    fn put(&self, key: &str, value: PreferenceValue) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(key.to_owned(), value.clone());
        self.store.put_preference(key, value);
    }

    fn remove(&self, key: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.remove(key);
        self.store.remove_preference(key);
    }
}
