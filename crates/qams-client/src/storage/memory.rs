//! In-process storage, lost when the process exits.

use std::collections::BTreeMap;
use std::sync::Mutex;

use qams_core::error::AppError;
use qams_core::result::AppResult;
use qams_core::traits::DurableStorage;

/// Storage backed by a map in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> R) -> AppResult<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::storage("Memory storage lock poisoned"))?;
        Ok(f(&mut entries))
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.with_entries(|e| e.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.with_entries(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.with_entries(|e| {
            e.remove(key);
        })
    }

    fn clear(&self) -> AppResult<()> {
        self.with_entries(BTreeMap::clear)
    }
}
