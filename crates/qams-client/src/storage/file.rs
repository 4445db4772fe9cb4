//! File-backed storage that survives restarts of the console.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use qams_core::error::{AppError, ErrorKind};
use qams_core::result::AppResult;
use qams_core::traits::DurableStorage;

/// Storage persisted as a single JSON object on disk.
///
/// Every write goes straight through to the file; the parent directory
/// is created on demand. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Corrupt session storage file: {}", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read session storage: {}", path.display()),
                    e,
                ));
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened durable storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::storage("File storage lock poisoned"))?;
        f(&mut entries);
        self.flush(&entries)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create storage directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write session storage: {}", self.path.display()),
                e,
            )
        })
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::storage("File storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.mutate(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.mutate(|e| {
            e.remove(key);
        })
    }

    fn clear(&self) -> AppResult<()> {
        self.mutate(BTreeMap::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("admin-session.json");

        let store = FileStorage::open(&path).unwrap();
        assert!(store.get("admin-auth-token").unwrap().is_none());
        store.set("admin-auth-token", "tok-1").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("admin-auth-token").unwrap().as_deref(), Some("tok-1"));

        reopened.clear().unwrap();
        let cleared = FileStorage::open(&path).unwrap();
        assert!(cleared.get("admin-auth-token").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-session.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
