//! Durable client storage trait.

use crate::result::AppResult;

/// Key/value storage that survives restarts of the console.
///
/// One key holds the bearer credential and another holds the persisted
/// session snapshot. [`clear`](DurableStorage::clear) is the universal
/// "force logout" mechanism. Implementations live in `qams-client`.
pub trait DurableStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value. Returns `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a single key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every key.
    fn clear(&self) -> AppResult<()>;
}

/// Read and deserialize a JSON value from durable storage.
pub fn read_json<T: serde::de::DeserializeOwned>(
    storage: &dyn DurableStorage,
    key: &str,
) -> AppResult<Option<T>> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value to durable storage.
pub fn write_json<T: serde::Serialize>(
    storage: &dyn DurableStorage,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}
