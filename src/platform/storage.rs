//! Key/value storage
//!
//! LocalStorage on web, a JSON file or plain memory on native. Reads and writes
//! never fail loudly: a missing or broken store logs a warning and behaves as empty.

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Read and deserialize a JSON value; anything unreadable counts as absent
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable '{}': {}", key, e);
            None
        }
    }
}

/// Serialize and store a JSON value
pub fn save_json<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::warn!("Could not serialize '{}': {}", key, e),
    }
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// JSON-file backed store; every write goes straight to disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn write_through(&self) {
        if let Err(e) = self.flush() {
            log::warn!("Could not write {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_through();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.write_through();
        }
    }
}

/// Browser LocalStorage (absent storage makes every operation a no-op)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, nothing will be persisted");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn test_memory_store_json_helpers() {
        let mut store = MemoryStore::new();
        assert_eq!(load_json::<Sample>(&store, "k"), None);

        save_json(&mut store, "k", &Sample { n: 7 });
        assert_eq!(load_json::<Sample>(&store, "k"), Some(Sample { n: 7 }));

        store.set("k", "not json");
        assert_eq!(load_json::<Sample>(&store, "k"), None);

        store.remove("k");
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("a"), None);
        store.set("a", "1");
        store.set("b", "2");
        store.remove("b");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").as_deref(), Some("1"));
        assert_eq!(reopened.get("b"), None);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StorageError::Json(_))));
    }
}
