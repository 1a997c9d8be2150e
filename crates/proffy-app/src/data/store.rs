//! Key-value store
//!
//! String values under string keys, the contract the favorites list is kept
//! behind. `FileStore` persists to one JSON document; `MemoryStore` lives and
//! dies with the process.

use crate::config::files::STORE_FILE;
use crate::data::storage;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persistent get/set of string values by key
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

// =============================================================================
// FileStore
// =============================================================================

/// Store backed by a JSON object of string values
///
/// Every call re-reads the file so writes made by another store handle on the
/// same path are always observed.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store in `dir`, using the default file name
    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(STORE_FILE))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        Ok(storage::load_from(&self.path)?.unwrap_or_default())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        storage::save_to(&self.path, &entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            storage::save_to(&self.path, &entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process store
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("proffy_store_test_{}_{}.json", std::process::id(), id))
    }

    #[test]
    fn test_memory_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));

        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
        store.remove("favorites").unwrap();
    }

    #[test]
    fn test_memory_with_entry() {
        let store = MemoryStore::with_entry("k", "v");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let store = FileStore::at(temp_path());
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_handles() {
        let path = temp_path();

        FileStore::at(&path).set("favorites", r#"[{"id":1}]"#).unwrap();
        FileStore::at(&path).set("other", "x").unwrap();

        let store = FileStore::at(&path);
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_sees_external_writes() {
        let path = temp_path();
        let reader = FileStore::at(&path);
        let writer = FileStore::at(&path);

        writer.set("favorites", "[]").unwrap();
        assert_eq!(reader.get("favorites").unwrap().as_deref(), Some("[]"));

        writer.remove("favorites").unwrap();
        assert_eq!(reader.get("favorites").unwrap(), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let path = temp_path();
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::at(&path);
        assert!(store.get("favorites").is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_in_dir_uses_default_name() {
        let store = FileStore::in_dir(Path::new("/tmp/proffy"));
        assert_eq!(store.path(), Path::new("/tmp/proffy/storage.json"));
    }
}
