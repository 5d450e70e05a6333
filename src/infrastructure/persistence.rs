use crate::domain::{PersistenceError, RestaurantId};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Keyed storage for integer sequences that outlives the in-memory state.
///
/// `get` distinguishes a key that was never written (`Ok(None)`) from one
/// written with an empty sequence (`Ok(Some(vec![]))`).
pub trait PersistenceHandle: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<RestaurantId>>, PersistenceError>;

    fn set(&self, key: &str, value: &[RestaurantId]) -> Result<(), PersistenceError>;

    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Process-local storage. Sharing one instance between two stores stands in
/// for a restart that keeps the saved state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<RestaurantId>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceHandle for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<RestaurantId>>, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[RestaurantId]) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Stores every key in one JSON object on disk.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous contents readable.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

type Document = BTreeMap<String, Vec<RestaurantId>>;

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_document(&self) -> Result<Document, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(document)?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| PersistenceError::Unavailable(format!("{} is not a file path", self.path.display())))?;
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl PersistenceHandle for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<RestaurantId>>, PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &[RestaurantId]) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.to_vec());
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_absent_vs_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", &[]).unwrap();
        assert_eq!(store.get("favorites").unwrap(), Some(vec![]));

        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        JsonFileStore::new(&path).set("favorites", &[3, 1]).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("favorites").unwrap(), Some(vec![3, 1]));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        store.set("favorites", &[1]).unwrap();
        store.set("other", &[9]).unwrap();
        store.remove("favorites").unwrap();

        assert_eq!(store.get("favorites").unwrap(), None);
        assert_eq!(store.get("other").unwrap(), Some(vec![9]));
    }

    #[test]
    fn test_file_store_persists_empty_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);

        store.set("favorites", &[]).unwrap();
        assert_eq!(store.get("favorites").unwrap(), Some(vec![]));
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("favorites"), Err(PersistenceError::Encoding(_))));
    }
}
