//! services/app/src/adapters/file.rs
//!
//! A file-backed implementation of the `KeyValueStore` port: one JSON file
//! holding the whole key-to-value map, the way a browser profile holds its
//! local storage.
//!
//! The file is read once at open. Every mutation serializes the full map to a
//! string first and only then writes the file in a single `fs::write`, so a
//! serialization failure never leaves truncated data on disk. Two processes
//! sharing the same file are not coordinated: writes are last-write-wins with
//! no versioning.

use meditrack_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

pub struct FileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, reading whatever is already there.
    ///
    /// A missing file starts an empty profile. A file that exists but does
    /// not parse as a string map also starts empty rather than failing the
    /// open; the unreadable content is overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "store file is not valid JSON, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> PortResult<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))
    }

    fn persist(&self, values: &HashMap<String, String>) -> PortResult<()> {
        let raw = serde_json::to_string_pretty(values)
            .map_err(|e| PortError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| PortError::Unexpected(format!("failed to write {}: {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut values = self.lock()?;
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&values) {
            // A failed write must not be observable through later reads.
            match previous {
                Some(p) => values.insert(key.to_string(), p),
                None => values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let mut values = self.lock()?;
        let previous = values.remove(key);
        if let Err(e) = self.persist(&values) {
            if let Some(p) = previous {
                values.insert(key.to_string(), p);
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrack_core::store::collections;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        {
            let store = FileStore::open(&path);
            store.set(collections::USERS, r#"[{"id":1}]"#).unwrap();
            store.set(collections::APPOINTMENTS, "[]").unwrap();
        }

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get(collections::USERS).unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(
            reopened.get(collections::APPOINTMENTS).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn remove_persists_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let store = FileStore::open(&path);
        store.set(collections::SESSION, r#"{"id":1}"#).unwrap();
        store.remove(collections::SESSION).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(collections::SESSION).unwrap(), None);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{{{ definitely not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(collections::USERS).unwrap(), None);

        // The store stays usable and the next write replaces the bad file.
        store.set(collections::USERS, "[]").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(collections::USERS).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("never-written.json"));
        assert_eq!(store.get(collections::USERS).unwrap(), None);
        assert!(!store.contains(collections::USERS).unwrap());
    }
}
