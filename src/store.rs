//! Client-local key-value storage backed by a single JSON file.
//!
//! Holds the only durable UI state: presence markers such as the chat welcome
//! flag. Values are written through on every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Self::open_or_reset(data_dir.join("myafs").join("storage.json"))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Open the store, discarding a corrupt file instead of failing.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(StoreError::Malformed { source, .. }) => {
                tracing::warn!(path = %path.display(), error = %source, "discarding malformed storage file");
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        assert!(!store.contains("ava-welcomed"));
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = LocalStore::open(&path).unwrap();
        store.set("ava-welcomed", "true").unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert!(reopened.contains("ava-welcomed"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = LocalStore::open(&path).unwrap();
        store.set("ava-welcomed", "true").unwrap();
        store.remove("ava-welcomed").unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert!(!reopened.contains("ava-welcomed"));
    }

    #[test]
    fn test_malformed_file_is_reported_or_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            LocalStore::open(&path),
            Err(StoreError::Malformed { .. })
        ));

        let store = LocalStore::open_or_reset(&path).unwrap();
        assert!(!store.contains("ava-welcomed"));
    }
}
