//! File Store Module
//!
//! A [`MemoryStore`] mirrored to a JSON file so entries survive reloads.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::StoreError;
use crate::storage::{KeyValueStore, MemoryStore};

// == File Store ==
/// Persistent store backed by a single JSON file.
///
/// The file holds an ordered array of `[key, value]` pairs, so enumeration
/// order is preserved across reloads. Every mutation rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    // == Open ==
    /// Loads the store at `path`, or starts empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>, capacity: Option<usize>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryStore::new();

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let pairs: Vec<(String, String)> = serde_json::from_str(&contents)?;
            for (key, value) in &pairs {
                inner.set(key, value)?;
            }
        }
        inner.set_capacity(capacity);

        info!(
            path = %path.display(),
            entries = inner.len(),
            "Opened file store"
        );
        Ok(Self { path, inner })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently occupied by keys and values.
    pub fn usage(&self) -> usize {
        self.inner.usage()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.inner.entries())?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.inner.get(key);
        self.inner.set(key, value)?;

        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement
            match previous {
                // The old value fitted before this write, so it fits again
                Some(old) => self.inner.set(key, &old)?,
                None => self.inner.remove(key),
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        if self.inner.get(key).is_none() {
            return;
        }
        self.inner.remove(key);
        if let Err(e) = self.persist() {
            error!(key, path = %self.path.display(), "Failed to persist removal: {}", e);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
