//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::storage::{shared, FileStore, MemoryStore, SharedStore};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entries a context may hold before garbage collection trims it
    pub max_elements: usize,
    /// Entries removed by one garbage collection pass
    pub garbage_batch: usize,
    /// Byte capacity of the backing store
    pub store_capacity: usize,
    /// File backing the store, None = in-memory only
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ELEMENTS` - Per-context entry ceiling (default: 10)
    /// - `CACHE_GARBAGE_BATCH` - Entries evicted per pass (default: 3)
    /// - `CACHE_STORE_CAPACITY` - Store capacity in bytes (default: 5 MiB)
    /// - `CACHE_STORE_PATH` - Persist the store to this file (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_elements: parse_var("CACHE_MAX_ELEMENTS").unwrap_or(defaults.max_elements),
            garbage_batch: parse_var("CACHE_GARBAGE_BATCH").unwrap_or(defaults.garbage_batch),
            store_capacity: parse_var("CACHE_STORE_CAPACITY").unwrap_or(defaults.store_capacity),
            store_path: env::var("CACHE_STORE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Builds the backing store described by this configuration.
    pub fn open_store(&self) -> Result<SharedStore, StoreError> {
        match &self.store_path {
            Some(path) => Ok(shared(FileStore::open(path, Some(self.store_capacity))?)),
            None => Ok(shared(MemoryStore::with_capacity(self.store_capacity))),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_elements: 10,
            garbage_batch: 3,
            store_capacity: 5 * 1024 * 1024,
            store_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_elements, 10);
        assert_eq!(config.garbage_batch, 3);
        assert_eq!(config.store_capacity, 5_242_880);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env so parallel tests cannot race on it
        env::remove_var("CACHE_MAX_ELEMENTS");
        env::remove_var("CACHE_GARBAGE_BATCH");
        env::remove_var("CACHE_STORE_CAPACITY");
        env::remove_var("CACHE_STORE_PATH");

        let config = Config::from_env();
        assert_eq!(config.max_elements, 10);
        assert_eq!(config.garbage_batch, 3);
        assert!(config.store_path.is_none());

        env::set_var("CACHE_MAX_ELEMENTS", "25");
        env::set_var("CACHE_GARBAGE_BATCH", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.max_elements, 25);
        assert_eq!(config.garbage_batch, 3);

        env::remove_var("CACHE_MAX_ELEMENTS");
        env::remove_var("CACHE_GARBAGE_BATCH");
    }

    #[test]
    fn test_open_store_in_memory_uses_capacity() {
        let config = Config {
            store_capacity: 4,
            ..Config::default()
        };
        let store = config.open_store().unwrap();

        assert!(store.borrow_mut().set("ab", "cd").is_ok());
        assert!(store.borrow_mut().set("e", "f").is_err());
    }

    #[test]
    fn test_open_store_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store_path: Some(dir.path().join("cache.json")),
            ..Config::default()
        };

        {
            let store = config.open_store().unwrap();
            store.borrow_mut().set("k", "\"v\"").unwrap();
        }

        let store = config.open_store().unwrap();
        assert_eq!(store.borrow().get("k"), Some("\"v\"".to_string()));
    }
}
