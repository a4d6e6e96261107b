//! Memory Store Module
//!
//! In-memory backing store with an optional byte capacity.

use std::collections::HashMap;

use tracing::debug;

use crate::error::StoreError;
use crate::storage::{entry_size, InsertionOrder, KeyValueStore};

// == Memory Store ==
/// HashMap storage with insertion-ordered enumeration.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, String>,
    /// Enumeration order
    order: InsertionOrder,
    /// Maximum bytes of keys plus values, None = unbounded
    capacity: Option<usize>,
    /// Bytes currently used
    usage: usize,
}

impl MemoryStore {
    // == Constructors ==
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes past `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    // == Capacity ==
    /// Configured byte capacity.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Changes the byte capacity. Existing entries are kept even if they
    /// exceed the new limit; only later writes are checked.
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    // == Usage ==
    /// Bytes currently occupied by keys and values.
    pub fn usage(&self) -> usize {
        self.usage
    }

    // == Entries ==
    /// Key-value pairs in enumeration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|v| (key.clone(), v.clone())))
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self
            .entries
            .get(key)
            .map(|old| entry_size(key, old))
            .unwrap_or(0);
        let needed = entry_size(key, value);
        let base = self.usage - previous;

        if let Some(capacity) = self.capacity {
            if base + needed > capacity {
                let available = capacity.saturating_sub(base);
                debug!(key, needed, available, "Memory store rejected write");
                return Err(StoreError::CapacityExceeded { needed, available });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        self.order.record(key);
        self.usage = base + needed;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        if let Some(old) = self.entries.remove(key) {
            self.usage -= entry_size(key, &old);
            self.order.remove(key);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
