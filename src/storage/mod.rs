//! Storage Module
//!
//! The backing key-value store contract and its implementations.
//!
//! A store is a synchronous, text-keyed and text-valued map with a capacity
//! limit that can reject writes. It is shared by every cache instance of a
//! [`CacheManager`](crate::cache::CacheManager) through a [`SharedStore`].

mod file;
mod memory;
mod order;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use order::InsertionOrder;

// == Key-Value Store ==
/// Backing store consumed by the cache.
pub trait KeyValueStore {
    /// Returns the text stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Fails with [`StoreError::CapacityExceeded`] when the store has no room.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str);

    /// Returns every key in the store.
    ///
    /// Order is implementation-defined. Callers must not treat it as FIFO.
    fn keys(&self) -> Vec<String>;

    /// Number of keys in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a store shared by all caches on the same event loop.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

/// Wraps a store into a [`SharedStore`] handle.
pub fn shared<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

/// Bytes a single entry occupies against a store's capacity.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_store_is_usable_through_trait_object() {
        let store = shared(MemoryStore::new());

        store.borrow_mut().set("a", "1").unwrap();

        assert_eq!(store.borrow().get("a"), Some("1".to_string()));
        assert!(!store.borrow().is_empty());
    }

    #[test]
    fn test_entry_size_counts_key_and_value() {
        assert_eq!(entry_size("ctxkey", "\"v\""), 9);
    }
}
