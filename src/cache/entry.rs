//! Entry Cache Module
//!
//! Single-entry variant of the context cache: one context, one fixed key.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::manager::CacheCore;
use crate::error::Result;

// == Entry Cache ==
/// Cache bound to a single composite key, computed once at construction.
///
/// Writes go through the same overflow and garbage collection path as
/// [`ContextCache::set_item`](crate::cache::ContextCache::set_item), scoped
/// to the entry's context.
#[derive(Clone)]
pub struct EntryCache {
    core: Rc<CacheCore>,
    context: String,
    storage_key: String,
}

impl EntryCache {
    pub(crate) fn new(core: Rc<CacheCore>, context: String, storage_key: String) -> Self {
        Self {
            core,
            context,
            storage_key,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn get<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.core.read(&self.storage_key)
    }

    pub fn get_or<T: DeserializeOwned>(&self, default: T) -> Result<T> {
        Ok(self.get()?.unwrap_or(default))
    }

    pub fn set<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        self.core.write(&self.context, &self.storage_key, data)
    }

    pub fn remove(&self) {
        self.core.remove(&self.storage_key);
    }
}

impl fmt::Debug for EntryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryCache")
            .field("context", &self.context)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use crate::cache::CacheManager;
    use crate::config::Config;
    use crate::storage::{shared, MemoryStore};

    #[test]
    fn test_entry_roundtrip() {
        let manager = CacheManager::new(shared(MemoryStore::new()), &Config::default());
        let ids = manager.entry("learning_units", "_ids").unwrap();

        assert_eq!(ids.storage_key(), "learning_units_ids");
        assert_eq!(ids.get_or(Vec::<u32>::new()).unwrap(), Vec::<u32>::new());

        ids.set(&[12u32, 15, 31]).unwrap();
        assert_eq!(ids.get::<Vec<u32>>().unwrap(), Some(vec![12, 15, 31]));

        ids.remove();
        assert_eq!(ids.get::<Vec<u32>>().unwrap(), None);
    }

    #[test]
    fn test_entry_shares_context_with_context_cache() {
        let manager = CacheManager::new(shared(MemoryStore::new()), &Config::default());
        let entry = manager.entry("search", "q").unwrap();
        let context = manager.context("search").unwrap();

        entry.set("term").unwrap();

        assert_eq!(context.get_item::<String>("q").unwrap(), Some("term".to_string()));
        assert_eq!(manager.clear("search"), 1);
        assert_eq!(entry.get::<String>().unwrap(), None);
    }
}
