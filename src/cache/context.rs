//! Context Cache Module
//!
//! Get/set/remove over the slice of the shared store owned by one context.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::keys::storage_key;
use crate::cache::manager::CacheCore;
use crate::error::Result;

// == Context Cache ==
/// Cache bound to one context of a [`CacheManager`](crate::cache::CacheManager).
///
/// Values are stored as JSON text under `context + key`. Instances do not
/// own the store; two caches writing the same composite key overwrite each
/// other without detection.
#[derive(Clone)]
pub struct ContextCache {
    core: Rc<CacheCore>,
    context: String,
}

impl ContextCache {
    pub(crate) fn new(core: Rc<CacheCore>, context: String) -> Self {
        Self { core, context }
    }

    /// The context this cache is bound to.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Composite store key used for `key`.
    pub fn storage_key(&self, key: &str) -> String {
        storage_key(&self.context, key)
    }

    // == Get Item ==
    /// Returns the value stored under `key`, or None if absent.
    ///
    /// A stored JSON `null` counts as absent. Text that does not decode as
    /// `T` is an error, not an absence.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.core.read(&self.storage_key(key))
    }

    /// Returns the value stored under `key`, or `default` if absent.
    pub fn get_item_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get_item(key)?.unwrap_or(default))
    }

    // == Set Item ==
    /// Stores `data` under `key`.
    ///
    /// If the store is full the whole context is cleared and the write is
    /// retried once; a second rejection is returned as
    /// [`CacheError::CapacityExceeded`](crate::error::CacheError::CapacityExceeded).
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        self.core.write(&self.context, &self.storage_key(key), data)
    }

    // == Remove Item ==
    /// Removes `key`. Absent keys are ignored.
    pub fn remove_item(&self, key: &str) {
        self.core.remove(&self.storage_key(key));
    }
}

impl fmt::Debug for ContextCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextCache")
            .field("context", &self.context)
            .finish()
    }
}
