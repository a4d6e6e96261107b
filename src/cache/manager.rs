//! Cache Manager Module
//!
//! Owns the shared store, the event bus and the eviction policy, and hands
//! out context-scoped caches over them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::cache::eviction::{clear_context, collect_garbage};
use crate::cache::keys::{context_keys, storage_key, validate_context};
use crate::cache::{CacheStats, ContextCache, EntryCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::events::{CacheEvent, EventBus, SubscriptionId};
use crate::storage::SharedStore;

// == Cache Core ==
/// State shared between a manager and every cache it created.
pub(crate) struct CacheCore {
    store: SharedStore,
    bus: EventBus,
    stats: RefCell<CacheStats>,
    max_elements: usize,
    garbage_batch: usize,
}

impl CacheCore {
    // == Read ==
    /// Reads and decodes the value under a composite key.
    ///
    /// Stored JSON `null` reads as absent.
    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let text = self.store.borrow().get(key);
        let value = match text {
            Some(text) => serde_json::from_str::<Option<T>>(&text).map_err(|source| {
                CacheError::Deserialize {
                    key: key.to_string(),
                    source,
                }
            })?,
            None => None,
        };

        let mut stats = self.stats.borrow_mut();
        if value.is_some() {
            stats.record_hit();
        } else {
            stats.record_miss();
        }
        Ok(value)
    }

    // == Write ==
    /// Encodes and stores `data` under a composite key of `context`.
    ///
    /// A capacity failure raises `cache_exceeded` for the context and the
    /// write is retried once. Every completed write raises `cache_garbage`.
    pub(crate) fn write<T: Serialize + ?Sized>(
        &self,
        context: &str,
        key: &str,
        data: &T,
    ) -> Result<()> {
        let text = serde_json::to_string(data).map_err(CacheError::Serialize)?;

        // Store borrows end before any event is published
        let first = self.store.borrow_mut().set(key, &text);
        match first {
            Ok(()) => {}
            Err(e) if e.is_capacity_exceeded() => {
                warn!(context, key, "Store full, clearing context before retry: {}", e);
                self.stats.borrow_mut().record_overflow();
                self.bus.publish(&CacheEvent::Exceeded {
                    context: context.to_string(),
                });

                let retry = self.store.borrow_mut().set(key, &text);
                if let Err(e) = retry {
                    error!(context, key, "Write failed after clearing context: {}", e);
                    return Err(if e.is_capacity_exceeded() {
                        CacheError::CapacityExceeded(format!(
                            "No room for '{}' after clearing context '{}'",
                            key, context
                        ))
                    } else {
                        e.into()
                    });
                }
            }
            Err(e) => return Err(e.into()),
        }

        self.stats.borrow_mut().record_write();
        debug!(context, key, bytes = text.len(), "Cached value");

        self.bus.publish(&CacheEvent::Garbage {
            context: context.to_string(),
        });
        Ok(())
    }

    // == Remove ==
    pub(crate) fn remove(&self, key: &str) {
        self.store.borrow_mut().remove(key);
    }

    // == Clear ==
    pub(crate) fn clear(&self, context: &str) -> usize {
        let removed = clear_context(&mut *self.store.borrow_mut(), context);

        let mut stats = self.stats.borrow_mut();
        stats.record_clear();
        stats.record_evictions(removed);
        debug!(context, removed, "Cleared context");
        removed
    }

    // == Garbage Elements ==
    pub(crate) fn garbage_elements(&self, context: &str) -> usize {
        let removed = collect_garbage(
            &mut *self.store.borrow_mut(),
            context,
            self.max_elements,
            self.garbage_batch,
        );

        if removed > 0 {
            self.stats.borrow_mut().record_evictions(removed);
            debug!(context, removed, "Evicted entries over the context limit");
        }
        removed
    }
}

impl fmt::Debug for CacheCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCore")
            .field("entries", &self.store.try_borrow().map(|s| s.len()).ok())
            .field("bus", &self.bus)
            .field("max_elements", &self.max_elements)
            .field("garbage_batch", &self.garbage_batch)
            .finish()
    }
}

// == Cache Manager ==
/// Entry point for context-scoped caches sharing one backing store.
///
/// On construction the manager subscribes two listeners to its own bus:
/// `cache_exceeded` clears the signalled context and `cache_garbage` trims
/// it back toward `max_elements`. Further listeners added through
/// [`subscribe`](Self::subscribe) run after these.
#[derive(Debug, Clone)]
pub struct CacheManager {
    core: Rc<CacheCore>,
}

impl CacheManager {
    // == Constructors ==
    /// Creates a manager over an existing store.
    pub fn new(store: SharedStore, config: &Config) -> Self {
        let core = Rc::new(CacheCore {
            store,
            bus: EventBus::new(),
            stats: RefCell::new(CacheStats::new()),
            max_elements: config.max_elements,
            garbage_batch: config.garbage_batch,
        });

        // Weak handles: the bus is owned by the core it points back to
        let on_exceeded = Rc::downgrade(&core);
        core.bus.subscribe(move |event| {
            if let (CacheEvent::Exceeded { context }, Some(core)) = (event, on_exceeded.upgrade()) {
                core.clear(context);
            }
        });
        let on_garbage = Rc::downgrade(&core);
        core.bus.subscribe(move |event| {
            if let (CacheEvent::Garbage { context }, Some(core)) = (event, on_garbage.upgrade()) {
                core.garbage_elements(context);
            }
        });

        Self { core }
    }

    /// Creates a manager over the store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = config.open_store()?;
        Ok(Self::new(store, config))
    }

    // == Cache Handles ==
    /// Cache bound to `context`.
    pub fn context(&self, context: impl Into<String>) -> Result<ContextCache> {
        let context = context.into();
        validate_context(&context)?;
        Ok(ContextCache::new(Rc::clone(&self.core), context))
    }

    /// Cache bound to the single entry `key` of `context`.
    pub fn entry(&self, context: impl Into<String>, key: &str) -> Result<EntryCache> {
        let context = context.into();
        validate_context(&context)?;
        let storage_key = storage_key(&context, key);
        Ok(EntryCache::new(Rc::clone(&self.core), context, storage_key))
    }

    // == Context Operations ==
    /// Removes every entry of `context`. Returns the removed count.
    pub fn clear(&self, context: &str) -> usize {
        self.core.clear(context)
    }

    /// Evicts a batch from `context` if it is over `max_elements`.
    /// Returns the removed count.
    pub fn garbage_elements(&self, context: &str) -> usize {
        self.core.garbage_elements(context)
    }

    /// Store keys belonging to `context`, in store enumeration order.
    pub fn keys(&self, context: &str) -> Vec<String> {
        context_keys(&*self.core.store.borrow(), context)
    }

    // == Events ==
    /// Observes `cache_exceeded` and `cache_garbage` signals.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CacheEvent) + 'static,
    {
        self.core.bus.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.core.bus.unsubscribe(id)
    }

    // == Accessors ==
    /// Snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        self.core.stats.borrow().clone()
    }

    /// The shared backing store.
    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.core.store)
    }

    pub fn max_elements(&self) -> usize {
        self.core.max_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStore};

    fn manager(max_elements: usize) -> CacheManager {
        let config = Config {
            max_elements,
            ..Config::default()
        };
        CacheManager::new(shared(MemoryStore::new()), &config)
    }

    #[test]
    fn test_manager_rejects_empty_context() {
        let manager = manager(10);
        assert!(matches!(
            manager.context(""),
            Err(CacheError::InvalidContext(_))
        ));
        assert!(manager.entry("", "k").is_err());
    }

    #[test]
    fn test_manager_keys_and_clear() {
        let manager = manager(10);
        let search = manager.context("search").unwrap();
        let roster = manager.context("roster").unwrap();

        search.set_item("a", &1).unwrap();
        search.set_item("b", &2).unwrap();
        roster.set_item("a", &3).unwrap();

        assert_eq!(manager.keys("search"), vec!["searcha", "searchb"]);
        assert_eq!(manager.clear("search"), 2);
        assert!(manager.keys("search").is_empty());
        assert_eq!(manager.keys("roster"), vec!["rostera"]);

        let stats = manager.stats();
        assert_eq!(stats.clears, 1);
        assert_eq!(stats.evictions, 2);
    }

    #[test]
    fn test_write_triggers_garbage_collection() {
        let manager = manager(2);
        let search = manager.context("search").unwrap();

        search.set_item("a", &1).unwrap();
        search.set_item("b", &2).unwrap();
        // Third write pushes the context over its limit of two
        search.set_item("c", &3).unwrap();

        assert!(manager.keys("search").is_empty());
        assert_eq!(manager.stats().evictions, 3);
    }

    #[test]
    fn test_default_listeners_released_with_manager() {
        let store = shared(MemoryStore::new());
        let manager = CacheManager::new(Rc::clone(&store), &Config::default());
        let cache = manager.context("search").unwrap();
        drop(manager);

        // The cache keeps the core alive on its own
        cache.set_item("q", "term").unwrap();
        assert_eq!(cache.get_item::<String>("q").unwrap(), Some("term".to_string()));
        drop(cache);

        assert_eq!(Rc::strong_count(&store), 1);
    }
}
