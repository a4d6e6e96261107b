//! Eviction Module
//!
//! Context-wide removal policies applied to a backing store.

use crate::cache::keys::context_keys;
use crate::storage::KeyValueStore;

// == Clear Context ==
/// Removes every key belonging to `context`. Returns the removed count.
pub fn clear_context(store: &mut dyn KeyValueStore, context: &str) -> usize {
    let keys = context_keys(&*store, context);
    for key in &keys {
        store.remove(key);
    }
    keys.len()
}

// == Collect Garbage ==
/// Trims `context` once it holds more than `max_elements` entries.
///
/// Removes the first `batch` keys in store enumeration order, which only
/// approximates oldest-first. A single pass may leave the context above
/// `max_elements`. Returns the removed count.
pub fn collect_garbage(
    store: &mut dyn KeyValueStore,
    context: &str,
    max_elements: usize,
    batch: usize,
) -> usize {
    let keys = context_keys(&*store, context);
    if keys.len() <= max_elements {
        return 0;
    }

    let victims = &keys[..batch.min(keys.len())];
    for key in victims {
        store.remove(key);
    }
    victims.len()
}
