//! Storage Keys Module
//!
//! Composite key construction and per-context key enumeration.

use crate::error::{CacheError, Result};
use crate::storage::KeyValueStore;

// == Validate Context ==
/// Rejects contexts that cannot act as a key prefix.
///
/// An empty context would prefix every key in the store.
pub fn validate_context(context: &str) -> Result<()> {
    if context.is_empty() {
        return Err(CacheError::InvalidContext(
            "Context cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// == Storage Key ==
/// Composite store key for `key` inside `context`.
///
/// Plain concatenation: a context that is a prefix of another context
/// enumerates that context's keys too.
pub fn storage_key(context: &str, key: &str) -> String {
    let mut composite = String::with_capacity(context.len() + key.len());
    composite.push_str(context);
    composite.push_str(key);
    composite
}

// == Context Keys ==
/// Every store key belonging to `context`, in store enumeration order.
///
/// Scans the whole store; cost is proportional to the total key count.
pub fn context_keys(store: &dyn KeyValueStore, context: &str) -> Vec<String> {
    store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(context))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_storage_key_concatenates() {
        assert_eq!(storage_key("search", "q"), "searchq");
        assert_eq!(storage_key("search", ""), "search");
    }

    #[test]
    fn test_validate_context() {
        assert!(validate_context("search").is_ok());
        assert!(matches!(
            validate_context(""),
            Err(CacheError::InvalidContext(_))
        ));
    }

    #[test]
    fn test_context_keys_filters_by_prefix_in_store_order() {
        let mut store = MemoryStore::new();
        store.set("searchb", "1").unwrap();
        store.set("otherx", "2").unwrap();
        store.set("searcha", "3").unwrap();

        assert_eq!(context_keys(&store, "search"), vec!["searchb", "searcha"]);
        assert_eq!(context_keys(&store, "other"), vec!["otherx"]);
        assert!(context_keys(&store, "none").is_empty());
    }

    #[test]
    fn test_context_keys_includes_longer_contexts_sharing_prefix() {
        let mut store = MemoryStore::new();
        store.set("searchq", "1").unwrap();
        store.set("search_tabq", "2").unwrap();

        assert_eq!(context_keys(&store, "search").len(), 2);
        assert_eq!(context_keys(&store, "search_tab"), vec!["search_tabq"]);
    }
}
