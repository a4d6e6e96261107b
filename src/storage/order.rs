//! Insertion Order Module
//!
//! Tracks the order in which keys were first written to a store.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks key order for store enumeration.
///
/// Keys are stored in a VecDeque where:
/// - Front = Earliest written
/// - Back = Most recently added
///
/// Overwriting a key that is already tracked keeps its position.
#[derive(Debug, Default, Clone)]
pub struct InsertionOrder {
    /// Order of keys by first write
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Appends a key if it is not tracked yet.
    pub fn record(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Iter ==
    /// Iterates keys from earliest to latest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    // == Peek Earliest ==
    #[allow(dead_code)]
    pub fn peek_earliest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_new() {
        let order = InsertionOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_order_record_appends() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key3");

        assert_eq!(order.len(), 3);
        assert_eq!(order.peek_earliest(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_order_record_existing_keeps_position() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key1");

        let keys: Vec<&String> = order.iter().collect();
        assert_eq!(keys, vec!["key1", "key2"]);
    }

    #[test]
    fn test_order_remove_then_record_moves_to_back() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.remove("key1");
        order.record("key1");

        let keys: Vec<&String> = order.iter().collect();
        assert_eq!(keys, vec!["key2", "key1"]);
    }

    #[test]
    fn test_order_remove_nonexistent() {
        let mut order = InsertionOrder::new();
        order.record("key1");

        order.remove("missing");

        assert_eq!(order.len(), 1);
        assert!(order.contains("key1"));
        assert!(!order.contains("missing"));
    }
}
