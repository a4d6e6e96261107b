//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Failures reported by a backing key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write would push the store past its byte capacity
    #[error("Store capacity exceeded: needed {needed} bytes, {available} available")]
    CapacityExceeded { needed: usize, available: usize },

    /// The persisted store file could not be read or written
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted store file is not a valid store dump
    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true for the capacity-exhaustion failure.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, StoreError::CapacityExceeded { .. })
    }
}

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Context identifier is not usable as a key prefix
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    /// Value could not be encoded as JSON
    #[error("Failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Stored text under a key is not valid JSON for the requested type
    #[error("Malformed value under '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Write still rejected after clearing the context and retrying
    #[error("Cache full: {0}")]
    CapacityExceeded(String),

    /// Any other backing store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
