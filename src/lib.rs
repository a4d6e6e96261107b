//! Context Cache - bounded, namespaced caching over a shared key-value store
//!
//! Partitions one capacity-limited store into contexts and keeps each
//! context near a configured entry ceiling with best-effort eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod storage;

pub use cache::{CacheManager, CacheStats, ContextCache, EntryCache};
pub use config::Config;
pub use error::{CacheError, Result, StoreError};
pub use events::{CacheEvent, EventBus, SubscriptionId};
