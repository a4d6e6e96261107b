//! Cache Module
//!
//! Context-scoped caches with bounded per-context size over a shared store.

mod context;
mod entry;
mod eviction;
mod keys;
mod manager;
mod stats;


// Re-export public types
pub use context::ContextCache;
pub use entry::EntryCache;
pub use eviction::{clear_context, collect_garbage};
pub use keys::{context_keys, storage_key};
pub use manager::CacheManager;
pub use stats::CacheStats;
