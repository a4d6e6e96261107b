//! Cache Statistics Module
//!
//! Tracks cache activity including hits, misses, overflows and evictions.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Counters shared by every cache created from one manager.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that found a value
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Successful writes
    pub writes: u64,
    /// Writes rejected by the store for lack of capacity
    pub overflows: u64,
    /// Entries removed by garbage collection or context clears
    pub evictions: u64,
    /// Context clears performed
    pub clears: u64,
    /// When entries were last evicted
    pub last_eviction_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_overflow(&mut self) {
        self.overflows += 1;
    }

    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    // == Record Evictions ==
    /// Adds `count` evicted entries and stamps the eviction time.
    pub fn record_evictions(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.evictions += count as u64;
        self.last_eviction_at = Some(Utc::now());
    }
}
