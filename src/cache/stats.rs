//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Hit Rate ==
/// Percentage of lookups that hit: `hits / (hits + misses) * 100`.
///
/// Returns 0.0 if no lookups have been made.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

// == Counters ==
/// Cumulative lookup and eviction counters kept by a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted to honour the count or size bound
    pub evictions: u64,
}

impl Counters {
    // == Constructor ==
    /// Creates counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of a bounded cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Hit rate in percent
    pub hit_rate: f64,
    /// Current number of entries
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Sum of declared sizes of the current entries, in bytes
    pub current_size: u64,
    /// Maximum cumulative size, in bytes
    pub max_size: u64,
}

impl CacheStats {
    /// Builds a snapshot from counters and the store's current bounds.
    pub fn snapshot(
        counters: Counters,
        size: usize,
        capacity: usize,
        current_size: u64,
        max_size: u64,
    ) -> Self {
        Self {
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            hit_rate: hit_rate(counters.hits, counters.misses),
            size,
            capacity,
            current_size,
            max_size,
        }
    }
}

// == Category Stats ==
/// Hit/miss breakdown for one category of the property cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub hits: u64,
    pub misses: u64,
    /// Hit rate in percent
    pub hit_rate: f64,
}

impl CategoryStats {
    pub fn new(hits: u64, misses: u64) -> Self {
        Self {
            hits,
            misses,
            hit_rate: hit_rate(hits, misses),
        }
    }
}
