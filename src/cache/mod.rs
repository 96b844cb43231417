//! Cache Module
//!
//! Bounded in-memory cache with LRU eviction, TTL expiration and
//! cumulative size accounting.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use shared::BoundedCache;
pub use stats::{hit_rate, CacheStats, CategoryStats, Counters};
pub use store::CacheStore;

// == Public Constants ==
/// Entry count used when a non-positive capacity is configured
pub const DEFAULT_CAPACITY: usize = 1000;

/// Byte budget used when a non-positive maximum size is configured
pub const DEFAULT_MAX_SIZE: u64 = 50 * 1024 * 1024; // 50 MiB
