//! Property Cache - bounded in-memory caching for a property listing service
//!
//! An LRU cache bounded by entry count, cumulative byte size and TTL, plus a
//! category-aware facade for property records, search results, filter
//! results and statistics.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedCache, CacheStats, CacheStore};
pub use config::{CacheConfig, Config};
pub use domain::PropertyCache;
pub use tasks::spawn_cleanup_task;
