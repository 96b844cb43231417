//! Property Domain Cache
//!
//! Category-aware caching of property records, search results, filter
//! results and statistics, layered on the bounded cache.

mod facade;
pub mod keys;
mod property;

pub use facade::{CachedValue, DomainCacheStats, PropertyCache};
pub use keys::Category;
pub use property::{
    properties_size, search_results_size, statistics_size, Property, PropertyStatistics,
    SearchResult, PROPERTY_BASE_SIZE, SEARCH_RESULT_OVERHEAD,
};
