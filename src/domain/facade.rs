//! Property Cache
//!
//! Typed, namespaced caching for property records, search results, filter
//! results and statistics on top of one shared [`BoundedCache`].
//!
//! Every category has its own key prefix and TTL. Any property mutation
//! invalidates the property itself plus every search, filter and statistics
//! entry, since a single change may alter any derived result.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::cache::{BoundedCache, CacheStats, CategoryStats};
use crate::config::CacheConfig;
use crate::domain::keys::{self, Category};
use crate::domain::property::{
    properties_size, search_results_size, statistics_size, Property, PropertyStatistics,
    SearchResult,
};

// == Cached Value ==
/// The shapes stored in the shared cache, one per category.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Property(Property),
    SearchResults(Vec<SearchResult>),
    FilterResults(Vec<Property>),
    Statistics(PropertyStatistics),
}

// == Category Counters ==
#[derive(Debug, Default, Clone, Copy)]
struct Counter {
    hits: u64,
    misses: u64,
}

#[derive(Debug, Default)]
struct CategoryCounters {
    property: Counter,
    search: Counter,
    filter: Counter,
    statistics: Counter,
}

impl CategoryCounters {
    fn slot(&mut self, category: Category) -> &mut Counter {
        match category {
            Category::Property => &mut self.property,
            Category::Search => &mut self.search,
            Category::Filter => &mut self.filter,
            Category::Statistics => &mut self.statistics,
        }
    }

    fn record(&mut self, category: Category, hit: bool) {
        let counter = self.slot(category);
        if hit {
            counter.hits += 1;
        } else {
            counter.misses += 1;
        }
    }
}

// == Domain Cache Stats ==
/// Global cache statistics merged with per-category hit rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainCacheStats {
    pub enabled: bool,
    #[serde(flatten)]
    pub cache: CacheStats,
    pub property: CategoryStats,
    pub search: CategoryStats,
    pub filter: CategoryStats,
    pub statistics: CategoryStats,
}

// == Property Cache ==
/// Cloneable handle; clones share the same cache and counters.
#[derive(Debug, Clone)]
pub struct PropertyCache {
    cache: BoundedCache<CachedValue>,
    counters: Arc<Mutex<CategoryCounters>>,
    enabled: bool,
    default_ttl: Duration,
    search_ttl: Duration,
    statistics_ttl: Duration,
}

impl PropertyCache {
    // == Constructor ==
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: BoundedCache::new(config.capacity, config.max_size, config.default_ttl),
            counters: Arc::new(Mutex::new(CategoryCounters::default())),
            enabled: config.enabled,
            default_ttl: config.default_ttl,
            search_ttl: config.search_ttl,
            statistics_ttl: config.statistics_ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The underlying shared cache.
    pub fn cache(&self) -> &BoundedCache<CachedValue> {
        &self.cache
    }

    // == Property Records ==
    pub fn get_property(&self, id: u64) -> Option<Property> {
        self.lookup(Category::Property, &keys::property(id), |value| match value {
            CachedValue::Property(property) => Some(property),
            _ => None,
        })
    }

    /// Caches a record under its id with the default TTL.
    pub fn set_property(&self, property: &Property) -> bool {
        self.store(
            &keys::property(property.id),
            CachedValue::Property(property.clone()),
            property.estimated_size(),
            self.default_ttl,
        )
    }

    // == Search Results ==
    pub fn get_search_results(&self, query: &str, limit: usize) -> Option<Vec<SearchResult>> {
        self.lookup(Category::Search, &keys::search(query, limit), |value| match value {
            CachedValue::SearchResults(results) => Some(results),
            _ => None,
        })
    }

    /// Caches a ranked result set with the search TTL. Empty sets are skipped.
    pub fn set_search_results(&self, query: &str, limit: usize, results: &[SearchResult]) -> bool {
        if results.is_empty() {
            return false;
        }
        self.store(
            &keys::search(query, limit),
            CachedValue::SearchResults(results.to_vec()),
            search_results_size(results),
            self.search_ttl,
        )
    }

    // == Filter Results ==
    pub fn get_filter_results(
        &self,
        province: &str,
        min_price: f64,
        max_price: f64,
    ) -> Option<Vec<Property>> {
        let key = keys::filter(province, min_price, max_price);
        self.lookup(Category::Filter, &key, |value| match value {
            CachedValue::FilterResults(properties) => Some(properties),
            _ => None,
        })
    }

    /// Caches a filtered list with the default TTL. Empty lists are skipped.
    pub fn set_filter_results(
        &self,
        province: &str,
        min_price: f64,
        max_price: f64,
        properties: &[Property],
    ) -> bool {
        if properties.is_empty() {
            return false;
        }
        self.store(
            &keys::filter(province, min_price, max_price),
            CachedValue::FilterResults(properties.to_vec()),
            properties_size(properties),
            self.default_ttl,
        )
    }

    // == Statistics ==
    pub fn get_statistics(&self, name: &str) -> Option<PropertyStatistics> {
        self.lookup(Category::Statistics, &keys::statistics(name), |value| match value {
            CachedValue::Statistics(stats) => Some(stats),
            _ => None,
        })
    }

    /// Caches a statistics blob with the statistics TTL. Empty maps are skipped.
    pub fn set_statistics(&self, name: &str, stats: &PropertyStatistics) -> bool {
        if stats.is_empty() {
            return false;
        }
        self.store(
            &keys::statistics(name),
            CachedValue::Statistics(stats.clone()),
            statistics_size(stats),
            self.statistics_ttl,
        )
    }

    // == Invalidation ==
    /// Drops a property and everything derived from property data.
    ///
    /// Returns the total number of entries removed. Not atomic with respect
    /// to concurrent writers repopulating derived entries.
    pub fn invalidate_property(&self, id: u64) -> usize {
        if !self.enabled {
            return 0;
        }
        let own = usize::from(self.cache.delete(&keys::property(id)));
        let derived = self.invalidate_search_results() + self.invalidate_statistics();
        debug!(property_id = id, removed = own + derived, "property invalidated");
        own + derived
    }

    /// Drops all search and filter entries.
    pub fn invalidate_search_results(&self) -> usize {
        self.remove_categories(&[Category::Search]) + self.invalidate_filter_results()
    }

    /// Drops all filter entries.
    pub fn invalidate_filter_results(&self) -> usize {
        self.remove_categories(&[Category::Filter])
    }

    /// Drops all statistics entries.
    pub fn invalidate_statistics(&self) -> usize {
        self.remove_categories(&[Category::Statistics])
    }

    // == Maintenance ==
    /// Eagerly removes expired entries.
    pub fn cleanup_expired(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        self.cache.cleanup_expired()
    }

    /// Empties the cache and zeroes the category counters.
    pub fn clear(&self) {
        if !self.enabled {
            return;
        }
        self.cache.clear();
        *self.counters.lock() = CategoryCounters::default();
    }

    /// Number of cached entries per category.
    pub fn key_counts(&self) -> Vec<(Category, usize)> {
        let mut counts = Category::ALL.map(|category| (category, 0));
        if self.enabled {
            for category in self.cache.keys().iter().filter_map(|key| Category::of_key(key)) {
                if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == category) {
                    slot.1 += 1;
                }
            }
        }
        counts.to_vec()
    }

    // == Stats ==
    pub fn get_stats(&self) -> DomainCacheStats {
        if !self.enabled {
            return DomainCacheStats::default();
        }

        let cache = self.cache.stats();
        let counters = self.counters.lock();
        let view = |c: Counter| CategoryStats::new(c.hits, c.misses);

        DomainCacheStats {
            enabled: true,
            cache,
            property: view(counters.property),
            search: view(counters.search),
            filter: view(counters.filter),
            statistics: view(counters.statistics),
        }
    }

    fn lookup<T>(
        &self,
        category: Category,
        key: &str,
        extract: impl FnOnce(CachedValue) -> Option<T>,
    ) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let found = self.cache.get(key).and_then(extract);
        self.counters.lock().record(category, found.is_some());
        found
    }

    fn store(&self, key: &str, value: CachedValue, size: u64, ttl: Duration) -> bool {
        if !self.enabled {
            return false;
        }
        self.cache.set_with_ttl(key, value, size, entry_ttl(ttl))
    }

    fn remove_categories(&self, categories: &[Category]) -> usize {
        if !self.enabled {
            return 0;
        }
        let removed = self
            .cache
            .keys()
            .into_iter()
            .filter(|key| Category::of_key(key).is_some_and(|c| categories.contains(&c)))
            .filter(|key| self.cache.delete(key))
            .count();
        debug!(?categories, removed, "cache categories invalidated");
        removed
    }
}

/// A zero category TTL disables expiry for that category. The store reads a
/// zero per-entry TTL as "use the default", so it is passed on as an
/// unrepresentable deadline instead.
fn entry_ttl(ttl: Duration) -> Duration {
    if ttl.is_zero() {
        Duration::MAX
    } else {
        ttl
    }
}
