//! Cache Store Module
//!
//! Bounded cache engine combining a key index with an arena-backed recency
//! list, enforcing entry count, cumulative byte size and TTL together.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{
    CacheEntry, CacheStats, Counters, RecencyList, DEFAULT_CAPACITY, DEFAULT_MAX_SIZE,
};

// == Cache Store ==
/// Bounded LRU storage with size accounting and TTL support.
///
/// Not synchronized; see [`BoundedCache`](crate::cache::BoundedCache) for the
/// shared handle.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to arena slot
    index: HashMap<String, usize>,
    /// Entries ordered by recency
    recency: RecencyList<V>,
    /// Lookup and eviction counters
    counters: Counters,
    /// Maximum number of entries
    capacity: usize,
    /// Maximum cumulative declared size in bytes
    max_size: u64,
    /// TTL for entries stored without one, zero = never expires
    default_ttl: Duration,
    /// Sum of declared sizes of indexed entries
    current_size: u64,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum entry count, 0 selects the default of 1000
    /// * `max_size` - Maximum cumulative bytes, 0 selects the default of 50 MiB
    /// * `default_ttl` - TTL for entries without one, zero disables expiry
    pub fn new(capacity: usize, max_size: u64, default_ttl: Duration) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        let max_size = if max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            max_size
        };

        Self {
            index: HashMap::with_capacity(capacity.min(4096)),
            recency: RecencyList::new(),
            counters: Counters::new(),
            capacity,
            max_size,
            default_ttl,
            current_size: 0,
        }
    }

    // == Set ==
    /// Stores a value with the default TTL.
    ///
    /// Returns false if `size` exceeds `max_size`; the value is then not stored.
    pub fn set(&mut self, key: impl Into<String>, value: V, size: u64) -> bool {
        self.set_with_ttl(key, value, size, Duration::ZERO)
    }

    /// Stores a value with an explicit TTL.
    ///
    /// A zero `ttl` falls back to the store's default. An existing key gets
    /// its value, size and expiry replaced and becomes most recently used.
    /// Afterwards entries are evicted from the least recently used end until
    /// both the count and the size bound hold.
    ///
    /// Returns false, leaving the store untouched, if `size > max_size`.
    pub fn set_with_ttl(
        &mut self,
        key: impl Into<String>,
        value: V,
        size: u64,
        ttl: Duration,
    ) -> bool {
        let key = key.into();

        if size > self.max_size {
            debug!(
                key = %key,
                size,
                max_size = self.max_size,
                "value larger than cache, not stored"
            );
            return false;
        }

        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };

        match self.index.get(&key) {
            Some(&idx) => {
                if let Some(entry) = self.recency.get_mut(idx) {
                    let old_size = entry.refresh(value, size, ttl);
                    self.current_size = self.current_size - old_size + size;
                }
                self.recency.move_to_front(idx);
            }
            None => {
                let idx = self
                    .recency
                    .push_front(CacheEntry::new(key.clone(), value, size, ttl));
                self.index.insert(key, idx);
                self.current_size += size;
            }
        }

        self.evict_to_bounds();
        true
    }

    // == Delete ==
    /// Removes an entry by key, reporting whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Cumulative counters are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.recency.clear();
        self.current_size = 0;
    }

    // == Keys ==
    /// Returns all indexed keys, most recently used first.
    ///
    /// Expired entries not yet swept are included.
    pub fn keys(&self) -> Vec<String> {
        self.recency.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Contains ==
    /// Checks for a live entry without touching recency or counters.
    pub fn contains(&self, key: &str) -> bool {
        self.index
            .get(key)
            .and_then(|&idx| self.recency.get(idx))
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries regardless of recency.
    ///
    /// With a zero default TTL only entries stored with an explicit TTL can
    /// expire, so the sweep returns 0 when every TTL involved is zero.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .recency
            .iter()
            .filter(|entry| entry.is_expired_at(now))
            .map(|entry| entry.key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        if count > 0 {
            debug!(removed = count, "expired entries swept");
        }
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats::snapshot(
            self.counters,
            self.index.len(),
            self.capacity,
            self.current_size,
            self.max_size,
        )
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the sum of declared sizes of current entries.
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let idx = self.index.remove(key)?;
        let entry = self.recency.remove(idx)?;
        self.current_size -= entry.size;
        Some(entry)
    }

    fn evict_to_bounds(&mut self) {
        while self.index.len() > self.capacity || self.current_size > self.max_size {
            let Some(entry) = self.recency.pop_back() else {
                break;
            };
            self.index.remove(&entry.key);
            self.current_size -= entry.size;
            self.counters.record_eviction();
            debug!(key = %entry.key, size = entry.size, "evicted least recently used entry");
        }
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit moves the entry to the most recently used end. An expired entry
    /// is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let Some(&idx) = self.index.get(key) else {
            self.counters.record_miss();
            return None;
        };

        let expired = self.recency.get(idx).map_or(true, |entry| entry.is_expired());
        if expired {
            self.remove_entry(key);
            self.counters.record_miss();
            return None;
        }

        self.recency.move_to_front(idx);
        self.counters.record_hit();
        self.recency.get(idx).map(|entry| entry.value.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const HOUR: Duration = Duration::from_secs(3600);

    fn store(capacity: usize, max_size: u64) -> CacheStore<String> {
        CacheStore::new(capacity, max_size, HOUR)
    }

    #[test]
    fn test_store_new() {
        let store = store(100, 1024);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.current_size(), 0);
    }

    #[test]
    fn test_store_defaults_for_zero_bounds() {
        let store: CacheStore<String> = CacheStore::new(0, 0, Duration::ZERO);
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
        assert_eq!(store.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(store.default_ttl(), Duration::ZERO);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100, 1024);

        assert!(store.set("key1", "value1".to_string(), 6));

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 6);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100, 1024);
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = store(100, 1024);

        store.set("key1", "value1".to_string(), 6);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.current_size(), 0);
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = store(100, 1024);
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_overwrite_adjusts_size_by_delta() {
        let mut store = store(100, 1024);

        store.set("key1", "value1".to_string(), 100);
        store.set("key2", "value2".to_string(), 50);
        store.set("key1", "value3".to_string(), 30);

        assert_eq!(store.get("key1"), Some("value3".to_string()));
        assert_eq!(store.len(), 2);
        assert_eq!(store.current_size(), 80);
    }

    #[test]
    fn test_store_overwrite_moves_to_front() {
        let mut store = store(2, 1024);

        store.set("a", "A".to_string(), 1);
        store.set("b", "B".to_string(), 1);
        store.set("a", "A2".to_string(), 1);
        store.set("c", "C".to_string(), 1);

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
    }

    #[test]
    fn test_store_oversized_value_rejected() {
        let mut store = store(100, 100);
        store.set("small", "s".to_string(), 10);

        assert!(!store.set("big", "b".to_string(), 101));

        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 10);
        assert!(store.get("big").is_none());
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_oversized_update_keeps_old_value() {
        let mut store = store(100, 100);
        store.set("key", "old".to_string(), 10);

        assert!(!store.set("key", "new".to_string(), 500));

        assert_eq!(store.get("key"), Some("old".to_string()));
        assert_eq!(store.current_size(), 10);
    }

    #[test]
    fn test_store_value_equal_to_max_size_fits() {
        let mut store = store(100, 100);
        store.set("a", "a".to_string(), 40);

        assert!(store.set("b", "b".to_string(), 100));

        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 100);
        assert!(store.contains("b"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store(100, 1024);

        store.set_with_ttl("key1", "value1".to_string(), 6, Duration::from_millis(50));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
        assert_eq!(store.len(), 0, "expired entry is removed on lookup");
        assert_eq!(store.current_size(), 0);
    }

    #[test]
    fn test_store_zero_ttl_uses_default() {
        let mut store: CacheStore<String> =
            CacheStore::new(10, 1024, Duration::from_millis(50));

        store.set_with_ttl("key1", "value1".to_string(), 1, Duration::ZERO);
        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3, 1024);

        store.set("key1", "value1".to_string(), 1);
        store.set("key2", "value2".to_string(), 1);
        store.set("key3", "value3".to_string(), 1);
        store.set("key4", "value4".to_string(), 1);

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(3, 1024);

        store.set("key1", "value1".to_string(), 1);
        store.set("key2", "value2".to_string(), 1);
        store.set("key3", "value3".to_string(), 1);

        store.get("key1");
        store.set("key4", "value4".to_string(), 1);

        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_store_size_eviction_before_capacity() {
        let mut store = store(100, 100);

        store.set("a", "a".to_string(), 40);
        store.set("b", "b".to_string(), 40);
        store.set("c", "c".to_string(), 40);

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_size(), 80);
        assert!(!store.contains("a"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_size_eviction_removes_several() {
        let mut store = store(100, 100);

        store.set("a", "a".to_string(), 30);
        store.set("b", "b".to_string(), 30);
        store.set("c", "c".to_string(), 30);
        store.set("d", "d".to_string(), 90);

        assert_eq!(store.keys(), vec!["d".to_string()]);
        assert_eq!(store.current_size(), 90);
        assert_eq!(store.stats().evictions, 3);
    }

    #[test]
    fn test_store_growing_update_evicts_others() {
        let mut store = store(100, 100);

        store.set("a", "a".to_string(), 30);
        store.set("b", "b".to_string(), 30);
        store.set("b", "b".to_string(), 80);

        assert!(!store.contains("a"));
        assert_eq!(store.current_size(), 80);
    }

    #[test]
    fn test_store_example_scenario() {
        let mut store = store(2, 1024);

        store.set("a", "A".to_string(), 10);
        store.set("b", "B".to_string(), 20);
        assert_eq!(store.len(), 2);

        store.set("c", "C".to_string(), 30);
        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_none());
        assert_eq!(store.get("b"), Some("B".to_string()));
        assert_eq!(store.get("c"), Some("C".to_string()));
        assert_eq!(store.current_size(), 50);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100, 1024);

        store.set("key1", "value1".to_string(), 6);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 50.0);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 100);
        assert_eq!(stats.current_size, 6);
        assert_eq!(stats.max_size, 1024);
    }

    #[test]
    fn test_store_clear_keeps_counters() {
        let mut store = store(100, 1024);

        store.set("key1", "value1".to_string(), 6);
        store.get("key1");
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.current_size(), 0);
        assert!(store.keys().is_empty());
        assert_eq!(store.stats().hits, 1);
    }

    #[test]
    fn test_store_keys_most_recent_first() {
        let mut store = store(100, 1024);

        store.set("a", "A".to_string(), 1);
        store.set("b", "B".to_string(), 1);
        store.get("a");

        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

        store.set("c", "C".to_string(), 1);
        assert_eq!(store.keys(), vec!["c".to_string(), "a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_store_keys_include_unswept_expired() {
        let mut store = store(100, 1024);

        store.set_with_ttl("stale", "old".to_string(), 3, Duration::from_millis(50));
        store.set("fresh", "new".to_string(), 3);
        sleep(Duration::from_millis(80));

        assert_eq!(store.keys(), vec!["fresh".to_string(), "stale".to_string()]);
        assert_eq!(store.len(), 2);
        assert!(!store.contains("stale"));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.keys(), vec!["fresh".to_string()]);
        assert_eq!(store.current_size(), 3);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = store(100, 1024);

        store.set_with_ttl("key1", "value1".to_string(), 6, Duration::from_millis(50));
        store.set_with_ttl("key2", "value2".to_string(), 6, Duration::from_secs(10));

        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 6);
        assert!(store.get("key2").is_some());
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_cleanup_without_ttl_is_noop() {
        let mut store: CacheStore<String> = CacheStore::new(100, 1024, Duration::ZERO);

        store.set("key1", "value1".to_string(), 6);
        sleep(Duration::from_millis(20));

        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_cleanup_sweeps_explicit_ttl_without_default() {
        let mut store: CacheStore<String> = CacheStore::new(100, 1024, Duration::ZERO);

        store.set_with_ttl("short", "value1".to_string(), 6, Duration::from_millis(50));
        store.set("forever", "value2".to_string(), 6);
        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert!(!store.contains("short"));
        assert!(store.contains("forever"));
        assert_eq!(store.current_size(), 6);
    }
}
