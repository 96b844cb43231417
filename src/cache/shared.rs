//! Shared Cache Handle
//!
//! Thread-safe, cloneable handle over a [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::cache::{CacheStats, CacheStore};

// == Bounded Cache ==
/// Cloneable handle to one bounded LRU cache shared between threads.
///
/// The index and the recency list sit behind a single lock. Lookups take it
/// exclusively because a hit repositions the entry.
#[derive(Debug)]
pub struct BoundedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for BoundedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> BoundedCache<V> {
    /// Creates a new shared cache. See [`CacheStore::new`] for the defaults.
    pub fn new(capacity: usize, max_size: u64, default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(capacity, max_size, default_ttl))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, size: u64) -> bool {
        self.inner.write().set(key, value, size)
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, size: u64, ttl: Duration) -> bool {
        self.inner.write().set_with_ttl(key, value, size, ttl)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.write().delete(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn cleanup_expired(&self) -> usize {
        self.inner.write().cleanup_expired()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn current_size(&self) -> u64 {
        self.inner.read().current_size()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }
}

impl<V: Clone> BoundedCache<V> {
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.write().get(key)
    }
}
