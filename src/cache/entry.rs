//! Cache Entry Module
//!
//! Defines the arena slot holding a single cached value together with its
//! size accounting, expiry deadline and recency links.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry stored in the recency arena.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Key under which the entry is indexed
    pub key: String,
    /// The stored value
    pub value: V,
    /// Declared byte cost, supplied by the caller
    pub size: u64,
    /// Expiration deadline, None = never expires
    pub expires_at: Option<Instant>,
    /// Slot of the next more recently used entry
    pub(crate) prev: Option<usize>,
    /// Slot of the next less recently used entry
    pub(crate) next: Option<usize>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new unlinked entry.
    ///
    /// # Arguments
    /// * `key` - Index key
    /// * `value` - The value to store
    /// * `size` - Declared byte cost of the value
    /// * `ttl` - Lifetime of the entry; `Duration::ZERO` means no expiration
    pub fn new(key: String, value: V, size: u64, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            key,
            value,
            size,
            expires_at: deadline(now, ttl),
            prev: None,
            next: None,
        }
    }

    // == Refresh ==
    /// Replaces value, size and expiry in place, keeping the recency links.
    ///
    /// Returns the previous declared size.
    pub fn refresh(&mut self, value: V, size: u64, ttl: Duration) -> u64 {
        let now = Instant::now();
        let old_size = self.size;
        self.value = value;
        self.size = size;
        self.expires_at = deadline(now, ttl);
        old_size
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a fixed instant, so a sweep uses one clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

/// Computes the absolute deadline for a TTL; zero means no deadline.
fn deadline(now: Instant, ttl: Duration) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}
