//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::PropertyCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// Lookups already skip expired entries; the sweep releases their memory and
/// size budget without waiting for a lookup. An interval of zero is treated
/// as one second.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = PropertyCache::new(&CacheConfig::default());
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 30);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: PropertyCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    spawn_cleanup_every(cache, Duration::from_secs(cleanup_interval_secs.max(1)))
}

/// Same as [`spawn_cleanup_task`] with a sub-second interval.
pub fn spawn_cleanup_every(cache: PropertyCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
