//! TTL Cleanup Tasks
//!
//! Background tasks that periodically remove expired cache entries so they
//! do not occupy capacity slots (or storage quota) indefinitely.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;
use crate::persistent::{PersistentCache, Storage};

/// Spawns a background task that periodically sweeps expired entries out of
/// an in-memory cache.
///
/// A single timer drives the loop, so a sweep never runs concurrently with
/// itself; each sweep acquires the write lock, runs to completion, and
/// releases it before the next sleep. Abort the returned handle on teardown
/// so the task never operates on a torn-down store.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval_secs` - Seconds between sweeps (300 is a reasonable default)
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(MemoryCache::<String>::default()));
/// let handle = spawn_cleanup_task(cache.clone(), 300);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<T>(
    cache: Arc<RwLock<MemoryCache<T>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!(removed, "TTL cleanup removed expired entries");
            } else {
                debug!("TTL cleanup found no expired entries");
            }
        }
    })
}

/// Spawns a background task that periodically sweeps expired and corrupt
/// records out of a persistent cache's prefix.
///
/// Same timer discipline as [`spawn_cleanup_task`]; this is the proactive
/// half of the persistent cache's cleanup (the reactive half runs when a
/// write fails).
pub fn spawn_persistent_cleanup_task<S>(
    cache: Arc<RwLock<PersistentCache<S>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    S: Storage + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting persistent cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!(removed, "persistent cleanup removed stale records");
            } else {
                debug!("persistent cleanup found no stale records");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::MemStorage;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(MemoryCache::new(100, 300_000)));

        // Add an entry with a very short TTL
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon".to_string(), "value".to_string(), Some(100));
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.len(), 0, "Expired entry should have been swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(MemoryCache::new(100, 300_000)));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("long_lived".to_string(), "value".to_string(), Some(3_600_000));
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(cache_guard.get("long_lived"), Some("value".to_string()));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(MemoryCache::<String>::default()));

        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test]
    async fn test_persistent_cleanup_task_removes_stale_records() {
        let cache = Arc::new(RwLock::new(PersistentCache::new(MemStorage::new())));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon", &1, Some(100));
        }

        let handle = spawn_persistent_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(cache_guard.get::<i32>("expire_soon"), None);
        }

        handle.abort();
    }
}
