//! Memory Cache Module
//!
//! Bounded in-memory cache combining HashMap storage with FIFO eviction and
//! lazy TTL expiration.

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, FifoTracker, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};

// == Memory Cache ==
/// Bounded in-memory key/value store with per-entry TTL and FIFO eviction.
///
/// None of the operations fail: capacity pressure is resolved by silently
/// evicting the earliest-inserted entry, and expiry is resolved by lazy
/// deletion on access. `get` and `has` may therefore mutate the store even
/// though they read.
///
/// The store is intended to be constructed once by the composition root and
/// passed by reference (or shared behind `Arc<RwLock<..>>`) rather than held
/// as ambient global state.
#[derive(Debug)]
pub struct MemoryCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion-order tracker for eviction
    order: FifoTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl_ms: u64,
    /// Clock source, swappable in tests
    clock: fn() -> u64,
}

impl<T> MemoryCache<T> {
    // == Constructor ==
    /// Creates a new MemoryCache with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl_ms` - Default TTL in milliseconds for entries without explicit TTL
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self::with_clock(max_entries, default_ttl_ms, current_timestamp_ms)
    }

    /// Creates a new MemoryCache with an explicit clock source.
    ///
    /// The clock returns Unix milliseconds; tests substitute a controllable
    /// one so TTL behavior can be verified without sleeping.
    pub fn with_clock(max_entries: usize, default_ttl_ms: u64, clock: fn() -> u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl_ms,
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten, the TTL is reset,
    /// and the key keeps its original position in the eviction order. If the
    /// cache is at capacity and the key is new, the earliest-inserted entry
    /// is silently evicted first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses default_ttl_ms if None)
    pub fn set(&mut self, key: String, value: T, ttl_ms: Option<u64>) {
        let is_overwrite = self.entries.contains_key(&key);

        // If not overwriting and at capacity, evict the oldest insertion
        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let effective_ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        let entry = CacheEntry::new(value, (self.clock)(), effective_ttl);
        self.entries.insert(key.clone(), entry);
        self.order.record(&key);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Has ==
    /// Checks whether a key is present and unexpired.
    ///
    /// Carries the same lazy-expiry side effect as `get`: a present-but-expired
    /// entry is removed. Presence probes are not counted as hits or misses.
    pub fn has(&mut self, key: &str) -> bool {
        self.expire_if_elapsed(key);
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let was_present = self.entries.remove(key).is_some();
        if was_present {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        was_present
    }

    // == Clear ==
    /// Removes all entries unconditionally. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Intended to run periodically so expired-but-unread entries do not
    /// occupy capacity slots indefinitely. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = (self.clock)();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the number of entries currently tracked.
    ///
    /// Expired-but-unread entries still occupy a slot until lazily removed,
    /// so this is an upper bound on live entries, not an exact count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry for `key` if its TTL has elapsed.
    fn expire_if_elapsed(&mut self, key: &str) -> bool {
        let now = (self.clock)();
        let elapsed = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired_at(now))
            .unwrap_or(false);

        if elapsed {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
        }
        elapsed
    }
}

impl<T: Clone> MemoryCache<T> {
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present and unexpired. A present-but-expired
    /// entry is removed as a side effect and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.expire_if_elapsed(key);

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }
}

impl<T> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS)
    }
}
