//! Persistent Cache Module
//!
//! TTL caching over a durable storage backend, namespaced by a key prefix so
//! unrelated data sharing the same storage is never touched.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, CacheEntry};
use crate::persistent::{Storage, DEFAULT_PERSISTENT_TTL_MS, DEFAULT_PREFIX};

// == Persistent Cache ==
/// Key/value cache whose entries survive process restarts.
///
/// Records are serialized [`CacheEntry`]s written under `<prefix><key>` in
/// the backing storage. Caching here is purely an optimization: no operation
/// ever raises. Quota-exhausted writes trigger a best-effort cleanup and one
/// retry, then are dropped silently; unreadable or corrupt records read as
/// absent and are swept out by the next cleanup pass.
///
/// The cache owns the keys under its prefix but not the storage namespace
/// itself. Writers in other processes sharing the same backend race
/// last-writer-wins; cached data is a re-derivable copy, not a source of
/// truth.
#[derive(Debug)]
pub struct PersistentCache<S: Storage> {
    /// Backing storage, shared with other prefixes
    storage: S,
    /// Namespace prefix for every key this instance owns
    prefix: String,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl_ms: u64,
    /// Clock source, swappable in tests
    clock: fn() -> u64,
}

impl<S: Storage> PersistentCache<S> {
    // == Constructor ==
    /// Creates a cache over `storage` with the default prefix and 24-hour
    /// default TTL.
    pub fn new(storage: S) -> Self {
        Self::with_prefix(storage, DEFAULT_PREFIX)
    }

    /// Creates a cache over `storage` with an explicit prefix.
    pub fn with_prefix(storage: S, prefix: impl Into<String>) -> Self {
        Self::with_clock(
            storage,
            prefix,
            DEFAULT_PERSISTENT_TTL_MS,
            current_timestamp_ms,
        )
    }

    /// Creates a cache with an explicit prefix, default TTL, and clock
    /// source.
    pub fn with_clock(
        storage: S,
        prefix: impl Into<String>,
        default_ttl_ms: u64,
        clock: fn() -> u64,
    ) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
            default_ttl_ms,
            clock,
        }
    }

    // == Set ==
    /// Serializes and stores a value under the prefixed key.
    ///
    /// On write failure, runs a cleanup pass and retries once; a second
    /// failure drops the write without signaling the caller.
    ///
    /// # Arguments
    /// * `key` - The logical (unprefixed) key
    /// * `value` - The value to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses default_ttl_ms if None)
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T, ttl_ms: Option<u64>) {
        let entry = CacheEntry::new(value, (self.clock)(), ttl_ms.unwrap_or(self.default_ttl_ms));

        let payload = match serde_json::to_string(&entry) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(key, %err, "value not serializable, dropping cache write");
                return;
            }
        };

        let storage_key = self.storage_key(key);
        if let Err(err) = self.storage.write(&storage_key, &payload) {
            warn!(key, %err, "cache write failed, cleaning up and retrying");
            self.cleanup_expired();
            if let Err(err) = self.storage.write(&storage_key, &payload) {
                debug!(key, %err, "cache write still failing, dropping");
            }
        }
    }

    // == Get ==
    /// Reads and deserializes the value stored under the prefixed key.
    ///
    /// Returns None when the record is missing, fails to deserialize
    /// (corruption reads as absence; the record is left for the next cleanup
    /// pass), or has expired. Expired records are removed as a side effect.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let storage_key = self.storage_key(key);
        let payload = self.storage.read(&storage_key)?;

        let entry: CacheEntry<T> = match serde_json::from_str(&payload) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(key, %err, "corrupt cache record, treating as miss");
                return None;
            }
        };

        if entry.is_expired_at((self.clock)()) {
            self.storage.remove(&storage_key);
            return None;
        }

        Some(entry.value)
    }

    // == Delete ==
    /// Removes the prefixed record if present. Absence is not an error.
    pub fn delete(&mut self, key: &str) {
        let storage_key = self.storage_key(key);
        self.storage.remove(&storage_key);
    }

    // == Clear ==
    /// Removes every record under this instance's prefix.
    ///
    /// Unrelated keys in the shared storage namespace are left untouched.
    pub fn clear(&mut self) {
        for storage_key in self.owned_keys() {
            self.storage.remove(&storage_key);
        }
    }

    // == Cleanup Expired ==
    /// Sweeps this prefix, removing every expired or unparseable record.
    ///
    /// Runs proactively on a timer and reactively when a write fails.
    /// Returns the number of records removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = (self.clock)();
        let mut removed = 0;

        for storage_key in self.owned_keys() {
            let stale = match self.storage.read(&storage_key) {
                Some(payload) => {
                    match serde_json::from_str::<CacheEntry<serde_json::Value>>(&payload) {
                        Ok(entry) => entry.is_expired_at(now),
                        // Corrupt records are swept along with expired ones
                        Err(_) => true,
                    }
                }
                None => false,
            };

            if stale {
                self.storage.remove(&storage_key);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(prefix = %self.prefix, removed, "persistent cache cleanup");
        }
        removed
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Storage keys under this instance's prefix.
    fn owned_keys(&self) -> Vec<String> {
        self.storage
            .keys()
            .into_iter()
            .filter(|k| k.starts_with(&self.prefix))
            .collect()
    }
}
