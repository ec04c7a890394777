//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! The same shape is serialized as the record format of the persistent cache.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single cache entry: an opaque payload plus its expiry metadata.
///
/// An entry is expired once strictly more than `ttl_ms` milliseconds have
/// elapsed since `stored_at`; at exactly `ttl_ms` elapsed it is still live.
///
/// When serialized (persistent cache records), the text form must decode to
/// exactly these three fields; anything else is treated as corruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Creation timestamp (Unix milliseconds), set once
    pub stored_at: u64,
    /// Time-to-live in milliseconds
    pub ttl_ms: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry stored at the given timestamp.
    pub fn new(value: T, stored_at: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            stored_at,
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: expired when `now - stored_at > ttl_ms`, strictly
    /// greater. An entry queried exactly `ttl_ms` after insertion is live.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at) > self.ttl_ms
    }

    // == Time To Live ==
    /// Returns the remaining TTL in milliseconds as of `now_ms`.
    ///
    /// Returns 0 once the entry has expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        (self.stored_at + self.ttl_ms).saturating_sub(now_ms)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
