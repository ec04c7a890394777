//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration and FIFO eviction,
//! plus an unbounded memoization wrapper for pure functions.

mod entry;
mod fifo;
mod memo;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use fifo::FifoTracker;
pub use memo::Memoized;
pub use stats::CacheStats;
pub use store::MemoryCache;

// == Public Constants ==
/// Default maximum number of entries in the in-memory cache
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default TTL for in-memory entries: 5 minutes
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;
