//! Persistent Cache Module
//!
//! TTL caching over durable, prefix-namespaced key/value storage that
//! survives process restarts.

mod cache;
mod storage;

// Re-export public types
pub use cache::PersistentCache;
pub use storage::{DirStorage, MemStorage, Storage};

// == Public Constants ==
/// Default key prefix isolating cache records from unrelated data
pub const DEFAULT_PREFIX: &str = "app_cache_";

/// Default TTL for persistent entries: 24 hours
pub const DEFAULT_PERSISTENT_TTL_MS: u64 = 24 * 60 * 60 * 1000;
