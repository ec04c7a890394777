//! Dossier Cache - bounded TTL caching for a single process, plus a durable
//! prefix-namespaced cache that survives restarts.
//!
//! Two independent leaf components with the same expiry contract: an
//! in-memory store with FIFO eviction for transient memoization, and a
//! storage-backed cache for data worth keeping across runs. Neither ever
//! raises from a user-facing operation; every failure mode degrades to a
//! cache miss.

pub mod cache;
pub mod config;
pub mod error;
pub mod persistent;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, MemoryCache, Memoized};
pub use config::Config;
pub use error::StorageError;
pub use persistent::{DirStorage, MemStorage, PersistentCache, Storage};
pub use tasks::{spawn_cleanup_task, spawn_persistent_cleanup_task};
