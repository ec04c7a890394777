//! Error types for the persistent storage backend
//!
//! Provides unified error handling using thiserror.
//!
//! These errors exist only at the [`Storage`](crate::persistent::Storage)
//! seam. The cache APIs themselves never raise: every failure mode degrades
//! to a cache miss or a silently dropped write, so correctness of the
//! surrounding system never depends on the cache succeeding.

use thiserror::Error;

// == Storage Error Enum ==
/// Failures a durable storage backend can report on write.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Backend refused the write because its quota is exhausted
    #[error("storage quota exhausted")]
    QuotaExceeded,

    /// Backend is not available in this execution context
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for storage backends.
pub type Result<T> = std::result::Result<T, StorageError>;
