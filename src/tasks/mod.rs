//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of the
//! owning component.
//!
//! # Tasks
//! - TTL cleanup: sweeps expired in-memory entries at configured intervals
//! - Persistent cleanup: sweeps expired and corrupt durable records

mod cleanup;

pub use cleanup::{spawn_cleanup_task, spawn_persistent_cleanup_task};
