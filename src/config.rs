//! Configuration Module
//!
//! Handles loading cache parameters from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};
use crate::persistent::{DEFAULT_PERSISTENT_TTL_MS, DEFAULT_PREFIX};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the in-memory cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for in-memory entries
    pub default_ttl_ms: u64,
    /// Default TTL in milliseconds for persistent entries
    pub persistent_ttl_ms: u64,
    /// Background cleanup interval in seconds
    pub cleanup_interval_secs: u64,
    /// Directory backing the persistent cache
    pub cache_dir: PathBuf,
    /// Key prefix for persistent records
    pub cache_prefix: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum in-memory entries (default: 100)
    /// - `DEFAULT_TTL_MS` - In-memory TTL in milliseconds (default: 300000)
    /// - `PERSISTENT_TTL_MS` - Persistent TTL in milliseconds (default: 86400000)
    /// - `CLEANUP_INTERVAL_SECS` - Cleanup frequency in seconds (default: 300)
    /// - `CACHE_DIR` - Persistent cache directory (default: .cache)
    /// - `CACHE_PREFIX` - Persistent key prefix (default: app_cache_)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            persistent_ttl_ms: env::var("PERSISTENT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PERSISTENT_TTL_MS),
            cleanup_interval_secs: env::var("CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".cache")),
            cache_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_ms: DEFAULT_TTL_MS,
            persistent_ttl_ms: DEFAULT_PERSISTENT_TTL_MS,
            cleanup_interval_secs: 300,
            cache_dir: PathBuf::from(".cache"),
            cache_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.persistent_ttl_ms, 86_400_000);
        assert_eq!(config.cleanup_interval_secs, 300);
        assert_eq!(config.cache_prefix, "app_cache_");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL_MS");
        env::remove_var("PERSISTENT_TTL_MS");
        env::remove_var("CLEANUP_INTERVAL_SECS");
        env::remove_var("CACHE_DIR");
        env::remove_var("CACHE_PREFIX");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.cache_dir, PathBuf::from(".cache"));
        assert_eq!(config.cache_prefix, "app_cache_");
    }
}
