//! Storage Backend Module
//!
//! The durable key/value seam the persistent cache is built on. Backends
//! store raw strings; serialization is the cache's responsibility, which
//! keeps the backend contract free of any encoding concern.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StorageError};

// == Storage Trait ==
/// Durable, shared key/value string storage.
///
/// Reads never fail — a backend that cannot produce a value reports absence.
/// Writes report failure so the cache can attempt recovery; `remove` treats
/// absence as success.
pub trait Storage {
    /// Writes a string value under a key.
    fn write(&mut self, key: &str, data: &str) -> Result<()>;

    /// Reads a string value by key. Returns None if missing or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Removes a key. Absence is not an error.
    fn remove(&mut self, key: &str);

    /// Lists every key currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;
}

// == Key Escaping ==
/// Escapes a storage key into a filesystem-safe file name.
///
/// Bytes outside `[A-Za-z0-9._-]` become `%XX`, so arbitrary keys round-trip
/// through a directory listing.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Reverses [`escape_key`]. Returns None for file names this backend did not
/// produce.
fn unescape_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

// == Directory Storage ==
/// Filesystem-backed storage: one file per key under a single directory.
///
/// Survives process restarts and is shared by every process pointed at the
/// same directory. Concurrent writers to the same key race and the last
/// writer wins; cached data is a disposable re-derivable copy, so no
/// cross-process coordination is attempted.
#[derive(Debug)]
pub struct DirStorage {
    /// Directory holding one file per key
    dir: PathBuf,
}

impl DirStorage {
    // == Constructor ==
    /// Opens (creating if needed) the storage directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(escape_key(key))
    }
}

impl Storage for DirStorage {
    fn write(&mut self, key: &str, data: &str) -> Result<()> {
        fs::write(self.path_for(key), data)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| unescape_key(&name))
            .collect()
    }
}

// == Memory Storage ==
/// HashMap-backed storage with an optional byte quota.
///
/// Stand-in backend for contexts without durable storage, and the test
/// double for quota-exhaustion behavior.
#[derive(Debug, Default)]
pub struct MemStorage {
    map: HashMap<String, String>,
    /// Total bytes (keys + values) allowed, None = unlimited
    quota_bytes: Option<usize>,
}

impl MemStorage {
    // == Constructor ==
    /// Creates an unlimited in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that rejects writes once `quota_bytes` of keys and
    /// values are stored.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            map: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.map
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemStorage {
    fn write(&mut self, key: &str, data: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let projected = self.used_bytes_excluding(key) + key.len() + data.len();
            if projected > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.map.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }
}
