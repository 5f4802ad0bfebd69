//! In-memory TTL cache for upstream payloads.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::Value;

/// Cache entry with its own expiry.
#[derive(Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache for opaque JSON payloads.
///
/// Thread-safe, unbounded, with lazy per-entry TTL expiration: an expired
/// entry behaves as absent on `get` and is physically removed either on the
/// next overwrite or by an explicit [`purge_expired`](Self::purge_expired).
/// The key space is bounded by the distinct (route, parameters) pairs
/// actually requested, so no eviction policy is needed.
pub struct PayloadCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl PayloadCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the stored payload for `key`, or `None` if the key was never
    /// set or its TTL has elapsed.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired() {
                None
            } else {
                Some(e.value.clone())
            }
        })
    }

    /// Stores `value` under `key`, unconditionally overwriting any existing
    /// entry. The entry expires `ttl` from now.
    pub fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Removes all expired entries. Optional housekeeping; correctness never
    /// depends on it.
    pub fn purge_expired(&self) {
        self.entries.write().retain(|_, e| !e.is_expired());
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of physically stored entries, expired included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is physically stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            live_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl Default for PayloadCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Entries physically present, expired included.
    pub total_entries: usize,
    /// Entries past their TTL but not yet purged.
    pub expired_entries: usize,
    /// Entries a `get` would still return.
    pub live_entries: usize,
}
