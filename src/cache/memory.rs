//! In-Memory Cache Backend
//!
//! [`KeyValueCache`] implementation over a plain HashMap with TTL expiration.
//! Used by tests and local runs in place of the Redis backend; tracks its own
//! hit/miss counters so the metrics path works against it too.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheMetrics, KeyValueCache};
use crate::error::Result;

// == Memory Entry ==
/// A single stored value with its expiration deadline.
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Memory Cache ==
/// In-memory key-value cache with per-entry TTL.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, MemoryEntry>>,
    /// Number of lookups that found a live entry
    hits: AtomicU64,
    /// Number of lookups that found nothing, or an expired entry
    misses: AtomicU64,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == TTL Remaining ==
    /// Remaining TTL in seconds for a live entry, for diagnostics.
    ///
    /// Returns None when the key is absent or already expired.
    pub async fn ttl_remaining(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()).as_secs())
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: expired entries are removed on lookup
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(entry.value.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), MemoryEntry::new(value, ttl_seconds));
        Ok(())
    }

    async fn metrics(&self) -> CacheMetrics {
        CacheMetrics::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
