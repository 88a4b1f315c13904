//! Cache Module
//!
//! Key-value caching behind an injected capability trait, with a Redis-backed
//! production implementation and an in-memory implementation for tests and
//! local runs. Both report hit/miss metrics as a [`CacheMetrics`] snapshot.

mod memory;
mod metrics;
mod redis;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use memory::MemoryCache;
pub use metrics::{CacheMetrics, MetricsError};
pub use redis::RedisCache;

// == Key-Value Cache Trait ==
/// Capability trait for the external key-value cache.
///
/// Values are JSON text; typed serialization happens at the call site.
/// Implementations are injected into the service so tests can substitute
/// an in-memory cache for the Redis backend.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Retrieves the value stored under `key`, or None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key` with an expiry of `ttl_seconds`.
    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    /// Reports the backend's hit/miss counters as a metrics snapshot.
    ///
    /// Never fails: retrieval errors degrade to a zeroed snapshot carrying
    /// an error description.
    async fn metrics(&self) -> CacheMetrics;
}
