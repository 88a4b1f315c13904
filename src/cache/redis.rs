//! Redis Cache Backend
//!
//! [`KeyValueCache`] implementation backed by a Redis server, plus the
//! metrics reporter that reads the server's global `INFO stats` counters.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::{error, info};

use crate::cache::{CacheMetrics, KeyValueCache, MetricsError};
use crate::error::Result;

// == Redis Cache ==
/// Redis-backed key-value cache.
///
/// Holds a lazily-connecting client; each operation obtains a multiplexed
/// async connection, so several in-flight requests share one TCP connection.
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    // == Constructor ==
    /// Creates a cache client for the given Redis URL.
    ///
    /// Only validates the URL; no connection is made until the first
    /// operation. Use [`RedisCache::ping`] to verify reachability at startup.
    pub fn new(redis_url: &str) -> std::result::Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    // == Ping ==
    /// Verifies the server is reachable with a PING round trip.
    pub async fn ping(&self) -> std::result::Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await
    }

    // == Fetch Metrics ==
    /// Queries `INFO stats` and parses the server-wide keyspace counters.
    async fn fetch_metrics(&self) -> std::result::Result<CacheMetrics, MetricsError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: String = redis::cmd("INFO")
            .arg("stats")
            .query_async(&mut conn)
            .await?;
        Ok(CacheMetrics::from_info_payload(&payload))
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    /// Reports the Redis server's global keyspace hit/miss counters.
    ///
    /// These counters are server-wide, not scoped to this service's keys.
    /// Connection and protocol failures are logged and degrade to a zeroed
    /// snapshot with an error description; this method never fails.
    async fn metrics(&self) -> CacheMetrics {
        match self.fetch_metrics().await {
            Ok(metrics) => {
                info!(
                    "Redis cache metrics: hits={}, misses={}, total={}, hit ratio={:.2}%",
                    metrics.keyspace_hits,
                    metrics.keyspace_misses,
                    metrics.total_requests,
                    metrics.hit_ratio * 100.0
                );
                metrics
            }
            Err(err) => {
                error!("Failed to retrieve Redis cache metrics: {}", err);
                CacheMetrics::degraded(err.to_string())
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_malformed_url() {
        assert!(RedisCache::new("not-a-redis-url").is_err());
    }

    #[tokio::test]
    async fn test_metrics_degrades_on_connection_failure() {
        // Port 1 is never a Redis server; the connect attempt fails fast.
        let cache = RedisCache::new("redis://127.0.0.1:1").unwrap();

        let metrics = cache.metrics().await;

        assert_eq!(metrics.keyspace_hits, 0);
        assert_eq!(metrics.keyspace_misses, 0);
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.hit_ratio, 0.0);
        assert!(!metrics.error.as_deref().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn test_get_propagates_connection_failure() {
        let cache = RedisCache::new("redis://127.0.0.1:1").unwrap();
        assert!(cache.get("all_properties").await.is_err());
    }
}
