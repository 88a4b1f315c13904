//! Cache Metrics Module
//!
//! Snapshot of the cache server's global hit/miss counters and the errors
//! the metrics path can degrade on.

use serde::Serialize;
use thiserror::Error;

// == Metrics Error ==
/// Errors the metrics reporter classifies before degrading.
///
/// Only failures of the cache backend itself are mapped to the degraded
/// zeroed snapshot; programming errors are left to surface normally.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Could not reach the cache server
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The server responded, but the stats payload was unusable
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<redis::RedisError> for MetricsError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_refusal() || err.is_timeout() {
            MetricsError::Connection(err.to_string())
        } else {
            MetricsError::Protocol(err.to_string())
        }
    }
}

// == Cache Metrics ==
/// Snapshot of server-wide cache hit/miss counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheMetrics {
    /// Number of successful key lookups, server-wide
    pub keyspace_hits: u64,
    /// Number of failed key lookups, server-wide
    pub keyspace_misses: u64,
    /// Total lookups (hits + misses)
    pub total_requests: u64,
    /// Hit ratio (hits / total), 0.0 when no lookups have been made
    pub hit_ratio: f64,
    /// Description of the retrieval failure, if the snapshot is degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    // == From Counts ==
    /// Builds a snapshot from raw hit/miss counters.
    pub fn from_counts(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let ratio = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        Self {
            keyspace_hits: hits,
            keyspace_misses: misses,
            total_requests: total,
            hit_ratio: ratio,
            error: None,
        }
    }

    // == From INFO Payload ==
    /// Parses an `INFO stats` payload into a snapshot.
    ///
    /// The payload is line-oriented `key:value` text; lines starting with a
    /// hash are section headers and skipped. `keyspace_hits` and
    /// `keyspace_misses` each default to 0 when absent.
    pub fn from_info_payload(payload: &str) -> Self {
        let mut hits = 0;
        let mut misses = 0;

        for line in payload.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, ':');
            let (key, value) = match (parts.next(), parts.next()) {
                (Some(k), Some(v)) => (k, v.trim()),
                _ => continue,
            };
            match key {
                "keyspace_hits" => hits = value.parse().unwrap_or(0),
                "keyspace_misses" => misses = value.parse().unwrap_or(0),
                _ => {}
            }
        }

        Self::from_counts(hits, misses)
    }

    // == Degraded ==
    /// Builds a zeroed snapshot carrying the failure's description.
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
