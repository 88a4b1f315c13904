//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for the cached property collection
    pub property_cache_ttl: u64,
    /// TTL in seconds for cached whole-page responses
    pub page_cache_ttl: u64,
    /// Interval in seconds between expired-page sweep runs
    pub page_sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis server URL (default: redis://localhost:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PROPERTY_CACHE_TTL` - Property collection TTL in seconds (default: 3600)
    /// - `PAGE_CACHE_TTL` - Page cache TTL in seconds (default: 900)
    /// - `PAGE_SWEEP_INTERVAL` - Page sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            property_cache_ttl: env::var("PROPERTY_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            page_cache_ttl: env::var("PAGE_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            page_sweep_interval: env::var("PAGE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            server_port: 3000,
            property_cache_ttl: 3600,
            page_cache_ttl: 900,
            page_sweep_interval: 60,
        }
    }
}
