//! Property Cache - A property listing service with Redis-backed caching
//!
//! Serves property records as JSON, caching the collection in Redis and the
//! rendered list response in a page-level cache.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod service;
mod store;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::{TimeZone, Utc};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState, PageCache};
use cache::RedisCache;
use config::Config;
use models::Property;
use service::PropertyService;
use store::MemoryPropertyStore;
use tasks::spawn_page_sweep_task;

/// Main entry point for the property cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the Redis cache client and verify reachability
/// 4. Seed the property store and build the read-through service
/// 5. Start the background page sweep task
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Property Cache Service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: redis_url={}, port={}, property_ttl={}s, page_ttl={}s",
        config.redis_url, config.server_port, config.property_cache_ttl, config.page_cache_ttl
    );

    // Connect the Redis cache and verify the server is reachable
    let redis_cache =
        RedisCache::new(&config.redis_url).context("Invalid Redis URL")?;
    redis_cache
        .ping()
        .await
        .context("Redis server unreachable")?;
    info!("Redis connection verified");

    // The listing database is an external system; this binary serves a
    // seeded in-memory store behind the same seam.
    let store = Arc::new(MemoryPropertyStore::new(seed_properties()));
    let cache = Arc::new(redis_cache);
    let service = PropertyService::new(store, cache.clone(), config.property_cache_ttl);
    let state = AppState::new(service, cache);
    info!("Property service initialized");

    // Page cache over the list endpoint, with a background sweep task
    let page_cache = PageCache::new(config.page_cache_ttl);
    let sweep_handle = spawn_page_sweep_task(page_cache.clone(), config.page_sweep_interval);
    info!("Background page sweep task started");

    // Create router with all endpoints
    let app = create_router(state, page_cache);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sample listings served until the external store is wired in.
fn seed_properties() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Seaside flat".to_string(),
            description: "Two bedrooms with a sea view".to_string(),
            price: "199999.00".to_string(),
            location: "Brighton".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap(),
        },
        Property {
            id: 2,
            title: "City loft".to_string(),
            description: "Open plan, top floor".to_string(),
            price: "325000.50".to_string(),
            location: "Manchester".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 16, 45, 0).unwrap(),
        },
        Property {
            id: 3,
            title: "Garden cottage".to_string(),
            description: "Quiet lane, large garden".to_string(),
            price: "289000.00".to_string(),
            location: "York".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 20, 8, 0, 0).unwrap(),
        },
    ]
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    sweep_handle.abort();
    warn!("Page sweep task aborted");
}
