//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cache_metrics_handler, health_handler, list_properties_handler, AppState};
use super::page_cache::{page_cache_middleware, PageCache};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties/` - List all properties (wrapped in the page cache)
/// - `GET /metrics/cache` - Cache hit/miss metrics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Page cache: stores the whole rendered list response for its TTL
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, page_cache: PageCache) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router; only the list endpoint sits behind the page cache
    Router::new()
        .route(
            "/properties/",
            get(list_properties_handler)
                .layer(from_fn_with_state(page_cache, page_cache_middleware)),
        )
        .route("/metrics/cache", get(cache_metrics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
