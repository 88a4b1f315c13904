//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::{CacheMetrics, KeyValueCache};
use crate::error::Result;
use crate::models::{HealthResponse, PropertyListResponse};
use crate::service::PropertyService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through property accessor
    pub service: Arc<PropertyService>,
    /// Key-value cache, shared with the service, for the metrics endpoint
    pub cache: Arc<dyn KeyValueCache>,
}

impl AppState {
    /// Creates a new AppState over the given service and cache.
    pub fn new(service: PropertyService, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            service: Arc::new(service),
            cache,
        }
    }
}

/// Handler for GET /properties/
///
/// Returns all property records as `{"properties": [...]}`. The collection
/// comes from the read-through accessor; cache or store failures surface as
/// an opaque 500.
pub async fn list_properties_handler(
    State(state): State<AppState>,
) -> Result<Json<PropertyListResponse>> {
    let properties = state.service.get_all_properties().await?;
    Ok(Json(PropertyListResponse::new(properties)))
}

/// Handler for GET /metrics/cache
///
/// Returns the cache backend's hit/miss counters. Always 200: retrieval
/// failures degrade to a zeroed snapshot carrying an error description.
pub async fn cache_metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.cache.metrics().await)
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::models::Property;
    use crate::store::MemoryPropertyStore;
    use chrono::{TimeZone, Utc};

    fn test_state(properties: Vec<Property>) -> AppState {
        let store = Arc::new(MemoryPropertyStore::new(properties));
        let cache = Arc::new(MemoryCache::new());
        let service = PropertyService::new(store, cache.clone(), 3600);
        AppState::new(service, cache)
    }

    fn sample_property() -> Property {
        Property {
            id: 7,
            title: "Garden cottage".to_string(),
            description: "Quiet lane, large garden".to_string(),
            price: "289000.00".to_string(),
            location: "York".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 20, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_properties_handler() {
        let state = test_state(vec![sample_property()]);

        let response = list_properties_handler(State(state)).await.unwrap();
        assert_eq!(response.properties.len(), 1);
        assert_eq!(response.properties[0].id, 7);
    }

    #[tokio::test]
    async fn test_cache_metrics_handler_counts_lookups() {
        let state = test_state(vec![sample_property()]);

        // One miss filling the cache, then one hit
        list_properties_handler(State(state.clone())).await.unwrap();
        list_properties_handler(State(state.clone())).await.unwrap();

        let metrics = cache_metrics_handler(State(state)).await;
        assert_eq!(metrics.keyspace_hits, 1);
        assert_eq!(metrics.keyspace_misses, 1);
        assert_eq!(metrics.total_requests, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
