//! Property Service Module
//!
//! Read-through accessor for the property collection: serves the cached
//! collection when present, otherwise loads from the backing store and
//! caches the result with a fixed expiry.

use std::sync::Arc;

use tracing::debug;

use crate::cache::KeyValueCache;
use crate::error::Result;
use crate::models::Property;
use crate::store::PropertyStore;

// == Cache Key ==
/// Cache key holding the full property collection.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

// == Property Service ==
/// Read-through property accessor over an injected store and cache.
pub struct PropertyService {
    /// Backing property store
    store: Arc<dyn PropertyStore>,
    /// External key-value cache
    cache: Arc<dyn KeyValueCache>,
    /// Expiry in seconds for the cached collection
    cache_ttl: u64,
}

impl PropertyService {
    // == Constructor ==
    /// Creates a service over the given store and cache.
    ///
    /// # Arguments
    /// * `store` - Backing property store
    /// * `cache` - External key-value cache
    /// * `cache_ttl` - Expiry in seconds for the cached collection
    pub fn new(
        store: Arc<dyn PropertyStore>,
        cache: Arc<dyn KeyValueCache>,
        cache_ttl: u64,
    ) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    // == Get All Properties ==
    /// Returns all property records, preferring the cached collection.
    ///
    /// On a cache hit the stored collection is returned verbatim, with no
    /// staleness check against the backing store. On a miss the store is
    /// queried once and the result is cached under
    /// [`ALL_PROPERTIES_KEY`] with the configured expiry.
    ///
    /// There is no local recovery: cache or store failures propagate to the
    /// caller. Concurrent misses may each query the store and write the same
    /// key; the values are equivalent, so last write wins.
    pub async fn get_all_properties(&self) -> Result<Vec<Property>> {
        if let Some(json) = self.cache.get(ALL_PROPERTIES_KEY).await? {
            debug!("Property collection served from cache");
            let properties = serde_json::from_str(&json)?;
            return Ok(properties);
        }

        debug!("Property collection cache miss, querying backing store");
        let properties = self.store.all().await?;

        let json = serde_json::to_string(&properties)?;
        self.cache
            .set_with_expiry(ALL_PROPERTIES_KEY, json, self.cache_ttl)
            .await?;

        Ok(properties)
    }
}
