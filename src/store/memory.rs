//! In-Memory Property Store
//!
//! Seeded [`PropertyStore`] implementation. Keeps a query counter so tests
//! can assert exactly how many backing queries a call sequence issued.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Property;
use crate::store::PropertyStore;

// == Memory Property Store ==
/// Property store over an in-memory record list.
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    /// Stored records
    properties: RwLock<Vec<Property>>,
    /// Number of `all()` queries served
    queries: AtomicUsize,
}

impl MemoryPropertyStore {
    // == Constructor ==
    /// Creates a store seeded with the given records.
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties: RwLock::new(properties),
            queries: AtomicUsize::new(0),
        }
    }

    // == Replace All ==
    /// Replaces the stored records, simulating external administrative writes.
    pub async fn replace_all(&self, properties: Vec<Property>) {
        let mut stored = self.properties.write().await;
        *stored = properties;
    }

    // == Query Count ==
    /// Number of `all()` queries served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn all(&self) -> Result<Vec<Property>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let properties = self.properties.read().await;
        Ok(properties.clone())
    }
}
