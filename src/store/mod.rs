//! Property Store Module
//!
//! The backing store the cache reads through to. The real listing database
//! lives in an external system; this module defines the seam and an
//! in-memory implementation used by the binary and by tests.

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Property;

// Re-export public types
pub use memory::MemoryPropertyStore;

// == Property Store Trait ==
/// Capability trait for the backing property store.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Fetches all property records, in the store's default order.
    async fn all(&self) -> Result<Vec<Property>>;
}
