//! Data models for the property cache service
//!
//! This module defines the property record and the DTOs used for
//! serializing HTTP response bodies.

pub mod property;
pub mod responses;

// Re-export commonly used types
pub use property::Property;
pub use responses::{HealthResponse, PropertyListResponse};
