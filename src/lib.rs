//! Property Cache - A property listing service with Redis-backed caching
//!
//! Serves property records as JSON, caching the collection in an external
//! key-value store and the rendered list response in a page-level cache,
//! with a hit/miss metrics readout from the cache server's counters.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{AppState, PageCache};
pub use config::Config;
pub use service::{PropertyService, ALL_PROPERTIES_KEY};
pub use tasks::spawn_page_sweep_task;
