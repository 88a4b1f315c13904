//! API Module
//!
//! HTTP handlers, routing, and the page cache middleware.
//!
//! # Endpoints
//! - `GET /properties/` - List all properties (wrapped in the page cache)
//! - `GET /metrics/cache` - Cache hit/miss metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod page_cache;
pub mod routes;

pub use handlers::*;
pub use page_cache::{default_page_key, PageCache};
pub use routes::create_router;
