//! Error types for the property cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the property cache service.
///
/// Errors from the cache backend or the backing store are not recovered
/// locally; they propagate to the handler and surface as a 500 response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Key-value cache backend error
    #[error("Cache backend error: {0}")]
    Cache(String),

    /// Backing property store error
    #[error("Backing store error: {0}")]
    Store(String),

    /// JSON serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the property cache service.
pub type Result<T> = std::result::Result<T, AppError>;
