//! Error types for the cache service
//!
//! The cache itself reports outcomes through return values; these errors
//! only cover the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == API Error Enum ==
/// Unified error type for the HTTP endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown route
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caching is switched off by configuration
    #[error("Cache disabled")]
    CacheDisabled,
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::CacheDisabled => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
