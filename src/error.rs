//! Error types for the image cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Image Cache Error Enum ==
/// Unified error type for the image cache service.
#[derive(Error, Debug)]
pub enum ImageCacheError {
    /// Image not found in cache or on disk
    #[error("Image not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Disk write for a set operation failed; the in-memory cache was left
    /// unchanged
    #[error("Failed to write cached image '{key}'")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ImageCacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImageCacheError::NotFound(_) => StatusCode::NOT_FOUND,
            ImageCacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ImageCacheError::WriteFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ImageCacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image cache service.
pub type Result<T> = std::result::Result<T, ImageCacheError>;
