//! API Handlers
//!
//! HTTP request handlers for each image cache endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{ImageCache, ImageKind};
use crate::error::{ImageCacheError, Result};
use crate::models::{
    requests::validate_key, DeleteResponse, HealthResponse, StatsResponse, StoreImageQuery,
    StoreResponse,
};

/// Application state shared across all handlers.
///
/// The cache manages its own interior locking, so handlers share it through
/// a plain Arc.
#[derive(Clone)]
pub struct AppState {
    /// Shared image cache
    pub cache: Arc<ImageCache>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: ImageCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}

/// Handler for PUT /images/{key}
///
/// Stores the raw request body as the image bytes for the key. The image
/// kind comes from the `kind` query parameter, falling back to inference
/// from the key.
pub async fn store_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<StoreImageQuery>,
    body: Bytes,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ImageCacheError::InvalidRequest(error_msg));
    }

    let kind = query.kind.unwrap_or_else(|| ImageKind::from_key(&key));
    let size = body.len() as u64;
    state.cache.set(&key, body.to_vec(), kind).await?;

    Ok(Json(StoreResponse::new(key, size)))
}

/// Handler for GET /images/{key}
///
/// Returns the raw image bytes, or 404 on any miss. The caller is expected
/// to regenerate the image from its original source on a miss.
pub async fn fetch_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ImageCacheError::InvalidRequest(error_msg));
    }

    match state.cache.get(&key).await {
        Some(data) => {
            let headers = [(header::CONTENT_TYPE, content_type_for_key(&key))];
            Ok((headers, data).into_response())
        }
        None => Err(ImageCacheError::NotFound(key)),
    }
}

/// Handler for DELETE /images/{key}
///
/// Removes an image from memory and disk.
pub async fn delete_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ImageCacheError::InvalidRequest(error_msg));
    }

    state.cache.delete(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Maps a key's file extension to a response content type.
fn content_type_for_key(key: &str) -> &'static str {
    match key.rsplit('.').next() {
        Some("webp") => "image/webp",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
