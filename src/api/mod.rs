//! API Module
//!
//! HTTP handlers and routing for the image cache REST API.
//!
//! # Endpoints
//! - `PUT /images/{key}` - Store image bytes under a path-like key
//! - `GET /images/{key}` - Fetch cached image bytes
//! - `DELETE /images/{key}` - Delete a cached image
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
