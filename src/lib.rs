//! Image Cache - A disk-backed image cache service
//!
//! Caches processed profile and thumbnail images in memory with a byte
//! budget, backed by a filesystem directory for misses and overflow.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{ImageCache, ImageKind};
pub use config::Config;
pub use tasks::spawn_sweep_task;
