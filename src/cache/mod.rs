//! Cache Module
//!
//! Provides disk-backed image caching with a bounded in-memory working set.

mod disk;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use disk::ImageCache;
pub use entry::{ImageEntry, ImageKind, ImageMetadata};
pub use stats::{CacheStats, KindCounts};
pub use store::ImageStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
