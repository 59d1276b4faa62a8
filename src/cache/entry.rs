//! Cache Entry Module
//!
//! Defines the structure for individual cached images and their metadata.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Image Kind ==
/// Category tag for a cached image.
///
/// Informational only: the kind has no effect on eviction or lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Profile picture of a household member
    User,
    /// Profile picture of a cat
    Cat,
    /// Downscaled preview image
    Thumbnail,
}

impl ImageKind {
    // == From Key ==
    /// Infers the image kind from a path-like cache key.
    ///
    /// Used when an entry is backfilled from disk and the original kind tag
    /// is no longer available.
    pub fn from_key(key: &str) -> Self {
        if key.contains("/humans/") {
            ImageKind::User
        } else if key.contains("/cats/") {
            ImageKind::Cat
        } else {
            ImageKind::Thumbnail
        }
    }

    /// Returns the lowercase string tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::User => "user",
            ImageKind::Cat => "cat",
            ImageKind::Thumbnail => "thumbnail",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Image Metadata ==
/// Bookkeeping metadata for one cached image.
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    /// Recorded byte size: the data length on set, or the filesystem-reported
    /// size when the entry was backfilled from disk
    pub size: u64,
    /// Category tag
    pub kind: ImageKind,
    /// Last access timestamp (Unix milliseconds), refreshed on every
    /// successful read and at insertion
    pub last_accessed: u64,
    /// Monotonic counter assigned on insert and touch; breaks ties between
    /// entries whose last_accessed timestamps fall in the same millisecond
    pub seq: u64,
}

// == Image Entry ==
/// A single cached image: raw bytes plus metadata.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    /// The cached image bytes
    pub data: Vec<u8>,
    /// Bookkeeping metadata
    pub metadata: ImageMetadata,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_key_user() {
        assert_eq!(
            ImageKind::from_key("profile/humans/alice.webp"),
            ImageKind::User
        );
    }

    #[test]
    fn test_kind_from_key_cat() {
        assert_eq!(
            ImageKind::from_key("profile/cats/felix.webp"),
            ImageKind::Cat
        );
    }

    #[test]
    fn test_kind_from_key_defaults_to_thumbnail() {
        assert_eq!(
            ImageKind::from_key("thumb/felix-small.webp"),
            ImageKind::Thumbnail
        );
        assert_eq!(ImageKind::from_key("anything.png"), ImageKind::Thumbnail);
        // The marker segment must be interior: a top-level prefix does not
        // classify
        assert_eq!(ImageKind::from_key("humans/alice.webp"), ImageKind::Thumbnail);
        assert_eq!(ImageKind::from_key("cats/felix.webp"), ImageKind::Thumbnail);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ImageKind::User).unwrap(), "\"user\"");
        let kind: ImageKind = serde_json::from_str("\"thumbnail\"").unwrap();
        assert_eq!(kind, ImageKind::Thumbnail);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ImageKind::Cat.to_string(), "cat");
    }

    #[test]
    fn test_now_ms_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
