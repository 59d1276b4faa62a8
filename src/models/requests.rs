//! Request DTOs for the image cache API
//!
//! The image bytes travel as the raw request body, so the only structured
//! input is the store operation's query string.

use serde::Deserialize;

use crate::cache::{ImageKind, MAX_KEY_LENGTH};

/// Query parameters for the store operation (PUT /images/{key})
///
/// # Fields
/// - `kind`: Optional image category; inferred from the key when omitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreImageQuery {
    /// Optional image category tag
    #[serde(default)]
    pub kind: Option<ImageKind>,
}

/// Validates a path-like cache key from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    // Keys double as relative paths under the cache root; refuse anything
    // that could escape it
    if key.split('/').any(|segment| segment == "..") || key.starts_with('/') {
        return Some("Key must be a relative path without '..' components".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_query_deserialize() {
        let query: StoreImageQuery = serde_json::from_str(r#"{"kind": "cat"}"#).unwrap();
        assert_eq!(query.kind, Some(ImageKind::Cat));
    }

    #[test]
    fn test_store_query_kind_optional() {
        let query: StoreImageQuery = serde_json::from_str("{}").unwrap();
        assert!(query.kind.is_none());
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(validate_key("").is_some());
    }

    #[test]
    fn test_validate_key_too_long() {
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(validate_key(&long_key).is_some());
    }

    #[test]
    fn test_validate_rejects_traversal() {
        assert!(validate_key("../etc/passwd").is_some());
        assert!(validate_key("humans/../../secret").is_some());
        assert!(validate_key("/absolute/path").is_some());
    }

    #[test]
    fn test_validate_valid_keys() {
        assert!(validate_key("felix.webp").is_none());
        assert!(validate_key("humans/alice.webp").is_none());
        assert!(validate_key("cats/whiskers/thumb.webp").is_none());
    }
}
