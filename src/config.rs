//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory under which every cache key resolves to a file
    pub cache_dir: PathBuf,
    /// Maximum aggregate byte size of cached images
    pub max_bytes: u64,
    /// Hard ceiling on the number of cached entries
    pub max_entries: usize,
    /// Maximum age in seconds before an entry is swept
    pub max_age_secs: u64,
    /// Background sweep task interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Cache root directory (default: tmp/image-cache)
    /// - `MAX_CACHE_BYTES` - Byte budget (default: 104857600 = 100 MiB)
    /// - `MAX_CACHE_ENTRIES` - Entry count ceiling (default: 1000)
    /// - `MAX_AGE_SECS` - Sweep age bound in seconds (default: 86400)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tmp/image-cache")),
            max_bytes: env::var("MAX_CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100 * 1024 * 1024),
            max_entries: env::var("MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_age_secs: env::var("MAX_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("tmp/image-cache"),
            max_bytes: 100 * 1024 * 1024,
            max_entries: 1000,
            max_age_secs: 86400,
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}
