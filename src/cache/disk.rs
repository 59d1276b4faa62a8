//! Disk-Backed Image Cache
//!
//! Async facade combining the in-memory [`ImageStore`] with a filesystem
//! directory. Every logical key doubles as a relative path under the cache
//! root: a set writes `cache_dir/key` before inserting in memory, and a miss
//! falls back to reading that file and backfilling the store.
//!
//! Lock discipline: the store sits behind a [`tokio::sync::RwLock`] and is
//! only ever touched between awaits, so map mutations never interleave.
//! Disk deletes for evicted entries happen after the lock is released;
//! memory bookkeeping is authoritative and a failed delete is only logged.

use std::path::PathBuf;
use std::time::Duration;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::entry::now_ms;
use crate::cache::{CacheStats, ImageKind, ImageStore};
use crate::config::Config;
use crate::error::{ImageCacheError, Result};

// == Image Cache ==
/// Disk-backed image cache with a bounded in-memory working set.
#[derive(Debug)]
pub struct ImageCache {
    /// In-memory entries and bookkeeping
    store: RwLock<ImageStore>,
    /// Directory under which every key resolves to a file
    cache_dir: PathBuf,
}

impl ImageCache {
    // == Constructor ==
    /// Creates a new ImageCache rooted at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>, max_bytes: u64, max_entries: usize) -> Self {
        Self {
            store: RwLock::new(ImageStore::new(max_bytes, max_entries)),
            cache_dir: cache_dir.into(),
        }
    }

    /// Creates a new ImageCache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_dir.clone(), config.max_bytes, config.max_entries)
    }

    /// Ensures the cache root directory exists.
    pub async fn init(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        info!(cache_dir = %self.cache_dir.display(), "Image cache initialized");
        Ok(())
    }

    /// Resolves a logical key to its on-disk path.
    fn resolve_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    // == Set ==
    /// Stores an image under `key`, on disk and in memory.
    ///
    /// Keys are path-like (`"humans/alice.webp"`), so any missing parent
    /// directories under the cache root are created first. The disk write
    /// happens before the memory insert; if either disk step fails the error
    /// is returned with its io cause attached and the in-memory state is
    /// left untouched. On success the entry is inserted with
    /// `size = data.len()` and the budget is enforced before returning.
    pub async fn set(&self, key: &str, data: Vec<u8>, kind: ImageKind) -> Result<()> {
        let path = self.resolve_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ImageCacheError::WriteFailed {
                    key: key.to_string(),
                    source,
                })?;
        }

        fs::write(&path, &data)
            .await
            .map_err(|source| ImageCacheError::WriteFailed {
                key: key.to_string(),
                source,
            })?;

        let size = data.len() as u64;
        let evicted = {
            let mut store = self.store.write().await;
            store.insert(key.to_string(), data, size, kind)
        };
        debug!(key, size, kind = %kind, "Cached image");

        self.remove_files(&evicted).await;
        Ok(())
    }

    // == Get ==
    /// Retrieves the image bytes for `key`, never erroring.
    ///
    /// A memory hit refreshes the entry's recency and involves no disk I/O.
    /// On a memory miss the file is read from disk; any read failure, missing
    /// file or otherwise, resolves to `None` so the caller regenerates the
    /// image. A successful disk read backfills the store with the
    /// filesystem-reported size and runs the same budget check as a set.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        {
            let mut store = self.store.write().await;
            if let Some(data) = store.lookup(key) {
                return Some(data);
            }
        }

        let path = self.resolve_path(key);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) => {
                debug!(key, error = %e, "Cache miss");
                self.store.write().await.record_miss();
                return None;
            }
        };

        // Recorded size comes from the filesystem, not the bytes just read
        let size = match fs::metadata(&path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                debug!(key, error = %e, "Failed to stat cached file");
                self.store.write().await.record_miss();
                return None;
            }
        };

        let kind = ImageKind::from_key(key);
        let evicted = {
            let mut store = self.store.write().await;
            store.record_hit();
            store.insert(key.to_string(), data.clone(), size, kind)
        };
        debug!(key, size, "Backfilled image from disk");

        self.remove_files(&evicted).await;
        Some(data)
    }

    // == Delete ==
    /// Removes an image from memory and disk.
    ///
    /// Returns `NotFound` only when the key was present in neither place.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let in_memory = {
            let mut store = self.store.write().await;
            store.remove(key).is_some()
        };

        let path = self.resolve_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if in_memory {
                    Ok(())
                } else {
                    Err(ImageCacheError::NotFound(key.to_string()))
                }
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to remove cached file");
                Err(ImageCacheError::Internal(format!(
                    "Failed to remove cached file for '{}'",
                    key
                )))
            }
        }
    }

    // == Sweep ==
    /// Removes every entry last accessed more than `max_age` ago.
    ///
    /// Disk deletes are best-effort; returns the number of entries removed
    /// from memory.
    pub async fn sweep_older_than(&self, max_age: Duration) -> usize {
        let cutoff = now_ms().saturating_sub(max_age.as_millis() as u64);
        let stale = {
            let mut store = self.store.write().await;
            store.sweep_older_than(cutoff)
        };

        self.remove_files(&stale).await;
        stale.len()
    }

    // == Accessors ==
    /// Checks whether a key is resident in memory.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }

    /// Returns the recorded size for a memory-resident key.
    pub async fn recorded_size(&self, key: &str) -> Option<u64> {
        self.store.read().await.recorded_size(key)
    }

    /// Returns a statistics snapshot.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Deletes the files backing evicted or swept entries.
    ///
    /// Memory removal already happened; a failed delete here is logged and
    /// otherwise ignored so the byte bookkeeping stays bounded even when disk
    /// cleanup lags.
    async fn remove_files(&self, keys: &[String]) {
        for key in keys {
            let path = self.resolve_path(key);
            if let Err(e) = fs::remove_file(&path).await {
                warn!(key = %key, error = %e, "Failed to remove evicted cache file");
            } else {
                debug!(key = %key, "Evicted cache file removed");
            }
        }
    }
}
