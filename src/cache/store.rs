//! Image Store Module
//!
//! Synchronous in-memory state for the image cache: the key-to-entry map,
//! byte bookkeeping, and budget enforcement. All disk I/O lives in the
//! [`ImageCache`](crate::cache::ImageCache) facade; every method here runs to
//! completion without suspending, so concurrent requests can never observe a
//! half-applied mutation.

use std::collections::HashMap;

use crate::cache::entry::now_ms;
use crate::cache::{CacheStats, ImageEntry, ImageKind, ImageMetadata};

// == Image Store ==
/// In-memory image cache state with byte-budget eviction.
#[derive(Debug)]
pub struct ImageStore {
    /// Key-to-entry storage
    entries: HashMap<String, ImageEntry>,
    /// Running total of recorded entry sizes
    current_size: u64,
    /// Monotonic counter for recency tie-breaks
    next_seq: u64,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum aggregate byte size
    max_bytes: u64,
    /// Hard ceiling on entry count
    max_entries: usize,
}

impl ImageStore {
    // == Constructor ==
    /// Creates a new ImageStore with the given byte budget and entry ceiling.
    pub fn new(max_bytes: u64, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            current_size: 0,
            next_seq: 0,
            stats: CacheStats::new(),
            max_bytes,
            max_entries,
        }
    }

    // == Insert ==
    /// Inserts or overwrites an entry and enforces the budget.
    ///
    /// `size` is the recorded byte size: the data length for a fresh write,
    /// or the filesystem-reported size for a disk backfill. On overwrite the
    /// running total is adjusted by the net delta, never double-counted.
    ///
    /// Returns the keys evicted to satisfy the budget; the caller is
    /// responsible for removing their disk files. The just-inserted key can
    /// itself appear in the result when it lands past the budget boundary.
    pub fn insert(&mut self, key: String, data: Vec<u8>, size: u64, kind: ImageKind) -> Vec<String> {
        if let Some(old) = self.entries.get(&key) {
            self.current_size -= old.metadata.size;
        }

        let seq = self.bump_seq();
        let entry = ImageEntry {
            data,
            metadata: ImageMetadata {
                size,
                kind,
                last_accessed: now_ms(),
                seq,
            },
        };
        self.entries.insert(key, entry);
        self.current_size += size;

        self.enforce_budget()
    }

    // == Lookup ==
    /// Returns the cached bytes for a key, refreshing its recency.
    ///
    /// A hit is recorded; a memory miss records nothing because the caller
    /// may still backfill from disk.
    pub fn lookup(&mut self, key: &str) -> Option<Vec<u8>> {
        let seq = self.bump_seq();
        let entry = self.entries.get_mut(key)?;
        entry.metadata.last_accessed = now_ms();
        entry.metadata.seq = seq;
        self.stats.record_hit();
        Some(entry.data.clone())
    }

    // == Remove ==
    /// Removes an entry, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<ImageEntry> {
        let entry = self.entries.remove(key)?;
        self.current_size -= entry.metadata.size;
        Some(entry)
    }

    // == Budget Enforcement ==
    /// Evicts entries until the byte budget and entry ceiling are satisfied.
    ///
    /// Entries are walked in ascending `(last_accessed, seq)` order while the
    /// running size total accumulates; an entry survives as long as the total
    /// including it stays within `max_bytes` and fewer than `max_entries`
    /// entries have been kept. Everything past that boundary is evicted, so
    /// an insert that overflows the budget is itself the first casualty.
    ///
    /// Returns the evicted keys for the caller's disk cleanup.
    pub fn enforce_budget(&mut self) -> Vec<String> {
        if self.current_size <= self.max_bytes && self.entries.len() <= self.max_entries {
            return Vec::new();
        }

        let mut ordered: Vec<(String, u64, u64, u64)> = self
            .entries
            .iter()
            .map(|(k, e)| {
                (
                    k.clone(),
                    e.metadata.last_accessed,
                    e.metadata.seq,
                    e.metadata.size,
                )
            })
            .collect();
        ordered.sort_by_key(|(_, last_accessed, seq, _)| (*last_accessed, *seq));

        let mut total: u64 = 0;
        let mut kept: usize = 0;
        let mut evicted = Vec::new();

        for (key, _, _, size) in ordered {
            total += size;
            if total > self.max_bytes || kept >= self.max_entries {
                self.remove(&key);
                self.stats.record_eviction();
                evicted.push(key);
            } else {
                kept += 1;
            }
        }

        evicted
    }

    // == Sweep ==
    /// Removes every entry whose last access is older than `cutoff_ms`.
    ///
    /// Returns the removed keys for the caller's disk cleanup.
    pub fn sweep_older_than(&mut self, cutoff_ms: u64) -> Vec<String> {
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| e.metadata.last_accessed < cutoff_ms)
            .map(|(k, _)| k.clone())
            .collect();

        for key in &stale {
            self.remove(key);
        }

        stale
    }

    // == Accessors ==
    /// Checks whether a key is resident in memory.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the recorded size for a key, if cached.
    pub fn recorded_size(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|e| e.metadata.size)
    }

    /// Returns the last-access timestamp for a key, if cached.
    pub fn last_accessed(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|e| e.metadata.last_accessed)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the running total of recorded entry sizes.
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.stats.record_miss();
    }

    /// Increments the hit counter.
    ///
    /// Used by the disk layer after a successful backfill; memory hits are
    /// counted inside [`lookup`](Self::lookup).
    pub fn record_hit(&mut self) {
        self.stats.record_hit();
    }

    // == Stats ==
    /// Returns a statistics snapshot of the current working set.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.total_bytes = self.current_size;
        for entry in self.entries.values() {
            match entry.metadata.kind {
                ImageKind::User => stats.by_kind.user += 1,
                ImageKind::Cat => stats.by_kind.cat += 1,
                ImageKind::Thumbnail => stats.by_kind.thumbnail += 1,
            }
        }
        stats
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
