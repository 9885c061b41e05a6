//! Fetch statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by every fetch
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Full responses stored in the cache
    pub downloads: AtomicU64,
    /// `304 Not Modified` responses
    pub not_modified: AtomicU64,
    /// Body bytes written to the store
    pub bytes_stored: AtomicU64,
    /// Fetches that ended in an error
    pub failures: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub downloads: u64,
    pub not_modified: u64,
    pub bytes_stored: u64,
    pub failures: u64,
}

impl CacheStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_download(&self, bytes: u64) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        self.bytes_stored.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_not_modified(&self) {
        self.not_modified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Create a snapshot of current statistics
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            downloads: self.downloads.load(Ordering::Relaxed),
            not_modified: self.not_modified.load(Ordering::Relaxed),
            bytes_stored: self.bytes_stored.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Fraction of successful fetches answered with `304`
    #[allow(clippy::cast_precision_loss)]
    pub fn revalidation_ratio(&self) -> f64 {
        let snapshot = self.snapshot();
        let total = snapshot.downloads + snapshot.not_modified;
        if total == 0 {
            0.0
        } else {
            snapshot.not_modified as f64 / total as f64
        }
    }
}
