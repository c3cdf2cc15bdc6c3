//! Fetch statistics tracking.
//!
//! Provides thread-safe accumulation of download metrics across all
//! workers of a fetcher.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe fetch statistics.
///
/// Tracks cumulative download metrics that can be safely updated from
/// multiple worker threads and read for logging.
///
/// # Example
///
/// ```
/// use tilemosaic::fetch::FetchStats;
///
/// let stats = FetchStats::new();
/// stats.record_tile(1024);
/// stats.record_retry();
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.bytes_downloaded, 1024);
/// ```
#[derive(Debug, Default)]
pub struct FetchStats {
    /// Total bytes downloaded
    bytes_downloaded: AtomicU64,
    /// Number of tiles successfully downloaded
    tiles_fetched: AtomicU64,
    /// Number of tiles that ultimately failed
    tiles_failed: AtomicU64,
    /// Number of retry attempts
    retries: AtomicU64,
}

/// Snapshot of fetch statistics at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchStatsSnapshot {
    pub bytes_downloaded: u64,
    pub tiles_fetched: u64,
    pub tiles_failed: u64,
    pub retries: u64,
}

impl FetchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful tile download of `bytes` bytes.
    pub fn record_tile(&self, bytes: usize) {
        self.bytes_downloaded
            .fetch_add(bytes as u64, Ordering::Relaxed);
        self.tiles_fetched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a tile that failed for good.
    pub fn record_failure(&self) {
        self.tiles_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a retry attempt.
    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FetchStatsSnapshot {
        FetchStatsSnapshot {
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            tiles_fetched: self.tiles_fetched.load(Ordering::Relaxed),
            tiles_failed: self.tiles_failed.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Display for FetchStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tiles, {:.1} KiB, {} retries, {} failed",
            self.tiles_fetched,
            self.bytes_downloaded as f64 / 1024.0,
            self.retries,
            self.tiles_failed
        )
    }
}
