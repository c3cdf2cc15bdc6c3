//! Concurrent tile fetcher implementation

use super::error::FetchError;
use super::stats::FetchStats;
use crate::config::{FetchConfig, MAX_ATTEMPTS_CEILING, MAX_PARALLELISM, MIN_PARALLELISM};
use crate::provider::{FailureKind, HttpClient, BROWSER_USER_AGENT};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fetches a batch of tile URLs with a fixed pool of worker threads.
///
/// Worker `w` of `W` owns every position `p` with `p % W == w` and fetches
/// them in order. Results land in index-addressed write-once slots, so the
/// output order always matches the input order regardless of which worker
/// finishes first. The first tile that fails for good stops the batch.
///
/// # Example
///
/// ```ignore
/// use tilemosaic::fetch::ConcurrentFetcher;
/// use tilemosaic::provider::ReqwestClient;
/// use std::sync::Arc;
///
/// let client = Arc::new(ReqwestClient::new()?);
/// let fetcher = ConcurrentFetcher::new(client, FetchConfig::default())?;
/// let tiles = fetcher.fetch_all(&urls)?;
/// ```
pub struct ConcurrentFetcher {
    client: Arc<dyn HttpClient>,
    config: FetchConfig,
    stats: FetchStats,
}

impl ConcurrentFetcher {
    /// Creates a fetcher, validating the worker count.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidParallelism`] unless parallelism is
    /// between 1 and 20. No request is made in that case.
    pub fn new(client: Arc<dyn HttpClient>, config: FetchConfig) -> Result<Self, FetchError> {
        let requested = config.parallelism();
        if !(MIN_PARALLELISM..=MAX_PARALLELISM).contains(&requested) {
            return Err(FetchError::InvalidParallelism {
                requested,
                min: MIN_PARALLELISM,
                max: MAX_PARALLELISM,
            });
        }

        Ok(Self {
            client,
            config,
            stats: FetchStats::new(),
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Cumulative statistics over every batch run by this fetcher.
    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Fetches every URL and returns the bodies in input order.
    ///
    /// Either every tile is returned or the batch fails; on failure the
    /// error of the lowest-indexed failing tile is reported.
    pub fn fetch_all(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, FetchError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let workers = self.config.parallelism().min(urls.len());
        let slots: Vec<OnceLock<Vec<u8>>> = urls.iter().map(|_| OnceLock::new()).collect();
        let abort = AtomicBool::new(false);

        info!(tiles = urls.len(), workers = workers, "Fetching tiles");

        let mut errors = thread::scope(|scope| {
            let mut errors = Vec::new();
            let mut handles = Vec::with_capacity(workers);

            for worker in 0..workers {
                let slots = &slots;
                let abort = &abort;
                let spawned = thread::Builder::new()
                    .name(format!("fetch-{}", worker))
                    .spawn_scoped(scope, move || {
                        self.run_worker(worker, workers, urls, slots, abort)
                    });
                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        abort.store(true, Ordering::Release);
                        errors.push(FetchError::Spawn(e));
                        break;
                    }
                }
            }

            for (worker, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => errors.push(e),
                    Err(_) => errors.push(FetchError::WorkerPanicked { worker }),
                }
            }
            errors
        });

        let snapshot = self.stats.snapshot();
        if !errors.is_empty() {
            // Errors without a tile index (panics, spawn failures) sort first
            errors.sort_by_key(|e| e.index().map_or(0, |i| i + 1));
            let first = errors.swap_remove(0);
            warn!(error = %first, stats = %snapshot, "Fetch batch failed");
            return Err(first);
        }

        let tiles = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.into_inner().ok_or(FetchError::MissingTile { index }))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            tiles = tiles.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            stats = %snapshot,
            "Fetch batch complete"
        );
        Ok(tiles)
    }

    fn run_worker(
        &self,
        worker: usize,
        workers: usize,
        urls: &[String],
        slots: &[OnceLock<Vec<u8>>],
        abort: &AtomicBool,
    ) -> Result<(), FetchError> {
        for index in (worker..urls.len()).step_by(workers) {
            if abort.load(Ordering::Acquire) {
                debug!(worker = worker, "Fetch aborted, worker stopping");
                return Ok(());
            }

            match self.fetch_one(index, &urls[index], abort) {
                Ok(Some(data)) => {
                    // Each position belongs to exactly one worker
                    let _ = slots[index].set(data);
                }
                Ok(None) => return Ok(()),
                Err(e) => {
                    abort.store(true, Ordering::Release);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Fetches one tile with bounded retries.
    ///
    /// Returns `Ok(None)` if the batch was aborted while waiting to retry.
    fn fetch_one(
        &self,
        index: usize,
        url: &str,
        abort: &AtomicBool,
    ) -> Result<Option<Vec<u8>>, FetchError> {
        let max_attempts = self.config.max_attempts().clamp(1, MAX_ATTEMPTS_CEILING);
        let headers = [("User-Agent", BROWSER_USER_AGENT)];
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.client.get_with_headers(url, &headers) {
                Ok(data) => {
                    debug!(index = index, url = url, bytes = data.len(), "Tile fetched");
                    self.stats.record_tile(data.len());
                    return Ok(Some(data));
                }
                Err(e) if e.kind() == FailureKind::Fatal => {
                    self.stats.record_failure();
                    return Err(FetchError::Rejected {
                        index,
                        url: url.to_string(),
                        source: e,
                    });
                }
                Err(e) if attempt >= max_attempts => {
                    self.stats.record_failure();
                    return Err(FetchError::RetriesExhausted {
                        index,
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    self.stats.record_retry();
                    warn!(
                        index = index,
                        url = url,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        error = %e,
                        "Tile fetch failed, retrying"
                    );
                    let delay = self.config.retry_delay(attempt);
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    if abort.load(Ordering::Acquire) {
                        return Ok(None);
                    }
                }
            }
        }
    }
}
