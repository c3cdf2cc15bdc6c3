//! Concurrent tile fetching
//!
//! Downloads a batch of tile URLs with a bounded pool of OS threads,
//! retrying transient failures a fixed number of times and returning the
//! bodies in request order, or failing the whole batch.

mod error;
mod fetcher;
mod stats;

pub use error::FetchError;
pub use fetcher::ConcurrentFetcher;
pub use stats::{FetchStats, FetchStatsSnapshot};
