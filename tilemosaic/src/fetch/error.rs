//! Fetch error types

use crate::provider::HttpError;
use thiserror::Error;

/// Errors that abort a fetch batch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Worker count outside the supported range
    #[error("Parallelism must be between {min} and {max}, got {requested}")]
    InvalidParallelism {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// A tile kept failing with transient errors
    #[error("Tile {index} failed after {attempts} attempt(s) ({url}): {source}")]
    RetriesExhausted {
        index: usize,
        url: String,
        attempts: u32,
        #[source]
        source: HttpError,
    },

    /// A tile failed with an error that retrying cannot fix
    #[error("Tile {index} request rejected ({url}): {source}")]
    Rejected {
        index: usize,
        url: String,
        #[source]
        source: HttpError,
    },

    /// A worker thread panicked
    #[error("Fetch worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// A worker thread could not be started
    #[error("Failed to spawn fetch worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A slot was left empty without any recorded failure
    #[error("No data received for tile {index}")]
    MissingTile { index: usize },
}

impl FetchError {
    /// Sequence position of the tile this error concerns, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            FetchError::RetriesExhausted { index, .. }
            | FetchError::Rejected { index, .. }
            | FetchError::MissingTile { index } => Some(*index),
            FetchError::InvalidParallelism { .. }
            | FetchError::WorkerPanicked { .. }
            | FetchError::Spawn(_) => None,
        }
    }

    /// True for errors caused by caller input rather than the network.
    pub fn is_input_error(&self) -> bool {
        matches!(self, FetchError::InvalidParallelism { .. })
    }
}
