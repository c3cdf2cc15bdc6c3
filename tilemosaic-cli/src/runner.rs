//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and engine creation
//! so command handlers stay short.

use crate::error::CliError;
use std::sync::Arc;
use tilemosaic::config::{ConfigFile, FetchConfig};
use tilemosaic::logging::{init_logging_at, LoggingGuard};
use tilemosaic::orchestrator::MosaicEngine;
use tilemosaic::provider::ReqwestClient;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and start logging to the file it names.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let logging_guard = init_logging_at(&config.logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tilemosaic v{}", tilemosaic::VERSION);
        info!("tilemosaic CLI: {} command", command);
    }

    /// Create an engine from the config, with optional command-line overrides.
    pub fn create_engine(
        &self,
        parallelism: Option<usize>,
        tile_size: Option<u32>,
    ) -> Result<MosaicEngine, CliError> {
        let mut fetch = self.config.fetch_config();
        if let Some(parallelism) = parallelism {
            fetch = fetch.with_parallelism(parallelism);
        }
        let tile_size = tile_size.unwrap_or(self.config.mosaic.tile_size);

        let table = self
            .config
            .provider_table()
            .map_err(|e| CliError::Config(e.to_string()))?;
        let client = ReqwestClient::with_timeout(fetch.timeout())?;

        log_fetch_settings(&fetch, tile_size);
        MosaicEngine::new(Arc::new(client), table, fetch, tile_size).map_err(CliError::from)
    }
}

fn log_fetch_settings(fetch: &FetchConfig, tile_size: u32) {
    info!(
        parallelism = fetch.parallelism(),
        max_attempts = fetch.max_attempts(),
        retry_delay_ms = fetch.retry_delay_ms(),
        timeout_secs = fetch.timeout_secs(),
        tile_size = tile_size,
        "Fetch settings"
    );
}
