//! Configuration for tilemosaic.
//!
//! Two layers live here:
//!
//! - [`ConfigFile`], the user's `~/.tilemosaic/config.ini`, loaded with
//!   defaults for anything missing;
//! - [`FetchConfig`], the small `Copy` struct handed to the fetcher.
//!
//! # Example
//!
//! ```no_run
//! use tilemosaic::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let table = config.provider_table()?;
//! let fetch = config.fetch_config();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod defaults;
mod fetch;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_path, DEFAULT_LOG_FILE, DEFAULT_MAX_ATTEMPTS, DEFAULT_PARALLELISM,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_TILE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_ATTEMPTS_CEILING,
    MAX_PARALLELISM, MIN_PARALLELISM,
};
pub use fetch::FetchConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, FetchSettings, LoggingSettings, MosaicSettings, ProviderSettings};
