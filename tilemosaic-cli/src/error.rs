//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use tilemosaic::config::ConfigFileError;
use tilemosaic::fetch::FetchError;
use tilemosaic::orchestrator::MosaicError;
use tilemosaic::provider::{HttpError, ProviderError};
use tilemosaic::raster::RasterError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid configuration or command-line value
    Config(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Failed to create the HTTP client
    HttpClient(HttpError),
    /// Mosaic build failed
    Mosaic(MosaicError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Mosaic(MosaicError::Provider(ProviderError::UnknownProvider(_))) => {
                eprintln!();
                eprintln!("Run 'tilemosaic providers' to list the available providers.");
                eprintln!("Custom providers can be added as [provider.<name>] sections in:");
                eprintln!("  {}", tilemosaic::config::config_file_path().display());
            }
            CliError::Mosaic(MosaicError::Fetch(FetchError::RetriesExhausted { .. })) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection or the tile server is down");
                eprintln!("  2. The provider is throttling requests: try a lower --parallelism");
                eprintln!("  3. The area is outside the provider's coverage");
            }
            CliError::Mosaic(MosaicError::Raster(RasterError::TooLarge { .. })) => {
                eprintln!();
                eprintln!("Try a lower --zoom or a smaller bounding box.");
            }
            CliError::Mosaic(e) if e.is_input_error() => {
                eprintln!();
                eprintln!("Run 'tilemosaic fetch --help' for the expected arguments.");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!(
                    "Check the file at {} or recreate it with 'tilemosaic config init --force'.",
                    tilemosaic::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Mosaic(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Mosaic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<MosaicError> for CliError {
    fn from(e: MosaicError) -> Self {
        CliError::Mosaic(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::HttpClient(e)
    }
}
