//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::provider::{MapStyle, ProviderTemplate};
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Provider settings
    pub provider: ProviderSettings,
    /// Fetch settings
    pub fetch: FetchSettings,
    /// Mosaic settings
    pub mosaic: MosaicSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Extra or overridden providers from `[provider.<name>]` sections
    pub custom_providers: Vec<ProviderTemplate>,
}

/// Provider selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Provider name, looked up case-insensitively in the provider table
    pub name: String,
    /// Layer style for `lyrs=`-style servers
    pub style: MapStyle,
}

/// Fetch configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Number of concurrent fetch workers (1-20)
    pub parallelism: usize,
    /// Attempts per tile including the first (1-3)
    pub max_attempts: u32,
    /// Pause between attempts, multiplied by the attempt number
    pub retry_delay_ms: u64,
    /// HTTP request timeout in seconds
    pub timeout: u64,
}

/// Mosaic configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicSettings {
    /// Expected tile edge length in pixels
    pub tile_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
