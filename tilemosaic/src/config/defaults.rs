//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants, range limits and the
//! `ConfigFile::default()` implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::provider::{MapStyle, DEFAULT_PROVIDER};

// =============================================================================
// Fetch limits
// =============================================================================

/// Default number of concurrent fetch workers.
pub const DEFAULT_PARALLELISM: usize = 10;

/// Minimum number of fetch workers.
pub const MIN_PARALLELISM: usize = 1;

/// Maximum number of fetch workers. Tile servers start throttling above this.
pub const MAX_PARALLELISM: usize = 20;

/// Default attempts per tile, including the first request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Hard ceiling on attempts per tile.
pub const MAX_ATTEMPTS_CEILING: u32 = 3;

/// Default pause between attempts, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 0;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Clamps attempts per tile to `1..=MAX_ATTEMPTS_CEILING`, warning if clamped.
pub(super) fn clamp_max_attempts(value: u32) -> u32 {
    if value == 0 {
        tracing::warn!(
            requested = value,
            "max_attempts below minimum, clamping to 1"
        );
        1
    } else if value > MAX_ATTEMPTS_CEILING {
        tracing::warn!(
            requested = value,
            max = MAX_ATTEMPTS_CEILING,
            "max_attempts above maximum, clamping to {}",
            MAX_ATTEMPTS_CEILING
        );
        MAX_ATTEMPTS_CEILING
    } else {
        value
    }
}

// =============================================================================
// Mosaic
// =============================================================================

/// Edge length of a provider tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

// =============================================================================
// Logging
// =============================================================================

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "tilemosaic.log";

/// Default log file location (~/.tilemosaic/logs/tilemosaic.log).
pub fn default_log_path() -> PathBuf {
    config_directory().join("logs").join(DEFAULT_LOG_FILE)
}

// =============================================================================
// ConfigFile default
// =============================================================================

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                name: DEFAULT_PROVIDER.to_string(),
                style: MapStyle::default(),
            },
            fetch: FetchSettings {
                parallelism: DEFAULT_PARALLELISM,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            mosaic: MosaicSettings {
                tile_size: DEFAULT_TILE_SIZE,
            },
            logging: LoggingSettings {
                file: default_log_path(),
            },
            custom_providers: Vec::new(),
        }
    }
}
