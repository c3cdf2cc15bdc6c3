//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::fmt::Write;
use std::path::Path;

use super::defaults::{MAX_ATTEMPTS_CEILING, MAX_PARALLELISM, MIN_PARALLELISM};
use super::parser::PROVIDER_SECTION_PREFIX;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let mut out = format!(
        r#"[provider]
; Tile provider:
;   google       - Google Maps (default)
;   google-china - Google Maps China mirror (GCJ-02 imagery, corrected automatically)
;   esri         - ArcGIS World Imagery
;   bing         - Bing Maps aerial
;   tianditu     - Tianditu imagery (max zoom 18)
; Additional providers can be defined in [provider.<name>] sections.
name = {}
; Map style for Google-style servers:
;   m = map, s = satellite, y = hybrid, t = terrain, p = terrain with labels, h = labels
style = {}

[fetch]
; Concurrent download workers ({}-{})
parallelism = {}
; Attempts per tile including the first request (1-{})
max_attempts = {}
; Pause between attempts in milliseconds, multiplied by the attempt number
retry_delay_ms = {}
; HTTP request timeout in seconds
timeout = {}

[mosaic]
; Tile edge length in pixels. Tiles of any other size are rejected.
tile_size = {}

[logging]
; Log file (truncated at the start of each run)
file = {}
"#,
        config.provider.name,
        config.provider.style.code(),
        MIN_PARALLELISM,
        MAX_PARALLELISM,
        config.fetch.parallelism,
        MAX_ATTEMPTS_CEILING,
        config.fetch.max_attempts,
        config.fetch.retry_delay_ms,
        config.fetch.timeout,
        config.mosaic.tile_size,
        path_to_string(&config.logging.file),
    );

    for provider in &config.custom_providers {
        let _ = write!(
            out,
            "\n[{}{}]\ntemplate = {}\nmax_zoom = {}\ndatum_offset = {}\n",
            PROVIDER_SECTION_PREFIX,
            provider.name,
            provider.template,
            provider.max_zoom,
            provider.datum_offset
        );
    }

    out
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
