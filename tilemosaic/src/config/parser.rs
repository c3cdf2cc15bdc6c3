//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::{clamp_max_attempts, MAX_PARALLELISM, MIN_PARALLELISM};
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::MAX_ZOOM;
use crate::provider::{ProviderTable, ProviderTemplate};

/// Prefix of per-provider sections, e.g. `[provider.osm]`.
pub(super) const PROVIDER_SECTION_PREFIX: &str = "provider.";

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider.<name>] sections come first so [provider] name can refer to them
    for (name, section) in ini.iter() {
        let Some(provider_name) = name.and_then(|n| n.strip_prefix(PROVIDER_SECTION_PREFIX)) else {
            continue;
        };
        let section_name = format!("{}{}", PROVIDER_SECTION_PREFIX, provider_name);
        let provider = parse_provider_section(&section_name, provider_name, section)?;
        config.custom_providers.push(provider);
    }

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("name") {
            let v = v.trim().to_lowercase();
            if !v.is_empty() {
                config.provider.name = v;
            }
        }
        if let Some(v) = section.get("style") {
            config.provider.style = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "provider".to_string(),
                key: "style".to_string(),
                value: v.to_string(),
                reason: "must be one of: m, s, y, t, p, h".to_string(),
            })?;
        }
    }

    let table = config
        .provider_table()
        .map_err(|e| ConfigFileError::InvalidValue {
            section: "provider".to_string(),
            key: "name".to_string(),
            value: config.provider.name.clone(),
            reason: e.to_string(),
        })?;
    if table.resolve(&config.provider.name).is_err() {
        let names: Vec<&str> = table.names().collect();
        return Err(ConfigFileError::InvalidValue {
            section: "provider".to_string(),
            key: "name".to_string(),
            value: config.provider.name.clone(),
            reason: format!("must be one of: {}", names.join(", ")),
        });
    }

    // [fetch] section
    if let Some(section) = ini.section(Some("fetch")) {
        if let Some(v) = section.get("parallelism") {
            let parallelism: usize = v.trim().parse().map_err(|_| parallelism_error(v))?;
            if !(MIN_PARALLELISM..=MAX_PARALLELISM).contains(&parallelism) {
                return Err(parallelism_error(v));
            }
            config.fetch.parallelism = parallelism;
        }
        if let Some(v) = section.get("max_attempts") {
            let attempts: u32 = v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "fetch".to_string(),
                key: "max_attempts".to_string(),
                value: v.to_string(),
                reason: "must be a positive integer".to_string(),
            })?;
            config.fetch.max_attempts = clamp_max_attempts(attempts);
        }
        if let Some(v) = section.get("retry_delay_ms") {
            config.fetch.retry_delay_ms =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "fetch".to_string(),
                    key: "retry_delay_ms".to_string(),
                    value: v.to_string(),
                    reason: "must be a non-negative integer (milliseconds)".to_string(),
                })?;
        }
        if let Some(v) = section.get("timeout") {
            let timeout: u64 = v.trim().parse().map_err(|_| timeout_error(v))?;
            if timeout == 0 {
                return Err(timeout_error(v));
            }
            config.fetch.timeout = timeout;
        }
    }

    // [mosaic] section
    if let Some(section) = ini.section(Some("mosaic")) {
        if let Some(v) = section.get("tile_size") {
            let size: u32 = v.trim().parse().map_err(|_| tile_size_error(v))?;
            if size == 0 {
                return Err(tile_size_error(v));
            }
            config.mosaic.tile_size = size;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Parse a `[provider.<name>]` section.
///
/// Keys missing from a section that overrides a built-in provider keep the
/// built-in value.
fn parse_provider_section(
    section_name: &str,
    provider_name: &str,
    section: &ini::Properties,
) -> Result<ProviderTemplate, ConfigFileError> {
    let builtin = ProviderTable::builtin();
    let base = builtin.resolve(provider_name).ok();

    let template = section
        .get("template")
        .map(|v| v.trim().to_string())
        .or_else(|| base.map(|b| b.template.clone()))
        .unwrap_or_default();

    let max_zoom = match section.get("max_zoom") {
        Some(v) => {
            let zoom: u8 = v.trim().parse().map_err(|_| max_zoom_error(section_name, v))?;
            if zoom > MAX_ZOOM {
                return Err(max_zoom_error(section_name, v));
            }
            zoom
        }
        None => base.map(|b| b.max_zoom).unwrap_or(MAX_ZOOM),
    };

    let datum_offset = match section.get("datum_offset") {
        Some(v) => parse_bool(v),
        None => base.map(|b| b.datum_offset).unwrap_or(false),
    };

    let provider =
        ProviderTemplate::new(provider_name, template, max_zoom).with_datum_offset(datum_offset);
    provider
        .validate()
        .map_err(|e| ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: "template".to_string(),
            value: provider.template.clone(),
            reason: e.to_string(),
        })?;
    Ok(provider)
}

fn parallelism_error(value: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: "fetch".to_string(),
        key: "parallelism".to_string(),
        value: value.to_string(),
        reason: format!(
            "must be an integer between {} and {}",
            MIN_PARALLELISM, MAX_PARALLELISM
        ),
    }
}

fn timeout_error(value: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: "fetch".to_string(),
        key: "timeout".to_string(),
        value: value.to_string(),
        reason: "must be a positive integer (seconds)".to_string(),
    }
}

fn tile_size_error(value: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: "mosaic".to_string(),
        key: "tile_size".to_string(),
        value: value.to_string(),
        reason: "must be a positive integer (pixels)".to_string(),
    }
}

fn max_zoom_error(section: &str, value: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: "max_zoom".to_string(),
        value: value.to_string(),
        reason: format!("must be an integer between 0 and {}", MAX_ZOOM),
    }
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::provider::MapStyle;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[fetch]
parallelism = 4
"#,
        )
        .unwrap();

        assert_eq!(config.fetch.parallelism, 4);
        assert_eq!(config.fetch.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.fetch.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.provider.name, "google");
        assert_eq!(config.mosaic.tile_size, DEFAULT_TILE_SIZE);
    }

    #[test]
    fn test_provider_and_style() {
        let config = load(
            r#"
[provider]
name = ESRI
style = y
"#,
        )
        .unwrap();

        assert_eq!(config.provider.name, "esri");
        assert_eq!(config.provider.style, MapStyle::Hybrid);
    }

    #[test]
    fn test_invalid_provider_name() {
        let err = load(
            r#"
[provider]
name = invalid
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("must be one of:"));
        assert!(err.to_string().contains("esri"));
    }

    #[test]
    fn test_invalid_style() {
        let err = load(
            r#"
[provider]
style = q
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("style"));
    }

    #[test]
    fn test_parallelism_out_of_range() {
        for bad in ["0", "21", "many"] {
            let err = load(&format!("[fetch]\nparallelism = {}\n", bad)).unwrap_err();
            assert!(
                err.to_string().contains("parallelism"),
                "unexpected error for {}: {}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_max_attempts_clamped_to_ceiling() {
        let config = load("[fetch]\nmax_attempts = 9\n").unwrap();
        assert_eq!(config.fetch.max_attempts, MAX_ATTEMPTS_CEILING);
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let err = load("[mosaic]\ntile_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("tile_size"));
    }

    #[test]
    fn test_custom_provider_section() {
        let config = load(
            r#"
[provider]
name = osm

[provider.osm]
template = https://tile.openstreetmap.org/{z}/{x}/{y}.png
max_zoom = 19
"#,
        )
        .unwrap();

        assert_eq!(config.provider.name, "osm");
        assert_eq!(config.custom_providers.len(), 1);
        let osm = &config.custom_providers[0];
        assert_eq!(osm.max_zoom, 19);
        assert!(!osm.datum_offset);
    }

    #[test]
    fn test_builtin_override_keeps_unset_keys() {
        let config = load(
            r#"
[provider.google-china]
max_zoom = 20
"#,
        )
        .unwrap();

        let table = config.provider_table().unwrap();
        let provider = table.resolve("google-china").unwrap();
        assert_eq!(provider.max_zoom, 20);
        assert!(provider.datum_offset);
        assert!(provider.template.contains("google.cn"));
    }

    #[test]
    fn test_custom_provider_bad_template() {
        let err = load(
            r#"
[provider.broken]
template = http://example.com/{z}
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("provider.broken"));
    }

    #[test]
    fn test_custom_provider_bad_max_zoom() {
        let err = load(
            r#"
[provider.deep]
template = http://example.com/{z}/{x}/{y}
max_zoom = 30
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("max_zoom"));
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        // Non-tilde paths should be unchanged
        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "TRUE", "1", "yes", "on", " On "] {
            assert!(parse_bool(v), "expected true for {:?}", v);
        }
        for v in ["false", "0", "no", "off", "", "maybe"] {
            assert!(!parse_bool(v), "expected false for {:?}", v);
        }
    }
}
