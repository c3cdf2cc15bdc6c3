//! Provider types

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when resolving providers or building tile URLs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No provider with this name is registered
    UnknownProvider(String),
    /// Provider template is unusable
    InvalidTemplate { name: String, reason: String },
    /// Style code is not one of the known map styles
    UnknownStyle(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::UnknownProvider(name) => write!(f, "Unknown provider: {}", name),
            ProviderError::InvalidTemplate { name, reason } => {
                write!(f, "Invalid URL template for provider '{}': {}", name, reason)
            }
            ProviderError::UnknownStyle(code) => write!(
                f,
                "Unknown map style '{}' (expected one of: {})",
                code,
                MapStyle::codes().join(", ")
            ),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Layer style requested from `lyrs=`-style tile servers.
///
/// Providers whose template has no `{style}` placeholder ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapStyle {
    /// Road map
    Map,
    /// Satellite imagery only
    #[default]
    Satellite,
    /// Satellite imagery with labels
    Hybrid,
    /// Terrain shading
    Terrain,
    /// Terrain with labels
    TerrainLabels,
    /// Labels and roads only
    Labels,
}

impl MapStyle {
    pub const ALL: [MapStyle; 6] = [
        MapStyle::Map,
        MapStyle::Satellite,
        MapStyle::Hybrid,
        MapStyle::Terrain,
        MapStyle::TerrainLabels,
        MapStyle::Labels,
    ];

    /// Single-letter code substituted for `{style}`.
    pub fn code(&self) -> &'static str {
        match self {
            MapStyle::Map => "m",
            MapStyle::Satellite => "s",
            MapStyle::Hybrid => "y",
            MapStyle::Terrain => "t",
            MapStyle::TerrainLabels => "p",
            MapStyle::Labels => "h",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MapStyle::Map => "road map",
            MapStyle::Satellite => "satellite",
            MapStyle::Hybrid => "satellite with labels",
            MapStyle::Terrain => "terrain",
            MapStyle::TerrainLabels => "terrain with labels",
            MapStyle::Labels => "labels only",
        }
    }

    fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(MapStyle::code).collect()
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MapStyle {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProviderError::UnknownStyle(s.to_string()))
    }
}

/// A tile server description.
///
/// The template may contain `{x}`, `{y}`, `{z}`, `{style}` and `{quadkey}`
/// placeholders. An empty template means "use the default provider's
/// template".
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTemplate {
    /// Lower-case lookup name
    pub name: String,
    /// URL template
    pub template: String,
    /// Highest zoom level the server answers
    pub max_zoom: u8,
    /// Imagery is registered in GCJ-02 and needs the regional correction
    pub datum_offset: bool,
}

impl ProviderTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            template: template.into(),
            max_zoom,
            datum_offset: false,
        }
    }

    pub fn with_datum_offset(mut self, enabled: bool) -> Self {
        self.datum_offset = enabled;
        self
    }

    /// Caps a requested zoom at the provider's ceiling.
    #[inline]
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.min(self.max_zoom)
    }

    /// Checks that a non-empty template can address individual tiles.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.name.trim().is_empty() {
            return Err(ProviderError::InvalidTemplate {
                name: self.name.clone(),
                reason: "provider name is empty".to_string(),
            });
        }
        if self.template.is_empty() {
            return Ok(());
        }

        let has_xy = self.template.contains("{x}") && self.template.contains("{y}");
        if !has_xy && !self.template.contains("{quadkey}") {
            return Err(ProviderError::InvalidTemplate {
                name: self.name.clone(),
                reason: "template must contain {x} and {y}, or {quadkey}".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_codes() {
        assert_eq!(MapStyle::Satellite.code(), "s");
        assert_eq!(MapStyle::Hybrid.code(), "y");
        assert_eq!(MapStyle::default(), MapStyle::Satellite);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("m".parse::<MapStyle>().unwrap(), MapStyle::Map);
        assert_eq!(" P ".parse::<MapStyle>().unwrap(), MapStyle::TerrainLabels);
        assert_eq!(
            "z".parse::<MapStyle>(),
            Err(ProviderError::UnknownStyle("z".to_string()))
        );
    }

    #[test]
    fn test_template_name_is_lowercased() {
        let provider = ProviderTemplate::new("OSM", "https://tile/{z}/{x}/{y}.png", 19);
        assert_eq!(provider.name, "osm");
        assert!(!provider.datum_offset);
    }

    #[test]
    fn test_clamp_zoom() {
        let provider = ProviderTemplate::new("t", "http://t/{z}/{x}/{y}", 18);
        assert_eq!(provider.clamp_zoom(12), 12);
        assert_eq!(provider.clamp_zoom(18), 18);
        assert_eq!(provider.clamp_zoom(21), 18);
    }

    #[test]
    fn test_validate_accepts_xy_and_quadkey() {
        assert!(ProviderTemplate::new("a", "http://t/{z}/{x}/{y}", 19)
            .validate()
            .is_ok());
        assert!(ProviderTemplate::new("b", "http://t/{quadkey}.jpeg", 19)
            .validate()
            .is_ok());
        assert!(ProviderTemplate::new("c", "", 19).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unaddressable_template() {
        let err = ProviderTemplate::new("bad", "http://t/{z}/{x}", 19)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidTemplate { .. }));
        assert!(err.to_string().contains("bad"));
    }
}
