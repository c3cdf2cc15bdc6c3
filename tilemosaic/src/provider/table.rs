//! Provider table.
//!
//! The table is plain immutable configuration: it is built once (built-ins
//! plus any overrides from the config file) and passed by value to the
//! components that need it.

use super::types::{ProviderError, ProviderTemplate};

/// Name of the provider used when none is requested.
pub const DEFAULT_PROVIDER: &str = "google";

/// Ordered set of known tile providers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTable {
    providers: Vec<ProviderTemplate>,
}

impl ProviderTable {
    /// Creates the table of built-in providers.
    pub fn builtin() -> Self {
        let providers = vec![
            ProviderTemplate::new(
                "google",
                "http://mts0.googleapis.com/vt?lyrs={style}&x={x}&y={y}&z={z}",
                22,
            ),
            ProviderTemplate::new(
                "google-china",
                "http://mt2.google.cn/vt/lyrs={style}&hl=zh-CN&gl=CN&src=app&x={x}&y={y}&z={z}",
                22,
            )
            .with_datum_offset(true),
            ProviderTemplate::new(
                "esri",
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                19,
            ),
            ProviderTemplate::new(
                "bing",
                "http://ecn.t0.tiles.virtualearth.net/tiles/a{quadkey}.jpeg?g=1",
                19,
            ),
            ProviderTemplate::new(
                "tianditu",
                "http://t4.tianditu.gov.cn/DataServer?T=img_w&x={x}&y={y}&l={z}",
                18,
            ),
        ];
        Self { providers }
    }

    /// Adds a provider, replacing any existing entry with the same name.
    pub fn with_provider(mut self, provider: ProviderTemplate) -> Result<Self, ProviderError> {
        provider.validate()?;
        match self
            .providers
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&provider.name))
        {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
        Ok(self)
    }

    /// Looks up a provider by name, ignoring case.
    pub fn resolve(&self, name: &str) -> Result<&ProviderTemplate, ProviderError> {
        let name = name.trim();
        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }

    /// Template used when a provider's own template is empty.
    ///
    /// Falls back to the first entry if the default provider was removed
    /// from a custom table.
    pub fn default_template(&self) -> Option<&ProviderTemplate> {
        self.resolve(DEFAULT_PROVIDER)
            .ok()
            .or_else(|| self.providers.first())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderTemplate> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderTable {
    fn default() -> Self {
        Self::builtin()
    }
}
