//! Tile provider abstraction
//!
//! This module holds the table of tile servers (URL templates plus their
//! zoom ceilings and datum quirks) and the HTTP client seam used to download
//! tiles from them.
//!
//! ```ignore
//! use tilemosaic::provider::{ProviderTable, ReqwestClient};
//!
//! let table = ProviderTable::builtin();
//! let esri = table.resolve("esri")?;
//! let client = ReqwestClient::new()?;
//! ```

mod http;
mod table;
mod types;

pub use http::{
    FailureKind, HttpClient, HttpError, ReqwestClient, BROWSER_USER_AGENT, DEFAULT_TIMEOUT,
};
pub use table::{ProviderTable, DEFAULT_PROVIDER};
pub use types::{MapStyle, ProviderError, ProviderTemplate};

#[cfg(test)]
pub use http::tests::{MockHttpClient, ScriptedHttpClient};
