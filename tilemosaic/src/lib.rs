//! tilemosaic - georeferenced mosaics from slippy-map tile servers
//!
//! Given a WGS84 bounding box and a zoom level, this library works out which
//! tiles cover the area, downloads them in parallel from a tile provider,
//! pastes them into one RGB canvas and computes the geotransform that places
//! the canvas on the globe.
//!
//! # High-Level API
//!
//! The [`orchestrator`] module runs the whole pipeline:
//!
//! ```ignore
//! use tilemosaic::config::ConfigFile;
//! use tilemosaic::grid::BoundingBox;
//! use tilemosaic::orchestrator::{MosaicEngine, MosaicRequest};
//! use tilemosaic::provider::ReqwestClient;
//! use tilemosaic::raster::GeoTiffWriter;
//! use std::sync::Arc;
//!
//! let config = ConfigFile::load()?;
//! let engine = MosaicEngine::new(
//!     Arc::new(ReqwestClient::new()?),
//!     config.provider_table()?,
//!     config.fetch_config(),
//!     config.mosaic.tile_size,
//! )?;
//!
//! let bbox = BoundingBox::new(-0.2, 51.55, -0.05, 51.45)?;
//! let request = MosaicRequest::new(bbox, 10);
//! engine.build_and_write(&request, &GeoTiffWriter::new(), "london.tif".as_ref())?;
//! ```

pub mod config;
pub mod coord;
pub mod fetch;
pub mod georef;
pub mod grid;
pub mod logging;
pub mod mosaic;
pub mod orchestrator;
pub mod provider;
pub mod raster;

/// Version of the tilemosaic library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
