//! Mosaic orchestration
//!
//! Ties the pipeline together: a [`MosaicRequest`] goes in, a georeferenced
//! [`GeoMosaic`] (and optionally a raster file) comes out.

mod engine;
mod types;

pub use engine::MosaicEngine;
pub use types::{GeoMosaic, MosaicError, MosaicRequest};
