//! Raster output
//!
//! The [`RasterWriter`] trait is the seam between the mosaic pipeline and
//! the on-disk format. [`GeoTiffWriter`] is the built-in implementation.

mod geotiff;

pub use geotiff::GeoTiffWriter;

use crate::georef::AffineGeoTransform;
use crate::mosaic::RasterPlanes;
use std::path::Path;
use thiserror::Error;

/// Raster writing errors.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoder failure
    #[error("Failed to encode raster: {0}")]
    Encode(String),

    /// Planes are empty or inconsistent
    #[error("Invalid raster data: {0}")]
    InvalidData(String),

    /// Raster exceeds what the format can address
    #[error("Raster of {width}x{height} pixels is too large for this format")]
    TooLarge { width: u32, height: u32 },
}

impl From<tiff::TiffError> for RasterError {
    fn from(e: tiff::TiffError) -> Self {
        Self::Encode(e.to_string())
    }
}

/// Writes a three-band raster with its geotransform to a file.
///
/// Implementations must not leave a file at `path` when they fail.
pub trait RasterWriter {
    fn write(
        &self,
        planes: &RasterPlanes,
        transform: &AffineGeoTransform,
        path: &Path,
    ) -> Result<(), RasterError>;
}
