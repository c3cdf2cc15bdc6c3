//! Mosaic request, result and error types

use crate::coord::CoordError;
use crate::fetch::FetchError;
use crate::georef::{AffineGeoTransform, GeorefError};
use crate::grid::{BoundingBox, GridError, TileGrid};
use crate::mosaic::{AssemblyError, Mosaic, RasterPlanes};
use crate::provider::{MapStyle, ProviderError, ProviderTemplate, DEFAULT_PROVIDER};
use crate::raster::RasterError;
use thiserror::Error;

/// Errors that abort a mosaic build.
///
/// Every variant means no mosaic was produced.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Bounding box or zoom could not be turned into a grid
    #[error("Invalid request: {0}")]
    Grid(#[from] GridError),

    /// Provider lookup or URL construction failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Tile download failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Tile decoding or placement failed
    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    /// Geotransform could not be computed
    #[error("Georeferencing failed: {0}")]
    Georef(#[from] GeorefError),

    /// Output could not be written
    #[error("Write failed: {0}")]
    Raster(#[from] RasterError),
}

impl From<CoordError> for MosaicError {
    fn from(e: CoordError) -> Self {
        MosaicError::Grid(GridError::Coord(e))
    }
}

impl MosaicError {
    /// True when the request itself was at fault (malformed box, unknown
    /// provider or style, bad parallelism or tile size, or an area too large
    /// to write out).
    pub fn is_input_error(&self) -> bool {
        match self {
            MosaicError::Grid(_) | MosaicError::Provider(_) => true,
            MosaicError::Fetch(e) => e.is_input_error(),
            MosaicError::Assembly(e) => matches!(e, AssemblyError::InvalidTileSize(_)),
            MosaicError::Raster(e) => matches!(e, RasterError::TooLarge { .. }),
            MosaicError::Georef(_) => false,
        }
    }
}

/// What to build: an area, a zoom level, and where the imagery comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicRequest {
    bbox: BoundingBox,
    zoom: u8,
    provider: String,
    style: MapStyle,
}

impl MosaicRequest {
    /// Creates a request for the default provider and style.
    pub fn new(bbox: BoundingBox, zoom: u8) -> Self {
        Self {
            bbox,
            zoom,
            provider: DEFAULT_PROVIDER.to_string(),
            style: MapStyle::default(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }
}

/// An assembled mosaic together with its georeferencing.
#[derive(Debug, Clone)]
pub struct GeoMosaic {
    pub mosaic: Mosaic,
    pub transform: AffineGeoTransform,
    /// Grid actually fetched (zoom may be lower than requested)
    pub grid: TileGrid,
    pub provider: ProviderTemplate,
}

impl GeoMosaic {
    pub fn width(&self) -> u32 {
        self.mosaic.width()
    }

    pub fn height(&self) -> u32 {
        self.mosaic.height()
    }

    /// Band-separate copy of the pixels, ready for a raster writer.
    pub fn to_planes(&self) -> RasterPlanes {
        self.mosaic.to_planes()
    }
}
