//! Georeferencing
//!
//! Computes the geographic extent of an assembled tile grid and the
//! six-parameter affine transform mapping raster pixels to WGS84 degrees.

use crate::coord::{apply_regional_offset, projected_to_geo, tile_corner, GeoPoint};
use crate::grid::TileGrid;
use crate::provider::ProviderTemplate;
use std::fmt;
use tracing::debug;

/// Errors that can occur while computing a geotransform.
#[derive(Debug, Clone, PartialEq)]
pub enum GeorefError {
    /// Raster has no pixels
    EmptyRaster { width: u32, height: u32 },
}

impl fmt::Display for GeorefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeorefError::EmptyRaster { width, height } => write!(
                f,
                "Cannot georeference an empty raster ({}x{} pixels)",
                width, height
            ),
        }
    }
}

impl std::error::Error for GeorefError {}

/// North-up affine transform from pixel (col, row) to (lon, lat).
///
/// Laid out in the usual GDAL order: origin x, pixel width, row rotation,
/// origin y, column rotation, pixel height. Rotations are always zero and
/// pixel height is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineGeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub column_rotation: f64,
    pub pixel_height: f64,
}

impl AffineGeoTransform {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.column_rotation,
            self.pixel_height,
        ]
    }

    /// Maps a pixel position (fractional, top-left corner at 0,0) to degrees.
    pub fn pixel_to_geo(&self, col: f64, row: f64) -> GeoPoint {
        GeoPoint::new(
            self.origin_x + col * self.pixel_width + row * self.row_rotation,
            self.origin_y + col * self.column_rotation + row * self.pixel_height,
        )
    }
}

impl fmt::Display for AffineGeoTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.as_array();
        write!(f, "({}, {}, {}, {}, {}, {})", a, b, c, d, e, g)
    }
}

/// Returns the north-west and south-east corners of `grid` in WGS84.
///
/// Corners are taken from the tile edges, not from the requested bounding
/// box, so the extent always matches the assembled pixels. Providers with a
/// datum offset have it removed here.
pub fn grid_corners(grid: &TileGrid, provider: &ProviderTemplate) -> (GeoPoint, GeoPoint) {
    let nw = projected_to_geo(tile_corner(grid.x_min(), grid.y_min(), grid.zoom()));
    let se = projected_to_geo(tile_corner(
        grid.x_max() + 1,
        grid.y_max() + 1,
        grid.zoom(),
    ));
    (
        apply_regional_offset(nw, provider.datum_offset),
        apply_regional_offset(se, provider.datum_offset),
    )
}

/// Computes the geotransform of a `width` × `height` raster covering `grid`.
pub fn compute_transform(
    grid: &TileGrid,
    provider: &ProviderTemplate,
    width: u32,
    height: u32,
) -> Result<AffineGeoTransform, GeorefError> {
    if width == 0 || height == 0 {
        return Err(GeorefError::EmptyRaster { width, height });
    }

    let (nw, se) = grid_corners(grid, provider);
    let transform = AffineGeoTransform {
        origin_x: nw.lon,
        pixel_width: (se.lon - nw.lon) / width as f64,
        row_rotation: 0.0,
        origin_y: nw.lat,
        column_rotation: 0.0,
        pixel_height: (se.lat - nw.lat) / height as f64,
    };

    debug!(
        provider = %provider.name,
        north_west = %nw,
        south_east = %se,
        transform = %transform,
        "Computed geotransform"
    );
    Ok(transform)
}
