//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Longitudes beyond this magnitude are rejected outright.
pub const MAX_ABS_LON: f64 = 360.0;

/// Latitudes beyond this magnitude are rejected outright.
pub const MAX_ABS_LAT: f64 = 90.0;

/// Zoom ceiling for tile math. Providers cap lower than this.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Half the equatorial circumference of the Web Mercator sphere, in metres.
pub const MERCATOR_HALF_EXTENT: f64 = 20_037_508.342_789_244;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude, east positive
    pub lon: f64,
    /// Latitude, north positive
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// A Web Mercator position in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tile index in the slippy-map quadtree.
///
/// `x` grows eastward, `y` grows southward (north-up raster convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    pub const fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude magnitude exceeds 90 degrees
    InvalidLatitude(f64),
    /// Longitude magnitude exceeds 360 degrees
    InvalidLongitude(f64),
    /// Zoom level is above the supported ceiling
    InvalidZoom(u8),
    /// Coordinate is NaN or infinite
    NotFinite,
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between -{} and {})",
                    lat, MAX_ABS_LAT, MAX_ABS_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between -{} and {})",
                    lon, MAX_ABS_LON, MAX_ABS_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::NotFinite => write!(f, "Coordinate is not a finite number"),
        }
    }
}

impl std::error::Error for CoordError {}
