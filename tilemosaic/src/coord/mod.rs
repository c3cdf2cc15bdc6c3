//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (longitude/latitude),
//! Web Mercator metres and slippy-map tile indices, plus the GCJ-02 datum
//! correction some providers require.
//!
//! Every function here is pure.

mod offset;
mod types;

#[cfg(test)]
mod tests;

pub use offset::{gcj_to_wgs, wgs_to_gcj};
pub use types::{
    CoordError, GeoPoint, ProjectedPoint, TileIndex, MAX_ABS_LAT, MAX_ABS_LON, MAX_LAT,
    MAX_ZOOM, MERCATOR_HALF_EXTENT, MIN_LAT, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Wraps a longitude into (-180, 180].
///
/// Values already inside [-180, 180] are returned unchanged, so -180 stays
/// on the western edge of the tile grid instead of jumping to the east.
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let mut wrapped = lon % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Checks the hard input limits shared by all geographic entry points.
pub fn validate_geo(point: GeoPoint) -> Result<(), CoordError> {
    if !point.lon.is_finite() || !point.lat.is_finite() {
        return Err(CoordError::NotFinite);
    }
    if point.lat.abs() > MAX_ABS_LAT {
        return Err(CoordError::InvalidLatitude(point.lat));
    }
    if point.lon.abs() > MAX_ABS_LON {
        return Err(CoordError::InvalidLongitude(point.lon));
    }
    Ok(())
}

/// Spherical Web Mercator forward projection.
///
/// Latitude is clamped to the Mercator domain (±85.05112878°) first, so the
/// poles map to the top and bottom edges instead of infinity.
#[inline]
pub fn geo_to_projected(point: GeoPoint) -> ProjectedPoint {
    let lat = point.lat.clamp(MIN_LAT, MAX_LAT);
    let x = point.lon * MERCATOR_HALF_EXTENT / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    ProjectedPoint::new(x, y * MERCATOR_HALF_EXTENT / 180.0)
}

/// Spherical Web Mercator inverse projection.
#[inline]
pub fn projected_to_geo(point: ProjectedPoint) -> GeoPoint {
    let lon = point.x / MERCATOR_HALF_EXTENT * 180.0;
    let lat = point.y / MERCATOR_HALF_EXTENT * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
    GeoPoint::new(lon, lat)
}

/// Converts a geographic position to the tile containing it.
///
/// Longitude maps linearly, latitude through the Mercator formula. Both
/// are floored and clamped into `[0, 2^zoom - 1]`, so x never decreases as
/// longitude grows and y never decreases as latitude shrinks.
///
/// # Errors
///
/// Returns an error for |lat| > 90, |lon| > 360, non-finite input, or a zoom
/// above [`MAX_ZOOM`].
pub fn geo_to_tile_index(point: GeoPoint, zoom: u8) -> Result<TileIndex, CoordError> {
    validate_geo(point)?;
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let lon = normalize_longitude(point.lon);
    let lat = point.lat.clamp(MIN_LAT, MAX_LAT);
    let n = (1u64 << zoom) as f64;
    let max_index = n - 1.0;

    let x = ((lon + 180.0) / 360.0 * n).floor();

    let sin_lat = (lat * PI / 180.0).sin();
    let y = ((0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * n).floor();

    Ok(TileIndex {
        x: x.clamp(0.0, max_index) as u32,
        y: y.clamp(0.0, max_index) as u32,
        zoom,
    })
}

/// Returns the north-west corner of tile (x, y) in Web Mercator metres.
///
/// `x` and `y` may equal `2^zoom`, which addresses the far (east or south)
/// edge of the world; this is how the south-east corner of a grid is found.
#[inline]
pub fn tile_corner(x: u32, y: u32, zoom: u8) -> ProjectedPoint {
    let n = (1u64 << zoom) as f64;
    let extent = MERCATOR_HALF_EXTENT * 2.0;
    ProjectedPoint::new(
        x as f64 / n * extent - MERCATOR_HALF_EXTENT,
        MERCATOR_HALF_EXTENT - y as f64 / n * extent,
    )
}

/// Applies the regional datum correction when a provider needs it.
///
/// With `enabled` set, the point is treated as GCJ-02 and converted back to
/// WGS84. Otherwise it is returned unchanged.
#[inline]
pub fn apply_regional_offset(point: GeoPoint, enabled: bool) -> GeoPoint {
    if enabled {
        gcj_to_wgs(point)
    } else {
        point
    }
}

/// Converts a tile index to a Bing Maps quadkey.
pub fn tile_to_quadkey(tile: &TileIndex) -> String {
    let mut quadkey = String::with_capacity(tile.zoom as usize);
    for level in (1..=tile.zoom).rev() {
        let mask = 1u32 << (level - 1);
        let mut digit = b'0';
        if tile.x & mask != 0 {
            digit += 1;
        }
        if tile.y & mask != 0 {
            digit += 2;
        }
        quadkey.push(digit as char);
    }
    quadkey
}
