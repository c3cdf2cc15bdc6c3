//! Tests for coordinate conversion

use super::*;
use proptest::prelude::*;

#[test]
fn test_london_at_zoom_10() {
    // London: 51.5074°N, 0.1278°W
    let tile = geo_to_tile_index(GeoPoint::new(-0.1278, 51.5074), 10).unwrap();
    assert_eq!(tile.x, 511);
    assert_eq!(tile.y, 340);
    assert_eq!(tile.zoom, 10);
}

#[test]
fn test_new_york_city_at_zoom_16() {
    let tile = geo_to_tile_index(GeoPoint::new(-74.0060, 40.7128), 16).unwrap();
    assert_eq!(tile.x, 19295);
    assert_eq!(tile.y, 24640);
}

#[test]
fn test_equator_prime_meridian() {
    // At zoom 1: 2×2 tiles, 0°N 0°E is the top-left corner of tile (1, 1)
    let tile = geo_to_tile_index(GeoPoint::new(0.0, 0.0), 1).unwrap();
    assert_eq!((tile.x, tile.y), (1, 1));
}

#[test]
fn test_zoom_zero_is_single_tile() {
    for &(lon, lat) in &[(-179.9, 80.0), (0.0, 0.0), (179.9, -80.0)] {
        let tile = geo_to_tile_index(GeoPoint::new(lon, lat), 0).unwrap();
        assert_eq!((tile.x, tile.y), (0, 0));
    }
}

#[test]
fn test_world_edges_are_clamped() {
    let east = geo_to_tile_index(GeoPoint::new(180.0, 0.0), 4).unwrap();
    assert_eq!(east.x, 15);

    let north = geo_to_tile_index(GeoPoint::new(0.0, 90.0), 4).unwrap();
    assert_eq!(north.y, 0);

    let south = geo_to_tile_index(GeoPoint::new(0.0, -90.0), 4).unwrap();
    assert_eq!(south.y, 15);
}

#[test]
fn test_longitude_wraps_before_indexing() {
    let wrapped = geo_to_tile_index(GeoPoint::new(200.0, 10.0), 8).unwrap();
    let direct = geo_to_tile_index(GeoPoint::new(-160.0, 10.0), 8).unwrap();
    assert_eq!(wrapped, direct);
}

#[test]
fn test_invalid_latitude() {
    let result = geo_to_tile_index(GeoPoint::new(0.0, 90.5), 10);
    assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
}

#[test]
fn test_invalid_longitude() {
    let result = geo_to_tile_index(GeoPoint::new(-361.0, 0.0), 10);
    assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
}

#[test]
fn test_invalid_zoom() {
    let result = geo_to_tile_index(GeoPoint::new(0.0, 0.0), MAX_ZOOM + 1);
    assert!(matches!(result, Err(CoordError::InvalidZoom(_))));
}

#[test]
fn test_nan_rejected() {
    let result = geo_to_tile_index(GeoPoint::new(f64::NAN, 0.0), 3);
    assert_eq!(result, Err(CoordError::NotFinite));
}

#[test]
fn test_normalize_longitude() {
    assert_eq!(normalize_longitude(-180.0), -180.0);
    assert_eq!(normalize_longitude(180.0), 180.0);
    assert_eq!(normalize_longitude(190.0), -170.0);
    assert_eq!(normalize_longitude(-190.0), 170.0);
    assert_eq!(normalize_longitude(540.0), 180.0);
    assert_eq!(normalize_longitude(-540.0), 180.0);
}

#[test]
fn test_projection_known_values() {
    let origin = geo_to_projected(GeoPoint::new(0.0, 0.0));
    assert!(origin.x.abs() < 1e-9);
    assert!(origin.y.abs() < 1e-6);

    let east_edge = geo_to_projected(GeoPoint::new(180.0, 0.0));
    assert!((east_edge.x - MERCATOR_HALF_EXTENT).abs() < 1e-6);

    // The Mercator latitude limit is where the map becomes square
    let top = geo_to_projected(GeoPoint::new(0.0, MAX_LAT));
    assert!((top.y - MERCATOR_HALF_EXTENT).abs() < 1.0);
}

#[test]
fn test_tile_corner_world_extent() {
    let nw = tile_corner(0, 0, 0);
    let se = tile_corner(1, 1, 0);
    assert!((nw.x + MERCATOR_HALF_EXTENT).abs() < 1e-6);
    assert!((nw.y - MERCATOR_HALF_EXTENT).abs() < 1e-6);
    assert!((se.x - MERCATOR_HALF_EXTENT).abs() < 1e-6);
    assert!((se.y + MERCATOR_HALF_EXTENT).abs() < 1e-6);
}

#[test]
fn test_tile_corner_contains_source_point() {
    let point = GeoPoint::new(13.4050, 52.5200);
    let tile = geo_to_tile_index(point, 12).unwrap();

    let nw = projected_to_geo(tile_corner(tile.x, tile.y, tile.zoom));
    let se = projected_to_geo(tile_corner(tile.x + 1, tile.y + 1, tile.zoom));

    assert!(nw.lon <= point.lon && point.lon < se.lon);
    assert!(se.lat < point.lat && point.lat <= nw.lat);
}

#[test]
fn test_regional_offset_disabled_is_identity() {
    let point = GeoPoint::new(116.391, 39.907);
    assert_eq!(apply_regional_offset(point, false), point);
}

#[test]
fn test_regional_offset_enabled_moves_point_in_china() {
    let point = GeoPoint::new(116.391, 39.907);
    let corrected = apply_regional_offset(point, true);
    assert_ne!(corrected, point);

    let reshifted = wgs_to_gcj(corrected);
    assert!((reshifted.lon - point.lon).abs() < 1e-5);
    assert!((reshifted.lat - point.lat).abs() < 1e-5);
}

#[test]
fn test_quadkey() {
    assert_eq!(tile_to_quadkey(&TileIndex::new(3, 5, 3)), "213");
    assert_eq!(tile_to_quadkey(&TileIndex::new(0, 0, 1)), "0");
    assert_eq!(tile_to_quadkey(&TileIndex::new(0, 0, 0)), "");
}

proptest! {
    #[test]
    fn prop_projection_round_trip(lon in -180.0f64..=180.0, lat in -85.05f64..85.05) {
        let back = projected_to_geo(geo_to_projected(GeoPoint::new(lon, lat)));
        prop_assert!((back.lon - lon).abs() <= 1e-6, "lon {} -> {}", lon, back.lon);
        prop_assert!((back.lat - lat).abs() <= 1e-6, "lat {} -> {}", lat, back.lat);
    }

    #[test]
    fn prop_tile_x_monotonic_in_longitude(
        a in -180.0f64..=180.0,
        b in -180.0f64..=180.0,
        lat in -85.0f64..85.0,
        zoom in 0u8..=18,
    ) {
        let (west, east) = if a <= b { (a, b) } else { (b, a) };
        let tw = geo_to_tile_index(GeoPoint::new(west, lat), zoom).unwrap();
        let te = geo_to_tile_index(GeoPoint::new(east, lat), zoom).unwrap();
        prop_assert!(tw.x <= te.x);
    }

    #[test]
    fn prop_tile_y_monotonic_as_latitude_decreases(
        a in -90.0f64..=90.0,
        b in -90.0f64..=90.0,
        lon in -180.0f64..=180.0,
        zoom in 0u8..=18,
    ) {
        let (north, south) = if a >= b { (a, b) } else { (b, a) };
        let tn = geo_to_tile_index(GeoPoint::new(lon, north), zoom).unwrap();
        let ts = geo_to_tile_index(GeoPoint::new(lon, south), zoom).unwrap();
        prop_assert!(tn.y <= ts.y);
    }

    #[test]
    fn prop_tile_index_in_range(lon in -360.0f64..=360.0, lat in -90.0f64..=90.0, zoom in 0u8..=MAX_ZOOM) {
        let tile = geo_to_tile_index(GeoPoint::new(lon, lat), zoom).unwrap();
        let n = 1u64 << zoom;
        prop_assert!((tile.x as u64) < n);
        prop_assert!((tile.y as u64) < n);
    }
}
