//! GCJ-02 datum offset.
//!
//! Imagery served for mainland China is registered in GCJ-02, a WGS84
//! derivative with a deliberate non-linear shift of up to several hundred
//! metres. The forward transform is closed-form; the inverse has no closed
//! form and is solved by fixed-point iteration.

use super::types::GeoPoint;
use std::f64::consts::PI;

/// Krasovsky 1940 semi-major axis used by the GCJ-02 formula.
const KRASOVSKY_A: f64 = 6_378_245.0;
/// Krasovsky 1940 first eccentricity squared.
const KRASOVSKY_EE: f64 = 0.006_693_421_622_965_943;

/// Convergence threshold for the inverse, in degrees.
const INVERSE_TOLERANCE: f64 = 1e-6;
/// Hard cap on inverse iterations. Convergence is normally reached in < 10.
const INVERSE_MAX_ITERATIONS: usize = 30;

/// Rough mainland-China envelope. Points outside pass through untouched.
fn out_of_china(point: GeoPoint) -> bool {
    !(72.004..=137.8347).contains(&point.lon) || !(0.8293..=55.8271).contains(&point.lat)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// Shifts a WGS84 point into GCJ-02.
pub fn wgs_to_gcj(point: GeoPoint) -> GeoPoint {
    if out_of_china(point) {
        return point;
    }

    let dlat = transform_lat(point.lon - 105.0, point.lat - 35.0);
    let dlon = transform_lon(point.lon - 105.0, point.lat - 35.0);

    let rad_lat = point.lat / 180.0 * PI;
    let magic = 1.0 - KRASOVSKY_EE * rad_lat.sin().powi(2);
    let sqrt_magic = magic.sqrt();

    let dlat = (dlat * 180.0) / ((KRASOVSKY_A * (1.0 - KRASOVSKY_EE)) / (magic * sqrt_magic) * PI);
    let dlon = (dlon * 180.0) / (KRASOVSKY_A / sqrt_magic * rad_lat.cos() * PI);

    GeoPoint::new(point.lon + dlon, point.lat + dlat)
}

/// Recovers the WGS84 point whose GCJ-02 image is `point`.
///
/// Iterates `w ← w − (gcj(w) − point)` until the step falls under 1e-6°.
pub fn gcj_to_wgs(point: GeoPoint) -> GeoPoint {
    if out_of_china(point) {
        return point;
    }

    let mut current = point;
    for _ in 0..INVERSE_MAX_ITERATIONS {
        let shifted = wgs_to_gcj(current);
        let next = GeoPoint::new(
            current.lon - (shifted.lon - point.lon),
            current.lat - (shifted.lat - point.lat),
        );
        let step = (next.lon - current.lon)
            .abs()
            .max((next.lat - current.lat).abs());
        current = next;
        if step < INVERSE_TOLERANCE {
            break;
        }
    }
    current
}
