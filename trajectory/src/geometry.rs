//! Distance and heading between samples.
//!
//! Distance is the great-circle (haversine) distance on a sphere of radius
//! [`EARTH_RADIUS_M`] meters:
//!
//! ```notrust
//! a = sin²(Δφ / 2) + cos(φ1) · cos(φ2) · sin²(Δλ / 2)
//! d = 2 · R · atan2(√a, √(1 − a))
//! ```
//!
//! with latitudes `φ` and longitudes `λ` in radians.

use crate::Sample;

/// Radius of Earth in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const MS_TO_KMH: f64 = 3.6;

/// Great-circle distance between two samples in meters.
pub fn distance(a: &Sample, b: &Sample) -> f64 {
    haversine(a.longitude, a.latitude, b.longitude, b.latitude)
}

/// Initial bearing from `a` to `b` in degrees, clockwise from north, in `[0, 360)`.
///
/// Coincident points give `0`.
pub fn bearing(a: &Sample, b: &Sample) -> f64 {
    let d_lon = (b.longitude - a.longitude).to_radians();
    let latitude_1 = a.latitude.to_radians();
    let latitude_2 = b.latitude.to_radians();

    let y = d_lon.sin() * latitude_2.cos();
    let x = latitude_1.cos() * latitude_2.sin() - latitude_1.sin() * latitude_2.cos() * d_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Smallest angle between two bearings, in `[0, 180]`.
pub fn heading_change(from: f64, to: f64) -> f64 {
    let change = (to - from).abs() % 360.0;

    match change > 180.0 {
        true => 360.0 - change,
        false => change,
    }
}

/// Implied speed in km/h, `None` if time doesn't advance from `from` to `to`.
pub fn speed_kmh(from: &Sample, to: &Sample) -> Option<f64> {
    if to.timestamp <= from.timestamp {
        return None;
    }

    let seconds = to.elapsed_since(from).as_secs_f64();

    Some(distance(from, to) / seconds * MS_TO_KMH)
}

/// Calculates distance from point A to point B in meters
fn haversine(longitude_1: f64, latitude_1: f64, longitude_2: f64, latitude_2: f64) -> f64 {
    let d_lat = (latitude_2 - latitude_1).to_radians();
    let d_lon = (longitude_2 - longitude_1).to_radians();

    let latitude_1 = latitude_1.to_radians();
    let latitude_2 = latitude_2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * latitude_1.cos() * latitude_2.cos();

    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
