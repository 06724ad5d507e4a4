//! Great-circle bearing and distance on a spherical Earth.
//!
//! Bearings are initial (forward) azimuths measured clockwise from true
//! North. No magnetic declination is applied; callers that combine these
//! with a magnetometer heading must correct the heading themselves.

use crate::coordinates::GeoCoordinates;
use crate::error::GeoError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per statute mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Below this separation (1 m) the bearing between two points is undefined
/// and reported as 0.0 (true North).
pub const DEGENERATE_DISTANCE_KM: f64 = 1.0e-3;

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if d >= 360.0 { 0.0 } else { d }
}

/// Initial great-circle bearing in degrees, [0, 360), without validation.
///
/// ```text
/// y = sin Δλ · cos φ2
/// x = cos φ1 · sin φ2 − sin φ1 · cos φ2 · cos Δλ
/// θ = atan2(y, x)
/// ```
pub fn initial_bearing_deg(from: &GeoCoordinates, to: &GeoCoordinates) -> f64 {
    let phi1 = from.latitude_rad();
    let phi2 = to.latitude_rad();
    let dlambda = (to.longitude - from.longitude).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Haversine great-circle distance in kilometres, without validation.
pub fn haversine_km(from: &GeoCoordinates, to: &GeoCoordinates) -> f64 {
    let phi1 = from.latitude_rad();
    let phi2 = to.latitude_rad();
    let dphi = (to.latitude - from.latitude).to_radians();
    let dlambda = (to.longitude - from.longitude).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` toward `to`, in degrees [0, 360) from true North.
///
/// Both points are validated. When the points coincide (closer than
/// [`DEGENERATE_DISTANCE_KM`]) the direction is undefined and 0.0 is returned.
pub fn bearing_to(from: &GeoCoordinates, to: &GeoCoordinates) -> Result<f64, GeoError> {
    let from = from.validate()?;
    let to = to.validate()?;
    if haversine_km(&from, &to) < DEGENERATE_DISTANCE_KM {
        return Ok(0.0);
    }
    Ok(initial_bearing_deg(&from, &to))
}

/// Great-circle distance from `from` to `to` in kilometres.
pub fn distance_to(from: &GeoCoordinates, to: &GeoCoordinates) -> Result<f64, GeoError> {
    let from = from.validate()?;
    let to = to.validate()?;
    Ok(haversine_km(&from, &to))
}
