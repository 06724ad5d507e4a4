//! Geographic primitives for the prayer-time core.
//!
//! This crate provides:
//! - `GeoCoordinates` with inclusive range validation
//! - Great-circle initial bearing and haversine distance
//! - Qibla direction toward the Kaaba, compass labels, and heading alignment
//!
//! All functions are pure; bearings are relative to true North.

pub mod coordinates;
pub mod error;
pub mod great_circle;
pub mod qibla;

pub use coordinates::GeoCoordinates;
pub use error::GeoError;
pub use great_circle::{
    DEGENERATE_DISTANCE_KM, EARTH_RADIUS_KM, KM_PER_MILE, bearing_to, distance_to,
    haversine_km, initial_bearing_deg, normalize_degrees,
};
pub use qibla::{
    CompassPoint, DEFAULT_ALIGNMENT_TOLERANCE_DEG, KAABA, QiblaResult, angular_difference,
    is_aligned, qibla, relative_bearing,
};
