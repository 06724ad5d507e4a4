//! Observer coordinates on the Earth's surface.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Geographic coordinates in degrees.
///
/// Construction is infallible so that values can flow in from a location
/// provider or a settings file unchanged; every computation validates them
/// through [`GeoCoordinates::validate`] before use and rejects out-of-range
/// input instead of clamping it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude: f64,
}

impl GeoCoordinates {
    /// Create coordinates without validating them.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create coordinates, failing if either component is out of range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        Self::new(latitude, longitude).validate()
    }

    /// Whether both components are finite and in range. The bounds are inclusive.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Return `self` if valid, otherwise [`GeoError::InvalidCoordinates`].
    pub fn validate(self) -> Result<Self, GeoError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeoError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl std::fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}
