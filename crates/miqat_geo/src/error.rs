//! Error types for geographic inputs.

use thiserror::Error;

/// Errors from coordinate validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or a non-finite value.
    #[error(
        "invalid coordinates: latitude {latitude} must be within [-90, 90] \
         and longitude {longitude} within [-180, 180]"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}
