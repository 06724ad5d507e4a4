//! Error types for prayer-time calculation.

use miqat_geo::GeoError;
use thiserror::Error;

use crate::prayer_types::Prayer;

/// Errors from prayer-time calculation and configuration parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PrayerError {
    /// Latitude or longitude outside the valid range.
    #[error(
        "invalid coordinates: latitude {latitude} must be within [-90, 90] \
         and longitude {longitude} within [-180, 180]"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    /// The sun never reaches the altitude an event needs on this date, and
    /// no high-latitude rule applies.
    #[error("sun does not reach {altitude_deg:.3}° altitude for {prayer} on this date")]
    UnreachableSolarAngle { prayer: Prayer, altitude_deg: f64 },
    /// Calculation method key not recognized.
    #[error("unknown calculation method: {0:?}")]
    UnknownCalculationMethod(String),
    /// Madhab key not recognized.
    #[error("unknown madhab: {0:?}")]
    UnknownMadhab(String),
    /// High-latitude rule key not recognized.
    #[error("unknown high-latitude rule: {0:?}")]
    UnknownHighLatitudeRule(String),
}

impl From<GeoError> for PrayerError {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::InvalidCoordinates {
                latitude,
                longitude,
            } => Self::InvalidCoordinates {
                latitude,
                longitude,
            },
        }
    }
}
