//! Qibla direction: bearing and distance toward the Kaaba.

use serde::{Deserialize, Serialize};

use crate::coordinates::GeoCoordinates;
use crate::error::GeoError;
use crate::great_circle::{KM_PER_MILE, bearing_to, distance_to, normalize_degrees};

/// Reference point of the Qibla: the Kaaba in Mecca.
pub const KAABA: GeoCoordinates = GeoCoordinates::new(21.4225, 39.8262);

/// Angular window within which a device heading counts as facing the Qibla.
pub const DEFAULT_ALIGNMENT_TOLERANCE_DEG: f64 = 10.0;

/// Bearing toward and distance to the Kaaba from one observer location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaResult {
    /// Initial great-circle bearing in degrees, [0, 360), clockwise from true North.
    pub bearing_degrees: f64,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

impl QiblaResult {
    /// Distance in statute miles.
    pub fn distance_miles(&self) -> f64 {
        self.distance_km / KM_PER_MILE
    }

    /// Nearest 16-wind compass point of the bearing.
    pub fn compass_point(&self) -> CompassPoint {
        CompassPoint::from_bearing(self.bearing_degrees)
    }
}

/// Compute the Qibla from an observer location.
///
/// At the Kaaba itself the bearing is degenerate and reported as 0.0.
pub fn qibla(from: &GeoCoordinates) -> Result<QiblaResult, GeoError> {
    Ok(QiblaResult {
        bearing_degrees: bearing_to(from, &KAABA)?,
        distance_km: distance_to(from, &KAABA)?,
    })
}

/// Rotation of the Qibla relative to a device heading, in [0, 360).
///
/// This is the angle a compass arrow must be turned clockwise from the
/// device's forward direction to point at the Kaaba. `heading_deg` is taken
/// as-is; no magnetic declination correction is made.
pub fn relative_bearing(qibla_deg: f64, heading_deg: f64) -> f64 {
    normalize_degrees(qibla_deg - heading_deg)
}

/// Smallest angle between two directions, in [0, 180].
pub fn angular_difference(a_deg: f64, b_deg: f64) -> f64 {
    let d = normalize_degrees(a_deg - b_deg);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Whether a heading lies within `tolerance_deg` of the Qibla bearing.
pub fn is_aligned(qibla_deg: f64, heading_deg: f64, tolerance_deg: f64) -> bool {
    angular_difference(qibla_deg, heading_deg) <= tolerance_deg
}

/// The 16 points of the compass rose.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points, clockwise from North.
    pub const fn all() -> &'static [CompassPoint; 16] {
        &ALL_COMPASS_POINTS
    }

    /// Nearest point to a bearing in degrees.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let sector = (normalize_degrees(bearing_deg) / 22.5).round() as usize % 16;
        ALL_COMPASS_POINTS[sector]
    }

    /// Abbreviated label, e.g. `"NNE"`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NNE => "NNE",
            Self::NE => "NE",
            Self::ENE => "ENE",
            Self::E => "E",
            Self::ESE => "ESE",
            Self::SE => "SE",
            Self::SSE => "SSE",
            Self::S => "S",
            Self::SSW => "SSW",
            Self::SW => "SW",
            Self::WSW => "WSW",
            Self::W => "W",
            Self::WNW => "WNW",
            Self::NW => "NW",
            Self::NNW => "NNW",
        }
    }
}

const ALL_COMPASS_POINTS: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::NNE,
    CompassPoint::NE,
    CompassPoint::ENE,
    CompassPoint::E,
    CompassPoint::ESE,
    CompassPoint::SE,
    CompassPoint::SSE,
    CompassPoint::S,
    CompassPoint::SSW,
    CompassPoint::SW,
    CompassPoint::WSW,
    CompassPoint::W,
    CompassPoint::WNW,
    CompassPoint::NW,
    CompassPoint::NNW,
];

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
