//! Error types for settings loading.

use std::path::PathBuf;

use miqat_geo::GeoError;
use miqat_prayer::{Prayer, PrayerError};
use thiserror::Error;

/// Errors from reading, parsing or interpreting a settings file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// A method, madhab or high-latitude rule key was not recognized.
    #[error(transparent)]
    Prayer(#[from] PrayerError),
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error("unknown rounding mode: {0:?}")]
    UnknownRounding(String),
    /// Offset beyond ±18 h.
    #[error("utc_offset_minutes {0} is outside [-1080, 1080]")]
    InvalidUtcOffset(i32),
    /// A per-prayer adjustment beyond one day.
    #[error("{prayer} adjustment of {minutes} min is outside [-1440, 1440]")]
    AdjustmentOutOfRange { prayer: Prayer, minutes: i32 },
    #[error("no settings file found (searched: {searched})")]
    NotFound { searched: String },
}
