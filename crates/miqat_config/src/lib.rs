//! Settings for the prayer-time tools.
//!
//! Reads `miqat.toml` (location, display offset, calculation method and
//! adjustments) and resolves it into a [`miqat_prayer::CalculationConfig`].

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{
    AdjustmentSettings, LocationSettings, PrayerSettings, SETTINGS_FILE_NAME, SETTINGS_PATH_ENV,
    Settings, default_search_paths, parse_high_latitude_rule, parse_utc_offset_minutes,
};
