//! `miqat.toml` settings file support.
//!
//! ```toml
//! [location]
//! latitude = 21.4225
//! longitude = 39.8262
//! utc_offset_minutes = 180
//!
//! [prayer]
//! method = "UmmAlQura"
//! madhab = "Shafi"
//! high_latitude_rule = "MiddleOfTheNight"   # "none" disables the fallback
//! rounding = "nearest"
//!
//! [prayer.adjustments]
//! fajr = 2
//! isha = -1
//! ```
//!
//! Every section and key is optional. Keys are kept as strings here and
//! resolved into typed values by [`Settings::calculation_config`], so that
//! an unknown method name is reported as such rather than as a TOML error.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::FixedOffset;
use log::{info, warn};
use miqat_geo::GeoCoordinates;
use miqat_prayer::{
    CalculationConfig, CalculationMethod, HighLatitudeRule, Madhab, PRAYERS, PrayerAdjustments,
};
use miqat_time::Rounding;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name searched for by [`Settings::from_default_location`].
pub const SETTINGS_FILE_NAME: &str = "miqat.toml";

/// Environment variable naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "MIQAT_CONFIG";

/// Largest accepted per-prayer adjustment, in minutes either way.
pub const MAX_ADJUSTMENT_MINUTES: i32 = 1440;

/// Value of `high_latitude_rule` that disables the fallback.
const NO_RULE: &str = "none";

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub location: Option<LocationSettings>,
    #[serde(default)]
    pub prayer: PrayerSettings,
}

/// Observer location and the display offset for local times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Calculation settings as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrayerSettings {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_high_latitude_rule")]
    pub high_latitude_rule: String,
    #[serde(default = "default_rounding")]
    pub rounding: String,
    #[serde(default)]
    pub adjustments: AdjustmentSettings,
}

/// Per-prayer minute corrections. Sunrise has no entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjustmentSettings {
    #[serde(default)]
    pub fajr: i32,
    #[serde(default)]
    pub dhuhr: i32,
    #[serde(default)]
    pub asr: i32,
    #[serde(default)]
    pub maghrib: i32,
    #[serde(default)]
    pub isha: i32,
}

fn default_method() -> String {
    CalculationMethod::MuslimWorldLeague.key().to_string()
}

fn default_madhab() -> String {
    Madhab::Shafi.key().to_string()
}

fn default_high_latitude_rule() -> String {
    HighLatitudeRule::MiddleOfTheNight.key().to_string()
}

fn default_rounding() -> String {
    Rounding::Nearest.key().to_string()
}

impl Default for PrayerSettings {
    fn default() -> Self {
        Self {
            method: default_method(),
            madhab: default_madhab(),
            high_latitude_rule: default_high_latitude_rule(),
            rounding: default_rounding(),
            adjustments: AdjustmentSettings::default(),
        }
    }
}

impl From<AdjustmentSettings> for PrayerAdjustments {
    fn from(a: AdjustmentSettings) -> Self {
        PrayerAdjustments {
            fajr: a.fajr,
            dhuhr: a.dhuhr,
            asr: a.asr,
            maghrib: a.maghrib,
            isha: a.isha,
        }
    }
}

impl AdjustmentSettings {
    /// Reject any adjustment beyond [`MAX_ADJUSTMENT_MINUTES`].
    pub fn validate(&self) -> Result<PrayerAdjustments, ConfigError> {
        let adjustments = PrayerAdjustments::from(*self);
        for prayer in PRAYERS {
            let minutes = adjustments.minutes(prayer);
            if minutes.abs() > MAX_ADJUSTMENT_MINUTES {
                return Err(ConfigError::AdjustmentOutOfRange { prayer, minutes });
            }
        }
        Ok(adjustments)
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = content.parse()?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load the first settings file that exists among `paths`.
    pub fn from_first_existing(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Err(ConfigError::NotFound {
                searched: paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Load settings from the default location.
    ///
    /// If `MIQAT_CONFIG` is set, only that path is tried. Otherwise, in order:
    /// 1. `miqat.toml` in the current directory
    /// 2. `config/miqat.toml`
    /// 3. `$XDG_CONFIG_HOME/miqat/miqat.toml` (or `~/.config/miqat/miqat.toml`)
    pub fn from_default_location() -> Result<Self, ConfigError> {
        Self::from_first_existing(&default_search_paths())
    }

    /// Like [`Self::from_default_location`], but falls back to defaults when
    /// no file exists. Read and parse failures are still errors.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::from_default_location() {
            Err(ConfigError::NotFound { searched }) => {
                warn!("no settings file found (searched: {searched}); using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validated observer coordinates, if a location is configured.
    pub fn coordinates(&self) -> Result<Option<GeoCoordinates>, ConfigError> {
        self.location
            .as_ref()
            .map(|l| GeoCoordinates::try_new(l.latitude, l.longitude).map_err(ConfigError::from))
            .transpose()
    }

    /// Display offset for local times; UTC when no location is configured.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.location.as_ref().map_or(0, |l| l.utc_offset_minutes);
        parse_utc_offset_minutes(minutes)
    }

    /// Resolve the `[prayer]` section into a calculation configuration.
    pub fn calculation_config(&self) -> Result<CalculationConfig, ConfigError> {
        self.prayer.calculation_config()
    }
}

impl PrayerSettings {
    /// Resolve method, madhab, rule and rounding keys and check adjustments.
    pub fn calculation_config(&self) -> Result<CalculationConfig, ConfigError> {
        let method: CalculationMethod = self.method.parse()?;
        let madhab: Madhab = self.madhab.parse()?;
        let rule = parse_high_latitude_rule(&self.high_latitude_rule)?;
        let rounding = Rounding::from_key(&self.rounding)
            .ok_or_else(|| ConfigError::UnknownRounding(self.rounding.clone()))?;
        let adjustments = self.adjustments.validate()?;

        Ok(CalculationConfig::new(method)
            .madhab(madhab)
            .high_latitude_rule(rule)
            .rounding(rounding)
            .adjustments(adjustments))
    }
}

/// Parse a high-latitude rule key; `"none"` yields `None`.
pub fn parse_high_latitude_rule(key: &str) -> Result<Option<HighLatitudeRule>, ConfigError> {
    if key.trim().eq_ignore_ascii_case(NO_RULE) {
        return Ok(None);
    }
    Ok(Some(key.parse()?))
}

/// `FixedOffset` for an offset in minutes east of UTC.
pub fn parse_utc_offset_minutes(minutes: i32) -> Result<FixedOffset, ConfigError> {
    if !(-1080..=1080).contains(&minutes) {
        return Err(ConfigError::InvalidUtcOffset(minutes));
    }
    FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidUtcOffset(minutes))
}

/// Candidate settings paths, most specific first.
pub fn default_search_paths() -> Vec<PathBuf> {
    if let Some(explicit) = env::var_os(SETTINGS_PATH_ENV) {
        return vec![PathBuf::from(explicit)];
    }

    let mut paths = vec![
        PathBuf::from(SETTINGS_FILE_NAME),
        Path::new("config").join(SETTINGS_FILE_NAME),
    ];
    let config_home = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")));
    if let Some(dir) = config_home {
        paths.push(dir.join("miqat").join(SETTINGS_FILE_NAME));
    }
    paths
}
