//! Calculation methods and the configuration a computation runs with.
//!
//! Each method fixes the Fajr twilight angle, the Isha rule (an angle, or a
//! fixed interval after Maghrib), and small per-prayer minute offsets that
//! the issuing authority publishes alongside its angles.

use std::str::FromStr;

use miqat_time::Rounding;

use crate::error::PrayerError;
use crate::prayer_types::{HighLatitudeRule, Madhab, PrayerAdjustments};

/// Published calculation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalculationMethod {
    /// Muslim World League: Fajr 18°, Isha 17°.
    #[default]
    MuslimWorldLeague,
    /// Egyptian General Authority of Survey: Fajr 19.5°, Isha 17.5°.
    Egyptian,
    /// University of Islamic Sciences, Karachi: Fajr 18°, Isha 18°.
    Karachi,
    /// Umm al-Qura University, Makkah: Fajr 18.5°, Isha 90 min after Maghrib.
    UmmAlQura,
    /// UAE General Authority of Islamic Affairs: Fajr 18.2°, Isha 18.2°.
    ///
    /// Dhuhr, Asr and Maghrib get +3 min. The authority also publishes a
    /// −3 min Sunrise offset, which is not applied: Sunrise is never adjusted.
    Dubai,
    /// Islamic Society of North America: Fajr 15°, Isha 15°.
    NorthAmerica,
}

impl CalculationMethod {
    /// All methods.
    pub const fn all() -> &'static [CalculationMethod; 6] {
        &[
            Self::MuslimWorldLeague,
            Self::Egyptian,
            Self::Karachi,
            Self::UmmAlQura,
            Self::Dubai,
            Self::NorthAmerica,
        ]
    }

    /// Canonical key, as accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::MuslimWorldLeague => "MuslimWorldLeague",
            Self::Egyptian => "Egyptian",
            Self::Karachi => "Karachi",
            Self::UmmAlQura => "UmmAlQura",
            Self::Dubai => "Dubai",
            Self::NorthAmerica => "NorthAmerica",
        }
    }

    /// Angles, Isha rule and published offsets of this method.
    pub const fn parameters(self) -> CalculationParameters {
        let dhuhr_plus_one = PrayerAdjustments {
            fajr: 0,
            dhuhr: 1,
            asr: 0,
            maghrib: 0,
            isha: 0,
        };
        let (fajr_angle, isha, method_adjustments) = match self {
            Self::MuslimWorldLeague => (18.0, IshaRule::Angle(17.0), dhuhr_plus_one),
            Self::Egyptian => (19.5, IshaRule::Angle(17.5), dhuhr_plus_one),
            Self::Karachi => (18.0, IshaRule::Angle(18.0), dhuhr_plus_one),
            Self::UmmAlQura => (
                18.5,
                IshaRule::Interval(UMM_AL_QURA_ISHA_MINUTES),
                PrayerAdjustments {
                    fajr: 0,
                    dhuhr: 0,
                    asr: 0,
                    maghrib: 0,
                    isha: 0,
                },
            ),
            Self::Dubai => (
                18.2,
                IshaRule::Angle(18.2),
                PrayerAdjustments {
                    fajr: 0,
                    dhuhr: 3,
                    asr: 3,
                    maghrib: 3,
                    isha: 0,
                },
            ),
            Self::NorthAmerica => (15.0, IshaRule::Angle(15.0), dhuhr_plus_one),
        };
        CalculationParameters {
            method: Some(self),
            fajr_angle,
            isha,
            method_adjustments,
            rounding: Rounding::Nearest,
        }
    }
}

impl FromStr for CalculationMethod {
    type Err = PrayerError;

    /// Parse a method key. Matching is case-insensitive; `MWL` and `ISNA`
    /// are accepted as aliases. Unknown keys are an error, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.eq_ignore_ascii_case("MWL") {
            return Ok(Self::MuslimWorldLeague);
        }
        if key.eq_ignore_ascii_case("ISNA") {
            return Ok(Self::NorthAmerica);
        }
        Self::all()
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| PrayerError::UnknownCalculationMethod(s.to_string()))
    }
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Minutes between Maghrib and Isha under Umm al-Qura outside Ramadan.
pub const UMM_AL_QURA_ISHA_MINUTES: u32 = 90;

/// How Isha is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IshaRule {
    /// Sun at this many degrees below the horizon after sunset.
    Angle(f64),
    /// Fixed number of minutes after Maghrib.
    Interval(u32),
}

/// Fully resolved angles and offsets for one computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    /// Preset these parameters came from; `None` for custom parameters.
    pub method: Option<CalculationMethod>,
    /// Fajr depression angle in degrees below the horizon.
    pub fajr_angle: f64,
    pub isha: IshaRule,
    /// Offsets published with the method, applied before user adjustments.
    pub method_adjustments: PrayerAdjustments,
    pub rounding: Rounding,
}

impl CalculationParameters {
    /// Custom parameters with no method offsets.
    pub const fn custom(fajr_angle: f64, isha: IshaRule) -> Self {
        Self {
            method: None,
            fajr_angle,
            isha,
            method_adjustments: PrayerAdjustments {
                fajr: 0,
                dhuhr: 0,
                asr: 0,
                maghrib: 0,
                isha: 0,
            },
            rounding: Rounding::Nearest,
        }
    }

    /// Same parameters with a different rounding mode.
    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }
}

impl Default for CalculationParameters {
    fn default() -> Self {
        CalculationMethod::default().parameters()
    }
}

/// Everything besides location and date that a computation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationConfig {
    pub parameters: CalculationParameters,
    pub madhab: Madhab,
    /// Fallback for unreachable twilight angles. `None` turns an unreachable
    /// angle into [`PrayerError::UnreachableSolarAngle`].
    pub high_latitude_rule: Option<HighLatitudeRule>,
    /// User minute corrections, applied last.
    pub adjustments: PrayerAdjustments,
}

impl CalculationConfig {
    /// Configuration for a preset with Shafi Asr, the middle-of-the-night
    /// fallback and no user adjustments.
    pub const fn new(method: CalculationMethod) -> Self {
        Self::custom(method.parameters())
    }

    /// Configuration for custom parameters, with the same defaults as [`Self::new`].
    pub const fn custom(parameters: CalculationParameters) -> Self {
        Self {
            parameters,
            madhab: Madhab::Shafi,
            high_latitude_rule: Some(HighLatitudeRule::MiddleOfTheNight),
            adjustments: PrayerAdjustments {
                fajr: 0,
                dhuhr: 0,
                asr: 0,
                maghrib: 0,
                isha: 0,
            },
        }
    }

    pub const fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub const fn high_latitude_rule(mut self, rule: Option<HighLatitudeRule>) -> Self {
        self.high_latitude_rule = rule;
        self
    }

    pub const fn adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub const fn rounding(mut self, rounding: Rounding) -> Self {
        self.parameters.rounding = rounding;
        self
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self::new(CalculationMethod::default())
    }
}
