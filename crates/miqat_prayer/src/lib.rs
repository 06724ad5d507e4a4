//! Prayer-time calculation and schedule queries.
//!
//! This crate provides:
//! - Low-precision solar position and altitude-crossing times
//! - Calculation methods (MWL, Egyptian, Karachi, Umm al-Qura, Dubai, ISNA)
//! - Daily prayer times with high-latitude fallbacks and minute adjustments
//! - Current/next prayer queries and time-remaining formatting
//!
//! Everything is pure and deterministic: identical inputs give
//! bit-identical outputs.

pub mod calculator;
pub mod error;
pub mod method;
pub mod prayer_types;
pub mod schedule;
pub mod solar;

pub use calculator::{PrayerTimeCalculator, compute_prayer_times};
pub use error::PrayerError;
pub use method::{
    CalculationConfig, CalculationMethod, CalculationParameters, IshaRule,
    UMM_AL_QURA_ISHA_MINUTES,
};
pub use prayer_types::{
    HighLatitudeRule, Madhab, PRAYERS, Prayer, PrayerAdjustments, PrayerTimes,
};
pub use schedule::{
    NextPrayer, TimeRemaining, current_prayer, next_prayer, next_prayer_across, time_remaining,
    upcoming_prayers,
};
pub use solar::{SUNRISE_ALTITUDE_DEG, SolarPosition, solar_position};
