//! Types for prayer-time calculation: prayers, madhab, high-latitude rules,
//! minute adjustments, and the computed daily times.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::Serialize;

use crate::error::PrayerError;

/// The six daily solar events. Sunrise is informational: it is never a
/// "current" or "next" prayer and can never be adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

/// The five ritual prayers in chronological order.
pub const PRAYERS: [Prayer; 5] = [
    Prayer::Fajr,
    Prayer::Dhuhr,
    Prayer::Asr,
    Prayer::Maghrib,
    Prayer::Isha,
];

impl Prayer {
    /// All six events in chronological order.
    pub const fn all() -> &'static [Prayer; 6] {
        &[
            Self::Fajr,
            Self::Sunrise,
            Self::Dhuhr,
            Self::Asr,
            Self::Maghrib,
            Self::Isha,
        ]
    }

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Sunrise => "sunrise",
            Self::Dhuhr => "dhuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
        }
    }

    /// Whether this is one of the five prayers (everything but Sunrise).
    pub const fn is_salah(self) -> bool {
        !matches!(self, Self::Sunrise)
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// School of jurisprudence; only the Asr shadow rule depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Madhab {
    /// Asr when shadow = object length + noon shadow.
    #[default]
    Shafi,
    /// Asr when shadow = 2 × object length + noon shadow.
    Hanafi,
}

impl Madhab {
    /// Shadow-length multiplier used in the Asr altitude.
    pub const fn shadow_factor(self) -> f64 {
        match self {
            Self::Shafi => 1.0,
            Self::Hanafi => 2.0,
        }
    }

    /// Canonical key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Shafi => "Shafi",
            Self::Hanafi => "Hanafi",
        }
    }
}

impl FromStr for Madhab {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shafi" | "standard" => Ok(Self::Shafi),
            "hanafi" => Ok(Self::Hanafi),
            _ => Err(PrayerError::UnknownMadhab(s.to_string())),
        }
    }
}

/// Fallback for Fajr/Isha when the twilight angle is never reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighLatitudeRule {
    /// Fajr no earlier than half the night before sunrise; Isha likewise after sunset.
    MiddleOfTheNight,
    /// One seventh of the night.
    SeventhOfTheNight,
    /// A fraction of the night equal to twilight angle / 60.
    TwilightAngle,
}

impl HighLatitudeRule {
    /// All rules.
    pub const fn all() -> &'static [HighLatitudeRule; 3] {
        &[
            Self::MiddleOfTheNight,
            Self::SeventhOfTheNight,
            Self::TwilightAngle,
        ]
    }

    /// Canonical key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::MiddleOfTheNight => "MiddleOfTheNight",
            Self::SeventhOfTheNight => "SeventhOfTheNight",
            Self::TwilightAngle => "TwilightAngle",
        }
    }

    /// Fraction of the night between sunset and the next sunrise assigned to
    /// the twilight of a prayer with the given depression angle.
    pub fn night_fraction(self, twilight_angle_deg: f64) -> f64 {
        match self {
            Self::MiddleOfTheNight => 1.0 / 2.0,
            Self::SeventhOfTheNight => 1.0 / 7.0,
            Self::TwilightAngle => twilight_angle_deg / 60.0,
        }
    }
}

impl FromStr for HighLatitudeRule {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| PrayerError::UnknownHighLatitudeRule(s.to_string()))
    }
}

/// Signed minute corrections per prayer. There is no Sunrise field: Sunrise
/// is never adjustable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrayerAdjustments {
    pub fajr: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerAdjustments {
    /// Minutes for a prayer; always 0 for Sunrise.
    pub const fn minutes(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => 0,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Field-wise sum of two adjustment sets, saturating at the `i32` range.
    pub const fn combined(&self, other: &Self) -> Self {
        Self {
            fajr: self.fajr.saturating_add(other.fajr),
            dhuhr: self.dhuhr.saturating_add(other.dhuhr),
            asr: self.asr.saturating_add(other.asr),
            maghrib: self.maghrib.saturating_add(other.maghrib),
            isha: self.isha.saturating_add(other.isha),
        }
    }

    /// Whether every correction is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// The six event instants of one calendar day at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PrayerTimes {
    /// Calendar date these times belong to.
    pub date: NaiveDate,
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
}

impl PrayerTimes {
    /// Instant of one event.
    pub const fn time(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// All six events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        Prayer::all().iter().map(move |&p| (p, self.time(p)))
    }

    /// The five prayers (no Sunrise) in chronological order.
    pub fn salah(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        PRAYERS.into_iter().map(move |p| (p, self.time(p)))
    }

    /// Whether the six instants are strictly increasing.
    pub fn is_ordered(&self) -> bool {
        self.fajr < self.sunrise
            && self.sunrise < self.dhuhr
            && self.dhuhr < self.asr
            && self.asr < self.maghrib
            && self.maghrib < self.isha
    }

    /// The six events expressed in a fixed UTC offset, for display.
    pub fn with_offset(&self, offset: FixedOffset) -> [(Prayer, DateTime<FixedOffset>); 6] {
        let all = *Prayer::all();
        all.map(|p| (p, self.time(p).with_timezone(&offset)))
    }

    /// A copy with `adjustments` added on top (Sunrise untouched).
    pub fn adjusted(&self, adjustments: &PrayerAdjustments) -> Self {
        let shift = |prayer: Prayer| {
            self.time(prayer) + TimeDelta::minutes(i64::from(adjustments.minutes(prayer)))
        };
        Self {
            date: self.date,
            fajr: shift(Prayer::Fajr),
            sunrise: self.sunrise,
            dhuhr: shift(Prayer::Dhuhr),
            asr: shift(Prayer::Asr),
            maghrib: shift(Prayer::Maghrib),
            isha: shift(Prayer::Isha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> PrayerTimes {
        let at = |h, m| Utc.with_ymd_and_hms(2024, 3, 20, h, m, 0).unwrap();
        PrayerTimes {
            date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            fajr: at(2, 8),
            sunrise: at(3, 25),
            dhuhr: at(9, 28),
            asr: at(12, 53),
            maghrib: at(15, 32),
            isha: at(17, 2),
        }
    }

    #[test]
    fn prayers_exclude_sunrise() {
        assert!(!PRAYERS.contains(&Prayer::Sunrise));
        assert!(PRAYERS.iter().all(|p| p.is_salah()));
        assert!(!Prayer::Sunrise.is_salah());
    }

    #[test]
    fn madhab_factors() {
        assert_eq!(Madhab::Shafi.shadow_factor(), 1.0);
        assert_eq!(Madhab::Hanafi.shadow_factor(), 2.0);
        assert_eq!(Madhab::default(), Madhab::Shafi);
    }

    #[test]
    fn madhab_parse() {
        assert_eq!("Hanafi".parse::<Madhab>().unwrap(), Madhab::Hanafi);
        assert_eq!("shafi".parse::<Madhab>().unwrap(), Madhab::Shafi);
        assert_eq!(
            "Maliki".parse::<Madhab>().unwrap_err(),
            PrayerError::UnknownMadhab("Maliki".into())
        );
    }

    #[test]
    fn high_latitude_fractions() {
        assert_eq!(HighLatitudeRule::MiddleOfTheNight.night_fraction(18.0), 0.5);
        assert_eq!(HighLatitudeRule::SeventhOfTheNight.night_fraction(18.0), 1.0 / 7.0);
        assert_eq!(HighLatitudeRule::TwilightAngle.night_fraction(18.0), 0.3);
    }

    #[test]
    fn high_latitude_parse() {
        for rule in HighLatitudeRule::all() {
            assert_eq!(rule.key().parse::<HighLatitudeRule>().unwrap(), *rule);
        }
        assert_eq!(
            "seventhofthenight".parse::<HighLatitudeRule>().unwrap(),
            HighLatitudeRule::SeventhOfTheNight
        );
        assert!("AngleBased".parse::<HighLatitudeRule>().is_err());
    }

    #[test]
    fn sunrise_never_adjustable() {
        let adj = PrayerAdjustments {
            fajr: 3,
            dhuhr: 1,
            asr: -2,
            maghrib: 4,
            isha: -5,
        };
        assert_eq!(adj.minutes(Prayer::Sunrise), 0);
        let t = sample();
        let shifted = t.adjusted(&adj);
        assert_eq!(shifted.sunrise, t.sunrise);
        assert_eq!(shifted.fajr - t.fajr, TimeDelta::minutes(3));
        assert_eq!(shifted.isha - t.isha, TimeDelta::minutes(-5));
    }

    #[test]
    fn combined_adjustments_add() {
        let a = PrayerAdjustments {
            dhuhr: 1,
            ..Default::default()
        };
        let b = PrayerAdjustments {
            dhuhr: 2,
            isha: 7,
            ..Default::default()
        };
        let c = a.combined(&b);
        assert_eq!((c.dhuhr, c.isha, c.fajr), (3, 7, 0));
        assert!(PrayerAdjustments::default().is_zero());
        assert!(!c.is_zero());
    }

    #[test]
    fn combined_adjustments_saturate() {
        let a = PrayerAdjustments {
            dhuhr: i32::MAX,
            fajr: i32::MIN,
            ..Default::default()
        };
        let b = PrayerAdjustments {
            dhuhr: 3,
            fajr: -3,
            ..Default::default()
        };
        let c = a.combined(&b);
        assert_eq!((c.dhuhr, c.fajr), (i32::MAX, i32::MIN));
    }

    #[test]
    fn times_iterate_in_order() {
        let t = sample();
        assert!(t.is_ordered());
        let names: Vec<_> = t.iter().map(|(p, _)| p).collect();
        assert_eq!(names, Prayer::all().to_vec());
        assert_eq!(t.salah().count(), 5);
    }

    #[test]
    fn offset_view_keeps_instants() {
        let t = sample();
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let local = t.with_offset(riyadh);
        assert_eq!(local[0].0, Prayer::Fajr);
        assert_eq!(local[0].1.to_string(), "2024-03-20 05:08:00 +03:00");
        assert_eq!(local[5].1, t.isha);
    }
}
