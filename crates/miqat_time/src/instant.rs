//! Mapping fractional "hours after 0h UT" onto absolute instants.
//!
//! Solar-event solvers work in decimal hours relative to the start of the
//! UT day of the requested calendar date. Values below 0 or at/above 24 are
//! legal: an event for a far-east or far-west observer can fall on the
//! neighbouring UT day while still belonging to the local calendar date.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

/// How event instants are rounded before any minute adjustment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Nearest whole minute.
    #[default]
    Nearest,
    /// Next whole minute, unless already on one.
    Up,
    /// Millisecond resolution, no minute rounding.
    None,
}

impl Rounding {
    /// All rounding modes.
    pub const fn all() -> &'static [Rounding] {
        &[Self::Nearest, Self::Up, Self::None]
    }

    /// Lower-case key used in configuration files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Up => "up",
            Self::None => "none",
        }
    }

    /// Parse a configuration key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// Midnight (0h UT) at the start of `date`.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Instant lying `hours` after 0h UT of `date`, rounded per `rounding`.
pub fn instant_from_hours(date: NaiveDate, hours: f64, rounding: Rounding) -> DateTime<Utc> {
    let offset = match rounding {
        Rounding::Nearest => TimeDelta::minutes((hours * 60.0).round() as i64),
        Rounding::Up => TimeDelta::minutes((hours * 60.0 - 1.0e-9).ceil() as i64),
        Rounding::None => TimeDelta::milliseconds((hours * 3_600_000.0).round() as i64),
    };
    utc_midnight(date) + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn nearest_minute() {
        // 05:08:36 → 05:09
        let t = instant_from_hours(date(), 5.0 + 8.6 / 60.0, Rounding::Nearest);
        assert_eq!((t.hour(), t.minute(), t.second()), (5, 9, 0));
        // 05:08:29 → 05:08
        let t = instant_from_hours(date(), 5.0 + 8.0 / 60.0 + 29.0 / 3600.0, Rounding::Nearest);
        assert_eq!((t.hour(), t.minute()), (5, 8));
    }

    #[test]
    fn up_rounds_partial_minutes_forward() {
        let t = instant_from_hours(date(), 5.0 + 8.1 / 60.0, Rounding::Up);
        assert_eq!((t.hour(), t.minute()), (5, 9));
        let exact = instant_from_hours(date(), 6.0, Rounding::Up);
        assert_eq!((exact.hour(), exact.minute()), (6, 0));
    }

    #[test]
    fn none_keeps_seconds() {
        let t = instant_from_hours(date(), 12.0 + 1.0 / 3600.0 * 17.0, Rounding::None);
        assert_eq!((t.hour(), t.minute(), t.second()), (12, 0, 17));
    }

    #[test]
    fn negative_hours_land_on_previous_day() {
        let t = instant_from_hours(date(), -1.5, Rounding::Nearest);
        assert_eq!(t.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 19).unwrap());
        assert_eq!((t.hour(), t.minute()), (22, 30));
    }

    #[test]
    fn hours_beyond_24_land_on_next_day() {
        let t = instant_from_hours(date(), 25.25, Rounding::Nearest);
        assert_eq!(t.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 21).unwrap());
        assert_eq!((t.hour(), t.minute()), (1, 15));
    }

    #[test]
    fn rounding_keys() {
        assert_eq!(Rounding::from_key("Nearest"), Some(Rounding::Nearest));
        assert_eq!(Rounding::from_key(" up "), Some(Rounding::Up));
        assert_eq!(Rounding::from_key("none"), Some(Rounding::None));
        assert_eq!(Rounding::from_key("floor"), None);
        assert_eq!(Rounding::default(), Rounding::Nearest);
    }
}
