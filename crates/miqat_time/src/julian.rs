//! Gregorian calendar → Julian Date conversion.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed.), ch. 7. Valid for
//! Gregorian dates from 1582-Oct-15 onward, which covers every date a
//! prayer schedule is asked for.

use chrono::{Datelike, NaiveDate};

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` may carry a fractional part: `calendar_to_jd(2000, 1, 1.5)` is
/// 2000-Jan-01 12:00, i.e. [`J2000_JD`].
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Julian Date at 0h UT of a calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), date.day() as f64)
}
