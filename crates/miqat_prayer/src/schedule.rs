//! Queries over a computed day: which prayer is current, which comes next,
//! and how long until it.
//!
//! Only the five prayers take part; Sunrise is never current or next.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::prayer_types::{Prayer, PrayerTimes};

/// A prayer and the instant it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub time: DateTime<Utc>,
}

/// First prayer strictly after `now`.
///
/// After Isha this wraps to the same day's Fajr, which is already in the
/// past. Use [`next_prayer_across`] when tomorrow's times are available.
pub fn next_prayer(times: &PrayerTimes, now: DateTime<Utc>) -> NextPrayer {
    upcoming_prayers(times, now).next().unwrap_or(NextPrayer {
        prayer: Prayer::Fajr,
        time: times.fajr,
    })
}

/// First prayer strictly after `now`, rolling over into `tomorrow` after
/// today's Isha.
pub fn next_prayer_across(
    today: &PrayerTimes,
    tomorrow: &PrayerTimes,
    now: DateTime<Utc>,
) -> NextPrayer {
    upcoming_prayers(today, now)
        .chain(upcoming_prayers(tomorrow, now))
        .next()
        .unwrap_or(NextPrayer {
            prayer: Prayer::Fajr,
            time: tomorrow.fajr,
        })
}

/// Prayers of `times` strictly after `now`, in order.
pub fn upcoming_prayers(
    times: &PrayerTimes,
    now: DateTime<Utc>,
) -> impl Iterator<Item = NextPrayer> + '_ {
    times
        .salah()
        .filter(move |&(_, time)| time > now)
        .map(|(prayer, time)| NextPrayer { prayer, time })
}

/// Prayer whose window contains `now`, if any.
///
/// Windows are half-open: Fajr until Sunrise, then Dhuhr until Asr, Asr
/// until Maghrib and Maghrib until Isha. Between Sunrise and Dhuhr, before
/// Fajr, and from Isha on there is no current prayer.
pub fn current_prayer(times: &PrayerTimes, now: DateTime<Utc>) -> Option<Prayer> {
    let windows = [
        (Prayer::Fajr, times.fajr, times.sunrise),
        (Prayer::Dhuhr, times.dhuhr, times.asr),
        (Prayer::Asr, times.asr, times.maghrib),
        (Prayer::Maghrib, times.maghrib, times.isha),
    ];
    windows
        .into_iter()
        .find(|&(_, start, end)| start <= now && now < end)
        .map(|(prayer, _, _)| prayer)
}

/// Whole hours and minutes until an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
}

impl TimeRemaining {
    pub const fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }

    /// Whether less than a whole minute remains.
    pub const fn is_now(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

/// Time from `now` until `target`, in whole minutes rounded down.
/// A target in the past gives zero.
pub fn time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let total = (target - now).num_minutes().max(0);
    TimeRemaining {
        hours: total / 60,
        minutes: total % 60,
    }
}

impl std::fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_now() {
            f.write_str("Now")
        } else if self.hours == 0 {
            write!(f, "{}m", self.minutes)
        } else {
            write!(f, "{}h {}m", self.hours, self.minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, h, m, s).unwrap()
    }

    #[test]
    fn remaining_floors_to_minutes() {
        let now = at(10, 0, 0);
        assert_eq!(
            time_remaining(now + TimeDelta::seconds(42 * 60 + 59), now),
            TimeRemaining { hours: 0, minutes: 42 }
        );
        assert_eq!(
            time_remaining(now + TimeDelta::minutes(185), now),
            TimeRemaining { hours: 3, minutes: 5 }
        );
    }

    #[test]
    fn remaining_clamps_past_targets() {
        let now = at(10, 0, 0);
        assert_eq!(time_remaining(now - TimeDelta::hours(2), now), TimeRemaining::default());
        assert_eq!(time_remaining(now + TimeDelta::seconds(30), now).to_string(), "Now");
    }

    #[test]
    fn remaining_display() {
        assert_eq!(TimeRemaining { hours: 0, minutes: 42 }.to_string(), "42m");
        assert_eq!(TimeRemaining { hours: 3, minutes: 5 }.to_string(), "3h 5m");
        assert_eq!(TimeRemaining { hours: 2, minutes: 0 }.to_string(), "2h 0m");
        assert_eq!(TimeRemaining { hours: 1, minutes: 1 }.total_minutes(), 61);
    }
}
