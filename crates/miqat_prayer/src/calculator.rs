//! Daily prayer-time calculation.
//!
//! Each event is solved as an altitude crossing of the Sun around local
//! noon, refined twice by re-evaluating the Sun at the previous estimate.
//! With a [`HighLatitudeRule`] set, Fajr and Isha are held within a fraction
//! of the night around sunrise and sunset, which also covers twilight angles
//! that are never reached (high latitudes in summer).

use chrono::NaiveDate;
use log::debug;
use miqat_geo::GeoCoordinates;
use miqat_time::{instant_from_hours, julian_day};

use crate::error::PrayerError;
use crate::method::{CalculationConfig, CalculationMethod, CalculationParameters, IshaRule};
use crate::prayer_types::{HighLatitudeRule, Madhab, Prayer, PrayerAdjustments, PrayerTimes};
use crate::solar::{
    Crossing, SUNRISE_ALTITUDE_DEG, asr_altitude_deg, asr_hours, solar_noon_hours,
    solar_position_at, time_at_altitude,
};

/// Starting estimates in local mean solar hours, chronological order.
const INITIAL_GUESSES: [f64; 6] = [5.0, 6.0, 12.0, 13.0, 18.0, 18.0];

/// Number of times each event is re-solved at its previous estimate.
const REFINEMENT_PASSES: usize = 2;

const FAJR: usize = 0;
const SUNRISE: usize = 1;
const DHUHR: usize = 2;
const ASR: usize = 3;
const MAGHRIB: usize = 4;
const ISHA: usize = 5;

/// Computes prayer times for a fixed [`CalculationConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrayerTimeCalculator {
    config: CalculationConfig,
}

impl PrayerTimeCalculator {
    pub const fn new(config: CalculationConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CalculationConfig {
        &self.config
    }

    /// Prayer times at `location` for the calendar day `date`.
    pub fn compute(
        &self,
        location: &GeoCoordinates,
        date: NaiveDate,
    ) -> Result<PrayerTimes, PrayerError> {
        Self::compute_with(location, date, &self.config)
    }

    /// Prayer times for `count` consecutive days starting at `start`.
    ///
    /// Fails on the first day that cannot be computed.
    pub fn compute_days(
        &self,
        location: &GeoCoordinates,
        start: NaiveDate,
        count: u32,
    ) -> Result<Vec<PrayerTimes>, PrayerError> {
        let location = location.validate()?;
        start
            .iter_days()
            .take(count as usize)
            .map(|date| self.compute(&location, date))
            .collect()
    }

    /// Prayer times at `location` on `date` under an explicit configuration.
    ///
    /// Steps, in order:
    /// 1. validate coordinates (out-of-range input is rejected, not clamped)
    /// 2. solve the six events in UT hours after 0h UT of `date`
    /// 3. bound Fajr/Isha by the high-latitude rule, if any
    /// 4. round each instant per the configured [`Rounding`](miqat_time::Rounding)
    /// 5. add the method's published offsets, then the user adjustments
    ///
    /// The rule only bounds Fajr and Isha. A day without sunrise or sunset
    /// (polar day or night) or an Asr altitude the Sun never falls to is
    /// `UnreachableSolarAngle` whatever the rule.
    pub fn compute_with(
        location: &GeoCoordinates,
        date: NaiveDate,
        config: &CalculationConfig,
    ) -> Result<PrayerTimes, PrayerError> {
        let location = location.validate()?;
        let params = &config.parameters;
        let jd0 = julian_day(date);
        let shadow_factor = config.madhab.shadow_factor();

        let (hours, guesses) = solve_day(jd0, &location, params, shadow_factor);

        let sunrise = hours[SUNRISE].ok_or(PrayerError::UnreachableSolarAngle {
            prayer: Prayer::Sunrise,
            altitude_deg: SUNRISE_ALTITUDE_DEG,
        })?;
        let maghrib = hours[MAGHRIB].ok_or(PrayerError::UnreachableSolarAngle {
            prayer: Prayer::Maghrib,
            altitude_deg: SUNRISE_ALTITUDE_DEG,
        })?;
        let dhuhr = hours[DHUHR].unwrap_or(guesses[DHUHR]);
        let asr = match hours[ASR] {
            Some(h) => h,
            None => {
                let dec = solar_position_at(jd0, guesses[ASR]).declination_deg;
                return Err(PrayerError::UnreachableSolarAngle {
                    prayer: Prayer::Asr,
                    altitude_deg: asr_altitude_deg(location.latitude, dec, shadow_factor),
                });
            }
        };

        let night = || night_hours(jd0, &location, sunrise, maghrib);
        let rule = config.high_latitude_rule;

        let fajr = bounded_twilight(
            hours[FAJR],
            rule,
            Prayer::Fajr,
            params.fajr_angle,
            sunrise,
            night,
            date,
        )?;

        let isha = match params.isha {
            IshaRule::Interval(minutes) => maghrib + f64::from(minutes) / 60.0,
            IshaRule::Angle(angle) => {
                bounded_twilight(hours[ISHA], rule, Prayer::Isha, angle, maghrib, night, date)?
            }
        };

        let at = |h: f64| instant_from_hours(date, h, params.rounding);
        let times = PrayerTimes {
            date,
            fajr: at(fajr),
            sunrise: at(sunrise),
            dhuhr: at(dhuhr),
            asr: at(asr),
            maghrib: at(maghrib),
            isha: at(isha),
        };

        Ok(times.adjusted(&params.method_adjustments.combined(&config.adjustments)))
    }
}

/// Prayer times for one day from individually supplied settings.
///
/// `high_latitude_rule = None` makes an unreachable twilight angle an error.
pub fn compute_prayer_times(
    location: &GeoCoordinates,
    date: NaiveDate,
    method: CalculationMethod,
    madhab: Madhab,
    high_latitude_rule: Option<HighLatitudeRule>,
    adjustments: PrayerAdjustments,
) -> Result<PrayerTimes, PrayerError> {
    let config = CalculationConfig::new(method)
        .madhab(madhab)
        .high_latitude_rule(high_latitude_rule)
        .adjustments(adjustments);
    PrayerTimeCalculator::compute_with(location, date, &config)
}

/// Solve all six events. Returns the last pass's results (`None` where the
/// altitude is not reached) and the final estimates.
///
/// When a pass fails for an event, the next pass keeps the earlier estimate.
fn solve_day(
    jd0: f64,
    location: &GeoCoordinates,
    params: &CalculationParameters,
    shadow_factor: f64,
) -> ([Option<f64>; 6], [f64; 6]) {
    let lon_hours = location.longitude / 15.0;
    let mut guesses = INITIAL_GUESSES.map(|h| h - lon_hours);
    let mut hours = [None; 6];

    for _ in 0..REFINEMENT_PASSES {
        hours = solve_pass(jd0, location, params, shadow_factor, &guesses);
        for (guess, solved) in guesses.iter_mut().zip(hours) {
            if let Some(h) = solved {
                *guess = h;
            }
        }
    }
    (hours, guesses)
}

fn solve_pass(
    jd0: f64,
    location: &GeoCoordinates,
    params: &CalculationParameters,
    shadow_factor: f64,
    guesses: &[f64; 6],
) -> [Option<f64>; 6] {
    let isha = match params.isha {
        IshaRule::Angle(angle) => {
            time_at_altitude(jd0, location, -angle, guesses[ISHA], Crossing::Setting)
        }
        IshaRule::Interval(_) => None,
    };
    [
        time_at_altitude(jd0, location, -params.fajr_angle, guesses[FAJR], Crossing::Rising),
        time_at_altitude(jd0, location, SUNRISE_ALTITUDE_DEG, guesses[SUNRISE], Crossing::Rising),
        Some(solar_noon_hours(jd0, location.longitude, guesses[DHUHR])),
        asr_hours(jd0, location, shadow_factor, guesses[ASR]),
        time_at_altitude(jd0, location, SUNRISE_ALTITUDE_DEG, guesses[MAGHRIB], Crossing::Setting),
        isha,
    ]
}

/// Hours from today's sunset to the following sunrise.
///
/// If the next day has no sunrise, today's sunrise one day later stands in.
fn night_hours(jd0: f64, location: &GeoCoordinates, sunrise: f64, sunset: f64) -> f64 {
    let lon_hours = location.longitude / 15.0;
    let mut guess = INITIAL_GUESSES[SUNRISE] - lon_hours;
    let mut next_sunrise = None;
    for _ in 0..REFINEMENT_PASSES {
        next_sunrise =
            time_at_altitude(jd0 + 1.0, location, SUNRISE_ALTITUDE_DEG, guess, Crossing::Rising);
        if let Some(h) = next_sunrise {
            guess = h;
        }
    }
    next_sunrise.unwrap_or(sunrise) + 24.0 - sunset
}

/// Fajr or Isha held within the night fraction `rule` allows.
///
/// Fajr is no earlier than `anchor - portion` (anchor = sunrise) and Isha
/// no later than `anchor + portion` (anchor = sunset). An unreachable angle
/// takes the limit itself. Without a rule the angle time is used as solved,
/// and an unreachable angle is an error.
fn bounded_twilight(
    solved: Option<f64>,
    rule: Option<HighLatitudeRule>,
    prayer: Prayer,
    angle_deg: f64,
    anchor: f64,
    night_hours: impl FnOnce() -> f64,
    date: NaiveDate,
) -> Result<f64, PrayerError> {
    let Some(rule) = rule else {
        return solved.ok_or(PrayerError::UnreachableSolarAngle {
            prayer,
            altitude_deg: -angle_deg,
        });
    };
    let night = night_hours();
    let portion = rule.night_fraction(angle_deg) * night;
    let before_anchor = prayer == Prayer::Fajr;
    let limit = if before_anchor { anchor - portion } else { anchor + portion };
    let within = |h: f64| if before_anchor { h >= limit } else { h <= limit };

    match solved {
        Some(h) if within(h) => Ok(h),
        _ => {
            debug!(
                "{prayer} at {angle_deg}° held to {} on {date}: {:.1} min of a {:.2} h night",
                rule.key(),
                portion * 60.0,
                night
            );
            Ok(limit)
        }
    }
}
