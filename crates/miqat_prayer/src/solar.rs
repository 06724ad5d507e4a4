//! Low-precision solar position and altitude-crossing times.
//!
//! Sun position follows the USNO "approximate solar coordinates" series,
//! good to about one arcminute between 1950 and 2050, which is far below
//! the one-minute resolution of a prayer timetable.
//!
//! All times are decimal hours after 0h UT of the date whose 0h UT Julian
//! Date is passed as `jd0`.

use miqat_geo::GeoCoordinates;
use miqat_time::J2000_JD;

/// Apparent altitude of the Sun's upper limb at sunrise/sunset, including
/// standard refraction (34') and semidiameter (16').
pub const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Declination and equation of time at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent declination in degrees.
    pub declination_deg: f64,
    /// Apparent minus mean solar time, in hours, within [-12, 12).
    pub equation_of_time_hours: f64,
}

/// Whether an altitude crossing happens before or after local noon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// Morning: the Sun climbs through the altitude.
    Rising,
    /// Evening: the Sun sinks through the altitude.
    Setting,
}

impl Crossing {
    pub const fn is_rising(self) -> bool {
        matches!(self, Self::Rising)
    }
}

/// Sun position at Julian Date `jd` (UT).
///
/// ```text
/// d = JD − 2451545
/// g = 357.529 + 0.98560028 d          mean anomaly
/// q = 280.459 + 0.98564736 d          mean longitude
/// L = q + 1.915 sin g + 0.020 sin 2g  ecliptic longitude
/// e = 23.439 − 0.00000036 d           obliquity
/// RA  = atan2(cos e sin L, cos L) / 15
/// Dec = asin(sin e sin L)
/// EqT = q/15 − RA
/// ```
pub fn solar_position(jd: f64) -> SolarPosition {
    let d = jd - J2000_JD;

    let g = (357.529 + 0.985_600_28 * d).rem_euclid(360.0).to_radians();
    let q = (280.459 + 0.985_647_36 * d).rem_euclid(360.0);
    let l = (q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin())
        .rem_euclid(360.0)
        .to_radians();
    let e = (23.439 - 0.000_000_36 * d).to_radians();

    let ra_hours = (e.cos() * l.sin()).atan2(l.cos()).to_degrees().rem_euclid(360.0) / 15.0;
    let declination_deg = (e.sin() * l.sin()).asin().to_degrees();
    let eqt = q / 15.0 - ra_hours;

    SolarPosition {
        declination_deg,
        equation_of_time_hours: (eqt + 12.0).rem_euclid(24.0) - 12.0,
    }
}

/// Sun position `hours` after 0h UT of the day starting at `jd0`.
pub fn solar_position_at(jd0: f64, hours: f64) -> SolarPosition {
    solar_position(jd0 + hours / 24.0)
}

/// UT hour of the Sun's transit over `longitude_deg`, with the equation of
/// time evaluated near `approx_hours`.
pub fn solar_noon_hours(jd0: f64, longitude_deg: f64, approx_hours: f64) -> f64 {
    let eqt = solar_position_at(jd0, approx_hours).equation_of_time_hours;
    12.0 - eqt - longitude_deg / 15.0
}

/// Hour angle, in degrees [0, 180], at which the Sun stands at `altitude_deg`.
///
/// ```text
/// cos H = (sin h − sin φ sin δ) / (cos φ cos δ)
/// ```
///
/// Returns `None` when |cos H| > 1: the Sun stays wholly above
/// (cos H < −1) or below (cos H > 1) that altitude all day.
pub fn hour_angle_deg(latitude_deg: f64, declination_deg: f64, altitude_deg: f64) -> Option<f64> {
    let phi = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    let cos_h = (altitude_deg.to_radians().sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());

    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

/// UT hour at which the Sun crosses `altitude_deg`, evaluated around the
/// estimate `approx_hours`.
///
/// Returns `None` if the altitude is not reached on this day.
pub fn time_at_altitude(
    jd0: f64,
    location: &GeoCoordinates,
    altitude_deg: f64,
    approx_hours: f64,
    crossing: Crossing,
) -> Option<f64> {
    let pos = solar_position_at(jd0, approx_hours);
    let noon = solar_noon_hours(jd0, location.longitude, approx_hours);
    let h = hour_angle_deg(location.latitude, pos.declination_deg, altitude_deg)? / 15.0;
    Some(if crossing.is_rising() { noon - h } else { noon + h })
}

/// Altitude of the Sun when an object's shadow equals `shadow_factor` times
/// its length plus its noon shadow.
///
/// ```text
/// h = atan(1 / (factor + tan |φ − δ|))
/// ```
pub fn asr_altitude_deg(latitude_deg: f64, declination_deg: f64, shadow_factor: f64) -> f64 {
    let noon_shadow = (latitude_deg - declination_deg).abs().to_radians().tan();
    (1.0 / (shadow_factor + noon_shadow)).atan().to_degrees()
}

/// UT hour of Asr for a shadow factor, evaluated around `approx_hours`.
pub fn asr_hours(
    jd0: f64,
    location: &GeoCoordinates,
    shadow_factor: f64,
    approx_hours: f64,
) -> Option<f64> {
    let dec = solar_position_at(jd0, approx_hours).declination_deg;
    let altitude = asr_altitude_deg(location.latitude, dec, shadow_factor);
    time_at_altitude(jd0, location, altitude, approx_hours, Crossing::Setting)
}
