//! Calendar and instant helpers for prayer-time computation.
//!
//! This crate provides:
//! - Gregorian calendar → Julian Date conversion
//! - Mapping of solver output (decimal hours after 0h UT) onto `chrono` instants
//! - Minute rounding policies applied to computed event times

pub mod instant;
pub mod julian;

pub use instant::{Rounding, instant_from_hours, utc_midnight};
pub use julian::{J2000_JD, calendar_to_jd, julian_day};
