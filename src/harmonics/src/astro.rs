//! Astronomical ephemeris formulas.
//!
//! Low-precision solar/lunar theory: mean longitudes of the Moon and Sun,
//! the lunar ascending node, the lunar perigee and the solar perihelion,
//! all as cubic polynomials in Julian centuries since J2000.0. Everything
//! here is a pure function of a GMT calendar date plus hour and minute.

use chrono::Datelike;
use chrono::NaiveDate;
use std::f64::consts::PI;

/// Julian days for January 1st 2000 12:00 hours.
const JULIAN_DAYS_FOR_EPOCH: f64 = 2451545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// First day of the Gregorian calendar, as (year, month, day).
const GREGORIAN_REFORM: (i32, u32, u32) = (1582, 10, 15);

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Wraps an angle in degrees into `[0, 360)`.
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

fn polynomial(x: f64, c0: f64, c1: f64, c2: f64, c3: f64) -> f64 {
    c0 + x * (c1 + x * (c2 + c3 * x))
}

/// Continuous Julian Day Number for the given calendar date and GMT time
/// of day.
///
/// Dates on or after 1582-10-15 are treated as Gregorian and receive the
/// `2 - a + a/4` century correction; earlier dates are treated as Julian
/// calendar dates and get none.
pub fn calculate_julian_ephemeris_day(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let mut year = date.year();
    let mut month = date.month() as i32;
    // January and February count as months 13 and 14 of the previous year.
    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let day = date.day() as f64 + (hour as f64 * 60.0 + minute as f64) / 1440.0;

    let a = year / 100;
    let is_gregorian_date = (date.year(), date.month(), date.day()) >= GREGORIAN_REFORM;
    let b = if is_gregorian_date { 2 - a + a / 4 } else { 0 };

    (365.25 * (year as f64 + 4716.0)).trunc() + (30.6001 * (month as f64 + 1.0)).trunc()
        + day
        + b as f64
        - 1524.5
}

/// Julian centuries elapsed since 2000-01-01 12:00 GMT.
pub fn calculate_julian_centuries_since_epoch(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let julian_days = calculate_julian_ephemeris_day(date, hour, minute);
    (julian_days - JULIAN_DAYS_FOR_EPOCH) / DAYS_PER_JULIAN_CENTURY
}

/// Mean longitude of the Moon, degrees in `[0, 360)`.
pub fn calculate_moon_mean_longitude(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let t = calculate_julian_centuries_since_epoch(date, hour, minute);
    normalize_degrees(polynomial(t, 218.3164477, 481_267.88123421, -0.0015786, 0.0000019))
}

/// Mean longitude of the Sun, degrees in `[0, 360)`.
pub fn calculate_sun_mean_longitude(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let t = calculate_julian_centuries_since_epoch(date, hour, minute);
    normalize_degrees(polynomial(t, 280.46646, 36_000.76983, -0.0003032, 0.0))
}

/// Longitude of the Moon's ascending node, degrees in `[0, 360)`.
pub fn calculate_lunar_ascending_node_longitude(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let t = calculate_julian_centuries_since_epoch(date, hour, minute);
    normalize_degrees(polynomial(
        t,
        125.04452,
        -1934.136261,
        0.0020708,
        1.0 / 450_000.0,
    ))
}

/// Mean longitude of the lunar perigee, degrees in `[0, 360)`.
pub fn calculate_lunar_perigee(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let t = calculate_julian_centuries_since_epoch(date, hour, minute);
    normalize_degrees(polynomial(
        t,
        83.3532465,
        4069.0137287,
        -0.0103200,
        -1.0 / 80_053.0,
    ))
}

/// Longitude of the solar perihelion, degrees in `[0, 360)`.
pub fn calculate_perihelion_longitude(date: NaiveDate, hour: u32, minute: u32) -> f64 {
    let t = calculate_julian_centuries_since_epoch(date, hour, minute);
    normalize_degrees(polynomial(
        t,
        102.937348,
        1.7195366,
        0.00045688,
        -0.000000018,
    ))
}
