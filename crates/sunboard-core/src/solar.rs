//! Sunrise calculation from a simplified solar-position model.
//!
//! Accuracy is a few minutes -- good enough to rank exchanges by "who sees
//! daylight first", nowhere near ephemeris grade. The formulation follows
//! the classic sunrise equation: mean anomaly from day-of-year, equation of
//! center, ecliptic longitude, declination at fixed obliquity, then the
//! hour angle at the -0.833 degree elevation threshold (atmospheric
//! refraction plus the solar disk radius).
//!
//! Latitude/longitude are assumed pre-validated by the catalogue layer;
//! for any in-range input the function either returns an instant or `None`
//! (polar day / polar night), never panics.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// Earth's axial tilt in degrees, treated as constant.
const OBLIQUITY_DEG: f64 = 23.4397;

/// Solar elevation at the moment of sunrise, in degrees.
const SUNRISE_ELEVATION_DEG: f64 = -0.833;

/// Compute the UTC instant of sunrise at the given location on the given
/// calendar day, rounded to the nearest minute.
///
/// Returns `None` when the sun never crosses the sunrise elevation on that
/// day at that latitude (polar day or polar night). This is an expected
/// outcome for high latitudes, not an error.
pub fn sunrise_utc(date: NaiveDate, latitude: f64, longitude: f64) -> Option<DateTime<Utc>> {
    let minute = sunrise_minute_of_day(date, latitude, longitude)?;
    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(midnight + Duration::minutes(minute as i64))
}

/// Sunrise expressed as a whole minute since UTC midnight, in `[0, 1440)`.
fn sunrise_minute_of_day(date: NaiveDate, latitude: f64, longitude: f64) -> Option<u16> {
    let n = date.ordinal() as f64;

    // Solar mean anomaly and equation of center give the ecliptic longitude.
    let mean_anomaly = (357.5291 + 0.985_600_28 * n).rem_euclid(360.0);
    let m = mean_anomaly.to_radians();
    let center = 1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let ecliptic_lon = (mean_anomaly + center + 180.0 + 102.9372).rem_euclid(360.0);

    // Declination at fixed obliquity.
    let declination = (ecliptic_lon.to_radians().sin() * OBLIQUITY_DEG.to_radians().sin()).asin();

    // Hour angle at the sunrise elevation threshold.
    let lat = latitude.to_radians();
    let cos_hour_angle = (SUNRISE_ELEVATION_DEG.to_radians().sin()
        - lat.sin() * declination.sin())
        / (lat.cos() * declination.cos());
    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        // Polar day (< -1) or polar night (> 1): no sunrise today.
        return None;
    }
    let hour_angle_deg = cos_hour_angle.acos().to_degrees();

    // Solar noon is at 720 minutes UTC, shifted by longitude (4 min/degree)
    // and the equation of time; sunrise precedes noon by the hour angle.
    let minutes = 720.0 - 4.0 * (longitude + hour_angle_deg) - equation_of_time_minutes(n);
    let wrapped = minutes.rem_euclid(1440.0).round() as u32 % 1440;
    Some(wrapped as u16)
}

/// Equation of time in minutes (Spencer's Fourier fit).
fn equation_of_time_minutes(day_of_year: f64) -> f64 {
    let g = std::f64::consts::TAU / 365.0 * (day_of_year - 1.0);
    229.18
        * (0.000_075 + 0.001_868 * g.cos() - 0.032_077 * g.sin()
            - 0.014_615 * (2.0 * g).cos()
            - 0.040_849 * (2.0 * g).sin())
}
