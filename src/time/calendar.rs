//! Gregorian calendar arithmetic for single-year schedule series.
//!
//! Every schedule in this crate covers exactly one calendar year at a fixed
//! sub-hourly resolution, so everything here reduces to conversions between
//! (month, day, hour) and a linear timestep index for a given year. All
//! functions are pure; invalid inputs return [`CalendarError`] rather than
//! clamping.

use chrono::{Datelike, NaiveDate};

/// Supported sub-hourly resolutions, expressed as timesteps per hour.
///
/// A series for year `y` at resolution `k` holds exactly
/// `hours_in_year(y) * k` values.
pub const SUPPORTED_STEPS_PER_HOUR: &[usize] = &[1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60];

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Error type for invalid or inconsistent date/hour inputs.
///
/// Calendar errors indicate a configuration defect, not a data-quality
/// issue, and are fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid date {month}/{day} for year {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid day-of-year {ordinal} for year {year}")]
    InvalidDayOfYear { year: i32, ordinal: u32 },

    #[error("invalid hour {hour} (expected 0..={max})")]
    InvalidHour { hour: u32, max: u32 },

    #[error("empty hour range: begin hour {begin_hour} must be before end hour {end_hour}")]
    InvalidHourRange { begin_hour: u32, end_hour: u32 },

    #[error("unsupported resolution: {steps_per_hour} steps per hour")]
    UnsupportedResolution { steps_per_hour: usize },

    #[error("timestep index {index} out of range for year {year} ({len} steps)")]
    IndexOutOfRange { index: usize, len: usize, year: i32 },
}

/// Returns `true` iff `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of hours in the given year: 8784 for leap years, 8760 otherwise.
pub fn hours_in_year(year: i32) -> usize {
    if is_leap_year(year) {
        8784
    } else {
        8760
    }
}

/// Number of days in the given year.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in the given month of the given year.
pub fn days_in_month(year: i32, month: u32) -> CalendarResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidDate { year, month, day: 1 })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always a valid date");
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// 1-based ordinal day of the year for (month, day).
///
/// Fails if the pair is not a valid date in `year` (e.g. Feb 29 outside a
/// leap year, or day 31 in a 30-day month).
pub fn day_of_year(year: i32, month: u32, day: u32) -> CalendarResult<u32> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::InvalidDate { year, month, day })?;
    Ok(date.ordinal())
}

/// Inverse of [`day_of_year`]: maps a 1-based ordinal back to (month, day).
pub fn date_from_day_of_year(year: i32, ordinal: u32) -> CalendarResult<(u32, u32)> {
    let date = NaiveDate::from_yo_opt(year, ordinal)
        .ok_or(CalendarError::InvalidDayOfYear { year, ordinal })?;
    Ok((date.month(), date.day()))
}

/// Linear index of the first timestep of (month, day, hour) in a dense
/// series for `year` at `steps_per_hour` resolution.
///
/// The index is guaranteed to lie in `[0, hours_in_year(year) *
/// steps_per_hour)`; a Feb 29 date against a non-leap year (or vice versa)
/// fails before any index is produced.
pub fn timestep_index(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    steps_per_hour: usize,
) -> CalendarResult<usize> {
    if !SUPPORTED_STEPS_PER_HOUR.contains(&steps_per_hour) {
        return Err(CalendarError::UnsupportedResolution { steps_per_hour });
    }
    if hour >= 24 {
        return Err(CalendarError::InvalidHour { hour, max: 23 });
    }
    let ordinal = day_of_year(year, month, day)?;
    let index = ((ordinal as usize - 1) * 24 + hour as usize) * steps_per_hour;
    let len = hours_in_year(year) * steps_per_hour;
    if index >= len {
        return Err(CalendarError::IndexOutOfRange { index, len, year });
    }
    Ok(index)
}
