//! Calendar-day arithmetic.
//!
//! Dates are plain calendar days (`NaiveDate`), so there is no timezone or
//! daylight-saving drift to account for.

use chrono::{Duration, NaiveDate};

/// Whole days from `a` to `b`. Negative when `b` is before `a`.
pub fn day_difference(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Shift a date by `n` days (negative moves backwards).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Every day from `start` to `end`, both inclusive. Empty when `end < start`.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}
