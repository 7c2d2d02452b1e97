//! Date helpers for reservation logic
//!
//! Check-in/check-out are calendar dates; timestamps are UTC. All "today"
//! comparisons in the booking and reconciliation logic go through
//! [`today_utc`] so tests and services agree on the boundary.

use chrono::{NaiveDate, Utc};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Current calendar date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole nights between check-in (inclusive) and check-out (exclusive)
///
/// Negative or zero when the range is empty or inverted; callers validate.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}
