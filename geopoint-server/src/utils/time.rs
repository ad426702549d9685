//! Time helpers - date parsing and UTC day boundaries
//!
//! All date → timestamp conversion happens in the API/service layer;
//! repositories only see `i64` Unix millis and `NaiveDate`.

use chrono::{DateTime, NaiveDate};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// UTC calendar date for a millis timestamp.
pub fn date_of_millis(millis: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .date_naive()
}

/// Start of the UTC calendar day containing `millis`.
pub fn utc_day_start_millis(millis: i64) -> i64 {
    date_of_millis(millis)
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(millis)
}
