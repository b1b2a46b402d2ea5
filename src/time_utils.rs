// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates and weekdays.

use chrono::{Datelike, NaiveDate, Weekday};
use validator::ValidationError;

/// Wire format for plan and task dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday names in template order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a `YYYY-MM-DD` date string.
///
/// Only the zero-padded form is accepted, since the string doubles as a document id.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == raw).then_some(date)
}

/// Full English name of the weekday a date falls on (e.g. "Monday").
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// Normalize a user-supplied weekday ("monday", "MON") to its template key.
pub fn normalize_weekday(raw: &str) -> Option<&'static str> {
    raw.trim()
        .parse::<Weekday>()
        .ok()
        .map(|day| WEEKDAYS[day.num_days_from_monday() as usize])
}

/// Validator hook for date fields.
pub fn validate_date(raw: &str) -> Result<(), ValidationError> {
    if parse_date(raw).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("date_format");
    error.message = Some("Invalid date format. Use YYYY-MM-DD".into());
    Err(error)
}
