// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Strict parsing of raw request values.
//!
//! Everything the outside world sends is a string or a bare number until it
//! passes through here. Malformed values are rejected with the field name;
//! nothing is defaulted.

use shearbook_domain::{TimeOfDay, WEEKDAYS, parse_date};
use thiserror::Error;
use time::{Date, Weekday};

use crate::error::{ApiError, translate_domain_error};

/// Errors produced when an identifier cannot be read from a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// The value is not an integer.
    #[error("'{value}' is not a valid identifier")]
    NotANumber { field: &'static str, value: String },

    /// Identifiers are always positive.
    #[error("identifier must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}

impl ParseIdError {
    /// The request field the value came from.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. } | Self::NotPositive { field, .. } => field,
        }
    }
}

/// Checks that a numeric identifier is positive.
///
/// # Errors
///
/// Returns `ParseIdError::NotPositive` for zero or negative values.
pub const fn check_id(field: &'static str, value: i64) -> Result<i64, ParseIdError> {
    if value <= 0 {
        return Err(ParseIdError::NotPositive { field, value });
    }
    Ok(value)
}

/// Parses an identifier sent as text, such as a query parameter.
///
/// # Errors
///
/// Returns an error if the value is not a positive integer.
pub fn parse_id(field: &'static str, value: &str) -> Result<i64, ParseIdError> {
    let parsed: i64 = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseIdError::NotANumber {
            field,
            value: value.to_string(),
        })?;
    check_id(field, parsed)
}

/// Parses an optional identifier. Absent and blank values both mean "none".
///
/// # Errors
///
/// Returns an error if a non-blank value is not a positive integer.
pub fn parse_optional_id(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<i64>, ParseIdError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_id(field, text).map(Some),
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the date is malformed.
pub fn parse_date_input(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value.trim()).map_err(|e| retarget(field, translate_domain_error(e)))
}

/// Parses an optional date. Absent and blank values both mean "none".
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a non-blank value is malformed.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date_input(field, text).map(Some),
    }
}

/// Parses a strict `HH:MM` time of day.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the time is malformed.
pub fn parse_time_input(field: &str, value: &str) -> Result<TimeOfDay, ApiError> {
    TimeOfDay::parse(value).map_err(|e| retarget(field, translate_domain_error(e)))
}

/// Parses an English weekday name, case-insensitively.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is not a weekday.
pub fn parse_weekday(value: &str) -> Result<Weekday, ApiError> {
    let wanted: &str = value.trim();
    WEEKDAYS
        .iter()
        .copied()
        .find(|weekday| weekday.to_string().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("weekday"),
            message: format!("'{value}' is not a weekday"),
        })
}

fn retarget(field: &str, err: ApiError) -> ApiError {
    match err {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    }
}
