// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock time arithmetic.
//!
//! All scheduling math happens on whole minutes since midnight. Dates and
//! timezones never enter this module; an appointment's calendar date is
//! carried separately.
//!
//! ## Invariants
//!
//! - A `TimeOfDay` is always within `0..1440`
//! - Addition never wraps past midnight; it fails instead
//! - Intervals are half-open: `[start, end)`

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A wall-clock time with minute precision and no date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    /// Minutes since midnight, `0..1440`.
    minutes: u16,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Creates a time from a minute count the caller knows is below 1440.
    pub(crate) const fn new_unchecked(minutes: u16) -> Self {
        Self { minutes }
    }

    /// Creates a time from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeOutOfRange` if `minutes >= 1440`.
    pub fn from_minutes(minutes: u16) -> Result<Self, DomainError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(DomainError::TimeOutOfRange {
                minutes: u32::from(minutes),
            });
        }
        Ok(Self { minutes })
    }

    /// Creates a time from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeOutOfRange` if the hour is not `0..24`
    /// or the minute is not `0..60`.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour >= 24 || minute >= 60 {
            return Err(DomainError::TimeOutOfRange {
                minutes: u32::from(hour) * 60 + u32::from(minute),
            });
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Parses a strict `HH:MM` string.
    ///
    /// Both fields must be exactly two ASCII digits, the hour `00-23`
    /// and the minute `00-59`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeFormat` for anything else.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimeFormat(value.to_string());

        let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    /// Parses a time the way legacy stored data was written.
    ///
    /// Accepts unpadded fields such as `9:5`. Anything malformed or out of
    /// range silently becomes `00:00`, so this must only be used when
    /// importing records that were already accepted by an earlier system.
    /// Booking input always goes through [`TimeOfDay::parse`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value
            .trim()
            .split_once(':')
            .and_then(|(hour, minute)| {
                let hour: u8 = hour.trim().parse().ok()?;
                let minute: u8 = minute.trim().parse().ok()?;
                Self::from_hm(hour, minute).ok()
            })
            .unwrap_or(Self::MIDNIGHT)
    }

    /// Returns minutes since midnight.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(&self) -> u16 {
        self.minutes / 60
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u16 {
        self.minutes % 60
    }

    /// Formats the time as zero-padded `HH:MM`.
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Adds a number of minutes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeOutOfRange` if the result reaches midnight.
    pub fn add_minutes(self, minutes: u16) -> Result<Self, DomainError> {
        let total: u32 = u32::from(self.minutes) + u32::from(minutes);
        u16::try_from(total)
            .ok()
            .filter(|m| *m < MINUTES_PER_DAY)
            .map(|m| Self { minutes: m })
            .ok_or(DomainError::TimeOutOfRange { minutes: total })
    }

    /// Adds a service duration, producing an end time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeOutOfRange` if the result reaches midnight.
    pub fn add_duration(self, duration: ServiceDuration) -> Result<Self, DomainError> {
        self.add_minutes(duration.minutes())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: String = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Length of a service in whole minutes.
///
/// Always positive and shorter than a day, so `start + duration` is a
/// non-empty interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ServiceDuration {
    minutes: u16,
}

impl ServiceDuration {
    /// Creates a duration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidServiceDuration` if `minutes` is zero
    /// or at least a full day.
    pub const fn new(minutes: u16) -> Result<Self, DomainError> {
        if minutes == 0 || minutes >= MINUTES_PER_DAY {
            return Err(DomainError::InvalidServiceDuration { minutes });
        }
        Ok(Self { minutes })
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }
}

impl TryFrom<u16> for ServiceDuration {
    type Error = DomainError;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<ServiceDuration> for u16 {
    fn from(duration: ServiceDuration) -> Self {
        duration.minutes
    }
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`.
///
/// Touching endpoints do not overlap, and an empty interval overlaps nothing.
#[must_use]
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < a_end && b_start < b_end && a_start < b_end && b_start < a_end
}
