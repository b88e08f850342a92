// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AppointmentId, ClientId, ServiceId, StaffId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wall-clock time was not a well-formed `HH:MM` string.
    InvalidTimeFormat(String),
    /// A minute count fell outside a single day.
    TimeOutOfRange {
        /// The offending minute count.
        minutes: u32,
    },
    /// A service duration is not usable for booking.
    InvalidServiceDuration {
        /// The invalid duration in minutes.
        minutes: u16,
    },
    /// A staff member's working hours are inconsistent.
    InvalidStaffHours {
        /// Description of the inconsistency.
        reason: String,
    },
    /// A shop operating day is inconsistent.
    InvalidOperatingDay {
        /// The weekday that failed validation.
        weekday: time::Weekday,
        /// Description of the inconsistency.
        reason: String,
    },
    /// A name field is empty or invalid.
    InvalidName(String),
    /// A status string is not recognised.
    InvalidStatus(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Service does not exist.
    ServiceNotFound(ServiceId),
    /// Service exists but is not offered any more.
    ServiceInactive(ServiceId),
    /// Staff member does not exist.
    StaffNotFound(StaffId),
    /// Staff member exists but is inactive.
    StaffInactive(StaffId),
    /// Client does not exist.
    ClientNotFound(ClientId),
    /// Appointment does not exist.
    AppointmentNotFound(AppointmentId),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeFormat(value) => {
                write!(f, "Invalid time '{value}': expected HH:MM (00:00-23:59)")
            }
            Self::TimeOutOfRange { minutes } => {
                write!(
                    f,
                    "Time out of range: {minutes} minutes is not within a single day"
                )
            }
            Self::InvalidServiceDuration { minutes } => {
                write!(
                    f,
                    "Invalid service duration: {minutes} minutes. Must be greater than 0"
                )
            }
            Self::InvalidStaffHours { reason } => write!(f, "Invalid staff hours: {reason}"),
            Self::InvalidOperatingDay { weekday, reason } => {
                write!(f, "Invalid operating hours for {weekday}: {reason}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidStatus(value) => {
                write!(f, "Invalid status '{value}': expected 'active' or 'inactive'")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::ServiceNotFound(id) => write!(f, "Service {id} not found"),
            Self::ServiceInactive(id) => write!(f, "Service {id} is inactive"),
            Self::StaffNotFound(id) => write!(f, "Staff member {id} not found"),
            Self::StaffInactive(id) => write!(f, "Staff member {id} is inactive"),
            Self::ClientNotFound(id) => write!(f, "Client {id} not found"),
            Self::AppointmentNotFound(id) => write!(f, "Appointment {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
