// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_of_day::{ServiceDuration, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Calendar date format used at every string boundary (`YYYY-MM-DD`).
const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a database-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

canonical_id!(
    /// Canonical identifier of a staff member (barber).
    StaffId
);
canonical_id!(
    /// Canonical identifier of a bookable service.
    ServiceId
);
canonical_id!(
    /// Canonical identifier of a client.
    ClientId
);
canonical_id!(
    /// Canonical identifier of an appointment.
    AppointmentId
);

/// Whether a service or staff member can take new bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Available for booking.
    #[default]
    Active,
    /// Kept for history, not bookable.
    Inactive,
}

impl Status {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Returns whether this status allows new bookings.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable service offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The canonical identifier.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Price in minor currency units (cents).
    pub price_cents: u32,
    /// How long the service takes.
    pub duration: ServiceDuration,
    /// Whether the service is offered for new bookings.
    pub status: Status,
}

/// A staff member's working-hours profile.
///
/// A zero-length lunch (`lunch_start == lunch_end`) means no lunch break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// The canonical identifier.
    pub id: StaffId,
    /// Display name.
    pub name: String,
    /// Start of the working day.
    pub work_start: TimeOfDay,
    /// End of the working day.
    pub work_end: TimeOfDay,
    /// Start of the lunch break.
    pub lunch_start: TimeOfDay,
    /// End of the lunch break.
    pub lunch_end: TimeOfDay,
    /// Whether the staff member takes bookings.
    pub status: Status,
}

/// A client of the shop. Display data only; never used for availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// The canonical identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
}

/// A booked appointment.
///
/// `end_time` is derived once as `start_time + service.duration` when the
/// appointment is written and is then frozen: editing the service later
/// does not move existing appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// The canonical identifier. `None` until the appointment is persisted.
    pub id: Option<AppointmentId>,
    /// The client being served.
    pub client_id: ClientId,
    /// The staff member (barber) performing the service.
    pub staff_id: StaffId,
    /// The service being performed.
    pub service_id: ServiceId,
    /// Calendar date, naive local time.
    pub date: Date,
    /// Start of the appointment.
    pub start_time: TimeOfDay,
    /// End of the appointment (exclusive).
    pub end_time: TimeOfDay,
}

impl Appointment {
    /// Creates an unpersisted appointment, deriving the end time from the
    /// service duration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeOutOfRange` if the appointment would run
    /// past midnight.
    pub fn schedule(
        client_id: ClientId,
        staff_id: StaffId,
        service: &Service,
        date: Date,
        start_time: TimeOfDay,
    ) -> Result<Self, DomainError> {
        let end_time: TimeOfDay = start_time.add_duration(service.duration)?;
        Ok(Self {
            id: None,
            client_id,
            staff_id,
            service_id: service.id,
            date,
            start_time,
            end_time,
        })
    }

    /// Returns a copy carrying the given identifier.
    #[must_use]
    pub const fn with_id(mut self, id: AppointmentId) -> Self {
        self.id = Some(id);
        self
    }
}
