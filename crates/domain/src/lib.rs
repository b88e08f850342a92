// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod calendar;
mod error;
mod time_of_day;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{SLOT_INTERVAL_MINUTES, calculate_available_slots, find_conflict};
pub use calendar::{
    BarberLeave, OperatingCalendar, OperatingDay, OperatingHours, StaffWindow, WEEKDAYS,
};

// Re-export public types
pub use error::DomainError;
pub use time_of_day::{MINUTES_PER_DAY, ServiceDuration, TimeOfDay, overlaps};
pub use types::{
    Appointment, AppointmentId, Client, ClientId, Service, ServiceId, StaffId, StaffProfile,
    Status, format_date, parse_date,
};
pub use validation::{
    validate_client, validate_operating_hours, validate_service, validate_staff_profile,
};
