// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Shearbook.
//!
//! Turns raw requests into validated domain values, serializes writes per
//! `(staff, date)` schedule, drives the core transitions and maps every
//! failure onto [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod audit;
mod calendar;
mod catalog;
mod error;
mod input;
mod locks;
mod request_response;
mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use input::{
    ParseIdError, check_id, parse_date_input, parse_id, parse_optional_date, parse_optional_id,
    parse_time_input, parse_weekday,
};
pub use locks::{ScheduleGuard, ScheduleLocks};
pub use request_response::{
    AppointmentInfo, AppointmentResponse, AuditEventInfo, AuditTimelineRequest,
    AuditTimelineResponse, AvailabilityRequest, AvailabilityResponse, CancelAppointmentResponse,
    ClientInfo, CreateAppointmentRequest, CreateClientRequest, CreateServiceRequest,
    CreateStaffRequest, LeaveChangeResponse, LeaveInfo, LeaveRequest, ListAppointmentsRequest,
    ListAppointmentsResponse, ListClientsResponse, ListLeavesResponse, ListServicesResponse,
    ListStaffResponse, OperatingDayInfo, OperatingHoursInfo, ServiceInfo, StaffInfo,
    UpdateAppointmentRequest, UpdateServiceRequest, UpdateStaffRequest,
};
pub use scheduler::{MAX_RELOCATION_ATTEMPTS, Scheduler};
