// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw values (ids, `YYYY-MM-DD` dates, `HH:MM` times) exactly
//! as a client sent them. Responses carry the same formats back.

use serde::{Deserialize, Serialize};
use shearbook_audit::AuditEvent;
use shearbook_domain::{
    Appointment, BarberLeave, Client, OperatingHours, Service, StaffProfile, format_date,
};

// ============================================================================
// Availability
// ============================================================================

/// API request for the open start times of one staff member on one date.
///
/// Ids arrive as text because this request is built from query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// Staff member id.
    pub staff_id: String,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
    /// Service id, which fixes the duration.
    pub service_id: String,
    /// Appointment to ignore, used when rescheduling it.
    #[serde(default)]
    pub exclude_appointment_id: Option<String>,
}

/// API response listing bookable start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Staff member id.
    pub staff_id: i64,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
    /// Service id.
    pub service_id: i64,
    /// Ascending `HH:MM` start times.
    pub slots: Vec<String>,
}

// ============================================================================
// Appointments
// ============================================================================

/// API request to book an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    /// Client id.
    pub client_id: i64,
    /// Staff member id.
    pub staff_id: i64,
    /// Service id.
    pub service_id: i64,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
    /// Start time in `HH:MM`.
    pub start_time: String,
}

/// API request to change an appointment. Absent fields keep their value.
///
/// The end time is always recomputed from the resulting service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    /// New client id.
    #[serde(default)]
    pub client_id: Option<i64>,
    /// New staff member id.
    #[serde(default)]
    pub staff_id: Option<i64>,
    /// New service id.
    #[serde(default)]
    pub service_id: Option<i64>,
    /// New date in `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// New start time in `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
}

impl UpdateAppointmentRequest {
    /// Returns `true` if the request changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.staff_id.is_none()
            && self.service_id.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
    }
}

/// API request to list appointments. Blank filters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAppointmentsRequest {
    /// Only this staff member.
    #[serde(default)]
    pub staff_id: Option<String>,
    /// Only this date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

/// One appointment as the API presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInfo {
    /// Appointment id.
    pub appointment_id: i64,
    /// Client id.
    pub client_id: i64,
    /// Staff member id.
    pub staff_id: i64,
    /// Service id.
    pub service_id: i64,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
    /// Start time in `HH:MM`.
    pub start_time: String,
    /// End time in `HH:MM`, exclusive.
    pub end_time: String,
}

impl AppointmentInfo {
    /// Builds the API view of a stored appointment.
    ///
    /// Unsaved appointments have no id and report `0`.
    #[must_use]
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id.map_or(0, |id| id.value()),
            client_id: appointment.client_id.value(),
            staff_id: appointment.staff_id.value(),
            service_id: appointment.service_id.value(),
            date: format_date(appointment.date),
            start_time: appointment.start_time.format(),
            end_time: appointment.end_time.format(),
        }
    }
}

/// API response for a booking or reschedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    /// The stored appointment.
    pub appointment: AppointmentInfo,
    /// The audit event recording the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAppointmentResponse {
    /// The cancelled appointment id.
    pub appointment_id: i64,
    /// The audit event recording the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAppointmentsResponse {
    /// Appointments ordered by date, staff member and start time.
    pub appointments: Vec<AppointmentInfo>,
}

// ============================================================================
// Services
// ============================================================================

/// API request to add a service to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price_cents: u32,
    /// Duration in minutes.
    pub duration_minutes: u16,
}

/// API request to edit a service. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New price in cents.
    #[serde(default)]
    pub price_cents: Option<u32>,
    /// New duration. Existing appointments keep their end time.
    #[serde(default)]
    pub duration_minutes: Option<u16>,
    /// `active` or `inactive`.
    #[serde(default)]
    pub status: Option<String>,
}

/// One service as the API presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service id.
    pub service_id: i64,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price_cents: u32,
    /// Duration in minutes.
    pub duration_minutes: u16,
    /// `active` or `inactive`.
    pub status: String,
}

impl From<&Service> for ServiceInfo {
    fn from(service: &Service) -> Self {
        Self {
            service_id: service.id.value(),
            name: service.name.clone(),
            price_cents: service.price_cents,
            duration_minutes: service.duration.minutes(),
            status: service.status.as_str().to_string(),
        }
    }
}

/// API response listing services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServicesResponse {
    /// Services ordered by id.
    pub services: Vec<ServiceInfo>,
}

// ============================================================================
// Staff
// ============================================================================

/// API request to add a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    /// Display name.
    pub name: String,
    /// Start of the working day, `HH:MM`.
    pub work_start: String,
    /// End of the working day, `HH:MM`.
    pub work_end: String,
    /// Start of lunch, `HH:MM`.
    pub lunch_start: String,
    /// End of lunch, `HH:MM`. Equal to `lunch_start` for no lunch.
    pub lunch_end: String,
}

/// API request to edit a staff member. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New start of the working day.
    #[serde(default)]
    pub work_start: Option<String>,
    /// New end of the working day.
    #[serde(default)]
    pub work_end: Option<String>,
    /// New start of lunch.
    #[serde(default)]
    pub lunch_start: Option<String>,
    /// New end of lunch.
    #[serde(default)]
    pub lunch_end: Option<String>,
    /// `active` or `inactive`.
    #[serde(default)]
    pub status: Option<String>,
}

/// One staff member as the API presents them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    /// Staff member id.
    pub staff_id: i64,
    /// Display name.
    pub name: String,
    /// Start of the working day.
    pub work_start: String,
    /// End of the working day.
    pub work_end: String,
    /// Start of lunch.
    pub lunch_start: String,
    /// End of lunch.
    pub lunch_end: String,
    /// `active` or `inactive`.
    pub status: String,
}

impl From<&StaffProfile> for StaffInfo {
    fn from(profile: &StaffProfile) -> Self {
        Self {
            staff_id: profile.id.value(),
            name: profile.name.clone(),
            work_start: profile.work_start.format(),
            work_end: profile.work_end.format(),
            lunch_start: profile.lunch_start.format(),
            lunch_end: profile.lunch_end.format(),
            status: profile.status.as_str().to_string(),
        }
    }
}

/// API response listing staff members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStaffResponse {
    /// Staff members ordered by id.
    pub staff: Vec<StaffInfo>,
}

// ============================================================================
// Clients
// ============================================================================

/// API request to add a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    /// Display name.
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// One client as the API presents them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client id.
    pub client_id: i64,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl From<&Client> for ClientInfo {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.id.value(),
            name: client.name.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
        }
    }
}

/// API response listing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClientsResponse {
    /// Clients ordered by name.
    pub clients: Vec<ClientInfo>,
}

// ============================================================================
// Operating hours & leave
// ============================================================================

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingDayInfo {
    /// English weekday name, e.g. `Monday`.
    pub weekday: String,
    /// Whether the shop opens at all.
    pub is_open: bool,
    /// Opening time, `HH:MM`.
    pub open_time: String,
    /// Closing time, `HH:MM`.
    pub close_time: String,
}

/// The shop's weekly hours, Monday first.
///
/// Used both as the read response and as the replacement request, which
/// must name all seven weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHoursInfo {
    /// One entry per weekday.
    pub days: Vec<OperatingDayInfo>,
}

impl From<&OperatingHours> for OperatingHoursInfo {
    fn from(hours: &OperatingHours) -> Self {
        Self {
            days: hours
                .iter()
                .map(|(weekday, day)| OperatingDayInfo {
                    weekday: weekday.to_string(),
                    is_open: day.is_open,
                    open_time: day.open_time.format(),
                    close_time: day.close_time.format(),
                })
                .collect(),
        }
    }
}

/// API request naming one staff leave day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Staff member id.
    pub staff_id: i64,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
}

/// One leave day as the API presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInfo {
    /// Staff member id.
    pub staff_id: i64,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
}

impl From<&BarberLeave> for LeaveInfo {
    fn from(leave: &BarberLeave) -> Self {
        Self {
            staff_id: leave.staff_id.value(),
            date: format_date(leave.date),
        }
    }
}

/// API response listing leave days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLeavesResponse {
    /// Leave days ordered by date, then staff member.
    pub leaves: Vec<LeaveInfo>,
}

/// API response for adding or removing a leave day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveChangeResponse {
    /// The leave day.
    pub leave: LeaveInfo,
    /// `false` when the request matched the existing state.
    pub changed: bool,
    /// The audit event recording the change, if there was one.
    pub event_id: Option<i64>,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Audit
// ============================================================================

/// API request for one staff member's audit timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineRequest {
    /// Staff member id.
    pub staff_id: String,
    /// Date in `YYYY-MM-DD`.
    pub date: String,
}

/// One audit event as the API presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// Event id.
    pub event_id: i64,
    /// Who acted.
    pub actor_id: String,
    /// Actor kind.
    pub actor_type: String,
    /// Why.
    pub cause_id: String,
    /// Cause description.
    pub cause_description: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// Schedule before the change.
    pub before: String,
    /// Schedule after the change.
    pub after: String,
    /// Schedule staff member, absent for shop-wide events.
    pub staff_id: Option<i64>,
    /// Schedule date, absent for shop-wide events.
    pub date: Option<String>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id.unwrap_or_default(),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            staff_id: event.staff_id.map(|id| id.value()),
            date: event.date.map(format_date),
        }
    }
}

/// API response listing audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// Events oldest first.
    pub events: Vec<AuditEventInfo>,
}
