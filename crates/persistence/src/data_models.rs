// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain values.
//!
//! Times are stored as minutes since midnight and dates as `YYYY-MM-DD`
//! text. Every conversion back into the domain is checked, so a corrupted
//! row surfaces as `PersistenceError::ReconstructionError` rather than a
//! silently wrong schedule.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use shearbook_domain::{
    Appointment, AppointmentId, Client, ClientId, OperatingDay, Service, ServiceDuration,
    ServiceId, StaffId, StaffProfile, Status, TimeOfDay, parse_date,
};
use std::str::FromStr;
use time::Date;

use crate::diesel_schema::{
    appointments, audit_events, clients, operating_hours, services, staff, staff_leaves,
};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ServiceRow {
    pub service_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = services)]
pub struct NewServiceRow<'a> {
    pub name: &'a str,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub status: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StaffRow {
    pub staff_id: i64,
    pub name: String,
    pub work_start: i32,
    pub work_end: i32,
    pub lunch_start: i32,
    pub lunch_end: i32,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = staff)]
pub struct NewStaffRow<'a> {
    pub name: &'a str,
    pub work_start: i32,
    pub work_end: i32,
    pub lunch_start: i32,
    pub lunch_end: i32,
    pub status: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientRow {
    pub client_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = clients)]
pub struct NewClientRow<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = operating_hours)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OperatingHoursRow {
    pub weekday: i32,
    pub is_open: i32,
    pub open_time: i32,
    pub close_time: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = staff_leaves)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeaveRow {
    pub staff_id: i64,
    pub leave_date: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AppointmentRow {
    pub appointment_id: i64,
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub appointment_date: String,
    pub start_time: i32,
    pub end_time: i32,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = appointments)]
pub struct AppointmentValues {
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub appointment_date: String,
    pub start_time: i32,
    pub end_time: i32,
}

/// Full audit event row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub staff_id: Option<i64>,
    pub event_date: Option<String>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: String,
}

/// Converts a stored minute count back into a `TimeOfDay`.
pub fn time_from_column(minutes: i32) -> Result<TimeOfDay, PersistenceError> {
    minutes
        .to_u16()
        .and_then(|m| TimeOfDay::from_minutes(m).ok())
        .ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("time of day out of range: {minutes}"))
        })
}

/// Converts a `TimeOfDay` into its stored minute count.
pub fn time_to_column(time: TimeOfDay) -> i32 {
    i32::from(time.minutes())
}

/// Converts a stored `YYYY-MM-DD` string back into a `Date`.
pub fn date_from_column(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn status_from_column(value: &str) -> Result<Status, PersistenceError> {
    Status::from_str(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

impl TryFrom<ServiceRow> for Service {
    type Error = PersistenceError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let price_cents: u32 = row.price_cents.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "service {} price out of range: {}",
                row.service_id, row.price_cents
            ))
        })?;
        let duration: ServiceDuration = row
            .duration_minutes
            .to_u16()
            .and_then(|m| ServiceDuration::new(m).ok())
            .ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "service {} duration out of range: {}",
                    row.service_id, row.duration_minutes
                ))
            })?;

        Ok(Self {
            id: ServiceId::new(row.service_id),
            name: row.name,
            price_cents,
            duration,
            status: status_from_column(&row.status)?,
        })
    }
}

impl TryFrom<StaffRow> for StaffProfile {
    type Error = PersistenceError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StaffId::new(row.staff_id),
            name: row.name,
            work_start: time_from_column(row.work_start)?,
            work_end: time_from_column(row.work_end)?,
            lunch_start: time_from_column(row.lunch_start)?,
            lunch_end: time_from_column(row.lunch_end)?,
            status: status_from_column(&row.status)?,
        })
    }
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId::new(row.client_id),
            name: row.name,
            phone: row.phone,
            email: row.email,
        }
    }
}

impl TryFrom<OperatingHoursRow> for OperatingDay {
    type Error = PersistenceError;

    fn try_from(row: OperatingHoursRow) -> Result<Self, Self::Error> {
        Ok(Self {
            is_open: row.is_open != 0,
            open_time: time_from_column(row.open_time)?,
            close_time: time_from_column(row.close_time)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = PersistenceError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(AppointmentId::new(row.appointment_id)),
            client_id: ClientId::new(row.client_id),
            staff_id: StaffId::new(row.staff_id),
            service_id: ServiceId::new(row.service_id),
            date: date_from_column(&row.appointment_date)?,
            start_time: time_from_column(row.start_time)?,
            end_time: time_from_column(row.end_time)?,
        })
    }
}

impl From<&Appointment> for AppointmentValues {
    fn from(appointment: &Appointment) -> Self {
        Self {
            client_id: appointment.client_id.value(),
            staff_id: appointment.staff_id.value(),
            service_id: appointment.service_id.value(),
            appointment_date: shearbook_domain::format_date(appointment.date),
            start_time: time_to_column(appointment.start_time),
            end_time: time_to_column(appointment.end_time),
        }
    }
}
