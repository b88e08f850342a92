// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook::{DaySchedule, ScheduleKey};
use shearbook_domain::{Appointment, AppointmentId, StaffId, format_date};
use time::Date;

use crate::data_models::AppointmentRow;
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;

/// Retrieves an appointment by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: AppointmentId,
) -> Result<Option<Appointment>, PersistenceError> {
    appointments::table
        .filter(appointments::appointment_id.eq(appointment_id.value()))
        .select(AppointmentRow::as_select())
        .first::<AppointmentRow>(conn)
        .optional()?
        .map(Appointment::try_from)
        .transpose()
}

/// Lists appointments, optionally narrowed to a staff member and/or date.
///
/// Results are ordered by date, staff member and start time.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_appointments(
    conn: &mut SqliteConnection,
    staff_id: Option<StaffId>,
    date: Option<Date>,
) -> Result<Vec<Appointment>, PersistenceError> {
    let mut query = appointments::table
        .select(AppointmentRow::as_select())
        .into_boxed();

    if let Some(staff_id) = staff_id {
        query = query.filter(appointments::staff_id.eq(staff_id.value()));
    }
    if let Some(date) = date {
        query = query.filter(appointments::appointment_date.eq(format_date(date)));
    }

    query
        .order((
            appointments::appointment_date.asc(),
            appointments::staff_id.asc(),
            appointments::start_time.asc(),
        ))
        .load::<AppointmentRow>(conn)?
        .into_iter()
        .map(Appointment::try_from)
        .collect()
}

/// Loads the day schedule for one `(staff, date)`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn load_day_schedule(
    conn: &mut SqliteConnection,
    key: ScheduleKey,
) -> Result<DaySchedule, PersistenceError> {
    let appointments: Vec<Appointment> = list_appointments(conn, Some(key.staff_id), Some(key.date))?;
    DaySchedule::from_appointments(key, appointments)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}
