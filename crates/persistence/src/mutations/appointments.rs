// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook::ScheduleChange;
use shearbook_domain::{Appointment, AppointmentId};
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::AppointmentValues;
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;

/// Writes one schedule change to the appointments table.
///
/// # Returns
///
/// The stored appointment for bookings and reschedules, `None` for
/// cancellations.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if a reschedule or cancellation
/// targets a row that no longer exists, or an error if the write fails.
pub fn apply_schedule_change(
    conn: &mut SqliteConnection,
    change: &ScheduleChange,
) -> Result<Option<Appointment>, PersistenceError> {
    match change {
        ScheduleChange::Booked(appointment) => {
            diesel::insert_into(appointments::table)
                .values(AppointmentValues::from(appointment))
                .execute(conn)?;
            let appointment_id: i64 = last_insert_rowid(conn)?;

            debug!(
                appointment_id,
                staff_id = appointment.staff_id.value(),
                start = %appointment.start_time,
                "Inserted appointment"
            );
            Ok(Some(
                appointment
                    .clone()
                    .with_id(AppointmentId::new(appointment_id)),
            ))
        }
        ScheduleChange::Rescheduled(appointment) => {
            let appointment_id: AppointmentId = appointment.id.ok_or_else(|| {
                PersistenceError::ReconstructionError(String::from(
                    "Rescheduled appointment has no id",
                ))
            })?;
            let rows: usize = diesel::update(appointments::table.find(appointment_id.value()))
                .set(AppointmentValues::from(appointment))
                .execute(conn)?;
            ensure_row_touched(rows, appointment_id)?;

            debug!(
                appointment_id = appointment_id.value(),
                start = %appointment.start_time,
                "Updated appointment"
            );
            Ok(Some(appointment.clone()))
        }
        ScheduleChange::Cancelled(appointment_id) => {
            let rows: usize = diesel::delete(appointments::table.find(appointment_id.value()))
                .execute(conn)?;
            ensure_row_touched(rows, *appointment_id)?;

            debug!(appointment_id = appointment_id.value(), "Deleted appointment");
            Ok(None)
        }
    }
}

fn ensure_row_touched(rows: usize, appointment_id: AppointmentId) -> Result<(), PersistenceError> {
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Appointment {appointment_id} not found"
        )));
    }
    Ok(())
}
