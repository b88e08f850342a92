// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating hours and leave mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook_domain::{OperatingDay, OperatingHours, StaffId, format_date};
use time::{Date, Weekday};
use tracing::debug;

use crate::data_models::time_to_column;
use crate::diesel_schema::{operating_hours, staff_leaves};
use crate::error::PersistenceError;

/// Replaces all seven weekday rows.
///
/// # Errors
///
/// Returns an error if any row fails to update.
pub fn replace_operating_hours(
    conn: &mut SqliteConnection,
    hours: &OperatingHours,
) -> Result<(), PersistenceError> {
    for (weekday, day) in hours.iter() {
        update_operating_day(conn, weekday, day)?;
    }
    debug!("Replaced operating hours");
    Ok(())
}

fn update_operating_day(
    conn: &mut SqliteConnection,
    weekday: Weekday,
    day: &OperatingDay,
) -> Result<(), PersistenceError> {
    let index: i32 = i32::from(weekday.number_days_from_monday());
    let rows: usize = diesel::update(operating_hours::table.find(index))
        .set((
            operating_hours::is_open.eq(i32::from(day.is_open)),
            operating_hours::open_time.eq(time_to_column(day.open_time)),
            operating_hours::close_time.eq(time_to_column(day.close_time)),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Operating hours row for {weekday} missing"
        )));
    }
    Ok(())
}

/// Records a leave day. Returns `false` if it was already recorded.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the staff member
/// does not exist.
pub fn insert_leave(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    date: Date,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::insert_or_ignore_into(staff_leaves::table)
        .values((
            staff_leaves::staff_id.eq(staff_id.value()),
            staff_leaves::leave_date.eq(format_date(date)),
        ))
        .execute(conn)?;

    debug!(staff_id = staff_id.value(), date = %date, inserted = rows > 0, "Recorded leave");
    Ok(rows > 0)
}

/// Removes a leave day. Returns `false` if none was recorded.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_leave(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    date: Date,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::delete(
        staff_leaves::table
            .filter(staff_leaves::staff_id.eq(staff_id.value()))
            .filter(staff_leaves::leave_date.eq(format_date(date))),
    )
    .execute(conn)?;

    debug!(staff_id = staff_id.value(), date = %date, removed = rows > 0, "Removed leave");
    Ok(rows > 0)
}
