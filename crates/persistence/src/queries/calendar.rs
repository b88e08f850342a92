// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating hours and leave lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use shearbook_domain::{BarberLeave, OperatingCalendar, OperatingDay, OperatingHours, StaffId};

use crate::data_models::{LeaveRow, OperatingHoursRow, date_from_column};
use crate::diesel_schema::{operating_hours, staff_leaves};
use crate::error::PersistenceError;

/// Loads the shop's weekly hours.
///
/// # Errors
///
/// Returns an error if the query fails or the table does not hold exactly
/// one valid row per weekday.
pub fn get_operating_hours(conn: &mut SqliteConnection) -> Result<OperatingHours, PersistenceError> {
    let rows: Vec<OperatingHoursRow> = operating_hours::table
        .order(operating_hours::weekday.asc())
        .select(OperatingHoursRow::as_select())
        .load::<OperatingHoursRow>(conn)?;

    if rows.len() != 7 {
        return Err(PersistenceError::ReconstructionError(format!(
            "expected 7 operating hours rows, found {}",
            rows.len()
        )));
    }

    let mut days: [OperatingDay; 7] = [OperatingDay::closed(); 7];
    for row in rows {
        let index: usize = row
            .weekday
            .to_usize()
            .filter(|i| *i < 7)
            .ok_or_else(|| {
                PersistenceError::ReconstructionError(format!("invalid weekday {}", row.weekday))
            })?;
        days[index] = OperatingDay::try_from(row)?;
    }

    Ok(OperatingHours::new(days))
}

/// Lists every leave entry ordered by date then staff.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn list_leaves(conn: &mut SqliteConnection) -> Result<Vec<BarberLeave>, PersistenceError> {
    staff_leaves::table
        .order((staff_leaves::leave_date.asc(), staff_leaves::staff_id.asc()))
        .select(LeaveRow::as_select())
        .load::<LeaveRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(BarberLeave {
                staff_id: StaffId::new(row.staff_id),
                date: date_from_column(&row.leave_date)?,
            })
        })
        .collect()
}

/// Loads hours and leaves as one calendar snapshot.
///
/// # Errors
///
/// Returns an error if either lookup fails.
pub fn load_operating_calendar(
    conn: &mut SqliteConnection,
) -> Result<OperatingCalendar, PersistenceError> {
    let hours: OperatingHours = get_operating_hours(conn)?;
    let leaves: Vec<BarberLeave> = list_leaves(conn)?;
    Ok(OperatingCalendar::new(hours, leaves))
}
