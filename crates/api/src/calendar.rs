// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shop hours and staff leave.

use shearbook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shearbook_domain::{
    BarberLeave, OperatingDay, OperatingHours, StaffId, WEEKDAYS, format_date,
    validate_operating_hours,
};
use time::{Date, Weekday};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::input::{check_id, parse_date_input, parse_time_input, parse_weekday};
use crate::request_response::{
    LeaveChangeResponse, LeaveInfo, LeaveRequest, ListLeavesResponse, OperatingHoursInfo,
};
use crate::scheduler::{Scheduler, require_staff};

fn hours_snapshot(hours: &OperatingHours) -> StateSnapshot {
    let days: Vec<String> = hours
        .iter()
        .map(|(weekday, day)| {
            if day.is_open {
                format!("{weekday} {}-{}", day.open_time, day.close_time)
            } else {
                format!("{weekday} closed")
            }
        })
        .collect();
    StateSnapshot::new(days.join(", "))
}

fn leave_snapshot(on_leave: bool) -> StateSnapshot {
    StateSnapshot::new(String::from(if on_leave { "on leave" } else { "working" }))
}

/// Converts seven named days into `OperatingHours`.
///
/// Every weekday must appear exactly once; order does not matter.
fn hours_from_info(info: &OperatingHoursInfo) -> Result<OperatingHours, ApiError> {
    let mut days: [Option<OperatingDay>; 7] = [None; 7];

    for entry in &info.days {
        let weekday: Weekday = parse_weekday(&entry.weekday)?;
        let slot: &mut Option<OperatingDay> =
            &mut days[usize::from(weekday.number_days_from_monday())];
        if slot.is_some() {
            return Err(ApiError::InvalidInput {
                field: String::from("days"),
                message: format!("{weekday} is listed more than once"),
            });
        }
        *slot = Some(if entry.is_open {
            OperatingDay::open(
                parse_time_input("open_time", &entry.open_time)?,
                parse_time_input("close_time", &entry.close_time)?,
            )
        } else {
            OperatingDay::closed()
        });
    }

    let mut hours: OperatingHours = OperatingHours::default();
    for (weekday, day) in WEEKDAYS.iter().zip(days) {
        let day: OperatingDay = day.ok_or_else(|| ApiError::InvalidInput {
            field: String::from("days"),
            message: format!("{weekday} is missing"),
        })?;
        hours.set_day(*weekday, day);
    }
    Ok(hours)
}

impl Scheduler {
    // ========================================================================
    // Operating hours
    // ========================================================================

    /// Returns the shop's weekly hours, Monday first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn get_operating_hours(&self) -> Result<OperatingHoursInfo, ApiError> {
        let hours: OperatingHours = self.storage().await.get_operating_hours()?;
        Ok(OperatingHoursInfo::from(&hours))
    }

    /// Replaces the shop's weekly hours and records a shop-wide audit event.
    ///
    /// Existing appointments are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if a weekday is missing or repeated, a time is
    /// malformed, or an open day does not open before it closes.
    pub async fn set_operating_hours(
        &self,
        request: &OperatingHoursInfo,
        actor: Actor,
        cause: Cause,
    ) -> Result<OperatingHoursInfo, ApiError> {
        let hours: OperatingHours = hours_from_info(request)?;
        validate_operating_hours(&hours).map_err(translate_domain_error)?;

        let mut db = self.storage().await;
        let before: OperatingHours = db.get_operating_hours()?;
        let event: AuditEvent = AuditEvent::global(
            actor,
            cause,
            Action::new(String::from("SetOperatingHours"), None),
            hours_snapshot(&before),
            hours_snapshot(&hours),
        );
        let event_id: i64 = db.set_operating_hours_with_audit(&hours, &event)?;
        drop(db);

        info!(event_id, "Replaced operating hours");
        Ok(OperatingHoursInfo::from(&hours))
    }

    // ========================================================================
    // Leave
    // ========================================================================

    /// Lists every recorded leave day.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_leaves(&self) -> Result<ListLeavesResponse, ApiError> {
        let leaves: Vec<BarberLeave> = self.storage().await.list_leaves()?;
        Ok(ListLeavesResponse {
            leaves: leaves.iter().map(LeaveInfo::from).collect(),
        })
    }

    /// Marks a staff member as away for a whole date.
    ///
    /// Appointments already booked that day are kept; availability simply
    /// stops offering slots. Adding an existing leave is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or the staff member does
    /// not exist.
    pub async fn add_leave(
        &self,
        request: &LeaveRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<LeaveChangeResponse, ApiError> {
        self.change_leave(request, true, actor, cause).await
    }

    /// Removes a leave day. Removing a leave that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or the staff member does
    /// not exist.
    pub async fn remove_leave(
        &self,
        request: &LeaveRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<LeaveChangeResponse, ApiError> {
        self.change_leave(request, false, actor, cause).await
    }

    async fn change_leave(
        &self,
        request: &LeaveRequest,
        on_leave: bool,
        actor: Actor,
        cause: Cause,
    ) -> Result<LeaveChangeResponse, ApiError> {
        let staff_id: StaffId = StaffId::new(check_id("staff_id", request.staff_id)?);
        let date: Date = parse_date_input("date", &request.date)?;

        let mut db = self.storage().await;
        require_staff(&mut db, staff_id)?;
        let verb: &str = if on_leave { "AddLeave" } else { "RemoveLeave" };
        let event: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(String::from(verb), None),
            leave_snapshot(!on_leave),
            leave_snapshot(on_leave),
            staff_id,
            date,
        );
        let event_id: Option<i64> = db.change_leave_with_audit(staff_id, date, on_leave, &event)?;
        drop(db);

        let changed: bool = event_id.is_some();
        if let Some(event_id) = event_id {
            info!(event_id, staff_id = staff_id.value(), date = %date, action = verb, "Changed leave");
        }

        Ok(LeaveChangeResponse {
            leave: LeaveInfo {
                staff_id: staff_id.value(),
                date: format_date(date),
            },
            changed,
            event_id,
            message: match (on_leave, changed) {
                (true, true) => format!("Staff member {staff_id} is on leave {date}"),
                (false, true) => format!("Staff member {staff_id} is back on {date}"),
                (_, false) => String::from("No change"),
            },
        })
    }
}
