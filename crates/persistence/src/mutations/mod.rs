// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Callers that need several writes to land together wrap them in a
//! single `conn.transaction`.

pub mod appointments;
pub mod audit;
pub mod calendar;
pub mod catalog;

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook::TransitionResult;
use shearbook_audit::AuditEvent;
use shearbook_domain::{Appointment, OperatingHours, StaffId};
use time::Date;
use tracing::info;

use crate::error::PersistenceError;

/// Outcome of persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The audit event ID.
    pub event_id: i64,
    /// The stored appointment, carrying its database id. `None` for
    /// cancellations.
    pub appointment: Option<Appointment>,
}

/// Persists a transition: the appointment write and its audit event land in
/// one transaction or not at all.
///
/// # Errors
///
/// Returns an error if either write fails; nothing is committed in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction(|conn| {
        let appointment: Option<Appointment> =
            appointments::apply_schedule_change(conn, &result.change)?;
        let event_id: i64 = audit::insert_audit_event(conn, &result.audit_event)?;

        info!(
            event_id,
            action = %result.audit_event.action.name,
            schedule = %result.new_state.key,
            "Persisted transition"
        );

        Ok(PersistTransitionResult {
            event_id,
            appointment,
        })
    })
}

/// Replaces the weekly hours and records `event` in one transaction.
///
/// # Returns
///
/// The audit event ID.
///
/// # Errors
///
/// Returns an error if either write fails; nothing is committed in that case.
pub fn persist_hours_change(
    conn: &mut SqliteConnection,
    hours: &OperatingHours,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        calendar::replace_operating_hours(conn, hours)?;
        let event_id: i64 = audit::insert_audit_event(conn, event)?;
        info!(event_id, "Persisted operating hours change");
        Ok(event_id)
    })
}

/// Adds or removes a leave day and, if that changed anything, records
/// `event` in the same transaction.
///
/// # Returns
///
/// The audit event ID, or `None` when the leave was already in the
/// requested state and nothing was written.
///
/// # Errors
///
/// Returns an error if either write fails; nothing is committed in that case.
pub fn persist_leave_change(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    date: Date,
    on_leave: bool,
    event: &AuditEvent,
) -> Result<Option<i64>, PersistenceError> {
    conn.transaction(|conn| {
        let changed: bool = if on_leave {
            calendar::insert_leave(conn, staff_id, date)?
        } else {
            calendar::delete_leave(conn, staff_id, date)?
        };
        if !changed {
            return Ok(None);
        }

        let event_id: i64 = audit::insert_audit_event(conn, event)?;
        info!(
            event_id,
            staff_id = staff_id.value(),
            date = %date,
            on_leave,
            "Persisted leave change"
        );
        Ok(Some(event_id))
    })
}
