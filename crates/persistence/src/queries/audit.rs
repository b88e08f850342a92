// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shearbook_domain::{StaffId, format_date};
use time::Date;

use crate::data_models::{AuditEventRow, date_from_column};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor: Actor = serde_json::from_str(&row.actor_json)?;
    let cause: Cause = serde_json::from_str(&row.cause_json)?;
    let action: Action = serde_json::from_str(&row.action_json)?;
    let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
    let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

    let event: AuditEvent = match (row.staff_id, row.event_date) {
        (Some(staff_id), Some(date)) => AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            StaffId::new(staff_id),
            date_from_column(&date)?,
        ),
        _ => AuditEvent::global(actor, cause, action, before, after),
    };

    Ok(event.with_id(row.event_id))
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no such event exists, or an
/// error if it cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    event_from_row(row)
}

/// Retrieves every audit event for one `(staff, date)` schedule, oldest first.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    date: Date,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::staff_id.eq(staff_id.value()))
        .filter(audit_events::event_date.eq(format_date(date)))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(event_from_row)
        .collect()
}

/// Retrieves shop-wide events (no schedule scope), oldest first.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_global_audit_events(
    conn: &mut SqliteConnection,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::staff_id.is_null())
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(event_from_row)
        .collect()
}
