// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook_audit::AuditEvent;
use shearbook_domain::format_date;
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// Scoped events store their staff id and date; global events store
/// neither.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: String = serde_json::to_string(&event.before)?;
    let after_json: String = serde_json::to_string(&event.after)?;

    let staff_id: Option<i64> = event.staff_id.map(|id| id.value());
    let event_date: Option<String> = event.date.map(format_date);

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::staff_id.eq(staff_id),
            audit_events::event_date.eq(event_date),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, ?staff_id, "Persisted audit event");
    Ok(event_id)
}
