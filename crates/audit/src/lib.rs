// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Audit trail for schedule changes.
//!
//! Every accepted booking, reschedule or cancellation produces exactly one
//! [`AuditEvent`], scoped to the staff member and date whose day schedule
//! changed. A transfer between two days is recorded against the target day.

use serde::{Deserialize, Serialize};
use shearbook_domain::StaffId;
use time::Date;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is whoever initiated a schedule change: front-desk staff,
/// a client booking online, or an import job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "staff", "client", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`BookAppointment`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A rendered day schedule at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// A textual rendering of the schedule.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing one schedule change.
///
/// Audit events capture:
/// - Who performed the change (actor)
/// - Why it was performed (cause)
/// - What was done (action)
/// - The day schedule before and after
/// - Which staff member and date the change applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The persisted identifier. `None` until stored.
    pub event_id: Option<i64>,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The schedule before the change.
    pub before: StateSnapshot,
    /// The schedule after the change.
    pub after: StateSnapshot,
    /// The staff member whose schedule changed.
    pub staff_id: Option<StaffId>,
    /// The date of the schedule that changed.
    pub date: Option<Date>,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent` scoped to one day schedule.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The schedule before the change
    /// * `after` - The schedule after the change
    /// * `staff_id` - The staff member whose schedule changed
    /// * `date` - The date of the schedule
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        staff_id: StaffId,
        date: Date,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            staff_id: Some(staff_id),
            date: Some(date),
        }
    }

    /// Creates an event for a shop-wide change with no single schedule,
    /// such as an operating hours update.
    #[must_use]
    pub const fn global(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            staff_id: None,
            date: None,
        }
    }

    /// Returns a copy carrying the persisted identifier.
    #[must_use]
    pub const fn with_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
