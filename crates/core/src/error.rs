// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::ScheduleKey;
use shearbook_domain::{AppointmentId, DomainError, TimeOfDay};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested interval overlaps an existing appointment.
    SlotConflict {
        /// The schedule that was checked.
        key: ScheduleKey,
        /// Requested start.
        start_time: TimeOfDay,
        /// Requested end.
        end_time: TimeOfDay,
        /// The appointment in the way.
        conflicting: Option<AppointmentId>,
    },
    /// A command was applied to the wrong schedule.
    ScheduleMismatch {
        /// The schedule that was supplied.
        expected: ScheduleKey,
        /// The schedule the command or record belongs to.
        actual: ScheduleKey,
    },
    /// The command cannot be applied by this entry point.
    UnsupportedCommand(&'static str),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SlotConflict {
                key,
                start_time,
                end_time,
                conflicting,
            } => {
                write!(
                    f,
                    "Slot {start_time}-{end_time} for {key} overlaps an existing appointment"
                )?;
                if let Some(id) = conflicting {
                    write!(f, " ({id})")?;
                }
                Ok(())
            }
            Self::ScheduleMismatch { expected, actual } => {
                write!(f, "Schedule mismatch: expected {expected}, got {actual}")
            }
            Self::UnsupportedCommand(name) => write!(f, "Unsupported command: {name}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
