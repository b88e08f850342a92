// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use shearbook_audit::{AuditEvent, StateSnapshot};
use shearbook_domain::{Appointment, AppointmentId, StaffId, format_date};
use time::Date;

/// Names one `(staff, date)` schedule.
///
/// This is the unit of mutual exclusion: mutations for the same key are
/// serialized, mutations for different keys proceed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleKey {
    /// The staff member.
    pub staff_id: StaffId,
    /// The calendar date.
    pub date: Date,
}

impl ScheduleKey {
    /// Creates a new schedule key.
    #[must_use]
    pub const fn new(staff_id: StaffId, date: Date) -> Self {
        Self { staff_id, date }
    }

    /// Returns the key an appointment belongs to.
    #[must_use]
    pub const fn of(appointment: &Appointment) -> Self {
        Self {
            staff_id: appointment.staff_id,
            date: appointment.date,
        }
    }
}

impl std::fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "staff {} on {}", self.staff_id, format_date(self.date))
    }
}

/// All appointments of one staff member on one date.
///
/// Appointments are kept sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// The scope of this schedule.
    pub key: ScheduleKey,
    appointments: Vec<Appointment>,
}

impl DaySchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub const fn new(key: ScheduleKey) -> Self {
        Self {
            key,
            appointments: Vec::new(),
        }
    }

    /// Builds a schedule from stored appointments.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ScheduleMismatch` if any appointment belongs to a
    /// different staff member or date.
    pub fn from_appointments(
        key: ScheduleKey,
        mut appointments: Vec<Appointment>,
    ) -> Result<Self, CoreError> {
        if let Some(stray) = appointments.iter().find(|a| ScheduleKey::of(a) != key) {
            return Err(CoreError::ScheduleMismatch {
                expected: key,
                actual: ScheduleKey::of(stray),
            });
        }
        appointments.sort_by_key(|a| a.start_time);
        Ok(Self { key, appointments })
    }

    /// Returns the appointments, ordered by start time.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Returns the appointment with the given id.
    #[must_use]
    pub fn find(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == Some(id))
    }

    /// Returns the number of appointments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    /// Returns whether the schedule has no appointments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub(crate) fn insert(&mut self, appointment: Appointment) {
        let position: usize = self
            .appointments
            .partition_point(|a| a.start_time <= appointment.start_time);
        self.appointments.insert(position, appointment);
    }

    pub(crate) fn remove(&mut self, id: AppointmentId) -> Option<Appointment> {
        let position: usize = self.appointments.iter().position(|a| a.id == Some(id))?;
        Some(self.appointments.remove(position))
    }

    /// Converts the schedule to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let entries: Vec<String> = self
            .appointments
            .iter()
            .map(|a| {
                let id: String = a.id.map_or_else(|| String::from("new"), |id| format!("#{id}"));
                format!("{id} {}-{}", a.start_time, a.end_time)
            })
            .collect();
        StateSnapshot::new(format!(
            "staff={},date={},appointments=[{}]",
            self.key.staff_id,
            format_date(self.key.date),
            entries.join(", ")
        ))
    }
}

/// The storage write a transition requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    /// Insert a new appointment; storage assigns the id.
    Booked(Appointment),
    /// Replace the stored appointment with the same id.
    Rescheduled(Appointment),
    /// Remove the appointment.
    Cancelled(AppointmentId),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The schedule the command targeted, after the transition.
    pub new_state: DaySchedule,
    /// For a move between schedules, the schedule the appointment left.
    pub vacated_state: Option<DaySchedule>,
    /// The write storage must perform.
    pub change: ScheduleChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
