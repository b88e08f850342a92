// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{DaySchedule, ScheduleChange, ScheduleKey, TransitionResult};
use shearbook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shearbook_domain::{
    Appointment, AppointmentId, DomainError, Service, ServiceId, format_date, find_conflict,
};

/// Applies a command to one day schedule, producing the new schedule and
/// an audit event.
///
/// Handles bookings, cancellations and reschedules that stay within the
/// same `(staff, date)`. A reschedule that changes staff or date must go
/// through [`apply_transfer`].
///
/// # Arguments
///
/// * `state` - The current schedule (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new schedule, the storage
///   change and the audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command targets a different schedule
/// - The service is inactive for a new booking
/// - The appointment would run past midnight
/// - The requested interval overlaps another appointment
/// - The appointment to change does not exist in this schedule
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &DaySchedule,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::BookAppointment {
            client_id,
            staff_id,
            service,
            date,
            start_time,
        } => {
            ensure_same_schedule(state.key, ScheduleKey::new(staff_id, date))?;
            ensure_bookable(&service, None)?;

            let appointment: Appointment =
                Appointment::schedule(client_id, staff_id, &service, date, start_time)?;
            ensure_free(state, &appointment, None)?;

            let mut new_state: DaySchedule = state.clone();
            new_state.insert(appointment.clone());

            let action: Action = Action::new(
                String::from("BookAppointment"),
                Some(format!(
                    "Booked {} {}-{} for client {} (service {})",
                    format_date(date),
                    appointment.start_time,
                    appointment.end_time,
                    client_id,
                    service.id
                )),
            );
            let audit_event: AuditEvent = scoped_event(
                actor,
                cause,
                action,
                state.to_snapshot(),
                new_state.to_snapshot(),
                state.key,
            );

            Ok(TransitionResult {
                new_state,
                vacated_state: None,
                change: ScheduleChange::Booked(appointment),
                audit_event,
            })
        }
        Command::RescheduleAppointment {
            appointment_id,
            client_id,
            staff_id,
            service,
            date,
            start_time,
        } => {
            let existing: &Appointment = state
                .find(appointment_id)
                .ok_or(DomainError::AppointmentNotFound(appointment_id))?;
            ensure_same_schedule(state.key, ScheduleKey::new(staff_id, date))?;
            ensure_bookable(&service, Some(existing.service_id))?;

            let updated: Appointment =
                Appointment::schedule(client_id, staff_id, &service, date, start_time)?
                    .with_id(appointment_id);
            ensure_free(state, &updated, Some(appointment_id))?;

            let previous: String = format!("{}-{}", existing.start_time, existing.end_time);
            let mut new_state: DaySchedule = state.clone();
            new_state.remove(appointment_id);
            new_state.insert(updated.clone());

            let action: Action = Action::new(
                String::from("RescheduleAppointment"),
                Some(format!(
                    "Moved appointment {appointment_id} from {previous} to {} {}-{}",
                    format_date(date),
                    updated.start_time,
                    updated.end_time
                )),
            );
            let audit_event: AuditEvent = scoped_event(
                actor,
                cause,
                action,
                state.to_snapshot(),
                new_state.to_snapshot(),
                state.key,
            );

            Ok(TransitionResult {
                new_state,
                vacated_state: None,
                change: ScheduleChange::Rescheduled(updated),
                audit_event,
            })
        }
        Command::CancelAppointment { appointment_id } => {
            let mut new_state: DaySchedule = state.clone();
            let removed: Appointment = new_state
                .remove(appointment_id)
                .ok_or(DomainError::AppointmentNotFound(appointment_id))?;

            let action: Action = Action::new(
                String::from("CancelAppointment"),
                Some(format!(
                    "Cancelled appointment {appointment_id} ({} {}-{})",
                    format_date(removed.date),
                    removed.start_time,
                    removed.end_time
                )),
            );
            let audit_event: AuditEvent = scoped_event(
                actor,
                cause,
                action,
                state.to_snapshot(),
                new_state.to_snapshot(),
                state.key,
            );

            Ok(TransitionResult {
                new_state,
                vacated_state: None,
                change: ScheduleChange::Cancelled(appointment_id),
                audit_event,
            })
        }
    }
}

/// Applies a reschedule that moves an appointment from one day schedule
/// to another.
///
/// The overlap gate runs against `target` only. The audit event is scoped
/// to the target schedule and records both schedules before and after.
/// When both schedules are the same this defers to [`apply`].
///
/// # Errors
///
/// Returns an error if:
/// - The command is not a reschedule
/// - The appointment is not in `source`
/// - The command's staff and date do not name `target`
/// - The requested interval overlaps an appointment in `target`
pub fn apply_transfer(
    source: &DaySchedule,
    target: &DaySchedule,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if source.key == target.key {
        return apply(source, command, actor, cause);
    }

    let name: &'static str = command.name();
    let Command::RescheduleAppointment {
        appointment_id,
        client_id,
        staff_id,
        service,
        date,
        start_time,
    } = command
    else {
        return Err(CoreError::UnsupportedCommand(name));
    };

    let existing: &Appointment = source
        .find(appointment_id)
        .ok_or(DomainError::AppointmentNotFound(appointment_id))?;
    ensure_same_schedule(target.key, ScheduleKey::new(staff_id, date))?;
    ensure_bookable(&service, Some(existing.service_id))?;

    let moved: Appointment =
        Appointment::schedule(client_id, staff_id, &service, date, start_time)?
            .with_id(appointment_id);
    ensure_free(target, &moved, Some(appointment_id))?;

    let mut vacated: DaySchedule = source.clone();
    vacated.remove(appointment_id);
    let mut new_state: DaySchedule = target.clone();
    new_state.insert(moved.clone());

    let action: Action = Action::new(
        String::from("RescheduleAppointment"),
        Some(format!(
            "Moved appointment {appointment_id} from {} {}-{} to {} {}-{}",
            source.key,
            existing.start_time,
            existing.end_time,
            target.key,
            moved.start_time,
            moved.end_time
        )),
    );
    let before: StateSnapshot = combined_snapshot(source, target);
    let after: StateSnapshot = combined_snapshot(&vacated, &new_state);
    let audit_event: AuditEvent = scoped_event(actor, cause, action, before, after, target.key);

    Ok(TransitionResult {
        new_state,
        vacated_state: Some(vacated),
        change: ScheduleChange::Rescheduled(moved),
        audit_event,
    })
}

fn ensure_same_schedule(expected: ScheduleKey, actual: ScheduleKey) -> Result<(), CoreError> {
    if expected != actual {
        return Err(CoreError::ScheduleMismatch { expected, actual });
    }
    Ok(())
}

/// An inactive service can no longer be booked, but an appointment that
/// already uses it may still be moved.
fn ensure_bookable(service: &Service, current: Option<ServiceId>) -> Result<(), CoreError> {
    if !service.status.is_active() && current != Some(service.id) {
        return Err(CoreError::DomainViolation(DomainError::ServiceInactive(
            service.id,
        )));
    }
    Ok(())
}

/// The no-double-booking gate.
fn ensure_free(
    schedule: &DaySchedule,
    candidate: &Appointment,
    exclude: Option<AppointmentId>,
) -> Result<(), CoreError> {
    match find_conflict(
        schedule.appointments(),
        candidate.staff_id,
        candidate.date,
        candidate.start_time,
        candidate.end_time,
        exclude,
    ) {
        Some(conflict) => Err(CoreError::SlotConflict {
            key: schedule.key,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            conflicting: conflict.id,
        }),
        None => Ok(()),
    }
}

fn combined_snapshot(source: &DaySchedule, target: &DaySchedule) -> StateSnapshot {
    StateSnapshot::new(format!(
        "{}; {}",
        source.to_snapshot().data,
        target.to_snapshot().data
    ))
}

const fn scoped_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    key: ScheduleKey,
) -> AuditEvent {
    AuditEvent::new(actor, cause, action, before, after, key.staff_id, key.date)
}
