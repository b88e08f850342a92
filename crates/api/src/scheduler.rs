// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking operations.
//!
//! The `Scheduler` is the single entry point callers use to read
//! availability and to book, move or cancel appointments.
//!
//! ## Write Protocol
//!
//! 1. Take the schedule lock(s) for every `(staff, date)` touched
//! 2. Read a fresh snapshot of those schedules
//! 3. Run the core transition, which re-checks for overlaps
//! 4. Persist the appointment change and its audit event atomically
//!
//! The storage mutex is held only for individual reads and writes, never
//! across the whole protocol, so unrelated schedules proceed in parallel.

use shearbook::{Command, DaySchedule, ScheduleKey, TransitionResult, apply, apply_transfer};
use shearbook_audit::{Actor, Cause};
use shearbook_domain::{
    Appointment, AppointmentId, ClientId, DomainError, OperatingCalendar, Service, ServiceId,
    StaffId, StaffProfile, TimeOfDay, calculate_available_slots, format_date,
};
use shearbook_persistence::{PersistTransitionResult, Persistence};
use std::sync::Arc;
use time::Date;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::input::{
    check_id, parse_date_input, parse_id, parse_optional_date, parse_optional_id,
    parse_time_input,
};
use crate::locks::{ScheduleGuard, ScheduleLocks};
use crate::request_response::{
    AppointmentInfo, AppointmentResponse, AvailabilityRequest, AvailabilityResponse,
    CancelAppointmentResponse, CreateAppointmentRequest, ListAppointmentsRequest,
    ListAppointmentsResponse, UpdateAppointmentRequest,
};

/// How many times an update or cancel re-reads an appointment that moved
/// to another schedule while it waited for a lock.
pub const MAX_RELOCATION_ATTEMPTS: usize = 3;

/// Booking service over shared storage.
///
/// Cloning is cheap; clones share storage and locks.
#[derive(Clone)]
pub struct Scheduler {
    persistence: Arc<Mutex<Persistence>>,
    locks: Arc<ScheduleLocks>,
}

/// Everything one schedule write needs, read under a single storage lock.
struct WriteSnapshot {
    source: DaySchedule,
    target: DaySchedule,
    client_id: ClientId,
    service: Service,
}

impl Scheduler {
    /// Creates a scheduler that owns the given storage.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            locks: Arc::new(ScheduleLocks::new()),
        }
    }

    pub(crate) async fn storage(&self) -> MutexGuard<'_, Persistence> {
        self.persistence.lock().await
    }

    /// Number of schedules with a live lock table entry.
    #[cfg(test)]
    pub(crate) fn tracked_schedules(&self) -> usize {
        self.locks.len()
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Returns the bookable start times for a staff member, date and service.
    ///
    /// All inputs are read from one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An id, the date or the excluded appointment id is malformed
    /// - The staff member or service does not exist
    /// - The service is inactive and no existing appointment is being moved
    pub async fn get_available_slots(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResponse, ApiError> {
        let staff_id: StaffId = StaffId::new(parse_id("staff_id", &request.staff_id)?);
        let service_id: ServiceId = ServiceId::new(parse_id("service_id", &request.service_id)?);
        let date: Date = parse_date_input("date", &request.date)?;
        let exclude: Option<AppointmentId> = parse_optional_id(
            "exclude_appointment_id",
            request.exclude_appointment_id.as_deref(),
        )?
        .map(AppointmentId::new);

        let (calendar, staff, service, schedule): (
            OperatingCalendar,
            StaffProfile,
            Service,
            DaySchedule,
        ) = {
            let mut db = self.storage().await;
            let staff: StaffProfile = require_staff(&mut db, staff_id)?;
            let service: Service = require_service(&mut db, service_id)?;
            let calendar: OperatingCalendar = db.load_operating_calendar()?;
            let schedule: DaySchedule = db.load_day_schedule(ScheduleKey::new(staff_id, date))?;
            (calendar, staff, service, schedule)
        };

        if !service.status.is_active() && exclude.is_none() {
            return Err(translate_domain_error(DomainError::ServiceInactive(
                service_id,
            )));
        }

        let slots: Vec<TimeOfDay> = calculate_available_slots(
            &calendar,
            &staff,
            date,
            service.duration,
            schedule.appointments(),
            exclude,
        );

        debug!(
            staff_id = staff_id.value(),
            date = %date,
            service_id = service_id.value(),
            slot_count = slots.len(),
            "Calculated availability"
        );

        Ok(AvailabilityResponse {
            staff_id: staff_id.value(),
            date: format_date(date),
            service_id: service_id.value(),
            slots: slots.iter().map(TimeOfDay::format).collect(),
        })
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Books an appointment.
    ///
    /// The end time is the start time plus the service duration. The overlap
    /// check runs again here against fresh data, regardless of what
    /// availability was shown earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any field is malformed
    /// - The client, staff member or service does not exist
    /// - The staff member or service is inactive
    /// - The interval overlaps an existing appointment
    /// - The appointment would run past midnight
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<AppointmentResponse, ApiError> {
        let client_id: ClientId = ClientId::new(check_id("client_id", request.client_id)?);
        let staff_id: StaffId = StaffId::new(check_id("staff_id", request.staff_id)?);
        let service_id: ServiceId = ServiceId::new(check_id("service_id", request.service_id)?);
        let date: Date = parse_date_input("date", &request.date)?;
        let start_time: TimeOfDay = parse_time_input("start_time", &request.start_time)?;

        let key: ScheduleKey = ScheduleKey::new(staff_id, date);
        let guard: ScheduleGuard<'_> = self.locks.acquire(&[key]).await;

        let (schedule, service): (DaySchedule, Service) = {
            let mut db = self.storage().await;
            require_client(&mut db, client_id)?;
            let staff: StaffProfile = require_staff(&mut db, staff_id)?;
            if !staff.status.is_active() {
                return Err(translate_domain_error(DomainError::StaffInactive(staff_id)));
            }
            let service: Service = require_service(&mut db, service_id)?;
            (db.load_day_schedule(key)?, service)
        };

        let command: Command = Command::BookAppointment {
            client_id,
            staff_id,
            service,
            date,
            start_time,
        };
        let result: TransitionResult =
            apply(&schedule, command, actor, cause).map_err(translate_core_error)?;
        let persisted: PersistTransitionResult =
            self.storage().await.persist_transition(&result)?;

        drop(guard);

        let appointment: Appointment = stored_appointment(persisted.appointment)?;
        info!(
            appointment_id = appointment.id.map(|id| id.value()),
            schedule = %key,
            start = %appointment.start_time,
            end = %appointment.end_time,
            event_id = persisted.event_id,
            "Booked appointment"
        );

        Ok(AppointmentResponse {
            message: format!(
                "Booked {} {}-{}",
                format_date(appointment.date),
                appointment.start_time,
                appointment.end_time
            ),
            appointment: AppointmentInfo::from_appointment(&appointment),
            event_id: persisted.event_id,
        })
    }

    /// Changes an appointment's client, staff member, service, date or start.
    ///
    /// The end time is recomputed from the resulting service, even when the
    /// request changes nothing. The appointment's own previous slot never
    /// counts as a conflict. Moving to another staff member or date locks
    /// both schedules.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any field is malformed
    /// - The appointment, client, staff member or service does not exist
    /// - The appointment is moved to an inactive staff member
    /// - The service is changed to an inactive one
    /// - The new interval overlaps another appointment
    /// - The appointment kept moving under concurrent edits
    #[allow(clippy::too_many_lines)]
    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        request: UpdateAppointmentRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<AppointmentResponse, ApiError> {
        let appointment_id: AppointmentId =
            AppointmentId::new(check_id("appointment_id", appointment_id)?);
        let client_id: Option<ClientId> = request
            .client_id
            .map(|id| check_id("client_id", id).map(ClientId::new))
            .transpose()?;
        let staff_id: Option<StaffId> = request
            .staff_id
            .map(|id| check_id("staff_id", id).map(StaffId::new))
            .transpose()?;
        let service_id: Option<ServiceId> = request
            .service_id
            .map(|id| check_id("service_id", id).map(ServiceId::new))
            .transpose()?;
        let date: Option<Date> = parse_optional_date("date", request.date.as_deref())?;
        let start_time: Option<TimeOfDay> = request
            .start_time
            .as_deref()
            .map(|value| parse_time_input("start_time", value))
            .transpose()?;

        debug!(
            appointment_id = appointment_id.value(),
            refresh_only = request.is_empty(),
            "Updating appointment"
        );

        for attempt in 1..=MAX_RELOCATION_ATTEMPTS {
            let current: Appointment = self.require_appointment(appointment_id).await?;
            let source: ScheduleKey = ScheduleKey::of(&current);
            let target: ScheduleKey = ScheduleKey::new(
                staff_id.unwrap_or(current.staff_id),
                date.unwrap_or(current.date),
            );
            let guard: ScheduleGuard<'_> = self.locks.acquire(&[source, target]).await;

            let Some(snapshot) = self
                .read_write_snapshot(appointment_id, source, target, client_id, service_id)
                .await?
            else {
                warn!(
                    appointment_id = appointment_id.value(),
                    attempt, "Appointment moved while waiting for its schedule lock; retrying"
                );
                drop(guard);
                continue;
            };

            let existing_start: TimeOfDay = snapshot
                .source
                .find(appointment_id)
                .map_or(current.start_time, |a| a.start_time);
            let command: Command = Command::RescheduleAppointment {
                appointment_id,
                client_id: snapshot.client_id,
                staff_id: target.staff_id,
                service: snapshot.service,
                date: target.date,
                start_time: start_time.unwrap_or(existing_start),
            };
            let result: TransitionResult = apply_transfer(
                &snapshot.source,
                &snapshot.target,
                command,
                actor,
                cause,
            )
            .map_err(translate_core_error)?;
            let persisted: PersistTransitionResult =
                self.storage().await.persist_transition(&result)?;

            drop(guard);

            let appointment: Appointment = stored_appointment(persisted.appointment)?;
            info!(
                appointment_id = appointment_id.value(),
                from = %source,
                to = %target,
                start = %appointment.start_time,
                end = %appointment.end_time,
                event_id = persisted.event_id,
                "Rescheduled appointment"
            );

            return Ok(AppointmentResponse {
                message: format!(
                    "Appointment {appointment_id} now {} {}-{}",
                    format_date(appointment.date),
                    appointment.start_time,
                    appointment.end_time
                ),
                appointment: AppointmentInfo::from_appointment(&appointment),
                event_id: persisted.event_id,
            });
        }

        Err(relocation_exhausted(appointment_id))
    }

    /// Cancels an appointment, removing it.
    ///
    /// Cancelling twice fails the second time with not-found.
    ///
    /// # Errors
    ///
    /// Returns an error if the appointment does not exist.
    pub async fn cancel_appointment(
        &self,
        appointment_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<CancelAppointmentResponse, ApiError> {
        let appointment_id: AppointmentId =
            AppointmentId::new(check_id("appointment_id", appointment_id)?);

        for attempt in 1..=MAX_RELOCATION_ATTEMPTS {
            let current: Appointment = self.require_appointment(appointment_id).await?;
            let key: ScheduleKey = ScheduleKey::of(&current);
            let guard: ScheduleGuard<'_> = self.locks.acquire(&[key]).await;

            let schedule: DaySchedule = self.storage().await.load_day_schedule(key)?;
            if schedule.find(appointment_id).is_none() {
                drop(guard);
                debug!(
                    appointment_id = appointment_id.value(),
                    attempt, "Appointment left its schedule before cancel; retrying"
                );
                continue;
            }

            let result: TransitionResult = apply(
                &schedule,
                Command::CancelAppointment { appointment_id },
                actor,
                cause,
            )
            .map_err(translate_core_error)?;
            let persisted: PersistTransitionResult =
                self.storage().await.persist_transition(&result)?;

            drop(guard);

            info!(
                appointment_id = appointment_id.value(),
                schedule = %key,
                event_id = persisted.event_id,
                "Cancelled appointment"
            );

            return Ok(CancelAppointmentResponse {
                appointment_id: appointment_id.value(),
                event_id: persisted.event_id,
                message: format!("Cancelled appointment {appointment_id}"),
            });
        }

        Err(relocation_exhausted(appointment_id))
    }

    /// Lists appointments, optionally for one staff member and/or date.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter is malformed or storage fails.
    pub async fn list_appointments(
        &self,
        request: &ListAppointmentsRequest,
    ) -> Result<ListAppointmentsResponse, ApiError> {
        let staff_id: Option<StaffId> =
            parse_optional_id("staff_id", request.staff_id.as_deref())?.map(StaffId::new);
        let date: Option<Date> = parse_optional_date("date", request.date.as_deref())?;

        let appointments: Vec<Appointment> =
            self.storage().await.list_appointments(staff_id, date)?;

        Ok(ListAppointmentsResponse {
            appointments: appointments
                .iter()
                .map(AppointmentInfo::from_appointment)
                .collect(),
        })
    }

    /// Retrieves one appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed or the appointment does not exist.
    pub async fn get_appointment(&self, appointment_id: i64) -> Result<AppointmentInfo, ApiError> {
        let appointment_id: AppointmentId =
            AppointmentId::new(check_id("appointment_id", appointment_id)?);
        let appointment: Appointment = self.require_appointment(appointment_id).await?;
        Ok(AppointmentInfo::from_appointment(&appointment))
    }

    async fn require_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Appointment, ApiError> {
        self.storage()
            .await
            .get_appointment(appointment_id)?
            .ok_or_else(|| translate_domain_error(DomainError::AppointmentNotFound(appointment_id)))
    }

    /// Reads both schedules and the referenced records for a reschedule.
    ///
    /// Returns `None` if the appointment is no longer in `source`.
    async fn read_write_snapshot(
        &self,
        appointment_id: AppointmentId,
        source: ScheduleKey,
        target: ScheduleKey,
        client_id: Option<ClientId>,
        service_id: Option<ServiceId>,
    ) -> Result<Option<WriteSnapshot>, ApiError> {
        let mut db = self.storage().await;

        let source_schedule: DaySchedule = db.load_day_schedule(source)?;
        let Some(existing) = source_schedule.find(appointment_id) else {
            return Ok(None);
        };

        let client_id: ClientId = client_id.unwrap_or(existing.client_id);
        if client_id != existing.client_id {
            require_client(&mut db, client_id)?;
        }

        let staff: StaffProfile = require_staff(&mut db, target.staff_id)?;
        if !staff.status.is_active() && target.staff_id != existing.staff_id {
            return Err(translate_domain_error(DomainError::StaffInactive(
                target.staff_id,
            )));
        }

        let service: Service =
            require_service(&mut db, service_id.unwrap_or(existing.service_id))?;

        let target_schedule: DaySchedule = if target == source {
            source_schedule.clone()
        } else {
            db.load_day_schedule(target)?
        };

        Ok(Some(WriteSnapshot {
            source: source_schedule,
            target: target_schedule,
            client_id,
            service,
        }))
    }
}

pub(crate) fn require_staff(
    db: &mut Persistence,
    staff_id: StaffId,
) -> Result<StaffProfile, ApiError> {
    db.get_staff(staff_id)?
        .ok_or_else(|| translate_domain_error(DomainError::StaffNotFound(staff_id)))
}

pub(crate) fn require_service(
    db: &mut Persistence,
    service_id: ServiceId,
) -> Result<Service, ApiError> {
    db.get_service(service_id)?
        .ok_or_else(|| translate_domain_error(DomainError::ServiceNotFound(service_id)))
}

fn require_client(db: &mut Persistence, client_id: ClientId) -> Result<(), ApiError> {
    db.get_client(client_id)?
        .map(|_| ())
        .ok_or_else(|| translate_domain_error(DomainError::ClientNotFound(client_id)))
}

fn stored_appointment(appointment: Option<Appointment>) -> Result<Appointment, ApiError> {
    appointment.ok_or_else(|| ApiError::Internal {
        message: String::from("Storage did not return the written appointment"),
    })
}

fn relocation_exhausted(appointment_id: AppointmentId) -> ApiError {
    warn!(
        appointment_id = appointment_id.value(),
        attempts = MAX_RELOCATION_ATTEMPTS,
        "Gave up chasing a moving appointment"
    );
    ApiError::Internal {
        message: format!(
            "Appointment {appointment_id} changed schedule {MAX_RELOCATION_ATTEMPTS} times while being edited"
        ),
    }
}
