// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Shearbook.
//!
//! Stores the catalog (services, staff, clients), the operating calendar,
//! appointments and the audit log in `SQLite` through Diesel.
//!
//! ## Storage Conventions
//!
//! - Times of day are `INTEGER` minutes since midnight
//! - Dates are `TEXT` in `YYYY-MM-DD`
//! - Audit payloads are JSON text
//!
//! ## Testing
//!
//! Every test gets its own shared-cache in-memory database, so tests never
//! see each other's rows and need no cleanup.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use crate::backend::sqlite::{JournalMode, open};
use diesel::SqliteConnection;
use shearbook::{DaySchedule, ScheduleKey, TransitionResult};
use shearbook_audit::AuditEvent;
use shearbook_domain::{
    Appointment, AppointmentId, BarberLeave, Client, ClientId, OperatingCalendar,
    OperatingHours, Service, ServiceId, StaffId, StaffProfile,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = open(&shared_memory_url, JournalMode::Rollback)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let path_str: &str = path.to_str().ok_or_else(|| PersistenceError::Open {
            url: path.display().to_string(),
            reason: String::from("path is not valid UTF-8"),
        })?;

        let conn: SqliteConnection = open(path_str, JournalMode::WriteAhead)?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::ensure_foreign_keys(&mut self.conn)
    }

    // ========================================================================
    // Transitions & Audit
    // ========================================================================

    /// Persists a transition result: the appointment change and its audit
    /// event, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or cannot be read.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline for one staff member's day, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be read.
    pub fn get_audit_timeline(
        &mut self,
        staff_id: StaffId,
        date: Date,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, staff_id, date)
    }

    /// Retrieves shop-wide audit events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be read.
    pub fn get_global_audit_events(&mut self) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_global_audit_events(&mut self.conn)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Stores a new service and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service(&mut self, service: &Service) -> Result<ServiceId, PersistenceError> {
        mutations::catalog::insert_service(&mut self.conn, service)
    }

    /// Retrieves a service by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_service(&mut self, service_id: ServiceId) -> Result<Option<Service>, PersistenceError> {
        queries::catalog::get_service(&mut self.conn, service_id)
    }

    /// Lists all services.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_services(&mut self) -> Result<Vec<Service>, PersistenceError> {
        queries::catalog::list_services(&mut self.conn)
    }

    /// Overwrites an existing service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or the update fails.
    pub fn update_service(&mut self, service: &Service) -> Result<(), PersistenceError> {
        mutations::catalog::update_service(&mut self.conn, service)
    }

    /// Stores a new staff profile and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_staff(&mut self, profile: &StaffProfile) -> Result<StaffId, PersistenceError> {
        mutations::catalog::insert_staff(&mut self.conn, profile)
    }

    /// Retrieves a staff profile by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_staff(&mut self, staff_id: StaffId) -> Result<Option<StaffProfile>, PersistenceError> {
        queries::catalog::get_staff(&mut self.conn, staff_id)
    }

    /// Lists every staff profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_staff(&mut self) -> Result<Vec<StaffProfile>, PersistenceError> {
        queries::catalog::list_staff(&mut self.conn, false)
    }

    /// Lists active staff profiles only.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_staff(&mut self) -> Result<Vec<StaffProfile>, PersistenceError> {
        queries::catalog::list_staff(&mut self.conn, true)
    }

    /// Overwrites an existing staff profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member does not exist or the update fails.
    pub fn update_staff(&mut self, profile: &StaffProfile) -> Result<(), PersistenceError> {
        mutations::catalog::update_staff(&mut self.conn, profile)
    }

    /// Stores a new client and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_client(&mut self, client: &Client) -> Result<ClientId, PersistenceError> {
        mutations::catalog::insert_client(&mut self.conn, client)
    }

    /// Retrieves a client by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_client(&mut self, client_id: ClientId) -> Result<Option<Client>, PersistenceError> {
        queries::catalog::get_client(&mut self.conn, client_id)
    }

    /// Lists all clients by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_clients(&mut self) -> Result<Vec<Client>, PersistenceError> {
        queries::catalog::list_clients(&mut self.conn)
    }

    // ========================================================================
    // Calendar
    // ========================================================================

    /// Loads the weekly operating hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hours are missing or invalid.
    pub fn get_operating_hours(&mut self) -> Result<OperatingHours, PersistenceError> {
        queries::calendar::get_operating_hours(&mut self.conn)
    }

    /// Replaces the weekly operating hours and records `event`, atomically.
    ///
    /// # Returns
    ///
    /// The audit event ID.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails; nothing is changed in that case.
    pub fn set_operating_hours_with_audit(
        &mut self,
        hours: &OperatingHours,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_hours_change(&mut self.conn, hours, event)
    }

    /// Puts a staff member on leave (`on_leave`) or back to work for a date
    /// and records `event` when that changed anything, atomically.
    ///
    /// # Returns
    ///
    /// The audit event ID, or `None` if the leave was already in that state.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails; nothing is changed in that case.
    pub fn change_leave_with_audit(
        &mut self,
        staff_id: StaffId,
        date: Date,
        on_leave: bool,
        event: &AuditEvent,
    ) -> Result<Option<i64>, PersistenceError> {
        mutations::persist_leave_change(&mut self.conn, staff_id, date, on_leave, event)
    }

    /// Lists every recorded leave day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leaves(&mut self) -> Result<Vec<BarberLeave>, PersistenceError> {
        queries::calendar::list_leaves(&mut self.conn)
    }

    /// Loads hours and leaves as one calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if either lookup fails.
    pub fn load_operating_calendar(&mut self) -> Result<OperatingCalendar, PersistenceError> {
        queries::calendar::load_operating_calendar(&mut self.conn)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Retrieves an appointment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointment(
        &mut self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)
    }

    /// Lists appointments, optionally filtered by staff member and date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appointments(
        &mut self,
        staff_id: Option<StaffId>,
        date: Option<Date>,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments(&mut self.conn, staff_id, date)
    }

    /// Loads one staff member's appointments for one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_day_schedule(&mut self, key: ScheduleKey) -> Result<DaySchedule, PersistenceError> {
        queries::appointments::load_day_schedule(&mut self.conn, key)
    }
}
