// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service, staff and client mutations.
//!
//! Inserts ignore the id carried by the value and return the id the
//! database assigned.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook_domain::{Client, ClientId, Service, ServiceId, StaffId, StaffProfile};
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::{NewClientRow, NewServiceRow, NewStaffRow, time_to_column};
use crate::diesel_schema::{clients, services, staff};
use crate::error::PersistenceError;

fn service_row(service: &Service) -> NewServiceRow<'_> {
    NewServiceRow {
        name: &service.name,
        price_cents: i64::from(service.price_cents),
        duration_minutes: i32::from(service.duration.minutes()),
        status: service.status.as_str(),
    }
}

fn staff_row(profile: &StaffProfile) -> NewStaffRow<'_> {
    NewStaffRow {
        name: &profile.name,
        work_start: time_to_column(profile.work_start),
        work_end: time_to_column(profile.work_end),
        lunch_start: time_to_column(profile.lunch_start),
        lunch_end: time_to_column(profile.lunch_end),
        status: profile.status.as_str(),
    }
}

/// Inserts a service.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_service(
    conn: &mut SqliteConnection,
    service: &Service,
) -> Result<ServiceId, PersistenceError> {
    diesel::insert_into(services::table)
        .values(service_row(service))
        .execute(conn)?;
    let service_id: i64 = last_insert_rowid(conn)?;

    debug!(service_id, name = %service.name, "Inserted service");
    Ok(ServiceId::new(service_id))
}

/// Overwrites an existing service.
///
/// Appointments already booked keep their stored end time.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the service does not exist.
pub fn update_service(conn: &mut SqliteConnection, service: &Service) -> Result<(), PersistenceError> {
    let row: NewServiceRow<'_> = service_row(service);
    let rows: usize = diesel::update(services::table.find(service.id.value()))
        .set((
            services::name.eq(row.name),
            services::price_cents.eq(row.price_cents),
            services::duration_minutes.eq(row.duration_minutes),
            services::status.eq(row.status),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Service {} not found",
            service.id
        )));
    }

    debug!(service_id = service.id.value(), "Updated service");
    Ok(())
}

/// Inserts a staff profile.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_staff(
    conn: &mut SqliteConnection,
    profile: &StaffProfile,
) -> Result<StaffId, PersistenceError> {
    diesel::insert_into(staff::table)
        .values(staff_row(profile))
        .execute(conn)?;
    let staff_id: i64 = last_insert_rowid(conn)?;

    debug!(staff_id, name = %profile.name, "Inserted staff profile");
    Ok(StaffId::new(staff_id))
}

/// Overwrites an existing staff profile.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the staff member does not exist.
pub fn update_staff(
    conn: &mut SqliteConnection,
    profile: &StaffProfile,
) -> Result<(), PersistenceError> {
    let row: NewStaffRow<'_> = staff_row(profile);
    let rows: usize = diesel::update(staff::table.find(profile.id.value()))
        .set((
            staff::name.eq(row.name),
            staff::work_start.eq(row.work_start),
            staff::work_end.eq(row.work_end),
            staff::lunch_start.eq(row.lunch_start),
            staff::lunch_end.eq(row.lunch_end),
            staff::status.eq(row.status),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Staff member {} not found",
            profile.id
        )));
    }

    debug!(staff_id = profile.id.value(), "Updated staff profile");
    Ok(())
}

/// Inserts a client.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_client(
    conn: &mut SqliteConnection,
    client: &Client,
) -> Result<ClientId, PersistenceError> {
    diesel::insert_into(clients::table)
        .values(NewClientRow {
            name: &client.name,
            phone: client.phone.as_deref(),
            email: client.email.as_deref(),
        })
        .execute(conn)?;
    let client_id: i64 = last_insert_rowid(conn)?;

    debug!(client_id, "Inserted client");
    Ok(ClientId::new(client_id))
}
