// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service, staff and client lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shearbook_domain::{Client, ClientId, Service, ServiceId, StaffId, StaffProfile, Status};

use crate::data_models::{ClientRow, ServiceRow, StaffRow};
use crate::diesel_schema::{clients, services, staff};
use crate::error::PersistenceError;

/// Retrieves a service by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_service(
    conn: &mut SqliteConnection,
    service_id: ServiceId,
) -> Result<Option<Service>, PersistenceError> {
    services::table
        .filter(services::service_id.eq(service_id.value()))
        .select(ServiceRow::as_select())
        .first::<ServiceRow>(conn)
        .optional()?
        .map(Service::try_from)
        .transpose()
}

/// Lists all services ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_services(conn: &mut SqliteConnection) -> Result<Vec<Service>, PersistenceError> {
    services::table
        .order(services::service_id.asc())
        .select(ServiceRow::as_select())
        .load::<ServiceRow>(conn)?
        .into_iter()
        .map(Service::try_from)
        .collect()
}

/// Retrieves a staff profile by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_staff(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
) -> Result<Option<StaffProfile>, PersistenceError> {
    staff::table
        .filter(staff::staff_id.eq(staff_id.value()))
        .select(StaffRow::as_select())
        .first::<StaffRow>(conn)
        .optional()?
        .map(StaffProfile::try_from)
        .transpose()
}

/// Lists staff profiles ordered by id, optionally only active ones.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_staff(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<StaffProfile>, PersistenceError> {
    let rows: Vec<StaffRow> = if active_only {
        staff::table
            .filter(staff::status.eq(Status::Active.as_str()))
            .order(staff::staff_id.asc())
            .select(StaffRow::as_select())
            .load::<StaffRow>(conn)?
    } else {
        staff::table
            .order(staff::staff_id.asc())
            .select(StaffRow::as_select())
            .load::<StaffRow>(conn)?
    };

    rows.into_iter().map(StaffProfile::try_from).collect()
}

/// Retrieves a client by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_id: ClientId,
) -> Result<Option<Client>, PersistenceError> {
    Ok(clients::table
        .filter(clients::client_id.eq(client_id.value()))
        .select(ClientRow::as_select())
        .first::<ClientRow>(conn)
        .optional()?
        .map(Client::from))
}

/// Lists all clients ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>, PersistenceError> {
    Ok(clients::table
        .order((clients::name.asc(), clients::client_id.asc()))
        .select(ClientRow::as_select())
        .load::<ClientRow>(conn)?
        .into_iter()
        .map(Client::from)
        .collect())
}
