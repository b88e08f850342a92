// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Services, staff and clients.
//!
//! Plain validated record keeping. Editing a service never touches
//! appointments already booked with it.

use shearbook_domain::{
    Client, ClientId, Service, ServiceDuration, ServiceId, StaffId, StaffProfile, Status,
    TimeOfDay, validate_client, validate_service, validate_staff_profile,
};
use std::str::FromStr;
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::input::{check_id, parse_time_input};
use crate::request_response::{
    ClientInfo, CreateClientRequest, CreateServiceRequest, CreateStaffRequest,
    ListClientsResponse, ListServicesResponse, ListStaffResponse, ServiceInfo, StaffInfo,
    UpdateServiceRequest, UpdateStaffRequest,
};
use crate::scheduler::{Scheduler, require_service, require_staff};

fn parse_duration(minutes: u16) -> Result<ServiceDuration, ApiError> {
    ServiceDuration::new(minutes).map_err(translate_domain_error)
}

fn parse_status(value: &str) -> Result<Status, ApiError> {
    Status::from_str(value.trim()).map_err(translate_domain_error)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Scheduler {
    // ========================================================================
    // Services
    // ========================================================================

    /// Lists every service, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_services(&self) -> Result<ListServicesResponse, ApiError> {
        let services: Vec<Service> = self.storage().await.list_services()?;
        Ok(ListServicesResponse {
            services: services.iter().map(ServiceInfo::from).collect(),
        })
    }

    /// Adds an active service to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the duration is not between
    /// one minute and one day.
    pub async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<ServiceInfo, ApiError> {
        let mut service: Service = Service {
            id: ServiceId::new(0),
            name: request.name.trim().to_string(),
            price_cents: request.price_cents,
            duration: parse_duration(request.duration_minutes)?,
            status: Status::Active,
        };
        validate_service(&service).map_err(translate_domain_error)?;

        service.id = self.storage().await.create_service(&service)?;
        info!(service_id = service.id.value(), name = %service.name, "Created service");
        Ok(ServiceInfo::from(&service))
    }

    /// Edits a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or a field is invalid.
    pub async fn update_service(
        &self,
        service_id: i64,
        request: UpdateServiceRequest,
    ) -> Result<ServiceInfo, ApiError> {
        let service_id: ServiceId = ServiceId::new(check_id("service_id", service_id)?);
        let mut db = self.storage().await;
        let mut service: Service = require_service(&mut db, service_id)?;

        if let Some(name) = request.name {
            service.name = name.trim().to_string();
        }
        if let Some(price_cents) = request.price_cents {
            service.price_cents = price_cents;
        }
        if let Some(minutes) = request.duration_minutes {
            service.duration = parse_duration(minutes)?;
        }
        if let Some(status) = request.status {
            service.status = parse_status(&status)?;
        }
        validate_service(&service).map_err(translate_domain_error)?;

        db.update_service(&service)?;
        drop(db);

        info!(
            service_id = service_id.value(),
            duration = service.duration.minutes(),
            status = %service.status,
            "Updated service"
        );
        Ok(ServiceInfo::from(&service))
    }

    // ========================================================================
    // Staff
    // ========================================================================

    /// Lists staff members, optionally only active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_staff(&self, active_only: bool) -> Result<ListStaffResponse, ApiError> {
        let mut db = self.storage().await;
        let staff: Vec<StaffProfile> = if active_only {
            db.list_active_staff()?
        } else {
            db.list_staff()?
        };
        drop(db);

        Ok(ListStaffResponse {
            staff: staff.iter().map(StaffInfo::from).collect(),
        })
    }

    /// Adds an active staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if a time is malformed, the name is blank, the
    /// working day is empty or lunch falls outside it.
    pub async fn create_staff(&self, request: CreateStaffRequest) -> Result<StaffInfo, ApiError> {
        let mut profile: StaffProfile = StaffProfile {
            id: StaffId::new(0),
            name: request.name.trim().to_string(),
            work_start: parse_time_input("work_start", &request.work_start)?,
            work_end: parse_time_input("work_end", &request.work_end)?,
            lunch_start: parse_time_input("lunch_start", &request.lunch_start)?,
            lunch_end: parse_time_input("lunch_end", &request.lunch_end)?,
            status: Status::Active,
        };
        validate_staff_profile(&profile).map_err(translate_domain_error)?;

        profile.id = self.storage().await.create_staff(&profile)?;
        info!(staff_id = profile.id.value(), name = %profile.name, "Created staff member");
        Ok(StaffInfo::from(&profile))
    }

    /// Edits a staff member's name, hours or status.
    ///
    /// Existing appointments are left where they are even if they now fall
    /// outside the new hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member does not exist or the result is
    /// invalid.
    pub async fn update_staff(
        &self,
        staff_id: i64,
        request: UpdateStaffRequest,
    ) -> Result<StaffInfo, ApiError> {
        let staff_id: StaffId = StaffId::new(check_id("staff_id", staff_id)?);
        let patch_time = |field: &str, value: Option<String>, current: TimeOfDay| {
            value.map_or(Ok(current), |v| parse_time_input(field, &v))
        };

        let mut db = self.storage().await;
        let mut profile: StaffProfile = require_staff(&mut db, staff_id)?;

        if let Some(name) = request.name {
            profile.name = name.trim().to_string();
        }
        profile.work_start = patch_time("work_start", request.work_start, profile.work_start)?;
        profile.work_end = patch_time("work_end", request.work_end, profile.work_end)?;
        profile.lunch_start = patch_time("lunch_start", request.lunch_start, profile.lunch_start)?;
        profile.lunch_end = patch_time("lunch_end", request.lunch_end, profile.lunch_end)?;
        if let Some(status) = request.status {
            profile.status = parse_status(&status)?;
        }
        validate_staff_profile(&profile).map_err(translate_domain_error)?;

        db.update_staff(&profile)?;
        drop(db);

        info!(staff_id = staff_id.value(), status = %profile.status, "Updated staff member");
        Ok(StaffInfo::from(&profile))
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Lists clients by name.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list_clients(&self) -> Result<ListClientsResponse, ApiError> {
        let clients: Vec<Client> = self.storage().await.list_clients()?;
        Ok(ListClientsResponse {
            clients: clients.iter().map(ClientInfo::from).collect(),
        })
    }

    /// Adds a client. Blank contact fields are stored as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<ClientInfo, ApiError> {
        let mut client: Client = Client {
            id: ClientId::new(0),
            name: request.name.trim().to_string(),
            phone: non_blank(request.phone),
            email: non_blank(request.email),
        };
        validate_client(&client).map_err(translate_domain_error)?;

        client.id = self.storage().await.create_client(&client)?;
        info!(client_id = client.id.value(), "Created client");
        Ok(ClientInfo::from(&client))
    }
}
