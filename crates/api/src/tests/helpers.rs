// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shearbook_audit::{Actor, Cause};
use shearbook_persistence::Persistence;

use crate::{
    AppointmentResponse, AvailabilityRequest, CreateAppointmentRequest, CreateClientRequest,
    CreateServiceRequest, CreateStaffRequest, Scheduler,
};

/// Monday, 09:00-19:00 by default.
pub const MONDAY: &str = "2026-03-02";
/// Tuesday, 09:00-19:00 by default.
pub const TUESDAY: &str = "2026-03-03";
/// Sunday, closed by default.
pub const SUNDAY: &str = "2026-03-08";

/// Ids of the records every seeded scheduler starts with.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub staff_id: i64,
    pub other_staff_id: i64,
    pub service_id: i64,
    pub client_id: i64,
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("desk-1"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_staff_request(name: &str) -> CreateStaffRequest {
    CreateStaffRequest {
        name: String::from(name),
        work_start: String::from("09:00"),
        work_end: String::from("19:00"),
        lunch_start: String::from("12:00"),
        lunch_end: String::from("13:00"),
    }
}

/// A scheduler over a fresh in-memory database with two barbers working
/// `09:00-19:00` (lunch `12:00-13:00`), a 30-minute haircut and one client.
pub async fn create_test_scheduler() -> (Scheduler, Fixture) {
    let scheduler: Scheduler = Scheduler::new(Persistence::new_in_memory().unwrap());

    let staff_id: i64 = scheduler
        .create_staff(create_test_staff_request("Sam"))
        .await
        .unwrap()
        .staff_id;
    let other_staff_id: i64 = scheduler
        .create_staff(create_test_staff_request("Robin"))
        .await
        .unwrap()
        .staff_id;
    let service_id: i64 = scheduler
        .create_service(CreateServiceRequest {
            name: String::from("Haircut"),
            price_cents: 3000,
            duration_minutes: 30,
        })
        .await
        .unwrap()
        .service_id;
    let client_id: i64 = scheduler
        .create_client(CreateClientRequest {
            name: String::from("Alex"),
            phone: Some(String::from("555-0100")),
            email: None,
        })
        .await
        .unwrap()
        .client_id;

    (
        scheduler,
        Fixture {
            staff_id,
            other_staff_id,
            service_id,
            client_id,
        },
    )
}

pub fn booking(fixture: &Fixture, date: &str, start: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        client_id: fixture.client_id,
        staff_id: fixture.staff_id,
        service_id: fixture.service_id,
        date: String::from(date),
        start_time: String::from(start),
    }
}

pub fn availability(fixture: &Fixture, date: &str) -> AvailabilityRequest {
    AvailabilityRequest {
        staff_id: fixture.staff_id.to_string(),
        date: String::from(date),
        service_id: fixture.service_id.to_string(),
        exclude_appointment_id: None,
    }
}

pub async fn book(scheduler: &Scheduler, fixture: &Fixture, date: &str, start: &str) -> i64 {
    let response: AppointmentResponse = scheduler
        .create_appointment(
            booking(fixture, date, start),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    response.appointment.appointment_id
}

pub async fn slots(scheduler: &Scheduler, fixture: &Fixture, date: &str) -> Vec<String> {
    scheduler
        .get_available_slots(&availability(fixture, date))
        .await
        .unwrap()
        .slots
}
