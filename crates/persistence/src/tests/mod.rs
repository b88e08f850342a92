// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use shearbook_audit::{Actor, Cause};
use shearbook_domain::{
    Client, ClientId, Service, ServiceDuration, ServiceId, StaffId, StaffProfile, Status,
    TimeOfDay,
};
use time::{Date, Month};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

/// Monday, March 2, 2026.
pub fn create_test_monday() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

/// Tuesday, March 3, 2026.
pub fn create_test_tuesday() -> Date {
    Date::from_calendar_date(2026, Month::March, 3).unwrap()
}

/// A 30-minute active service. The id is replaced on insert.
pub fn create_test_service(name: &str, minutes: u16) -> Service {
    Service {
        id: ServiceId::new(0),
        name: String::from(name),
        price_cents: 2500,
        duration: ServiceDuration::new(minutes).unwrap(),
        status: Status::Active,
    }
}

/// Works `09:00-18:00` with lunch `12:00-13:00`.
pub fn create_test_staff(name: &str) -> StaffProfile {
    StaffProfile {
        id: StaffId::new(0),
        name: String::from(name),
        work_start: time("09:00"),
        work_end: time("18:00"),
        lunch_start: time("12:00"),
        lunch_end: time("13:00"),
        status: Status::Active,
    }
}

pub fn create_test_client(name: &str) -> Client {
    Client {
        id: ClientId::new(0),
        name: String::from(name),
        phone: Some(String::from("555-0100")),
        email: None,
    }
}

/// A fresh database holding one haircut service, one barber and one client.
pub fn seeded_persistence() -> (Persistence, ServiceId, StaffId, ClientId) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let service_id: ServiceId = persistence
        .create_service(&create_test_service("Haircut", 30))
        .unwrap();
    let staff_id: StaffId = persistence.create_staff(&create_test_staff("Sam")).unwrap();
    let client_id: ClientId = persistence
        .create_client(&create_test_client("Alex"))
        .unwrap();
    (persistence, service_id, staff_id, client_id)
}
