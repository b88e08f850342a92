// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Client, ClientId, OperatingDay, OperatingHours, Service, ServiceDuration, ServiceId, StaffId,
    StaffProfile, Status, TimeOfDay,
};
use time::{Date, Month};

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).expect("valid test time")
}

/// Monday, March 2, 2026.
pub fn create_test_monday() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

/// Sunday, March 8, 2026.
pub fn create_test_sunday() -> Date {
    Date::from_calendar_date(2026, Month::March, 8).unwrap()
}

pub fn create_test_staff() -> StaffProfile {
    StaffProfile {
        id: StaffId::new(1),
        name: String::from("Marco"),
        work_start: time("09:00"),
        work_end: time("19:00"),
        lunch_start: time("12:00"),
        lunch_end: time("13:00"),
        status: Status::Active,
    }
}

pub fn create_test_service() -> Service {
    Service {
        id: ServiceId::new(1),
        name: String::from("Classic Cut"),
        price_cents: 2500,
        duration: ServiceDuration::new(30).unwrap(),
        status: Status::Active,
    }
}

pub fn create_test_client() -> Client {
    Client {
        id: ClientId::new(1),
        name: String::from("Ana Souza"),
        phone: Some(String::from("555-0100")),
        email: None,
    }
}

pub fn create_test_hours() -> OperatingHours {
    OperatingHours::new([OperatingDay::open(time("09:00"), time("19:00")); 7])
}
