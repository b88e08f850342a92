// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DaySchedule, ScheduleKey};
use shearbook_audit::{Actor, Cause};
use shearbook_domain::{
    Appointment, AppointmentId, ClientId, Service, ServiceDuration, ServiceId, StaffId, Status,
    TimeOfDay,
};
use time::{Date, Month};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("desk-1"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Front desk booking"))
}

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

/// Monday, March 2, 2026.
pub fn monday() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

/// Tuesday, March 3, 2026.
pub fn tuesday() -> Date {
    Date::from_calendar_date(2026, Month::March, 3).unwrap()
}

pub fn create_test_service(id: i64, minutes: u16) -> Service {
    Service {
        id: ServiceId::new(id),
        name: format!("Service {id}"),
        price_cents: 2500,
        duration: ServiceDuration::new(minutes).unwrap(),
        status: Status::Active,
    }
}

pub fn create_test_appointment(id: i64, staff: i64, date: Date, start: &str, end: &str) -> Appointment {
    Appointment {
        id: Some(AppointmentId::new(id)),
        client_id: ClientId::new(1),
        staff_id: StaffId::new(staff),
        service_id: ServiceId::new(1),
        date,
        start_time: time(start),
        end_time: time(end),
    }
}

/// Staff 1 on Monday with one appointment `10:00-10:30` (id 1).
pub fn create_test_schedule() -> DaySchedule {
    DaySchedule::from_appointments(
        ScheduleKey::new(StaffId::new(1), monday()),
        vec![create_test_appointment(1, 1, monday(), "10:00", "10:30")],
    )
    .unwrap()
}
