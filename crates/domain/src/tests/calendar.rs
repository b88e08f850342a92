// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BarberLeave, OperatingCalendar, OperatingDay, OperatingHours, StaffId, StaffProfile,
    StaffWindow, Status,
};
use time::{Duration, Weekday};

use super::helpers::{
    create_test_hours, create_test_monday, create_test_staff, create_test_sunday, time,
};

#[test]
fn test_default_hours_close_on_sunday() {
    let hours: OperatingHours = OperatingHours::default();

    assert!(!hours.day(Weekday::Sunday).is_open);
    let saturday: &OperatingDay = hours.day(Weekday::Saturday);
    assert!(saturday.is_open);
    assert_eq!(saturday.open_time, time("09:00"));
    assert_eq!(saturday.close_time, time("19:00"));
    assert_eq!(hours.iter().filter(|(_, day)| day.is_open).count(), 6);
}

#[test]
fn test_operating_day_resolves_weekday_from_date() {
    let calendar: OperatingCalendar = OperatingCalendar::new(OperatingHours::default(), Vec::new());

    assert!(calendar.operating_day(create_test_monday()).is_open);
    assert!(!calendar.operating_day(create_test_sunday()).is_open);
}

#[test]
fn test_leave_applies_to_one_staff_member_on_one_date() {
    let monday: time::Date = create_test_monday();
    let calendar: OperatingCalendar = OperatingCalendar::new(
        create_test_hours(),
        vec![BarberLeave {
            staff_id: StaffId::new(1),
            date: monday,
        }],
    );

    assert!(calendar.is_on_leave(StaffId::new(1), monday));
    assert!(!calendar.is_on_leave(StaffId::new(2), monday));
    assert!(!calendar.is_on_leave(StaffId::new(1), monday + Duration::days(1)));
}

#[test]
fn test_staff_window_is_none_for_inactive_staff() {
    let calendar: OperatingCalendar = OperatingCalendar::new(create_test_hours(), Vec::new());
    let mut staff: StaffProfile = create_test_staff();
    assert!(calendar.staff_window(&staff, create_test_monday()).is_some());

    staff.status = Status::Inactive;
    assert!(calendar.staff_window(&staff, create_test_monday()).is_none());
    assert!(calendar.effective_window(&staff, create_test_monday()).is_none());
}

#[test]
fn test_effective_window_intersects_shop_and_staff_hours() {
    let mut hours: OperatingHours = create_test_hours();
    hours.set_day(Weekday::Monday, OperatingDay::open(time("10:00"), time("18:00")));
    let calendar: OperatingCalendar = OperatingCalendar::new(hours, Vec::new());
    let mut staff: StaffProfile = create_test_staff();
    staff.work_start = time("08:00");
    staff.work_end = time("16:00");

    let window: StaffWindow = calendar
        .effective_window(&staff, create_test_monday())
        .unwrap();

    assert_eq!(window.start, time("10:00"));
    assert_eq!(window.end, time("16:00"));
    assert_eq!(window.lunch_start, time("12:00"));
    assert_eq!(window.lunch_end, time("13:00"));
}

#[test]
fn test_effective_window_is_none_when_hours_do_not_intersect() {
    let mut hours: OperatingHours = create_test_hours();
    hours.set_day(Weekday::Monday, OperatingDay::open(time("14:00"), time("19:00")));
    let calendar: OperatingCalendar = OperatingCalendar::new(hours, Vec::new());
    let mut staff: StaffProfile = create_test_staff();
    staff.work_start = time("07:00");
    staff.work_end = time("13:00");

    assert!(calendar.effective_window(&staff, create_test_monday()).is_none());
}

#[test]
fn test_effective_window_is_none_on_closed_day() {
    let calendar: OperatingCalendar = OperatingCalendar::new(OperatingHours::default(), Vec::new());
    assert!(
        calendar
            .effective_window(&create_test_staff(), create_test_sunday())
            .is_none()
    );
}
