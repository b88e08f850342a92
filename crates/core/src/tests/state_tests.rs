// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_appointment, monday, time, tuesday};
use crate::{CoreError, DaySchedule, ScheduleKey};
use shearbook_domain::{AppointmentId, StaffId};

#[test]
fn test_from_appointments_sorts_by_start_time() {
    let key: ScheduleKey = ScheduleKey::new(StaffId::new(1), monday());
    let schedule: DaySchedule = DaySchedule::from_appointments(
        key,
        vec![
            create_test_appointment(3, 1, monday(), "15:00", "15:30"),
            create_test_appointment(1, 1, monday(), "09:00", "09:30"),
            create_test_appointment(2, 1, monday(), "11:00", "11:45"),
        ],
    )
    .unwrap();

    let starts: Vec<String> = schedule
        .appointments()
        .iter()
        .map(|a| a.start_time.format())
        .collect();
    assert_eq!(starts, vec!["09:00", "11:00", "15:00"]);
    assert_eq!(schedule.len(), 3);
}

#[test]
fn test_from_appointments_rejects_other_scopes() {
    let key: ScheduleKey = ScheduleKey::new(StaffId::new(1), monday());
    let result: Result<DaySchedule, CoreError> = DaySchedule::from_appointments(
        key,
        vec![create_test_appointment(1, 1, tuesday(), "09:00", "09:30")],
    );

    assert!(matches!(result, Err(CoreError::ScheduleMismatch { .. })));
}

#[test]
fn test_find_by_id() {
    let key: ScheduleKey = ScheduleKey::new(StaffId::new(1), monday());
    let schedule: DaySchedule = DaySchedule::from_appointments(
        key,
        vec![create_test_appointment(7, 1, monday(), "09:00", "09:30")],
    )
    .unwrap();

    assert_eq!(
        schedule.find(AppointmentId::new(7)).map(|a| a.start_time),
        Some(time("09:00"))
    );
    assert!(schedule.find(AppointmentId::new(8)).is_none());
}

#[test]
fn test_snapshot_lists_appointments_in_order() {
    let key: ScheduleKey = ScheduleKey::new(StaffId::new(2), monday());
    let schedule: DaySchedule = DaySchedule::from_appointments(
        key,
        vec![
            create_test_appointment(5, 2, monday(), "13:00", "13:45"),
            create_test_appointment(4, 2, monday(), "09:00", "09:30"),
        ],
    )
    .unwrap();

    assert_eq!(
        schedule.to_snapshot().data,
        "staff=2,date=2026-03-02,appointments=[#4 09:00-09:30, #5 13:00-13:45]"
    );
    assert_eq!(
        DaySchedule::new(key).to_snapshot().data,
        "staff=2,date=2026-03-02,appointments=[]"
    );
}

#[test]
fn test_schedule_key_display_and_ordering() {
    let a: ScheduleKey = ScheduleKey::new(StaffId::new(1), tuesday());
    let b: ScheduleKey = ScheduleKey::new(StaffId::new(2), monday());

    assert_eq!(a.to_string(), "staff 1 on 2026-03-03");
    assert!(a < b);
}
