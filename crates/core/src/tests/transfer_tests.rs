// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_actor, create_test_appointment, create_test_cause, create_test_schedule,
    create_test_service, monday, time, tuesday,
};
use crate::{
    Command, CoreError, DaySchedule, ScheduleChange, ScheduleKey, TransitionResult,
    apply_transfer,
};
use shearbook_domain::{AppointmentId, ClientId, StaffId};
use time::Date;

fn move_to(staff: i64, date: Date, start: &str) -> Command {
    Command::RescheduleAppointment {
        appointment_id: AppointmentId::new(1),
        client_id: ClientId::new(1),
        staff_id: StaffId::new(staff),
        service: create_test_service(1, 30),
        date,
        start_time: time(start),
    }
}

#[test]
fn test_transfer_to_another_date() {
    let source: DaySchedule = create_test_schedule();
    let target: DaySchedule = DaySchedule::new(ScheduleKey::new(StaffId::new(1), tuesday()));

    let transition: TransitionResult = apply_transfer(
        &source,
        &target,
        move_to(1, tuesday(), "10:00"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.new_state.len(), 1);
    let vacated: &DaySchedule = transition.vacated_state.as_ref().unwrap();
    assert!(vacated.is_empty());
    let ScheduleChange::Rescheduled(moved) = &transition.change else {
        panic!("expected a reschedule, got {:?}", transition.change);
    };
    assert_eq!(moved.date, tuesday());
    assert_eq!(moved.id, Some(AppointmentId::new(1)));
    assert_eq!(transition.audit_event.date, Some(tuesday()));
}

#[test]
fn test_transfer_to_another_staff_member_checks_target_conflicts() {
    let source: DaySchedule = create_test_schedule();
    let target: DaySchedule = DaySchedule::from_appointments(
        ScheduleKey::new(StaffId::new(2), monday()),
        vec![create_test_appointment(5, 2, monday(), "10:15", "10:45")],
    )
    .unwrap();

    let result: Result<TransitionResult, CoreError> = apply_transfer(
        &source,
        &target,
        move_to(2, monday(), "10:00"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::SlotConflict {
            conflicting: Some(id),
            ..
        }) if id == AppointmentId::new(5)
    ));
}

#[test]
fn test_transfer_records_both_schedules_in_audit() {
    let source: DaySchedule = create_test_schedule();
    let target: DaySchedule = DaySchedule::new(ScheduleKey::new(StaffId::new(2), monday()));

    let transition: TransitionResult = apply_transfer(
        &source,
        &target,
        move_to(2, monday(), "15:00"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(
        transition.audit_event.before.data,
        "staff=1,date=2026-03-02,appointments=[#1 10:00-10:30]; \
         staff=2,date=2026-03-02,appointments=[]"
    );
    assert_eq!(
        transition.audit_event.after.data,
        "staff=1,date=2026-03-02,appointments=[]; \
         staff=2,date=2026-03-02,appointments=[#1 15:00-15:30]"
    );
    assert_eq!(transition.audit_event.staff_id, Some(StaffId::new(2)));
}

#[test]
fn test_transfer_with_same_schedule_behaves_like_apply() {
    let source: DaySchedule = create_test_schedule();

    let transition: TransitionResult = apply_transfer(
        &source,
        &source,
        move_to(1, monday(), "16:00"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(transition.vacated_state.is_none());
    assert_eq!(transition.new_state.len(), 1);
}

#[test]
fn test_transfer_rejects_non_reschedule_commands() {
    let source: DaySchedule = create_test_schedule();
    let target: DaySchedule = DaySchedule::new(ScheduleKey::new(StaffId::new(1), tuesday()));

    let result: Result<TransitionResult, CoreError> = apply_transfer(
        &source,
        &target,
        Command::CancelAppointment {
            appointment_id: AppointmentId::new(1),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::UnsupportedCommand("CancelAppointment")
    );
}

#[test]
fn test_transfer_target_must_match_command() {
    let source: DaySchedule = create_test_schedule();
    let target: DaySchedule = DaySchedule::new(ScheduleKey::new(StaffId::new(1), tuesday()));

    let result: Result<TransitionResult, CoreError> = apply_transfer(
        &source,
        &target,
        move_to(3, tuesday(), "10:00"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::ScheduleMismatch { .. })));
}
