// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, AuditTimelineRequest, AuditTimelineResponse, LeaveChangeResponse, LeaveRequest,
    OperatingDayInfo, OperatingHoursInfo,
};

use super::helpers::{
    MONDAY, SUNDAY, TUESDAY, book, create_test_actor, create_test_cause, create_test_scheduler,
    slots,
};

fn leave(staff_id: i64, date: &str) -> LeaveRequest {
    LeaveRequest {
        staff_id,
        date: String::from(date),
    }
}

#[tokio::test]
async fn test_default_hours_close_on_sunday() {
    let (scheduler, _fixture) = create_test_scheduler().await;
    let hours: OperatingHoursInfo = scheduler.get_operating_hours().await.unwrap();

    assert_eq!(hours.days.len(), 7);
    assert_eq!(hours.days[0].weekday, "Monday");
    assert_eq!(hours.days[0].open_time, "09:00");
    assert_eq!(hours.days[0].close_time, "19:00");
    assert!(!hours.days[6].is_open);
}

#[tokio::test]
async fn test_shorter_hours_shrink_availability() {
    let (scheduler, fixture) = create_test_scheduler().await;
    let mut hours: OperatingHoursInfo = scheduler.get_operating_hours().await.unwrap();
    hours.days[0] = OperatingDayInfo {
        weekday: String::from("Monday"),
        is_open: true,
        open_time: String::from("10:00"),
        close_time: String::from("14:00"),
    };
    scheduler
        .set_operating_hours(&hours, create_test_actor(), create_test_cause())
        .await
        .unwrap();

    let offered: Vec<String> = slots(&scheduler, &fixture, MONDAY).await;
    assert_eq!(offered.first().map(String::as_str), Some("10:00"));
    assert_eq!(offered.last().map(String::as_str), Some("13:30"));
    // Lunch still applies inside the shop window
    assert!(!offered.contains(&String::from("12:00")));

    // Tuesday keeps the default hours
    assert_eq!(slots(&scheduler, &fixture, TUESDAY).await.len(), 34);
}

#[tokio::test]
async fn test_opening_sunday_offers_slots() {
    let (scheduler, fixture) = create_test_scheduler().await;
    let mut hours: OperatingHoursInfo = scheduler.get_operating_hours().await.unwrap();
    hours.days[6] = OperatingDayInfo {
        weekday: String::from("sunday"),
        is_open: true,
        open_time: String::from("13:00"),
        close_time: String::from("15:00"),
    };
    scheduler
        .set_operating_hours(&hours, create_test_actor(), create_test_cause())
        .await
        .unwrap();

    assert_eq!(
        slots(&scheduler, &fixture, SUNDAY).await,
        vec!["13:00", "13:15", "13:30", "13:45", "14:00", "14:15", "14:30"]
    );
}

#[tokio::test]
async fn test_invalid_hours_are_rejected_and_not_stored() {
    let (scheduler, _fixture) = create_test_scheduler().await;
    let original: OperatingHoursInfo = scheduler.get_operating_hours().await.unwrap();

    let mut backwards: OperatingHoursInfo = original.clone();
    backwards.days[1].open_time = String::from("18:00");
    backwards.days[1].close_time = String::from("08:00");
    let result = scheduler
        .set_operating_hours(&backwards, create_test_actor(), create_test_cause())
        .await;
    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "operating_hours")
    );

    let mut unknown_day: OperatingHoursInfo = original.clone();
    unknown_day.days[2].weekday = String::from("Caturday");
    assert!(
        scheduler
            .set_operating_hours(&unknown_day, create_test_actor(), create_test_cause())
            .await
            .is_err()
    );

    assert_eq!(scheduler.get_operating_hours().await.unwrap(), original);
}

#[tokio::test]
async fn test_hours_change_is_a_global_audit_event() {
    let (scheduler, _fixture) = create_test_scheduler().await;
    let mut hours: OperatingHoursInfo = scheduler.get_operating_hours().await.unwrap();
    hours.days[5].is_open = false;
    scheduler
        .set_operating_hours(&hours, create_test_actor(), create_test_cause())
        .await
        .unwrap();

    let global: AuditTimelineResponse = scheduler.get_global_audit_events().await.unwrap();
    assert_eq!(global.events.len(), 1);
    let event = &global.events[0];
    assert_eq!(event.action, "SetOperatingHours");
    assert_eq!(event.staff_id, None);
    assert!(event.before.contains("Saturday 09:00-19:00"));
    assert!(event.after.contains("Saturday closed"));
}

#[tokio::test]
async fn test_leave_change_returns_the_event_recording_it() {
    let (scheduler, fixture) = create_test_scheduler().await;

    let first: LeaveChangeResponse = scheduler
        .add_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    assert!(first.changed);
    let event_id: i64 = first.event_id.unwrap();

    let second: LeaveChangeResponse = scheduler
        .add_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    assert!(!second.changed);
    assert_eq!(second.event_id, None);

    assert_eq!(scheduler.list_leaves().await.unwrap().leaves.len(), 1);

    let timeline: AuditTimelineResponse = scheduler
        .get_audit_timeline(&AuditTimelineRequest {
            staff_id: fixture.staff_id.to_string(),
            date: String::from(MONDAY),
        })
        .await
        .unwrap();
    assert_eq!(timeline.events.len(), 1);
    assert_eq!(timeline.events[0].event_id, event_id);
    assert_eq!(timeline.events[0].action, "AddLeave");
}

#[tokio::test]
async fn test_removing_leave_restores_slots() {
    let (scheduler, fixture) = create_test_scheduler().await;
    scheduler
        .add_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    assert!(slots(&scheduler, &fixture, MONDAY).await.is_empty());

    let removed: LeaveChangeResponse = scheduler
        .remove_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    assert!(removed.changed);
    assert_eq!(slots(&scheduler, &fixture, MONDAY).await.len(), 34);

    let again: LeaveChangeResponse = scheduler
        .remove_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();
    assert!(!again.changed);
    assert_eq!(again.event_id, None);
}

#[tokio::test]
async fn test_leave_keeps_existing_appointments() {
    let (scheduler, fixture) = create_test_scheduler().await;
    book(&scheduler, &fixture, MONDAY, "10:00").await;

    scheduler
        .add_leave(
            &leave(fixture.staff_id, MONDAY),
            create_test_actor(),
            create_test_cause(),
        )
        .await
        .unwrap();

    let remaining = scheduler
        .list_appointments(&crate::ListAppointmentsRequest::default())
        .await
        .unwrap();
    assert_eq!(remaining.appointments.len(), 1);
}

#[tokio::test]
async fn test_leave_for_unknown_staff_is_not_found() {
    let (scheduler, _fixture) = create_test_scheduler().await;
    let result = scheduler
        .add_leave(&leave(77, MONDAY), create_test_actor(), create_test_cause())
        .await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));

    let result = scheduler
        .add_leave(&leave(0, MONDAY), create_test_actor(), create_test_cause())
        .await;
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "staff_id"));
}
