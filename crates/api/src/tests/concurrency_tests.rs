// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent writers against the same and different schedules.

use crate::{
    ApiError, AppointmentResponse, CreateAppointmentRequest, ListAppointmentsRequest, Scheduler,
    UpdateAppointmentRequest,
};
use tokio::task::JoinSet;

use super::helpers::{
    MONDAY, TUESDAY, book, booking, create_test_actor, create_test_cause, create_test_scheduler,
};

const CONTENDERS: usize = 8;

async fn stored_count(scheduler: &Scheduler) -> usize {
    scheduler
        .list_appointments(&ListAppointmentsRequest::default())
        .await
        .unwrap()
        .appointments
        .len()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_bookings_for_one_slot_admit_exactly_one() {
    let (scheduler, fixture) = create_test_scheduler().await;

    let mut tasks: JoinSet<Result<AppointmentResponse, ApiError>> = JoinSet::new();
    for _ in 0..CONTENDERS {
        let scheduler: Scheduler = scheduler.clone();
        let request: CreateAppointmentRequest = booking(&fixture, MONDAY, "10:00");
        tasks.spawn(async move {
            scheduler
                .create_appointment(request, create_test_actor(), create_test_cause())
                .await
        });
    }

    let mut booked: usize = 0;
    let mut conflicts: usize = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => booked += 1,
            Err(ApiError::SlotConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, CONTENDERS - 1);
    assert_eq!(stored_count(&scheduler).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_but_different_starts_admit_one() {
    let (scheduler, fixture) = create_test_scheduler().await;

    let mut tasks: JoinSet<Result<AppointmentResponse, ApiError>> = JoinSet::new();
    for start in ["10:00", "10:15", "10:10", "09:45"] {
        let scheduler: Scheduler = scheduler.clone();
        let request: CreateAppointmentRequest = booking(&fixture, MONDAY, start);
        tasks.spawn(async move {
            scheduler
                .create_appointment(request, create_test_actor(), create_test_cause())
                .await
        });
    }

    let mut booked: usize = 0;
    while let Some(joined) = tasks.join_next().await {
        if joined.unwrap().is_ok() {
            booked += 1;
        }
    }

    // 09:45 and 10:15 can coexist; any other pair overlaps
    assert!((1..=2).contains(&booked));
    let stored = scheduler
        .list_appointments(&ListAppointmentsRequest::default())
        .await
        .unwrap()
        .appointments;
    for pair in stored.windows(2) {
        assert!(pair[0].end_time <= pair[1].start_time);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_staff_book_in_parallel() {
    let (scheduler, fixture) = create_test_scheduler().await;

    let mut tasks: JoinSet<Result<AppointmentResponse, ApiError>> = JoinSet::new();
    for staff_id in [fixture.staff_id, fixture.other_staff_id] {
        let scheduler: Scheduler = scheduler.clone();
        let mut request: CreateAppointmentRequest = booking(&fixture, MONDAY, "10:00");
        request.staff_id = staff_id;
        tasks.spawn(async move {
            scheduler
                .create_appointment(request, create_test_actor(), create_test_cause())
                .await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }
    assert_eq!(stored_count(&scheduler).await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_opposite_moves_between_staff_do_not_deadlock() {
    let (scheduler, fixture) = create_test_scheduler().await;
    let first: i64 = book(&scheduler, &fixture, MONDAY, "10:00").await;
    let mut other: CreateAppointmentRequest = booking(&fixture, MONDAY, "14:00");
    other.staff_id = fixture.other_staff_id;
    let second: i64 = scheduler
        .create_appointment(other, create_test_actor(), create_test_cause())
        .await
        .unwrap()
        .appointment
        .appointment_id;

    let mut tasks: JoinSet<Result<AppointmentResponse, ApiError>> = JoinSet::new();
    for (id, staff_id) in [
        (first, fixture.other_staff_id),
        (second, fixture.staff_id),
    ] {
        let scheduler: Scheduler = scheduler.clone();
        tasks.spawn(async move {
            scheduler
                .update_appointment(
                    id,
                    UpdateAppointmentRequest {
                        staff_id: Some(staff_id),
                        ..UpdateAppointmentRequest::default()
                    },
                    create_test_actor(),
                    create_test_cause(),
                )
                .await
        });
    }

    let finished = tokio::time::timeout(std::time::Duration::from_secs(10), async {
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }
    })
    .await;
    assert!(finished.is_ok());

    assert_eq!(
        scheduler.get_appointment(first).await.unwrap().staff_id,
        fixture.other_staff_id
    );
    assert_eq!(
        scheduler.get_appointment(second).await.unwrap().staff_id,
        fixture.staff_id
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_moves_into_one_slot_admit_one() {
    let (scheduler, fixture) = create_test_scheduler().await;
    let mut ids: Vec<i64> = Vec::new();
    for start in ["09:00", "13:00", "15:00"] {
        ids.push(book(&scheduler, &fixture, MONDAY, start).await);
    }

    let mut tasks: JoinSet<Result<AppointmentResponse, ApiError>> = JoinSet::new();
    for id in ids {
        let scheduler: Scheduler = scheduler.clone();
        tasks.spawn(async move {
            scheduler
                .update_appointment(
                    id,
                    UpdateAppointmentRequest {
                        date: Some(String::from(TUESDAY)),
                        start_time: Some(String::from("10:00")),
                        ..UpdateAppointmentRequest::default()
                    },
                    create_test_actor(),
                    create_test_cause(),
                )
                .await
        });
    }

    let mut moved: usize = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => moved += 1,
            Err(ApiError::SlotConflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(moved, 1);
    let tuesday = scheduler
        .list_appointments(&ListAppointmentsRequest {
            staff_id: None,
            date: Some(String::from(TUESDAY)),
        })
        .await
        .unwrap();
    assert_eq!(tuesday.appointments.len(), 1);
    assert_eq!(stored_count(&scheduler).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancel_racing_with_move_leaves_consistent_state() {
    let (scheduler, fixture) = create_test_scheduler().await;
    let id: i64 = book(&scheduler, &fixture, MONDAY, "10:00").await;

    let mover = {
        let scheduler: Scheduler = scheduler.clone();
        tokio::spawn(async move {
            scheduler
                .update_appointment(
                    id,
                    UpdateAppointmentRequest {
                        date: Some(String::from(TUESDAY)),
                        ..UpdateAppointmentRequest::default()
                    },
                    create_test_actor(),
                    create_test_cause(),
                )
                .await
        })
    };
    let canceller = {
        let scheduler: Scheduler = scheduler.clone();
        tokio::spawn(async move {
            scheduler
                .cancel_appointment(id, create_test_actor(), create_test_cause())
                .await
        })
    };

    let moved = mover.await.unwrap();
    let cancelled = canceller.await.unwrap();

    // Cancel always wins eventually; the move either ran first or found nothing
    assert!(cancelled.is_ok());
    assert!(moved.is_ok() || matches!(moved, Err(ApiError::ResourceNotFound { .. })));
    assert_eq!(stored_count(&scheduler).await, 0);
}

#[tokio::test]
async fn test_rejected_writes_leave_no_lock_entries() {
    let (scheduler, fixture) = create_test_scheduler().await;
    book(&scheduler, &fixture, MONDAY, "10:00").await;
    let later: i64 = book(&scheduler, &fixture, TUESDAY, "11:00").await;
    assert_eq!(scheduler.tracked_schedules(), 0);

    let clash = scheduler
        .create_appointment(
            booking(&fixture, MONDAY, "10:15"),
            create_test_actor(),
            create_test_cause(),
        )
        .await;
    assert!(matches!(clash, Err(ApiError::SlotConflict { .. })));
    assert_eq!(scheduler.tracked_schedules(), 0);

    let moved = scheduler
        .update_appointment(
            later,
            UpdateAppointmentRequest {
                date: Some(String::from(MONDAY)),
                start_time: Some(String::from("09:45")),
                ..UpdateAppointmentRequest::default()
            },
            create_test_actor(),
            create_test_cause(),
        )
        .await;
    assert!(matches!(moved, Err(ApiError::SlotConflict { .. })));
    assert_eq!(scheduler.tracked_schedules(), 0);

    let mut unknown_client: CreateAppointmentRequest = booking(&fixture, TUESDAY, "15:00");
    unknown_client.client_id = 9999;
    let missing = scheduler
        .create_appointment(unknown_client, create_test_actor(), create_test_cause())
        .await;
    assert!(missing.is_err());
    assert_eq!(scheduler.tracked_schedules(), 0);
}
