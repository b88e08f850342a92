// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP tests driving the router with `oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const MONDAY: &str = "2026-03-02";

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (HttpStatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-actor-id", "desk-7")
        .header("x-request-id", "test-request");
    let body: Body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status: HttpStatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Seeds a barber, a 30-minute haircut and a client. Returns their ids.
async fn seed(app: &Router) -> (i64, i64, i64) {
    let (status, staff) = send(
        app,
        "POST",
        "/staff",
        Some(json!({
            "name": "Sam",
            "work_start": "09:00",
            "work_end": "19:00",
            "lunch_start": "12:00",
            "lunch_end": "13:00"
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (_, service) = send(
        app,
        "POST",
        "/services",
        Some(json!({ "name": "Haircut", "price_cents": 3000, "duration_minutes": 30 })),
    )
    .await;
    let (_, client) = send(app, "POST", "/clients", Some(json!({ "name": "Alex" }))).await;

    (
        staff["staff_id"].as_i64().unwrap(),
        service["service_id"].as_i64().unwrap(),
        client["client_id"].as_i64().unwrap(),
    )
}

fn booking(staff_id: i64, service_id: i64, client_id: i64, start: &str) -> Value {
    json!({
        "client_id": client_id,
        "staff_id": staff_id,
        "service_id": service_id,
        "date": MONDAY,
        "start_time": start
    })
}

#[tokio::test]
async fn test_availability_over_http() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, _client_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/availability?staff_id={staff_id}&date={MONDAY}&service_id={service_id}"),
        None,
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let slots: &Vec<Value> = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 34);
    assert_eq!(slots[0], "09:00");
}

#[tokio::test]
async fn test_booking_then_conflict_is_409() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, client_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10:00")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["appointment"]["end_time"], "10:30");

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10:15")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_malformed_time_is_400() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, client_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10am")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("start_time"));
}

#[tokio::test]
async fn test_unknown_appointment_is_404() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(&app, "POST", "/appointments/55/cancel", None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/appointments/55", None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inactive_staff_booking_is_422() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, client_id) = seed(&app).await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/staff/{staff_id}"),
        Some(json!({ "status": "inactive" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10:00")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

    let (_, active) = send(&app, "GET", "/staff?active=true", None).await;
    assert!(active["staff"].as_array().unwrap().is_empty());
    let (_, everyone) = send(&app, "GET", "/staff", None).await;
    assert_eq!(everyone["staff"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reschedule_and_cancel_over_http() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, client_id) = seed(&app).await;

    let (_, created) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10:00")),
    )
    .await;
    let id: i64 = created["appointment"]["appointment_id"].as_i64().unwrap();

    let (status, moved) = send(
        &app,
        "PATCH",
        &format!("/appointments/{id}"),
        Some(json!({ "start_time": "15:00" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(moved["appointment"]["start_time"], "15:00");

    let (status, _) = send(&app, "POST", &format!("/appointments/{id}/cancel"), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    let (status, _) = send(&app, "POST", &format!("/appointments/{id}/cancel"), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (_, timeline) = send(
        &app,
        "GET",
        &format!("/audit/timeline?staff_id={staff_id}&date={MONDAY}"),
        None,
    )
    .await;
    let events: &Vec<Value> = timeline["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["actor_id"], "desk-7");
    assert_eq!(events[0]["cause_id"], "test-request");

    let event_id: i64 = events[2]["event_id"].as_i64().unwrap();
    let (status, event) = send(&app, "GET", &format!("/audit/event/{event_id}"), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(event["action"], "CancelAppointment");
}

#[tokio::test]
async fn test_operating_hours_round_trip() {
    let app: Router = build_router(create_test_app_state());

    let (status, mut hours) = send(&app, "GET", "/operating_hours", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(hours["days"][6]["is_open"], false);

    hours["days"][0]["close_time"] = json!("08:00");
    let (status, _) = send(&app, "PUT", "/operating_hours", Some(hours.clone())).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    hours["days"][0]["close_time"] = json!("17:00");
    let (status, body) = send(&app, "PUT", "/operating_hours", Some(hours)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["days"][0]["close_time"], "17:00");

    let (_, global) = send(&app, "GET", "/audit/global", None).await;
    assert_eq!(global["events"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_leave_over_http() {
    let app: Router = build_router(create_test_app_state());
    let (staff_id, service_id, _client_id) = seed(&app).await;

    let leave: Value = json!({ "staff_id": staff_id, "date": MONDAY });
    let (status, body) = send(&app, "POST", "/leaves", Some(leave.clone())).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["changed"], true);

    let (_, availability) = send(
        &app,
        "GET",
        &format!("/availability?staff_id={staff_id}&date={MONDAY}&service_id={service_id}"),
        None,
    )
    .await;
    assert!(availability["slots"].as_array().unwrap().is_empty());

    let (_, listed) = send(&app, "GET", "/leaves", None).await;
    assert_eq!(listed["leaves"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "POST", "/leaves/remove", Some(leave)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["changed"], true);
}

#[tokio::test]
async fn test_service_patch_and_listing() {
    let app: Router = build_router(create_test_app_state());
    let (_staff_id, service_id, _client_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/services/{service_id}"),
        Some(json!({ "duration_minutes": 45 })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["duration_minutes"], 45);

    let (status, _) = send(
        &app,
        "PATCH",
        "/services/999",
        Some(json!({ "price_cents": 1 })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (_, services) = send(&app, "GET", "/services", None).await;
    assert_eq!(services["services"].as_array().unwrap().len(), 1);
    let (_, clients) = send(&app, "GET", "/clients", None).await;
    assert_eq!(clients["clients"][0]["name"], "Alex");
}

#[tokio::test]
async fn test_writes_are_announced_live() {
    let app_state: AppState = create_test_app_state();
    let mut events = app_state.live_events.subscribe();
    let app: Router = build_router(app_state);
    let (staff_id, service_id, client_id) = seed(&app).await;

    let (_, created) = send(
        &app,
        "POST",
        "/appointments",
        Some(booking(staff_id, service_id, client_id, "10:00")),
    )
    .await;
    let id: i64 = created["appointment"]["appointment_id"].as_i64().unwrap();
    send(&app, "POST", &format!("/appointments/{id}/cancel"), None).await;

    match events.try_recv().unwrap() {
        LiveEvent::AppointmentBooked { appointment } => {
            assert_eq!(appointment.appointment_id, id);
        }
        other => panic!("Expected AppointmentBooked, got {other:?}"),
    }
    assert_eq!(
        events.try_recv().unwrap(),
        LiveEvent::AppointmentCancelled { appointment_id: id }
    );
}

#[test]
fn test_request_context_defaults() {
    let (actor, cause) = request_context(&HeaderMap::new(), "Book appointment");
    assert_eq!(actor.id, "front-desk");
    assert_eq!(actor.actor_type, "staff");
    assert!(cause.id.starts_with("req-"));
    assert_eq!(cause.description, "Book appointment");
}
