// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shearbook_api::{
    ApiError, AppointmentInfo, AppointmentResponse, AuditEventInfo, AuditTimelineRequest,
    AuditTimelineResponse, AvailabilityRequest, AvailabilityResponse, CancelAppointmentResponse,
    ClientInfo, CreateAppointmentRequest, CreateClientRequest, CreateServiceRequest,
    CreateStaffRequest, LeaveChangeResponse, LeaveRequest, ListAppointmentsRequest,
    ListAppointmentsResponse, ListClientsResponse, ListLeavesResponse, ListServicesResponse,
    ListStaffResponse, OperatingHoursInfo, Scheduler, ServiceInfo, StaffInfo,
    UpdateAppointmentRequest, UpdateServiceRequest, UpdateStaffRequest,
};
use shearbook_audit::{Actor, Cause};
use shearbook_persistence::Persistence;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Header naming who is acting, e.g. a front-desk login.
const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header naming the kind of actor, e.g. `staff` or `client`.
const ACTOR_TYPE_HEADER: &str = "x-actor-type";
/// Header carrying a caller-supplied request id.
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Shearbook Server - HTTP server for the barbershop scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Booking operations over shared storage.
    scheduler: Scheduler,
    /// Live event fan-out.
    live_events: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            scheduler: Scheduler::new(persistence),
            live_events: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

/// Query parameters for listing staff.
#[derive(Debug, Default, Deserialize)]
struct ListStaffQuery {
    /// Only active staff members.
    #[serde(default)]
    active: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::SlotConflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn header_or(headers: &HeaderMap, name: &str, default: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Builds the actor and cause recorded in the audit trail for a request.
///
/// Requests without an `x-request-id` get a server-assigned one.
fn request_context(headers: &HeaderMap, description: &str) -> (Actor, Cause) {
    let actor: Actor = Actor::new(
        header_or(headers, ACTOR_ID_HEADER, "front-desk"),
        header_or(headers, ACTOR_TYPE_HEADER, "staff"),
    );
    let fallback_id: String = format!(
        "req-{}",
        REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let cause: Cause = Cause::new(
        header_or(headers, REQUEST_ID_HEADER, &fallback_id),
        description.to_string(),
    );
    (actor, cause)
}

// ============================================================================
// Availability & appointments
// ============================================================================

/// Handler for GET `/availability`.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let response: AvailabilityResponse = app_state.scheduler.get_available_slots(&query).await?;
    Ok(Json(response))
}

/// Handler for GET `/appointments`.
async fn handle_list_appointments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListAppointmentsRequest>,
) -> Result<Json<ListAppointmentsResponse>, HttpError> {
    let response: ListAppointmentsResponse =
        app_state.scheduler.list_appointments(&query).await?;
    Ok(Json(response))
}

/// Handler for GET `/appointments/{appointment_id}`.
async fn handle_get_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentInfo>, HttpError> {
    let response: AppointmentInfo = app_state.scheduler.get_appointment(appointment_id).await?;
    Ok(Json(response))
}

/// Handler for POST `/appointments`.
///
/// Books an appointment and announces it on the live stream.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, HttpError> {
    info!(
        staff_id = req.staff_id,
        date = %req.date,
        start_time = %req.start_time,
        "Handling create_appointment request"
    );
    let (actor, cause) = request_context(&headers, "Book appointment");

    let response: AppointmentResponse = app_state
        .scheduler
        .create_appointment(req, actor, cause)
        .await?;

    app_state.live_events.broadcast(&LiveEvent::AppointmentBooked {
        appointment: response.appointment.clone(),
    });
    Ok(Json(response))
}

/// Handler for PATCH `/appointments/{appointment_id}`.
async fn handle_update_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, HttpError> {
    info!(appointment_id, "Handling update_appointment request");
    let (actor, cause) = request_context(&headers, "Reschedule appointment");

    let response: AppointmentResponse = app_state
        .scheduler
        .update_appointment(appointment_id, req, actor, cause)
        .await?;

    app_state
        .live_events
        .broadcast(&LiveEvent::AppointmentRescheduled {
            appointment: response.appointment.clone(),
        });
    Ok(Json(response))
}

/// Handler for POST `/appointments/{appointment_id}/cancel`.
async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<CancelAppointmentResponse>, HttpError> {
    info!(appointment_id, "Handling cancel_appointment request");
    let (actor, cause) = request_context(&headers, "Cancel appointment");

    let response: CancelAppointmentResponse = app_state
        .scheduler
        .cancel_appointment(appointment_id, actor, cause)
        .await?;

    app_state.live_events.broadcast(&LiveEvent::AppointmentCancelled {
        appointment_id: response.appointment_id,
    });
    Ok(Json(response))
}

// ============================================================================
// Calendar
// ============================================================================

/// Handler for GET `/operating_hours`.
async fn handle_get_operating_hours(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<OperatingHoursInfo>, HttpError> {
    Ok(Json(app_state.scheduler.get_operating_hours().await?))
}

/// Handler for PUT `/operating_hours`.
async fn handle_set_operating_hours(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<OperatingHoursInfo>,
) -> Result<Json<OperatingHoursInfo>, HttpError> {
    info!("Handling set_operating_hours request");
    let (actor, cause) = request_context(&headers, "Replace operating hours");

    let response: OperatingHoursInfo = app_state
        .scheduler
        .set_operating_hours(&req, actor, cause)
        .await?;

    app_state
        .live_events
        .broadcast(&LiveEvent::OperatingHoursChanged);
    Ok(Json(response))
}

/// Handler for GET `/leaves`.
async fn handle_list_leaves(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListLeavesResponse>, HttpError> {
    Ok(Json(app_state.scheduler.list_leaves().await?))
}

/// Handler for POST `/leaves`.
async fn handle_add_leave(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<LeaveRequest>,
) -> Result<Json<LeaveChangeResponse>, HttpError> {
    let (actor, cause) = request_context(&headers, "Add leave");
    let response: LeaveChangeResponse = app_state.scheduler.add_leave(&req, actor, cause).await?;

    if response.changed {
        app_state.live_events.broadcast(&LiveEvent::LeaveChanged {
            leave: response.leave.clone(),
            on_leave: true,
        });
    }
    Ok(Json(response))
}

/// Handler for POST `/leaves/remove`.
async fn handle_remove_leave(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<LeaveRequest>,
) -> Result<Json<LeaveChangeResponse>, HttpError> {
    let (actor, cause) = request_context(&headers, "Remove leave");
    let response: LeaveChangeResponse = app_state
        .scheduler
        .remove_leave(&req, actor, cause)
        .await?;

    if response.changed {
        app_state.live_events.broadcast(&LiveEvent::LeaveChanged {
            leave: response.leave.clone(),
            on_leave: false,
        });
    }
    Ok(Json(response))
}

// ============================================================================
// Catalog
// ============================================================================

/// Handler for GET `/services`.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListServicesResponse>, HttpError> {
    Ok(Json(app_state.scheduler.list_services().await?))
}

/// Handler for POST `/services`.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<ServiceInfo>, HttpError> {
    Ok(Json(app_state.scheduler.create_service(req).await?))
}

/// Handler for PATCH `/services/{service_id}`.
async fn handle_update_service(
    AxumState(app_state): AxumState<AppState>,
    Path(service_id): Path<i64>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceInfo>, HttpError> {
    Ok(Json(
        app_state.scheduler.update_service(service_id, req).await?,
    ))
}

/// Handler for GET `/staff`.
///
/// `?active=true` hides inactive staff members.
async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListStaffQuery>,
) -> Result<Json<ListStaffResponse>, HttpError> {
    Ok(Json(app_state.scheduler.list_staff(query.active).await?))
}

/// Handler for POST `/staff`.
async fn handle_create_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateStaffRequest>,
) -> Result<Json<StaffInfo>, HttpError> {
    Ok(Json(app_state.scheduler.create_staff(req).await?))
}

/// Handler for PATCH `/staff/{staff_id}`.
async fn handle_update_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<StaffInfo>, HttpError> {
    Ok(Json(app_state.scheduler.update_staff(staff_id, req).await?))
}

/// Handler for GET `/clients`.
async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListClientsResponse>, HttpError> {
    Ok(Json(app_state.scheduler.list_clients().await?))
}

/// Handler for POST `/clients`.
async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> Result<Json<ClientInfo>, HttpError> {
    Ok(Json(app_state.scheduler.create_client(req).await?))
}

// ============================================================================
// Audit
// ============================================================================

/// Handler for GET `/audit/timeline`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AuditTimelineRequest>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    Ok(Json(app_state.scheduler.get_audit_timeline(&query).await?))
}

/// Handler for GET `/audit/global`.
async fn handle_get_global_audit_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    Ok(Json(app_state.scheduler.get_global_audit_events().await?))
}

/// Handler for GET `/audit/event/{event_id}`.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    Ok(Json(app_state.scheduler.get_audit_event(event_id).await?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/availability", get(handle_get_availability))
        .route(
            "/appointments",
            get(handle_list_appointments).post(handle_create_appointment),
        )
        .route(
            "/appointments/{appointment_id}",
            get(handle_get_appointment).patch(handle_update_appointment),
        )
        .route(
            "/appointments/{appointment_id}/cancel",
            post(handle_cancel_appointment),
        )
        .route(
            "/operating_hours",
            get(handle_get_operating_hours).put(handle_set_operating_hours),
        )
        .route("/leaves", get(handle_list_leaves).post(handle_add_leave))
        .route("/leaves/remove", post(handle_remove_leave))
        .route(
            "/services",
            get(handle_list_services).post(handle_create_service),
        )
        .route("/services/{service_id}", patch(handle_update_service))
        .route("/staff", get(handle_list_staff).post(handle_create_staff))
        .route("/staff/{staff_id}", patch(handle_update_staff))
        .route("/clients", get(handle_list_clients).post(handle_create_client))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/audit/global", get(handle_get_global_audit_events))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shearbook Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence));

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
