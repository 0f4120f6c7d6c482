//! Routes for parking place operations.
//!
//! Mounted under `/parking` behind the `X-API-Key` check.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use parking_allocation::application::{command_handlers, query_handlers};
use parking_allocation::domain::commands;
use parking_core::error::ParkingError;
use parking_core::log::ParkingSpaceLog;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Request body for POST /park-car.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ParkCarRequest {
    /// Driver first name.
    #[schema(example = "Ivan")]
    pub first_name: String,
    /// Driver last name.
    #[schema(example = "Ivanov")]
    pub last_name: String,
    /// Vehicle make.
    #[schema(example = "Toyota")]
    pub car_make: String,
    /// Vehicle license plate.
    #[schema(example = "A123BC777")]
    pub license_plate: String,
}

/// Query string for POST /free-up.
#[derive(Debug, Deserialize)]
pub struct FreeUpParams {
    /// Place to free; parsed by the handler so bad values map to 400.
    pub place_number: Option<String>,
}

/// Query string for GET /parking-space-logs.
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    /// Owner first name.
    pub first_name: Option<String>,
    /// Owner last name.
    pub last_name: Option<String>,
}

/// A parking space log as rendered to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParkingSpaceLogResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Client-visible correlation token.
    pub log_id: Uuid,
    /// Occupied place.
    #[schema(example = 1)]
    pub place_number: u32,
    /// Driver first name.
    pub first_name: String,
    /// Driver last name.
    pub last_name: String,
    /// Vehicle make.
    pub car_make: String,
    /// Vehicle license plate.
    pub license_plate: String,
    /// When the place was occupied.
    pub created_at: DateTime<Utc>,
    /// Whether the place is still occupied by this record.
    pub is_active: bool,
    /// When the place was freed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_up_time: Option<DateTime<Utc>>,
}

impl From<ParkingSpaceLog> for ParkingSpaceLogResponse {
    fn from(log: ParkingSpaceLog) -> Self {
        Self {
            id: log.id,
            log_id: log.log_id,
            place_number: log.place_number,
            first_name: log.first_name,
            last_name: log.last_name,
            car_make: log.car_make,
            license_plate: log.license_plate,
            created_at: log.created_at,
            is_active: log.is_active,
            free_up_time: log.free_up_time,
        }
    }
}

fn render(logs: Vec<ParkingSpaceLog>) -> Json<Vec<ParkingSpaceLogResponse>> {
    Json(logs.into_iter().map(ParkingSpaceLogResponse::from).collect())
}

fn parse_place_number(raw: Option<&str>) -> Result<u32, ParkingError> {
    raw.and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| ParkingError::InvalidInput("invalid place_number".into()))
}

/// GET /free-spaces-count
#[utoipa::path(
    get,
    path = "/parking/free-spaces-count",
    tag = "Parking",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Number of free places", body = u64),
        (status = 401, description = "Missing or wrong API key", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn free_spaces_count(State(state): State<AppState>) -> Result<Json<u64>, ApiError> {
    let free =
        query_handlers::get_free_spaces_count(&state.lot, &*state.parking_log_repository).await?;
    Ok(Json(free))
}

/// GET /occupied-spaces-list
#[utoipa::path(
    get,
    path = "/parking/occupied-spaces-list",
    tag = "Parking",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Active records", body = [ParkingSpaceLogResponse]),
        (status = 401, description = "Missing or wrong API key", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn occupied_spaces_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParkingSpaceLogResponse>>, ApiError> {
    let logs =
        query_handlers::list_occupied_spaces(&state.lot, &*state.parking_log_repository).await?;
    Ok(render(logs))
}

/// POST /park-car
#[utoipa::path(
    post,
    path = "/parking/park-car",
    tag = "Parking",
    security(("api_key" = [])),
    request_body = ParkCarRequest,
    responses(
        (status = 200, description = "Vehicle parked", body = ParkingSpaceLogResponse),
        (status = 400, description = "Invalid body or no free place", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key", body = ErrorBody),
        (status = 409, description = "Lost every race for a place", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
#[instrument(skip(state, payload))]
pub async fn park_car(
    State(state): State<AppState>,
    payload: Result<Json<ParkCarRequest>, JsonRejection>,
) -> Result<Json<ParkingSpaceLogResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ParkingError::InvalidInput(rejection.body_text()))?;

    let command = commands::ParkVehicle {
        correlation_id: Uuid::new_v4(),
        first_name: request.first_name,
        last_name: request.last_name,
        car_make: request.car_make,
        license_plate: request.license_plate,
    };

    info!(correlation_id = %command.correlation_id, "handling park_vehicle command");

    let stored = command_handlers::handle_park_vehicle(
        &command,
        &state.lot,
        state.clock.as_ref(),
        &state.rng,
        &*state.parking_log_repository,
    )
    .await?;

    Ok(Json(stored.into()))
}

/// POST /free-up?place_number=
#[utoipa::path(
    post,
    path = "/parking/free-up",
    tag = "Parking",
    security(("api_key" = [])),
    params(("place_number" = u32, Query, description = "Place to free")),
    responses(
        (status = 200, description = "Place freed", body = ParkingSpaceLogResponse),
        (status = 400, description = "Invalid place number or place already free", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
#[instrument(skip(state, query))]
pub async fn free_up(
    State(state): State<AppState>,
    query: Result<Query<FreeUpParams>, QueryRejection>,
) -> Result<Json<ParkingSpaceLogResponse>, ApiError> {
    let Query(params) =
        query.map_err(|rejection| ParkingError::InvalidInput(rejection.body_text()))?;
    let place_number = parse_place_number(params.place_number.as_deref())?;

    let command = commands::ReleaseSpace {
        correlation_id: Uuid::new_v4(),
        place_number,
    };

    info!(
        correlation_id = %command.correlation_id,
        place_number,
        "handling release_space command"
    );

    let released = command_handlers::handle_release_space(
        &command,
        &state.lot,
        state.clock.as_ref(),
        &*state.parking_log_repository,
    )
    .await?;

    Ok(Json(released.into()))
}

/// GET /parking-space-logs?first_name=&last_name=
#[utoipa::path(
    get,
    path = "/parking/parking-space-logs",
    tag = "Parking",
    security(("api_key" = [])),
    params(
        ("first_name" = String, Query, description = "Owner first name, case-insensitive"),
        ("last_name" = String, Query, description = "Owner last name, case-insensitive"),
    ),
    responses(
        (status = 200, description = "Active records for the owner", body = [ParkingSpaceLogResponse]),
        (status = 400, description = "Missing names", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
#[instrument(skip(state, query))]
pub async fn parking_space_logs(
    State(state): State<AppState>,
    query: Result<Query<OwnerParams>, QueryRejection>,
) -> Result<Json<Vec<ParkingSpaceLogResponse>>, ApiError> {
    let Query(params) =
        query.map_err(|rejection| ParkingError::InvalidInput(rejection.body_text()))?;
    let (Some(first_name), Some(last_name)) = (params.first_name, params.last_name) else {
        return Err(
            ParkingError::InvalidInput("first_name and last_name are required".into()).into(),
        );
    };

    let logs = query_handlers::get_logs_by_owner(
        &first_name,
        &last_name,
        &state.lot,
        &*state.parking_log_repository,
    )
    .await?;

    Ok(render(logs))
}

/// Returns the router for parking operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/free-spaces-count", get(free_spaces_count))
        .route("/occupied-spaces-list", get(occupied_spaces_list))
        .route("/park-car", post(park_car))
        .route("/free-up", post(free_up))
        .route("/parking-space-logs", get(parking_space_logs))
}
