//! Room HTTP handlers: public search/read, staff-only writes

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::application::services::{availability, RoomService};
use crate::domain::{DomainError, RoomStatus};
use crate::infrastructure::database::repositories::{NewRoom, RoomPatch};
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::middleware::{require_staff, AuthenticatedUser};

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub service: Arc<RoomService>,
    pub db: DatabaseConnection,
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError(DomainError::Validation(format!(
            "Invalid {field} '{raw}', expected YYYY-MM-DD"
        )))
    })
}

fn parse_status(raw: &str) -> Result<RoomStatus, ApiError> {
    RoomStatus::parse(raw).ok_or_else(|| {
        ApiError(DomainError::Validation(format!(
            "Invalid room status '{raw}'"
        )))
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    params(ListRoomsQuery),
    responses(
        (status = 200, description = "All rooms with their categories", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError> {
    let rooms = state.service.list_rooms(query.category_id).await?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/availability",
    tag = "Rooms",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms free for the whole range", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Bad dates")
    )
)]
pub async fn search_availability(
    State(state): State<RoomAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError> {
    let check_in = parse_date(&query.check_in_date, "checkInDate")?;
    let check_out = parse_date(&query.check_out_date, "checkOutDate")?;

    let rooms =
        availability::search_available(&state.db, check_in, check_out, query.guest_count).await?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError> {
    let room = state.service.get_room(room_id).await?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomSummaryDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Unknown category"),
        (status = 409, description = "Room number already taken")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomSummaryDto>>), ApiError> {
    require_staff(&user)?;
    let status = request
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or(RoomStatus::Available);

    let room = state
        .service
        .create_room(NewRoom {
            room_number: request.room_number,
            category_id: request.category_id,
            status,
            floor: request.floor.unwrap_or(1),
            notes: request.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomSummaryDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room number already taken")
    )
)]
pub async fn update_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(room_id): Path<i32>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<RoomSummaryDto>>, ApiError> {
    require_staff(&user)?;
    let status = request.status.as_deref().map(parse_status).transpose()?;

    let room = state
        .service
        .update_room(
            room_id,
            RoomPatch {
                room_number: request.room_number,
                category_id: request.category_id,
                status,
                floor: request.floor,
                notes: request.notes.map(Some),
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room has booking history")
    )
)]
pub async fn delete_room(
    State(state): State<RoomAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_staff(&user)?;
    state.service.delete_room(room_id).await?;
    Ok(Json(ApiResponse::success(())))
}
