//! Booking HTTP handlers
//!
//! Thin request/response mapping over `BookingService`. Role gating:
//! guests operate on their own bookings, staff on any.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;

use crate::application::services::{BookingService, CreateBooking};
use crate::domain::{BookingDetails, BookingStatus, DomainError};
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::middleware::{require_staff, AuthenticatedUser};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError(DomainError::Validation(format!(
            "Invalid {field} '{raw}', expected YYYY-MM-DD"
        )))
    })
}

fn ensure_owner_or_staff(
    details: &BookingDetails,
    user: &AuthenticatedUser,
) -> Result<(), DomainError> {
    if user.is_staff() || details.booking.is_owned_by(&user.user_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "You do not have access to this booking".to_string(),
        ))
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Validation or availability error"),
        (status = 404, description = "Unknown room id")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let check_in = parse_date(&request.check_in_date, "check_in_date")?;
    let check_out = parse_date(&request.check_out_date, "check_out_date")?;

    let details = state
        .service
        .create_booking(CreateBooking {
            user_id: user.user_id,
            check_in,
            check_out,
            guest_count: request.guest_count,
            room_ids: request.room_ids,
            special_requests: request.special_requests,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(details.into())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/payment",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, booking confirmed", body = ApiResponse<BookingDto>),
        (status = 400, description = "Amount mismatch or wrong status"),
        (status = 403, description = "Not the booking owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn pay_booking(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let details = state.service.get_booking(booking_id).await?;
    ensure_owner_or_staff(&details, &user)?;

    let details = state
        .service
        .process_payment(
            booking_id,
            &request.amount,
            &request.method,
            request.transaction_id,
        )
        .await?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Not the booking owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let details = state.service.get_booking(booking_id).await?;
    ensure_owner_or_staff(&details, &user)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/my-bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings of the calling user", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn my_bookings(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let details = state.service.list_for_user(&user.user_id).await?;
    Ok(Json(ApiResponse::success(
        details.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>),
        (status = 403, description = "Staff access required")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    require_staff(&user)?;
    let details = state.service.list_all().await?;
    Ok(Json(ApiResponse::success(
        details.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking is in a terminal state"),
        (status = 403, description = "Not the booking owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    // staff may cancel any booking; guests only their own
    let requesting_user = (!user.is_staff()).then_some(user.user_id.as_str());
    let details = state
        .service
        .cancel_booking(booking_id, requesting_user)
        .await?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}/status",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid or forbidden transition"),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_status(
    State(state): State<BookingAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    require_staff(&user)?;
    let new_status = BookingStatus::parse(&request.status).ok_or_else(|| {
        ApiError(DomainError::Validation(format!(
            "Invalid status '{}'",
            request.status
        )))
    })?;

    let details = state.service.update_status(booking_id, new_status).await?;
    Ok(Json(ApiResponse::success(details.into())))
}
