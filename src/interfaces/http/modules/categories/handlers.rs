//! Room category HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::services::RoomService;
use crate::domain::pricing;
use crate::infrastructure::database::repositories::{CategoryPatch, NewCategory};
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::middleware::{require_staff, AuthenticatedUser};

use super::dto::*;

/// Application state for category handlers.
#[derive(Clone)]
pub struct CategoryAppState {
    pub service: Arc<RoomService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/room-categories",
    tag = "Room Categories",
    responses(
        (status = 200, description = "All room categories", body = ApiResponse<Vec<CategoryDto>>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoryAppState>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-categories/{category_id}",
    tag = "Room Categories",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<CategoryAppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state.service.get_category(category_id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/room-categories",
    tag = "Room Categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_category(
    State(state): State<CategoryAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>), ApiError> {
    require_staff(&user)?;
    let base_price = pricing::parse_money(&request.base_price)?;

    let category = state
        .service
        .create_category(NewCategory {
            name: request.name,
            description: request.description,
            base_price,
            max_occupancy: request.max_occupancy,
            amenities: request.amenities,
            images: request.images,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(category.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/room-categories/{category_id}",
    tag = "Room Categories",
    security(("bearer_auth" = [])),
    params(("category_id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<CategoryAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(category_id): Path<i32>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    require_staff(&user)?;
    let base_price = request
        .base_price
        .as_deref()
        .map(pricing::parse_money)
        .transpose()?;

    let category = state
        .service
        .update_category(
            category_id,
            CategoryPatch {
                name: request.name,
                description: request.description.map(Some),
                base_price,
                max_occupancy: request.max_occupancy,
                amenities: request.amenities,
                images: request.images,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(category.into())))
}
