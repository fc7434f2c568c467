//! Authentication HTTP handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::user;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::*;

/// Application state for authentication handlers.
#[derive(Clone)]
pub struct AuthAppState {
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
}

type HandlerError<T> = (StatusCode, Json<ApiResponse<T>>);

fn internal<T, E: std::fmt::Display>(e: E) -> HandlerError<T> {
    tracing::error!("Auth request failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Internal server error")),
    )
}

fn unauthorized<T>(message: &str) -> HandlerError<T> {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error(message)),
    )
}

fn user_info(u: &user::Model) -> UserInfo {
    UserInfo {
        id: u.id.clone(),
        username: u.username.clone(),
        email: u.email.clone(),
        role: u.role.as_str().to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated, returns a JWT", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Bad credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HandlerError<LoginResponse>> {
    let found = user::Entity::find()
        .filter(
            user::Column::Username
                .eq(&request.username)
                .or(user::Column::Email.eq(&request.username)),
        )
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(found) = found else {
        return Err(unauthorized("Invalid credentials"));
    };

    if !found.is_active {
        return Err(unauthorized("Account is disabled"));
    }

    let password_valid = verify_password(&request.password, &found.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(unauthorized("Invalid credentials"));
    }

    // Update last login time, best effort
    let mut active: user::ActiveModel = found.clone().into();
    active.last_login_at = Set(Some(Utc::now()));
    active.update(&state.db).await.ok();

    let token = create_token(
        &found.id,
        &found.username,
        found.role.as_str(),
        &state.jwt_config,
    )
    .map_err(internal)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: user_info(&found),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Username or email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), HandlerError<UserInfo>> {
    let taken = user::Entity::find()
        .filter(
            user::Column::Username
                .eq(&request.username)
                .or(user::Column::Email.eq(&request.email)),
        )
        .one(&state.db)
        .await
        .map_err(internal)?;
    if taken.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Username or email already taken")),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(internal)?;
    let now = Utc::now();
    let created = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(request.username),
        email: Set(request.email),
        password_hash: Set(password_hash),
        role: Set(user::UserRole::Guest),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(None),
    }
    .insert(&state.db)
    .await
    .map_err(internal)?;

    tracing::info!(user_id = %created.id, username = %created.username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user_info(&created))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The calling user", body = ApiResponse<UserInfo>),
        (status = 404, description = "User no longer exists")
    )
)]
pub async fn me(
    State(state): State<AuthAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, HandlerError<UserInfo>> {
    let found = user::Entity::find_by_id(&auth.user_id)
        .one(&state.db)
        .await
        .map_err(internal)?;

    let Some(found) = found else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(user_info(&found))))
}
