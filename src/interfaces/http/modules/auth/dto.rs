//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request; `username` also accepts the account email
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    pub username: String,
    pub password: String,
}

/// Successful login: JWT for subsequent requests, passed as
/// `Authorization: Bearer <token>`
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    /// admin, staff or guest
    pub role: String,
}

/// Registration request; new accounts get the `guest` role
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// 3–50 characters, unique
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Unique email address
    #[validate(email)]
    pub email: String,
    /// At least 8 characters
    #[validate(length(min = 8))]
    pub password: String,
}
