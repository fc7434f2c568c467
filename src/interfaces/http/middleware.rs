//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::infrastructure::crypto::jwt::{verify_token, Claims, JwtConfig};

/// Authentication state carried by the router
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }

    /// Staff-level access: hotel staff and administrators
    pub fn is_staff(&self) -> bool {
        self.role == "admin" || self.role == "staff"
    }
}

/// Guard for staff-only handlers.
pub fn require_staff(user: &AuthenticatedUser) -> Result<(), crate::domain::DomainError> {
    if user.is_staff() {
        Ok(())
    } else {
        Err(crate::domain::DomainError::Forbidden(
            "Staff access required".to_string(),
        ))
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires a valid bearer token and
/// inserts the `AuthenticatedUser` into request extensions.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return unauthorized("Missing authentication token");
    };

    let Some(token) = extract_token(&auth_header) else {
        return unauthorized("Invalid authentication token");
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return unauthorized("Token has expired");
            }

            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => unauthorized("Invalid authentication token"),
    }
}

fn unauthorized(message: &str) -> Response {
    let body = Json(json!({
        "success": false,
        "error": message
    }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("Basic dXNlcg=="), None);
        assert_eq!(extract_token(""), None);
    }

    #[test]
    fn staff_roles() {
        let staff = AuthenticatedUser {
            user_id: "1".into(),
            username: "desk".into(),
            role: "staff".into(),
        };
        let admin = AuthenticatedUser {
            user_id: "2".into(),
            username: "boss".into(),
            role: "admin".into(),
        };
        let guest = AuthenticatedUser {
            user_id: "3".into(),
            username: "traveller".into(),
            role: "guest".into(),
        };
        assert!(staff.is_staff());
        assert!(admin.is_staff());
        assert!(!guest.is_staff());
    }
}
