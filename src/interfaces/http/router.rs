//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{BookingService, RoomService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, bookings, categories, health, rooms};

/// Unified state for the whole API. Axum hands each handler its own
/// sub-state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub booking_service: Arc<BookingService>,
    pub room_service: Arc<RoomService>,
}

impl FromRef<ApiState> for bookings::BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingAppState {
            service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<ApiState> for rooms::RoomAppState {
    fn from_ref(s: &ApiState) -> Self {
        rooms::RoomAppState {
            service: Arc::clone(&s.room_service),
            db: s.db.clone(),
        }
    }
}

impl FromRef<ApiState> for categories::CategoryAppState {
    fn from_ref(s: &ApiState) -> Self {
        categories::CategoryAppState {
            service: Arc::clone(&s.room_service),
        }
    }
}

impl FromRef<ApiState> for auth::AuthAppState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthAppState {
            db: s.db.clone(),
            jwt_config: s.jwt_config.clone(),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        AuthState {
            jwt_config: s.jwt_config.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::me,
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::pay_booking,
        bookings::handlers::get_booking,
        bookings::handlers::my_bookings,
        bookings::handlers::list_bookings,
        bookings::handlers::cancel_booking,
        bookings::handlers::update_status,
        // Rooms
        rooms::handlers::list_rooms,
        rooms::handlers::search_availability,
        rooms::handlers::get_room,
        rooms::handlers::create_room,
        rooms::handlers::update_room,
        rooms::handlers::delete_room,
        // Room categories
        categories::handlers::list_categories,
        categories::handlers::get_category,
        categories::handlers::create_category,
        categories::handlers::update_category,
    ),
    components(schemas(
        auth::dto::LoginRequest,
        auth::dto::LoginResponse,
        auth::dto::RegisterRequest,
        auth::dto::UserInfo,
        bookings::dto::CreateBookingRequest,
        bookings::dto::PaymentRequest,
        bookings::dto::UpdateStatusRequest,
        bookings::dto::BookingDto,
        bookings::dto::BookingUserDto,
        bookings::dto::BookedRoomDto,
        bookings::dto::PaymentDto,
        rooms::dto::RoomDto,
        rooms::dto::RoomSummaryDto,
        rooms::dto::CreateRoomRequest,
        rooms::dto::UpdateRoomRequest,
        categories::dto::CategoryDto,
        categories::dto::CreateCategoryRequest,
        categories::dto::UpdateCategoryRequest,
        health::handlers::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login, registration and the current user"),
        (name = "Bookings", description = "Booking lifecycle: create, pay, cancel, status"),
        (name = "Rooms", description = "Room inventory and availability search"),
        (name = "Room Categories", description = "Room categories and nightly prices"),
    )
)]
struct ApiDoc;

/// Build the API router.
///
/// Public surface: health, login/register, room and category reads, the
/// availability search. Everything else requires a bearer token; staff
/// checks happen in the handlers.
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    booking_service: Arc<BookingService>,
    room_service: Arc<RoomService>,
) -> Router {
    let state = ApiState {
        db,
        jwt_config,
        booking_service,
        room_service,
    };
    let auth_state = AuthState {
        jwt_config: state.jwt_config.clone(),
    };

    let public = Router::new()
        .route("/api/v1/health", get(health::handlers::health_check))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route("/api/v1/auth/register", post(auth::handlers::register))
        .route("/api/v1/rooms", get(rooms::handlers::list_rooms))
        .route(
            "/api/v1/rooms/availability",
            get(rooms::handlers::search_availability),
        )
        .route("/api/v1/rooms/{room_id}", get(rooms::handlers::get_room))
        .route(
            "/api/v1/room-categories",
            get(categories::handlers::list_categories),
        )
        .route(
            "/api/v1/room-categories/{category_id}",
            get(categories::handlers::get_category),
        );

    let protected = Router::new()
        .route("/api/v1/auth/me", get(auth::handlers::me))
        .route("/api/v1/bookings", post(bookings::handlers::create_booking))
        .route("/api/v1/bookings", get(bookings::handlers::list_bookings))
        .route(
            "/api/v1/bookings/my-bookings",
            get(bookings::handlers::my_bookings),
        )
        .route(
            "/api/v1/bookings/{booking_id}",
            get(bookings::handlers::get_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/payment",
            post(bookings::handlers::pay_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/cancel",
            put(bookings::handlers::cancel_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/status",
            put(bookings::handlers::update_status),
        )
        .route("/api/v1/rooms", post(rooms::handlers::create_room))
        .route("/api/v1/rooms/{room_id}", put(rooms::handlers::update_room))
        .route(
            "/api/v1/rooms/{room_id}",
            delete(rooms::handlers::delete_room),
        )
        .route(
            "/api/v1/room-categories",
            post(categories::handlers::create_category),
        )
        .route(
            "/api/v1/room-categories/{category_id}",
            put(categories::handlers::update_category),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
