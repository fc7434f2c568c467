//! # Arcadia Hotel Service
//!
//! Hotel booking backend: room inventory, the booking lifecycle
//! (availability check → pricing → payment → status transitions) and the
//! REST API over them.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the booking state machine and
//!   pricing rules
//! - **application**: Services orchestrating the domain over the database
//! - **infrastructure**: External concerns (SeaORM entities, migrations,
//!   repositories, crypto)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
