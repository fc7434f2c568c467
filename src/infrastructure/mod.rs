//! External concerns: database access and crypto.

pub mod crypto;
pub mod database;

pub use database::{init_database, DatabaseConfig};
