//! Payment aggregate

pub mod model;

pub use model::{generate_transaction_id, Payment, PaymentStatus};
