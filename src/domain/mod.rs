//! Core business entities, the booking state machine and pricing rules.
//!
//! Everything here is persistence-agnostic; SeaORM models live under
//! `infrastructure::database` and are converted at the repository layer.

pub mod booking;
pub mod error;
pub mod payment;
pub mod pricing;
pub mod room;

pub use booking::{BookedRoom, Booking, BookingDetails, BookingStatus, BookingUser};
pub use error::{DomainError, DomainResult};
pub use payment::{Payment, PaymentStatus};
pub use room::{Room, RoomCategory, RoomStatus, RoomWithCategory};
