//! Repository layer: SeaORM queries plus entity↔domain conversion.
//!
//! Methods take `&impl ConnectionTrait` so the same query runs on the
//! pool or inside a transaction; the caller owns the unit of work.

pub mod booking_repository;
pub mod payment_repository;
pub mod room_repository;

pub use booking_repository::{BookingRepository, NewBooking};
pub use payment_repository::PaymentRepository;
pub use room_repository::{
    CategoryPatch, CategoryRepository, NewCategory, NewRoom, RoomPatch, RoomRepository,
};
