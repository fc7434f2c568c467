//! Application services orchestrating the domain over the database.

pub mod availability;
pub mod booking;
pub mod room;

pub use booking::{BookingService, CreateBooking};
pub use room::RoomService;
