//! Booking aggregate: the reservation row, its room snapshots and the
//! status state machine.

pub mod model;

pub use model::{BookedRoom, Booking, BookingDetails, BookingStatus, BookingUser};
