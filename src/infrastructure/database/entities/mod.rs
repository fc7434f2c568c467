//! SeaORM entity definitions

pub mod booking;
pub mod booking_room;
pub mod payment;
pub mod room;
pub mod room_category;
pub mod user;
