//! Room inventory aggregate

pub mod model;

pub use model::{Room, RoomCategory, RoomStatus, RoomWithCategory};
