//! Room DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Room, RoomWithCategory};
use crate::interfaces::http::modules::categories::dto::CategoryDto;

/// Room joined with its category
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub room_number: String,
    pub status: String,
    pub floor: i32,
    pub notes: Option<String>,
    pub category: CategoryDto,
}

impl From<RoomWithCategory> for RoomDto {
    fn from(rc: RoomWithCategory) -> Self {
        Self {
            id: rc.room.id,
            room_number: rc.room.room_number,
            status: rc.room.status.to_string(),
            floor: rc.room.floor,
            notes: rc.room.notes,
            category: rc.category.into(),
        }
    }
}

/// Room without the joined category, used for write responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomSummaryDto {
    pub id: i32,
    pub room_number: String,
    pub category_id: i32,
    pub status: String,
    pub floor: i32,
    pub notes: Option<String>,
}

impl From<Room> for RoomSummaryDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            room_number: r.room_number,
            category_id: r.category_id,
            status: r.status.to_string(),
            floor: r.floor,
            notes: r.notes,
        }
    }
}

/// Request to create a room
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub category_id: i32,
    /// available, booked, cleaning, out_of_service (default: available)
    pub status: Option<String>,
    pub floor: Option<i32>,
    pub notes: Option<String>,
}

/// Partial room update; only supplied fields change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoomRequest {
    pub room_number: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<String>,
    pub floor: Option<i32>,
    pub notes: Option<String>,
}

/// Query for the room listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRoomsQuery {
    /// Narrow the listing to one category
    pub category_id: Option<i32>,
}

/// Query for the public availability search
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// First night of the stay (ISO 8601 date)
    #[serde(rename = "checkInDate", alias = "check_in_date")]
    pub check_in_date: String,
    /// Departure day (ISO 8601 date)
    #[serde(rename = "checkOutDate", alias = "check_out_date")]
    pub check_out_date: String,
    /// Only rooms whose category sleeps at least this many
    #[serde(rename = "guestCount", alias = "guest_count")]
    pub guest_count: Option<i32>,
}
