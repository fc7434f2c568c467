//! Room and room-category domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Housekeeping status of a room.
///
/// Informational only: whether a room can actually be booked for a date
/// range is derived from bookings, not from this field. `OutOfService`
/// rooms are excluded from availability search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Booked,
    Cleaning,
    OutOfService,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Cleaning => "cleaning",
            Self::OutOfService => "out_of_service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "booked" => Some(Self::Booked),
            "cleaning" => Some(Self::Cleaning),
            "out_of_service" => Some(Self::OutOfService),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room category with the nightly base price bookings snapshot from.
#[derive(Debug, Clone)]
pub struct RoomCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Nightly base price, 2 decimal places
    pub base_price: Decimal,
    pub max_occupancy: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A physical room
#[derive(Debug, Clone)]
pub struct Room {
    pub id: i32,
    /// Unique human-facing number ("101", "305A")
    pub room_number: String,
    pub category_id: i32,
    pub status: RoomStatus,
    pub floor: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A room joined with its category, the shape most read paths need.
#[derive(Debug, Clone)]
pub struct RoomWithCategory {
    pub room: Room,
    pub category: RoomCategory,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_roundtrip() {
        use RoomStatus::*;
        for status in [Available, Booked, Cleaning, OutOfService] {
            assert_eq!(RoomStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RoomStatus::parse("demolished"), None);
    }

    #[test]
    fn status_display() {
        assert_eq!(RoomStatus::OutOfService.to_string(), "out_of_service");
        assert_eq!(RoomStatus::Available.to_string(), "available");
    }
}
