//! Booking DTOs
//!
//! Monetary values cross the wire as decimal strings and dates as
//! ISO-8601 (`YYYY-MM-DD`) to avoid any float rounding drift.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookedRoom, BookingDetails, BookingUser, Payment};

/// Request to create a booking
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// First night of the stay (ISO 8601 date)
    pub check_in_date: String,
    /// Departure day (ISO 8601 date); must be after check-in
    pub check_out_date: String,
    /// Number of guests
    #[serde(default = "default_guest_count")]
    pub guest_count: i32,
    /// Rooms to reserve, all-or-nothing
    pub room_ids: Vec<i32>,
    pub special_requests: Option<String>,
}

fn default_guest_count() -> i32 {
    1
}

/// Request to pay for a booking. The amount must equal the booking
/// total exactly.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Decimal string, e.g. "720.00"
    pub amount: String,
    /// Payment method ("card", "cash", ...)
    pub method: String,
    /// Gateway transaction reference; generated when omitted
    pub transaction_id: Option<String>,
}

/// Staff request to move a booking along the state machine
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of: pending_payment, confirmed, checked_in, checked_out,
    /// cancelled
    pub status: String,
}

/// One room within a booking response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookedRoomDto {
    pub room_id: i32,
    pub room_number: String,
    pub category: String,
    /// Nightly rate frozen at booking time, decimal string
    pub nightly_rate: String,
}

impl From<BookedRoom> for BookedRoomDto {
    fn from(r: BookedRoom) -> Self {
        Self {
            room_id: r.room_id,
            room_number: r.room_number,
            category: r.category_name,
            nightly_rate: r.nightly_rate.to_string(),
        }
    }
}

/// Owning user within a booking response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingUserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<BookingUser> for BookingUserDto {
    fn from(u: BookingUser) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// One payment within a booking response
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub amount: String,
    pub method: String,
    pub transaction_id: String,
    pub status: String,
    pub created_at: String,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            amount: p.amount.to_string(),
            method: p.method,
            transaction_id: p.transaction_id,
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// The hydrated booking every booking endpoint returns
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub user_id: String,
    pub user: Option<BookingUserDto>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub nights: i64,
    pub status: String,
    /// Total for the whole stay, decimal string
    pub total_amount: String,
    pub guest_count: i32,
    pub special_requests: Option<String>,
    pub rooms: Vec<BookedRoomDto>,
    pub payments: Vec<PaymentDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookingDetails> for BookingDto {
    fn from(d: BookingDetails) -> Self {
        let nights = d.booking.nights();
        let b = d.booking;
        Self {
            id: b.id,
            user_id: b.user_id,
            user: d.user.map(Into::into),
            check_in_date: b.check_in.to_string(),
            check_out_date: b.check_out.to_string(),
            nights,
            status: b.status.to_string(),
            total_amount: b.total_amount.to_string(),
            guest_count: b.guest_count,
            special_requests: b.special_requests,
            rooms: d.rooms.into_iter().map(Into::into).collect(),
            payments: d.payments.into_iter().map(Into::into).collect(),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}
