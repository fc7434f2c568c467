//! Booking domain entity and status state machine

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::payment::Payment;

/// Booking lifecycle status
///
/// Forward path: `PendingPayment → Confirmed → CheckedIn → CheckedOut`.
/// `Cancelled` is reachable from `PendingPayment` and `Confirmed` only.
/// `CheckedOut` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created, waiting for payment
    PendingPayment,
    /// Payment recorded, stay confirmed
    Confirmed,
    /// Guest has arrived
    CheckedIn,
    /// Stay completed
    CheckedOut,
    /// Cancelled before check-in
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending_payment" => Some(Self::PendingPayment),
            "confirmed" => Some(Self::Confirmed),
            "checked_in" => Some(Self::CheckedIn),
            "checked_out" => Some(Self::CheckedOut),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether a booking in this status blocks the rooms it references.
    /// Cancelled and checked-out bookings never conflict with new ones.
    pub fn occupies_rooms(&self) -> bool {
        matches!(self, Self::PendingPayment | Self::Confirmed | Self::CheckedIn)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Status-transition rules. Terminal statuses admit no transition,
    /// including a rewrite of the same terminal value.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (PendingPayment, Confirmed)
                | (PendingPayment, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation of one or more rooms for a date range
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    /// Owning user ID
    pub user_id: String,
    /// First night of the stay
    pub check_in: NaiveDate,
    /// Day of departure; the night of `check_out` itself is not occupied
    pub check_out: NaiveDate,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub guest_count: i32,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights covered by the `[check_in, check_out)` range.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// One room within a booking, with the nightly rate captured at booking
/// time so later category price edits do not alter history.
#[derive(Debug, Clone)]
pub struct BookedRoom {
    pub room_id: i32,
    pub room_number: String,
    pub category_name: String,
    pub nightly_rate: Decimal,
}

/// Owning user as embedded in the hydrated read shape.
#[derive(Debug, Clone)]
pub struct BookingUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// The canonical read shape for a booking: the row itself plus the
/// owning user, its rooms (with rate snapshots) and payment history.
/// Every booking-returning operation produces this.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub user: Option<BookingUser>,
    pub rooms: Vec<BookedRoom>,
    pub payments: Vec<Payment>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking(status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            user_id: "user-1".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 10, 8).unwrap(),
            total_amount: "720.00".parse().unwrap(),
            status,
            guest_count: 2,
            special_requests: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn forward_transitions_are_allowed() {
        use BookingStatus::*;
        assert!(PendingPayment.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
    }

    #[test]
    fn cancellation_only_before_check_in() {
        use BookingStatus::*;
        assert!(PendingPayment.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!CheckedIn.can_transition_to(Cancelled));
        assert!(!CheckedOut.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_statuses_admit_nothing() {
        use BookingStatus::*;
        for next in [PendingPayment, Confirmed, CheckedIn, CheckedOut, Cancelled] {
            assert!(!Cancelled.can_transition_to(next), "cancelled -> {next}");
            assert!(!CheckedOut.can_transition_to(next), "checked_out -> {next}");
        }
    }

    #[test]
    fn no_skipping_ahead() {
        use BookingStatus::*;
        assert!(!PendingPayment.can_transition_to(CheckedIn));
        assert!(!PendingPayment.can_transition_to(CheckedOut));
        assert!(!Confirmed.can_transition_to(CheckedOut));
    }

    #[test]
    fn occupying_statuses() {
        use BookingStatus::*;
        assert!(PendingPayment.occupies_rooms());
        assert!(Confirmed.occupies_rooms());
        assert!(CheckedIn.occupies_rooms());
        assert!(!CheckedOut.occupies_rooms());
        assert!(!Cancelled.occupies_rooms());
    }

    #[test]
    fn status_string_roundtrip() {
        use BookingStatus::*;
        for status in [PendingPayment, Confirmed, CheckedIn, CheckedOut, Cancelled] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("unknown"), None);
    }

    #[test]
    fn nights_from_date_range() {
        let b = sample_booking(BookingStatus::PendingPayment);
        assert_eq!(b.nights(), 3);
    }

    #[test]
    fn ownership_check() {
        let b = sample_booking(BookingStatus::Confirmed);
        assert!(b.is_owned_by("user-1"));
        assert!(!b.is_owned_by("user-2"));
    }
}
