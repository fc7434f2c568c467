//! Booking lifecycle: creation, payment, cancellation, status updates.
//!
//! Every multi-step mutation runs inside one database transaction, so a
//! booking is either fully created (row + room snapshots) or not at all,
//! and the availability check can never race a concurrent insert.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::application::services::availability;
use crate::domain::payment::generate_transaction_id;
use crate::domain::{
    pricing, Booking, BookingDetails, BookingStatus, DomainError, DomainResult,
};
use crate::infrastructure::database::repositories::{
    BookingRepository, NewBooking, PaymentRepository, RoomRepository,
};

/// Parameters for creating a booking
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub room_ids: Vec<i32>,
    pub special_requests: Option<String>,
}

/// Orchestrates the booking state machine over the database handle it is
/// constructed with. Stateless apart from that handle; safe to share.
pub struct BookingService {
    db: DatabaseConnection,
}

impl BookingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a booking for one or more rooms.
    ///
    /// Validates dates up front, then in a single transaction: checks
    /// availability, resolves rooms with their category prices, prices
    /// the stay, inserts the booking in `pending_payment` and snapshots
    /// each room's nightly rate. Any failure rolls the whole thing back.
    pub async fn create_booking(&self, req: CreateBooking) -> DomainResult<BookingDetails> {
        if req.room_ids.is_empty() {
            return Err(DomainError::Validation(
                "At least one room is required".to_string(),
            ));
        }
        if req.check_out <= req.check_in {
            return Err(DomainError::Validation(
                "check_out_date must be after check_in_date".to_string(),
            ));
        }
        if req.check_in < Utc::now().date_naive() {
            return Err(DomainError::Validation(
                "check_in_date cannot be in the past".to_string(),
            ));
        }
        if req.guest_count < 1 {
            return Err(DomainError::Validation(
                "guest_count must be at least 1".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let conflicts =
            availability::find_conflicts(&txn, &req.room_ids, req.check_in, req.check_out).await?;
        if !conflicts.is_empty() {
            let mut ids: Vec<i32> = conflicts.into_iter().collect();
            ids.sort_unstable();
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            return Err(DomainError::Availability(format!(
                "room(s) {} already booked for an overlapping range",
                ids.join(", ")
            )));
        }

        let loaded = RoomRepository::find_many_with_category(&txn, &req.room_ids).await?;
        let mut snapshots: Vec<(i32, Decimal)> = Vec::with_capacity(req.room_ids.len());
        let mut capacity = 0;
        for room_id in &req.room_ids {
            let rc = loaded
                .iter()
                .find(|rc| rc.room.id == *room_id)
                .ok_or_else(|| DomainError::not_found("Room", "id", room_id))?;
            snapshots.push((*room_id, rc.category.base_price));
            capacity += rc.category.max_occupancy;
        }
        if req.guest_count > capacity {
            return Err(DomainError::Validation(format!(
                "Guest count {} exceeds the capacity of the selected rooms ({})",
                req.guest_count, capacity
            )));
        }

        let nights = pricing::nights(req.check_in, req.check_out);
        let rates: Vec<Decimal> = snapshots.iter().map(|(_, rate)| *rate).collect();
        let total = pricing::stay_total(&rates, nights);

        let booking = BookingRepository::insert(
            &txn,
            NewBooking {
                user_id: req.user_id,
                check_in: req.check_in,
                check_out: req.check_out,
                total_amount: total,
                guest_count: req.guest_count,
                special_requests: req.special_requests,
            },
        )
        .await?;
        BookingRepository::insert_booking_rooms(&txn, booking.id, &snapshots).await?;

        let details = Self::hydrate(&txn, booking).await?;
        txn.commit().await?;

        info!(
            booking_id = details.booking.id,
            user_id = %details.booking.user_id,
            total = %details.booking.total_amount,
            nights,
            rooms = details.rooms.len(),
            "Booking created"
        );
        Ok(details)
    }

    /// Record a payment and confirm the booking.
    ///
    /// The amount must match the booking total exactly; a one-cent
    /// difference fails rather than silently accepting a partial amount.
    pub async fn process_payment(
        &self,
        booking_id: i32,
        amount: &str,
        method: &str,
        transaction_id: Option<String>,
    ) -> DomainResult<BookingDetails> {
        let amount = pricing::parse_money(amount)?;

        let txn = self.db.begin().await?;

        let booking = BookingRepository::find_by_id(&txn, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if booking.status != BookingStatus::PendingPayment {
            return Err(DomainError::StateConflict(format!(
                "Payment can only be recorded for a booking pending payment (current status: {})",
                booking.status
            )));
        }
        if amount != booking.total_amount {
            return Err(DomainError::Validation(format!(
                "Payment amount {} does not match booking total {}",
                amount, booking.total_amount
            )));
        }

        let transaction_id = transaction_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_transaction_id);
        PaymentRepository::insert(&txn, booking_id, amount, method, transaction_id).await?;

        let booking =
            BookingRepository::set_status(&txn, booking_id, BookingStatus::Confirmed).await?;
        let details = Self::hydrate(&txn, booking).await?;
        txn.commit().await?;

        info!(booking_id, amount = %amount, method, "Payment recorded, booking confirmed");
        Ok(details)
    }

    /// Cancel a booking. When `requesting_user` is given the booking must
    /// belong to that user; staff callers pass `None`.
    pub async fn cancel_booking(
        &self,
        booking_id: i32,
        requesting_user: Option<&str>,
    ) -> DomainResult<BookingDetails> {
        let txn = self.db.begin().await?;

        let booking = BookingRepository::find_by_id(&txn, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if let Some(user_id) = requesting_user {
            if !booking.is_owned_by(user_id) {
                return Err(DomainError::Forbidden(
                    "You can only cancel your own bookings".to_string(),
                ));
            }
        }

        match booking.status {
            BookingStatus::Cancelled => {
                return Err(DomainError::StateConflict(
                    "Booking is already cancelled".to_string(),
                ));
            }
            BookingStatus::CheckedOut => {
                return Err(DomainError::StateConflict(
                    "Cannot cancel a completed booking".to_string(),
                ));
            }
            BookingStatus::CheckedIn => {
                return Err(DomainError::StateConflict(
                    "Cannot cancel a booking after check-in".to_string(),
                ));
            }
            BookingStatus::PendingPayment | BookingStatus::Confirmed => {}
        }

        let booking =
            BookingRepository::set_status(&txn, booking_id, BookingStatus::Cancelled).await?;
        let details = Self::hydrate(&txn, booking).await?;
        txn.commit().await?;

        info!(booking_id, "Booking cancelled");
        Ok(details)
    }

    /// Staff status update, constrained by the state machine. Terminal
    /// bookings reject every transition, including a rewrite of the same
    /// terminal status.
    pub async fn update_status(
        &self,
        booking_id: i32,
        new_status: BookingStatus,
    ) -> DomainResult<BookingDetails> {
        let txn = self.db.begin().await?;

        let booking = BookingRepository::find_by_id(&txn, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if !booking.status.can_transition_to(new_status) {
            return Err(DomainError::StateConflict(format!(
                "Cannot transition booking from {} to {}",
                booking.status, new_status
            )));
        }

        let booking = BookingRepository::set_status(&txn, booking_id, new_status).await?;
        let details = Self::hydrate(&txn, booking).await?;
        txn.commit().await?;

        info!(booking_id, status = %details.booking.status, "Booking status updated");
        Ok(details)
    }

    pub async fn get_booking(&self, booking_id: i32) -> DomainResult<BookingDetails> {
        let booking = BookingRepository::find_by_id(&self.db, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;
        Self::hydrate(&self.db, booking).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<BookingDetails>> {
        let bookings = BookingRepository::find_all(&self.db).await?;
        self.hydrate_many(bookings).await
    }

    pub async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<BookingDetails>> {
        let bookings = BookingRepository::find_by_user(&self.db, user_id).await?;
        self.hydrate_many(bookings).await
    }

    /// The canonical read shape: booking + owner + room snapshots +
    /// payments.
    async fn hydrate<C: ConnectionTrait>(
        conn: &C,
        booking: Booking,
    ) -> DomainResult<BookingDetails> {
        let user = BookingRepository::booking_user(conn, &booking.user_id).await?;
        let rooms = BookingRepository::booked_rooms(conn, booking.id).await?;
        let payments = PaymentRepository::find_by_booking(conn, booking.id).await?;
        Ok(BookingDetails {
            booking,
            user,
            rooms,
            payments,
        })
    }

    async fn hydrate_many(&self, bookings: Vec<Booking>) -> DomainResult<Vec<BookingDetails>> {
        let mut details = Vec::with_capacity(bookings.len());
        for booking in bookings {
            details.push(Self::hydrate(&self.db, booking).await?);
        }
        Ok(details)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::infrastructure::database::testing::{
        connect_memory, seed_category, seed_room, seed_user,
    };

    fn day(offset: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(offset)
    }

    struct Fixture {
        db: DatabaseConnection,
        service: BookingService,
        user: String,
        r1: i32,
        r2: i32,
    }

    /// Two rooms: R1 at 90.00/night (occupancy 2), R2 at 150.00 (occupancy 3)
    async fn fixture() -> Fixture {
        let db = connect_memory().await;
        let standard = seed_category(&db, "Standard", "90.00", 2).await;
        let deluxe = seed_category(&db, "Deluxe", "150.00", 3).await;
        let r1 = seed_room(&db, "101", standard).await;
        let r2 = seed_room(&db, "201", deluxe).await;
        let user = seed_user(&db, "u1").await;
        let service = BookingService::new(db.clone());
        Fixture {
            db,
            service,
            user,
            r1,
            r2,
        }
    }

    fn request(f: &Fixture, check_in: NaiveDate, check_out: NaiveDate, rooms: Vec<i32>) -> CreateBooking {
        CreateBooking {
            user_id: f.user.clone(),
            check_in,
            check_out,
            guest_count: 2,
            room_ids: rooms,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn create_pay_and_reject_overlap() {
        let f = fixture().await;

        // three nights in both rooms: (90 + 150) * 3 = 720.00
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1, f.r2]))
            .await
            .unwrap();
        assert_eq!(details.booking.status, BookingStatus::PendingPayment);
        assert_eq!(details.booking.total_amount.to_string(), "720.00");
        assert_eq!(details.rooms.len(), 2);
        assert!(details.payments.is_empty());
        assert_eq!(details.user.as_ref().unwrap().id, "u1");

        let paid = f
            .service
            .process_payment(details.booking.id, "720.00", "card", None)
            .await
            .unwrap();
        assert_eq!(paid.booking.status, BookingStatus::Confirmed);
        assert_eq!(paid.payments.len(), 1);
        assert_eq!(paid.payments[0].amount.to_string(), "720.00");
        assert!(paid.payments[0].transaction_id.starts_with("TXN-"));

        // overlapping request for R1 must lose
        let err = f
            .service
            .create_booking(request(&f, day(31), day(34), vec![f.r1]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Availability(_)), "{err}");
    }

    #[tokio::test]
    async fn back_to_back_turnover_is_allowed() {
        let f = fixture().await;
        f.service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();

        // new check-in on the existing check-out day is fine
        let next = f
            .service
            .create_booking(request(&f, day(33), day(35), vec![f.r1]))
            .await
            .unwrap();
        assert_eq!(next.booking.status, BookingStatus::PendingPayment);
    }

    #[tokio::test]
    async fn cancelled_bookings_release_their_rooms() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        f.service.cancel_booking(details.booking.id, None).await.unwrap();

        f.service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejects_invalid_dates_and_rooms() {
        let f = fixture().await;

        let err = f
            .service
            .create_booking(request(&f, day(33), day(30), vec![f.r1]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f
            .service
            .create_booking(request(&f, day(-1), day(3), vec![f.r1]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![9999]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_party_larger_than_room_capacity() {
        let f = fixture().await;
        let mut req = request(&f, day(30), day(33), vec![f.r1]);
        req.guest_count = 5; // R1 sleeps 2
        let err = f.service.create_booking(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn payment_requires_the_exact_amount() {
        let f = fixture().await;
        // three nights at 90.00 = 270.00
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        assert_eq!(details.booking.total_amount.to_string(), "270.00");

        for wrong in ["269.99", "270.01", "27.00", "abc"] {
            let err = f
                .service
                .process_payment(details.booking.id, wrong, "card", None)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "amount {wrong}");
        }

        let paid = f
            .service
            .process_payment(details.booking.id, "270.00", "card", Some("GW-1".into()))
            .await
            .unwrap();
        assert_eq!(paid.booking.status, BookingStatus::Confirmed);
        assert_eq!(paid.payments[0].transaction_id, "GW-1");
    }

    #[tokio::test]
    async fn payment_is_only_accepted_while_pending() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        f.service
            .process_payment(details.booking.id, "270.00", "card", None)
            .await
            .unwrap();

        let err = f
            .service
            .process_payment(details.booking.id, "270.00", "card", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));
    }

    #[tokio::test]
    async fn cancel_honours_terminal_states() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        let id = details.booking.id;

        f.service.cancel_booking(id, None).await.unwrap();
        let err = f.service.cancel_booking(id, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Booking is already cancelled");

        // drive a second booking to checked_out, then try to cancel it
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r2]))
            .await
            .unwrap();
        let id = details.booking.id;
        f.service.process_payment(id, "450.00", "cash", None).await.unwrap();
        f.service.update_status(id, BookingStatus::CheckedIn).await.unwrap();
        f.service.update_status(id, BookingStatus::CheckedOut).await.unwrap();

        let err = f.service.cancel_booking(id, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot cancel a completed booking");
    }

    #[tokio::test]
    async fn cancel_after_check_in_is_rejected() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        let id = details.booking.id;
        f.service.process_payment(id, "270.00", "card", None).await.unwrap();
        f.service.update_status(id, BookingStatus::CheckedIn).await.unwrap();

        let err = f.service.cancel_booking(id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));
    }

    #[tokio::test]
    async fn owner_check_blocks_other_users() {
        let f = fixture().await;
        seed_user(&f.db, "u2").await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();

        let err = f
            .service
            .cancel_booking(details.booking.id, Some("u2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // the owner can cancel
        f.service
            .cancel_booking(details.booking.id, Some("u1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn status_updates_follow_the_state_machine() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        let id = details.booking.id;

        // pending_payment cannot jump straight to checked_in
        let err = f
            .service
            .update_status(id, BookingStatus::CheckedIn)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));

        f.service.update_status(id, BookingStatus::Confirmed).await.unwrap();
        f.service.update_status(id, BookingStatus::CheckedIn).await.unwrap();
        let details = f
            .service
            .update_status(id, BookingStatus::CheckedOut)
            .await
            .unwrap();
        assert_eq!(details.booking.status, BookingStatus::CheckedOut);

        // terminal bookings reject everything, the same value included
        let err = f
            .service
            .update_status(id, BookingStatus::CheckedOut)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));
    }

    #[tokio::test]
    async fn failed_snapshot_insert_rolls_the_booking_back() {
        let f = fixture().await;

        // the duplicate room id passes room resolution but violates the
        // unique (booking_id, room_id) index on the snapshot insert,
        // after the booking row was already written
        let err = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1, f.r1]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)), "{err}");

        // nothing may remain visible
        let all = BookingRepository::find_all(&f.db).await.unwrap();
        assert!(all.is_empty());

        // and the room is still bookable
        f.service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rate_snapshots_survive_category_price_changes() {
        let f = fixture().await;
        let details = f
            .service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        assert_eq!(details.booking.total_amount.to_string(), "270.00");

        // raise the category price after booking
        use crate::infrastructure::database::entities::room_category;
        use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
        let cat = room_category::Entity::find()
            .filter(room_category::Column::Name.eq("Standard"))
            .one(&f.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: room_category::ActiveModel = cat.into();
        active.base_price = Set("999.00".to_string());
        active.update(&f.db).await.unwrap();

        let reread = f.service.get_booking(details.booking.id).await.unwrap();
        assert_eq!(reread.rooms[0].nightly_rate.to_string(), "90.00");
        assert_eq!(reread.booking.total_amount.to_string(), "270.00");
    }

    #[tokio::test]
    async fn listings_are_scoped_per_user() {
        let f = fixture().await;
        seed_user(&f.db, "u2").await;
        f.service
            .create_booking(request(&f, day(30), day(33), vec![f.r1]))
            .await
            .unwrap();
        let mut other = request(&f, day(40), day(42), vec![f.r2]);
        other.user_id = "u2".to_string();
        f.service.create_booking(other).await.unwrap();

        assert_eq!(f.service.list_all().await.unwrap().len(), 2);
        assert_eq!(f.service.list_for_user("u1").await.unwrap().len(), 1);
        assert_eq!(f.service.list_for_user("u2").await.unwrap().len(), 1);
        assert!(f.service.list_for_user("u3").await.unwrap().is_empty());
    }
}
