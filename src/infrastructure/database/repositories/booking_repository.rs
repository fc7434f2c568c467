//! SeaORM queries for bookings, their room snapshots and the overlap scan
//!
//! The overlap scan and the booking/booking_room inserts are designed to
//! run on the same open transaction; callers pass the connection
//! explicitly (see `application::services::booking`).

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::{BookedRoom, Booking, BookingStatus, BookingUser, DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, booking_room, room, room_category, user};

/// New-booking parameters; the row is created in `pending_payment`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: Decimal,
    pub guest_count: i32,
    pub special_requests: Option<String>,
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn booking_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "Unknown booking status '{}' for booking {}",
            m.status, m.id
        ))
    })?;
    let total_amount = m.total_amount.parse::<Decimal>().map_err(|_| {
        DomainError::Storage(format!(
            "Invalid total amount '{}' for booking {}",
            m.total_amount, m.id
        ))
    })?;
    Ok(Booking {
        id: m.id,
        user_id: m.user_id,
        check_in: m.check_in,
        check_out: m.check_out,
        total_amount,
        status,
        guest_count: m.guest_count,
        special_requests: m.special_requests,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

// ── BookingRepository ───────────────────────────────────────────

pub struct BookingRepository;

impl BookingRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id).one(conn).await?;
        model.map(booking_to_domain).transpose()
    }

    pub async fn find_all<C: ConnectionTrait>(conn: &C) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(conn)
            .await?;
        models.into_iter().map(booking_to_domain).collect()
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::Id)
            .all(conn)
            .await?;
        models.into_iter().map(booking_to_domain).collect()
    }

    pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewBooking) -> DomainResult<Booking> {
        debug!(
            "Inserting booking for user {} ({} -> {})",
            new.user_id, new.check_in, new.check_out
        );
        let now = Utc::now();
        let model = booking::ActiveModel {
            user_id: Set(new.user_id),
            check_in: Set(new.check_in),
            check_out: Set(new.check_out),
            total_amount: Set(new.total_amount.to_string()),
            status: Set(BookingStatus::PendingPayment.as_str().to_string()),
            guest_count: Set(new.guest_count),
            special_requests: Set(new.special_requests),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        booking_to_domain(model.insert(conn).await?)
    }

    /// Insert the per-room rate snapshots for a freshly created booking.
    /// The unique (booking_id, room_id) index backstops duplicate ids and
    /// fails the surrounding transaction.
    pub async fn insert_booking_rooms<C: ConnectionTrait>(
        conn: &C,
        booking_id: i32,
        rooms: &[(i32, Decimal)],
    ) -> DomainResult<()> {
        debug!("Inserting {} room snapshots for booking {}", rooms.len(), booking_id);
        for (room_id, nightly_rate) in rooms {
            let model = booking_room::ActiveModel {
                booking_id: Set(booking_id),
                room_id: Set(*room_id),
                nightly_rate: Set(nightly_rate.to_string()),
                ..Default::default()
            };
            model.insert(conn).await?;
        }
        Ok(())
    }

    /// Load the rooms of a booking with their rate snapshots and category
    /// names, for the hydrated read shape.
    pub async fn booked_rooms<C: ConnectionTrait>(
        conn: &C,
        booking_id: i32,
    ) -> DomainResult<Vec<BookedRoom>> {
        let pairs = booking_room::Entity::find()
            .filter(booking_room::Column::BookingId.eq(booking_id))
            .find_also_related(room::Entity)
            .all(conn)
            .await?;

        let category_ids: Vec<i32> = pairs
            .iter()
            .filter_map(|(_, r)| r.as_ref().map(|r| r.category_id))
            .collect();
        let categories: HashMap<i32, String> = room_category::Entity::find()
            .filter(room_category::Column::Id.is_in(category_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut rooms = Vec::with_capacity(pairs.len());
        for (link, maybe_room) in pairs {
            let room = maybe_room.ok_or_else(|| {
                DomainError::Storage(format!(
                    "Booking {} references a missing room {}",
                    booking_id, link.room_id
                ))
            })?;
            let nightly_rate = link.nightly_rate.parse::<Decimal>().map_err(|_| {
                DomainError::Storage(format!(
                    "Invalid nightly rate '{}' for booking {}",
                    link.nightly_rate, booking_id
                ))
            })?;
            rooms.push(BookedRoom {
                room_id: room.id,
                room_number: room.room_number,
                category_name: categories
                    .get(&room.category_id)
                    .cloned()
                    .unwrap_or_default(),
                nightly_rate,
            });
        }
        Ok(rooms)
    }

    /// Owning user for the hydrated read shape.
    pub async fn booking_user<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> DomainResult<Option<BookingUser>> {
        let model = user::Entity::find_by_id(user_id).one(conn).await?;
        Ok(model.map(|u| BookingUser {
            id: u.id,
            username: u.username,
            email: u.email,
        }))
    }

    pub async fn set_status<C: ConnectionTrait>(
        conn: &C,
        booking_id: i32,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        debug!("Booking {} -> {}", booking_id, status);
        let existing = booking::Entity::find_by_id(booking_id)
            .one(conn)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        booking_to_domain(active.update(conn).await?)
    }

    /// The availability overlap scan: which of `room_ids` belong to a
    /// booking in an occupying status whose `[check_in, check_out)` range
    /// intersects the requested one. Back-to-back stays (existing
    /// check-out equal to the new check-in) do not conflict.
    pub async fn conflicting_room_ids<C: ConnectionTrait>(
        conn: &C,
        room_ids: &[i32],
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<HashSet<i32>> {
        let occupying: Vec<&str> = [
            BookingStatus::PendingPayment,
            BookingStatus::Confirmed,
            BookingStatus::CheckedIn,
        ]
        .iter()
        .map(|s| s.as_str())
        .collect();

        let links = booking_room::Entity::find()
            .filter(booking_room::Column::RoomId.is_in(room_ids.iter().copied()))
            .join(JoinType::InnerJoin, booking_room::Relation::Booking.def())
            .filter(booking::Column::Status.is_in(occupying))
            .filter(booking::Column::CheckOut.gt(check_in))
            .filter(booking::Column::CheckIn.lt(check_out))
            .all(conn)
            .await?;

        Ok(links.into_iter().map(|l| l.room_id).collect())
    }
}
