//! Room availability
//!
//! Date ranges are half-open `[check_in, check_out)`: an existing booking
//! whose check-out equals a new check-in does not conflict, so same-day
//! turnover between guests is allowed.

use std::collections::HashSet;

use chrono::NaiveDate;
use sea_orm::ConnectionTrait;

use crate::domain::{DomainError, DomainResult, RoomStatus, RoomWithCategory};
use crate::infrastructure::database::repositories::{BookingRepository, RoomRepository};

/// Which of `room_ids` are already reserved for a range overlapping
/// `[check_in, check_out)`. Only bookings in an occupying status
/// (pending_payment, confirmed, checked_in) count.
///
/// Callers creating a booking must run this on the same transaction that
/// inserts the booking, otherwise two concurrent requests can both see
/// "no conflict".
pub async fn find_conflicts<C: ConnectionTrait>(
    conn: &C,
    room_ids: &[i32],
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> DomainResult<HashSet<i32>> {
    BookingRepository::conflicting_room_ids(conn, room_ids, check_in, check_out).await
}

/// The public availability search: every room that is in service, large
/// enough for the party, and free for the whole range.
pub async fn search_available<C: ConnectionTrait>(
    conn: &C,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest_count: Option<i32>,
) -> DomainResult<Vec<RoomWithCategory>> {
    if check_out <= check_in {
        return Err(DomainError::Validation(
            "check_out_date must be after check_in_date".to_string(),
        ));
    }

    let candidates: Vec<RoomWithCategory> = RoomRepository::find_all_with_category(conn)
        .await?
        .into_iter()
        .filter(|rc| rc.room.status != RoomStatus::OutOfService)
        .filter(|rc| guest_count.is_none_or(|g| rc.category.max_occupancy >= g))
        .collect();

    let ids: Vec<i32> = candidates.iter().map(|rc| rc.room.id).collect();
    let conflicts = find_conflicts(conn, &ids, check_in, check_out).await?;

    Ok(candidates
        .into_iter()
        .filter(|rc| !conflicts.contains(&rc.room.id))
        .collect())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::application::services::booking::{BookingService, CreateBooking};
    use crate::infrastructure::database::testing::{
        connect_memory, seed_category, seed_room, seed_user,
    };

    fn day(offset: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(offset)
    }

    #[tokio::test]
    async fn rejects_inverted_range() {
        let db = connect_memory().await;
        let err = search_available(&db, day(10), day(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn filters_capacity_and_out_of_service() {
        let db = connect_memory().await;
        let single = seed_category(&db, "Single", "60.00", 1).await;
        let family = seed_category(&db, "Family", "180.00", 4).await;
        seed_room(&db, "101", single).await;
        let r2 = seed_room(&db, "201", family).await;
        let r3 = seed_room(&db, "202", family).await;

        // take one family room out of service
        use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
        use crate::infrastructure::database::entities::room;
        let model = room::Entity::find_by_id(r3).one(&db).await.unwrap().unwrap();
        let mut active: room::ActiveModel = model.into();
        active.status = Set("out_of_service".to_string());
        active.update(&db).await.unwrap();

        let free = search_available(&db, day(5), day(8), Some(3)).await.unwrap();
        let ids: Vec<i32> = free.iter().map(|rc| rc.room.id).collect();
        assert_eq!(ids, vec![r2]);
    }

    #[tokio::test]
    async fn excludes_rooms_with_overlapping_bookings() {
        let db = connect_memory().await;
        let cat = seed_category(&db, "Standard", "90.00", 2).await;
        let r1 = seed_room(&db, "101", cat).await;
        let r2 = seed_room(&db, "102", cat).await;
        let user = seed_user(&db, "u1").await;

        let service = BookingService::new(db.clone());
        service
            .create_booking(CreateBooking {
                user_id: user,
                check_in: day(5),
                check_out: day(8),
                guest_count: 2,
                room_ids: vec![r1],
                special_requests: None,
            })
            .await
            .unwrap();

        let free = search_available(&db, day(6), day(9), None).await.unwrap();
        let ids: Vec<i32> = free.iter().map(|rc| rc.room.id).collect();
        assert_eq!(ids, vec![r2]);

        // back-to-back: the booked room frees up on its check-out day
        let free = search_available(&db, day(8), day(10), None).await.unwrap();
        let ids: Vec<i32> = free.iter().map(|rc| rc.room.id).collect();
        assert_eq!(ids, vec![r1, r2]);
    }
}
