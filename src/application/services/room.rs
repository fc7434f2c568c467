//! Room and category administration
//!
//! Two rules the booking core depends on live here: room numbers are
//! unique, and a room with booking history is never deleted (the rate
//! snapshots referencing it must stay resolvable).

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::domain::{DomainError, DomainResult, Room, RoomCategory, RoomWithCategory};
use crate::infrastructure::database::repositories::{
    CategoryPatch, CategoryRepository, NewCategory, NewRoom, RoomPatch, RoomRepository,
};

pub struct RoomService {
    db: DatabaseConnection,
}

impl RoomService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ── Rooms ───────────────────────────────────────────────────

    pub async fn get_room(&self, id: i32) -> DomainResult<RoomWithCategory> {
        RoomRepository::find_with_category(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", id))
    }

    /// All rooms, optionally narrowed to one category.
    pub async fn list_rooms(&self, category_id: Option<i32>) -> DomainResult<Vec<RoomWithCategory>> {
        let rooms = RoomRepository::find_all_with_category(&self.db).await?;
        Ok(match category_id {
            Some(category_id) => rooms
                .into_iter()
                .filter(|rc| rc.room.category_id == category_id)
                .collect(),
            None => rooms,
        })
    }

    pub async fn create_room(&self, new: NewRoom) -> DomainResult<Room> {
        let txn = self.db.begin().await?;

        if CategoryRepository::find_by_id(&txn, new.category_id).await?.is_none() {
            return Err(DomainError::not_found("RoomCategory", "id", new.category_id));
        }
        if RoomRepository::find_by_number(&txn, &new.room_number).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Room number '{}' already exists",
                new.room_number
            )));
        }

        let room = RoomRepository::insert(&txn, new).await?;
        txn.commit().await?;

        info!(room_id = room.id, room_number = %room.room_number, "Room created");
        Ok(room)
    }

    pub async fn update_room(&self, id: i32, patch: RoomPatch) -> DomainResult<Room> {
        let txn = self.db.begin().await?;

        if let Some(room_number) = &patch.room_number {
            if let Some(existing) = RoomRepository::find_by_number(&txn, room_number).await? {
                if existing.id != id {
                    return Err(DomainError::Conflict(format!(
                        "Room number '{}' already exists",
                        room_number
                    )));
                }
            }
        }
        if let Some(category_id) = patch.category_id {
            if CategoryRepository::find_by_id(&txn, category_id).await?.is_none() {
                return Err(DomainError::not_found("RoomCategory", "id", category_id));
            }
        }

        let room = RoomRepository::update(&txn, id, patch).await?;
        txn.commit().await?;

        info!(room_id = room.id, "Room updated");
        Ok(room)
    }

    /// Delete a room. Rejected while any booking references it: booking
    /// history must never be orphaned.
    pub async fn delete_room(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        let room = RoomRepository::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", id))?;

        let history = RoomRepository::booking_history_count(&txn, id).await?;
        if history > 0 {
            return Err(DomainError::Conflict(format!(
                "Room '{}' has booking history and cannot be deleted",
                room.room_number
            )));
        }

        RoomRepository::delete(&txn, id).await?;
        txn.commit().await?;

        info!(room_id = id, room_number = %room.room_number, "Room deleted");
        Ok(())
    }

    // ── Categories ──────────────────────────────────────────────

    pub async fn get_category(&self, id: i32) -> DomainResult<RoomCategory> {
        CategoryRepository::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("RoomCategory", "id", id))
    }

    pub async fn list_categories(&self) -> DomainResult<Vec<RoomCategory>> {
        CategoryRepository::find_all(&self.db).await
    }

    pub async fn create_category(&self, new: NewCategory) -> DomainResult<RoomCategory> {
        Self::validate_price(&new.base_price)?;
        Self::validate_occupancy(new.max_occupancy)?;

        let txn = self.db.begin().await?;
        if CategoryRepository::find_by_name(&txn, &new.name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Category '{}' already exists",
                new.name
            )));
        }
        let category = CategoryRepository::insert(&txn, new).await?;
        txn.commit().await?;

        info!(category_id = category.id, name = %category.name, "Room category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i32, patch: CategoryPatch) -> DomainResult<RoomCategory> {
        if let Some(base_price) = &patch.base_price {
            Self::validate_price(base_price)?;
        }
        if let Some(max_occupancy) = patch.max_occupancy {
            Self::validate_occupancy(max_occupancy)?;
        }

        let txn = self.db.begin().await?;
        if let Some(name) = &patch.name {
            if let Some(existing) = CategoryRepository::find_by_name(&txn, name).await? {
                if existing.id != id {
                    return Err(DomainError::Conflict(format!(
                        "Category '{}' already exists",
                        name
                    )));
                }
            }
        }
        let category = CategoryRepository::update(&txn, id, patch).await?;
        txn.commit().await?;

        info!(category_id = category.id, "Room category updated");
        Ok(category)
    }

    fn validate_price(base_price: &Decimal) -> DomainResult<()> {
        if base_price.is_sign_negative() {
            return Err(DomainError::Validation(
                "base_price cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_occupancy(max_occupancy: i32) -> DomainResult<()> {
        if max_occupancy < 1 {
            return Err(DomainError::Validation(
                "max_occupancy must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::application::services::booking::{BookingService, CreateBooking};
    use crate::domain::RoomStatus;
    use crate::infrastructure::database::testing::{
        connect_memory, seed_category, seed_room, seed_user,
    };

    fn new_room(number: &str, category_id: i32) -> NewRoom {
        NewRoom {
            room_number: number.to_string(),
            category_id,
            status: RoomStatus::Available,
            floor: 1,
            notes: None,
        }
    }

    #[tokio::test]
    async fn room_numbers_are_unique() {
        let db = connect_memory().await;
        let cat = seed_category(&db, "Standard", "90.00", 2).await;
        let service = RoomService::new(db);

        service.create_room(new_room("101", cat)).await.unwrap();
        let err = service.create_room(new_room("101", cat)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_requires_an_existing_category() {
        let db = connect_memory().await;
        let service = RoomService::new(db);
        let err = service.create_room(new_room("101", 42)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_rejects_stealing_another_rooms_number() {
        let db = connect_memory().await;
        let cat = seed_category(&db, "Standard", "90.00", 2).await;
        let service = RoomService::new(db);

        let a = service.create_room(new_room("101", cat)).await.unwrap();
        service.create_room(new_room("102", cat)).await.unwrap();

        let err = service
            .update_room(
                a.id,
                RoomPatch {
                    room_number: Some("102".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // writing its own number back is a no-op, not a conflict
        let same = service
            .update_room(
                a.id,
                RoomPatch {
                    room_number: Some("101".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.room_number, "101");
    }

    #[tokio::test]
    async fn delete_is_blocked_by_booking_history() {
        let db = connect_memory().await;
        let cat = seed_category(&db, "Standard", "90.00", 2).await;
        let r1 = seed_room(&db, "101", cat).await;
        let r2 = seed_room(&db, "102", cat).await;
        let user = seed_user(&db, "u1").await;

        let bookings = BookingService::new(db.clone());
        let today = Utc::now().date_naive();
        bookings
            .create_booking(CreateBooking {
                user_id: user,
                check_in: today + Duration::days(10),
                check_out: today + Duration::days(12),
                guest_count: 1,
                room_ids: vec![r1],
                special_requests: None,
            })
            .await
            .unwrap();

        let service = RoomService::new(db);
        let err = service.delete_room(r1).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // a room without history deletes fine
        service.delete_room(r2).await.unwrap();
        let err = service.get_room(r2).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn category_validation() {
        let db = connect_memory().await;
        let service = RoomService::new(db);

        let err = service
            .create_category(NewCategory {
                name: "Broken".into(),
                description: None,
                base_price: "-1.00".parse().unwrap(),
                max_occupancy: 2,
                amenities: vec![],
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let created = service
            .create_category(NewCategory {
                name: "Suite".into(),
                description: Some("Top floor".into()),
                base_price: "250.00".parse().unwrap(),
                max_occupancy: 4,
                amenities: vec!["wifi".into(), "minibar".into()],
                images: vec![],
            })
            .await
            .unwrap();
        assert_eq!(created.base_price.to_string(), "250.00");
        assert_eq!(created.amenities.len(), 2);

        let err = service
            .create_category(NewCategory {
                name: "Suite".into(),
                description: None,
                base_price: "99.00".parse().unwrap(),
                max_occupancy: 2,
                amenities: vec![],
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
