//! SeaORM queries for rooms and room categories
//!
//! Every method takes the connection explicitly so callers decide whether
//! a query runs on the pool or inside an open transaction.

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, Room, RoomCategory, RoomStatus, RoomWithCategory};
use crate::infrastructure::database::entities::{booking_room, room, room_category};

/// New-room parameters; id and timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub room_number: String,
    pub category_id: i32,
    pub status: RoomStatus,
    pub floor: i32,
    pub notes: Option<String>,
}

/// Partial room update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub room_number: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<RoomStatus>,
    pub floor: Option<i32>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub max_occupancy: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub base_price: Option<Decimal>,
    pub max_occupancy: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn room_to_domain(m: room::Model) -> DomainResult<Room> {
    let status = RoomStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("Unknown room status '{}' for room {}", m.status, m.id))
    })?;
    Ok(Room {
        id: m.id,
        room_number: m.room_number,
        category_id: m.category_id,
        status,
        floor: m.floor,
        notes: m.notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

pub(crate) fn category_to_domain(m: room_category::Model) -> DomainResult<RoomCategory> {
    let base_price = m.base_price.parse::<Decimal>().map_err(|_| {
        DomainError::Storage(format!(
            "Invalid base price '{}' for category {}",
            m.base_price, m.id
        ))
    })?;
    Ok(RoomCategory {
        id: m.id,
        name: m.name,
        description: m.description,
        base_price,
        max_occupancy: m.max_occupancy,
        amenities: serde_json::from_str(&m.amenities).unwrap_or_default(),
        images: serde_json::from_str(&m.images).unwrap_or_default(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn pair_to_domain(
    room: room::Model,
    category: Option<room_category::Model>,
) -> DomainResult<RoomWithCategory> {
    let category = category.ok_or_else(|| {
        DomainError::Storage(format!("Room {} references a missing category", room.id))
    })?;
    Ok(RoomWithCategory {
        room: room_to_domain(room)?,
        category: category_to_domain(category)?,
    })
}

// ── Rooms ───────────────────────────────────────────────────────

pub struct RoomRepository;

impl RoomRepository {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id).one(conn).await?;
        model.map(room_to_domain).transpose()
    }

    pub async fn find_with_category<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> DomainResult<Option<RoomWithCategory>> {
        let pair = room::Entity::find_by_id(id)
            .find_also_related(room_category::Entity)
            .one(conn)
            .await?;
        pair.map(|(r, c)| pair_to_domain(r, c)).transpose()
    }

    pub async fn find_by_number<C: ConnectionTrait>(
        conn: &C,
        room_number: &str,
    ) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(conn)
            .await?;
        model.map(room_to_domain).transpose()
    }

    pub async fn find_all_with_category<C: ConnectionTrait>(
        conn: &C,
    ) -> DomainResult<Vec<RoomWithCategory>> {
        let pairs = room::Entity::find()
            .find_also_related(room_category::Entity)
            .order_by_asc(room::Column::RoomNumber)
            .all(conn)
            .await?;
        pairs
            .into_iter()
            .map(|(r, c)| pair_to_domain(r, c))
            .collect()
    }

    /// Load the requested rooms with their categories. The caller checks
    /// the result length against the request to detect unknown ids.
    pub async fn find_many_with_category<C: ConnectionTrait>(
        conn: &C,
        ids: &[i32],
    ) -> DomainResult<Vec<RoomWithCategory>> {
        let pairs = room::Entity::find()
            .filter(room::Column::Id.is_in(ids.iter().copied()))
            .find_also_related(room_category::Entity)
            .all(conn)
            .await?;
        pairs
            .into_iter()
            .map(|(r, c)| pair_to_domain(r, c))
            .collect()
    }

    pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewRoom) -> DomainResult<Room> {
        debug!("Inserting room {}", new.room_number);
        let now = Utc::now();
        let model = room::ActiveModel {
            room_number: Set(new.room_number),
            category_id: Set(new.category_id),
            status: Set(new.status.as_str().to_string()),
            floor: Set(new.floor),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        room_to_domain(model.insert(conn).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: RoomPatch,
    ) -> DomainResult<Room> {
        debug!("Updating room {}", id);
        let existing = room::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", id))?;

        let mut active: room::ActiveModel = existing.into();
        if let Some(room_number) = patch.room_number {
            active.room_number = Set(room_number);
        }
        if let Some(category_id) = patch.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(floor) = patch.floor {
            active.floor = Set(floor);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now());
        room_to_domain(active.update(conn).await?)
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<()> {
        debug!("Deleting room {}", id);
        room::Entity::delete_by_id(id).exec(conn).await?;
        Ok(())
    }

    /// How many booking_rooms rows reference this room. Non-zero means
    /// the room carries history and must not be deleted.
    pub async fn booking_history_count<C: ConnectionTrait>(
        conn: &C,
        room_id: i32,
    ) -> DomainResult<u64> {
        let count = booking_room::Entity::find()
            .filter(booking_room::Column::RoomId.eq(room_id))
            .count(conn)
            .await?;
        Ok(count)
    }
}

// ── Categories ──────────────────────────────────────────────────

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> DomainResult<Option<RoomCategory>> {
        let model = room_category::Entity::find_by_id(id).one(conn).await?;
        model.map(category_to_domain).transpose()
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> DomainResult<Option<RoomCategory>> {
        let model = room_category::Entity::find()
            .filter(room_category::Column::Name.eq(name))
            .one(conn)
            .await?;
        model.map(category_to_domain).transpose()
    }

    pub async fn find_all<C: ConnectionTrait>(conn: &C) -> DomainResult<Vec<RoomCategory>> {
        let models = room_category::Entity::find()
            .order_by_asc(room_category::Column::Name)
            .all(conn)
            .await?;
        models.into_iter().map(category_to_domain).collect()
    }

    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        new: NewCategory,
    ) -> DomainResult<RoomCategory> {
        debug!("Inserting room category {}", new.name);
        let now = Utc::now();
        let model = room_category::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            base_price: Set(new.base_price.to_string()),
            max_occupancy: Set(new.max_occupancy),
            amenities: Set(serde_json::to_string(&new.amenities).unwrap_or_else(|_| "[]".into())),
            images: Set(serde_json::to_string(&new.images).unwrap_or_else(|_| "[]".into())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        category_to_domain(model.insert(conn).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: CategoryPatch,
    ) -> DomainResult<RoomCategory> {
        debug!("Updating room category {}", id);
        let existing = room_category::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| DomainError::not_found("RoomCategory", "id", id))?;

        let mut active: room_category::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(base_price) = patch.base_price {
            active.base_price = Set(base_price.to_string());
        }
        if let Some(max_occupancy) = patch.max_occupancy {
            active.max_occupancy = Set(max_occupancy);
        }
        if let Some(amenities) = patch.amenities {
            active.amenities =
                Set(serde_json::to_string(&amenities).unwrap_or_else(|_| "[]".into()));
        }
        if let Some(images) = patch.images {
            active.images = Set(serde_json::to_string(&images).unwrap_or_else(|_| "[]".into()));
        }
        active.updated_at = Set(Utc::now());
        category_to_domain(active.update(conn).await?)
    }
}
