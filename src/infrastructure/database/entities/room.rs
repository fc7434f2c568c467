//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub room_number: String,

    pub category_id: i32,

    /// Housekeeping status: available, booked, cleaning, out_of_service
    pub status: String,

    pub floor: i32,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_category::Entity",
        from = "Column::CategoryId",
        to = "super::room_category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::booking_room::Entity")]
    BookingRooms,
}

impl Related<super::room_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::booking_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingRooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
