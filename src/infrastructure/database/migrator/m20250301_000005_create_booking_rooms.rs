//! Create booking_rooms table
//!
//! Join rows between bookings and rooms with the nightly-rate snapshot.
//! The (booking, room) pair is unique; a room appears at most once per
//! booking.

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_rooms::Rooms;
use super::m20250301_000004_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingRooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookingRooms::BookingId).integer().not_null())
                    .col(ColumnDef::new(BookingRooms::RoomId).integer().not_null())
                    .col(
                        ColumnDef::new(BookingRooms::NightlyRate)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_rooms_booking")
                            .from(BookingRooms::Table, BookingRooms::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_rooms_room")
                            .from(BookingRooms::Table, BookingRooms::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_rooms_unique_pair")
                    .table(BookingRooms::Table)
                    .col(BookingRooms::BookingId)
                    .col(BookingRooms::RoomId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_rooms_room")
                    .table(BookingRooms::Table)
                    .col(BookingRooms::RoomId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingRooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingRooms {
    Table,
    Id,
    BookingId,
    RoomId,
    NightlyRate,
}
