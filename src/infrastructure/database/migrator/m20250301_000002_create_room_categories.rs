//! Create room_categories table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RoomCategories::Description).string())
                    .col(
                        ColumnDef::new(RoomCategories::BasePrice)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::MaxOccupancy)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::Amenities)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::Images)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomCategories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomCategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomCategories {
    Table,
    Id,
    Name,
    Description,
    BasePrice,
    MaxOccupancy,
    Amenities,
    Images,
    CreatedAt,
    UpdatedAt,
}
