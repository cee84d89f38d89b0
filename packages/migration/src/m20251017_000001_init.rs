use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    Turn,
    Status,
    WinnerPlayerId,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
    Color,
    RoomId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cells {
    Table,
    Id,
    RoomId,
    Row,
    Col,
    Color,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rooms
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Turn).string_len(8).null())
                    .col(
                        ColumnDef::new(Rooms::Status)
                            .string_len(8)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(ColumnDef::new(Rooms::WinnerPlayerId).string_len(64).null())
                    .col(
                        ColumnDef::new(Rooms::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string_len(32).null())
                    .col(ColumnDef::new(Players::Color).string_len(8).null())
                    .col(ColumnDef::new(Players::RoomId).string_len(36).null())
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_room_id")
                            .from(Players::Table, Players::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // a color can be held by at most one player per room; losers of a
        // concurrent pairing race hit this index
        manager
            .create_index(
                Index::create()
                    .name("ux_players_room_color")
                    .table(Players::Table)
                    .col(Players::RoomId)
                    .col(Players::Color)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // cells
        manager
            .create_table(
                Table::create()
                    .table(Cells::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cells::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cells::RoomId).string_len(36).not_null())
                    .col(ColumnDef::new(Cells::Row).small_integer().not_null())
                    .col(ColumnDef::new(Cells::Col).small_integer().not_null())
                    .col(ColumnDef::new(Cells::Color).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Cells::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cells_room_id")
                            .from(Cells::Table, Cells::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_cells_room_row_col")
                    .table(Cells::Table)
                    .col(Cells::RoomId)
                    .col(Cells::Row)
                    .col(Cells::Col)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cells_room_col")
                    .table(Cells::Table)
                    .col(Cells::RoomId)
                    .col(Cells::Col)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_cells_room_col")
                    .table(Cells::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ux_cells_room_row_col")
                    .table(Cells::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Cells::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_players_room_color")
                    .table(Players::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rooms::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
