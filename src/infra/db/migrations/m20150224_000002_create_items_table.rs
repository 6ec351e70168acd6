//! Migration: Create items table.

use sea_orm_migration::prelude::*;

use super::m20150224_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::UserId).uuid().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Description).text().not_null())
                    .col(ColumnDef::new(Items::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(Items::Condition).string().not_null())
                    .col(ColumnDef::new(Items::SoldOn).date().null())
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Items::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_user_id")
                            .from(Items::Table, Items::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_user_id")
                    .table(Items::Table)
                    .col(Items::UserId)
                    .to_owned(),
            )
            .await?;

        // Listing scopes filter on sold_on and sort on created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_items_sold_on")
                    .table(Items::Table)
                    .col(Items::SoldOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_created_at")
                    .table(Items::Table)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Items {
    Table,
    Id,
    UserId,
    Name,
    Description,
    PriceCents,
    Condition,
    SoldOn,
    CreatedAt,
    UpdatedAt,
}
