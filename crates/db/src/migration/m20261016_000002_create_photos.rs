//! Creates the photos table.
//!
//! Photos keep their owner: deleting a user with photos is rejected.

use sea_orm_migration::prelude::*;

use super::m20261016_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Photos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Photos::Name).text().not_null())
                    .col(ColumnDef::new(Photos::Cid).string_len(128).not_null())
                    .col(ColumnDef::new(Photos::Size).big_integer().not_null())
                    .col(ColumnDef::new(Photos::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Photos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_user")
                            .from(Photos::Table, Photos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_cid")
                    .table(Photos::Table)
                    .col(Photos::Cid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_user")
                    .table(Photos::Table)
                    .col(Photos::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
    Name,
    Cid,
    Size,
    UserId,
    CreatedAt,
}
