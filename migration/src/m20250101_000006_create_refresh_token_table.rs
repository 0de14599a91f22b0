use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum RefreshToken {
    Table,
    Id,
    UserId,
    TokenHash,
    ExpiresAt,
    Revoked,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(RefreshToken::Table)
                .if_not_exists()
                .col(ColumnDef::new(RefreshToken::Id).string_len(32).not_null().primary_key())
                .col(ColumnDef::new(RefreshToken::UserId).uuid().not_null())
                .col(ColumnDef::new(RefreshToken::TokenHash).string().not_null())
                .col(ColumnDef::new(RefreshToken::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(RefreshToken::Revoked).boolean().not_null().default(false))
                .col(ColumnDef::new(RefreshToken::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_refresh_token_user")
                        .from(RefreshToken::Table, RefreshToken::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_refresh_token_user")
                .table(RefreshToken::Table)
                .col(RefreshToken::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(RefreshToken::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
