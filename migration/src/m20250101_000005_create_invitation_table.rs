use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_activity_tables::Activity;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Invitation {
    Table,
    Id,
    ActivityId,
    InvitedUserId,
    InvitedBy,
    Status,
    ExpiresAt,
    CreatedAt,
    RespondedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Invitation::Table)
                .if_not_exists()
                .col(ColumnDef::new(Invitation::Id).string_len(32).not_null().primary_key())
                .col(ColumnDef::new(Invitation::ActivityId).uuid().not_null())
                .col(ColumnDef::new(Invitation::InvitedUserId).uuid().not_null())
                .col(ColumnDef::new(Invitation::InvitedBy).uuid().not_null())
                .col(ColumnDef::new(Invitation::Status).string_len(16).not_null().default("pending"))
                .col(ColumnDef::new(Invitation::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Invitation::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Invitation::RespondedAt).timestamp_with_time_zone().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitation_activity")
                        .from(Invitation::Table, Invitation::ActivityId)
                        .to(Activity::Table, Activity::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitation_invited_user")
                        .from(Invitation::Table, Invitation::InvitedUserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitation_invited_by")
                        .from(Invitation::Table, Invitation::InvitedBy)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_invitation_activity_user")
                .table(Invitation::Table)
                .col(Invitation::ActivityId)
                .col(Invitation::InvitedUserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invitation::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
