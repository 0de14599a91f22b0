use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Activity {
    Table,
    Id,
    Name,
    Description,
    Location,
    StartDate,
    EndDate,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ActivityUser {
    Table,
    ActivityId,
    UserId,
    IsAdmin,
    JoinedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // activities
        m.create_table(
            Table::create()
                .table(Activity::Table)
                .if_not_exists()
                .col(ColumnDef::new(Activity::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Activity::Name).string().not_null())
                .col(ColumnDef::new(Activity::Description).text().null())
                .col(ColumnDef::new(Activity::Location).string().null())
                .col(ColumnDef::new(Activity::StartDate).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Activity::EndDate).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Activity::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Activity::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Activity::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_activity_created_by")
                        .from(Activity::Table, Activity::CreatedBy)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_activity_created_by")
                .table(Activity::Table)
                .col(Activity::CreatedBy)
                .to_owned(),
        ).await?;

        // membership join table, one row per (activity, user)
        m.create_table(
            Table::create()
                .table(ActivityUser::Table)
                .if_not_exists()
                .col(ColumnDef::new(ActivityUser::ActivityId).uuid().not_null())
                .col(ColumnDef::new(ActivityUser::UserId).uuid().not_null())
                .col(ColumnDef::new(ActivityUser::IsAdmin).boolean().not_null().default(false))
                .col(ColumnDef::new(ActivityUser::JoinedAt).timestamp_with_time_zone().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_activity_user")
                        .col(ActivityUser::ActivityId)
                        .col(ActivityUser::UserId)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_activity_user_activity")
                        .from(ActivityUser::Table, ActivityUser::ActivityId)
                        .to(Activity::Table, Activity::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_activity_user_user")
                        .from(ActivityUser::Table, ActivityUser::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_activity_user_user")
                .table(ActivityUser::Table)
                .col(ActivityUser::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(ActivityUser::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Activity::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
