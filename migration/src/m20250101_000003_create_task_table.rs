use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_activity_tables::Activity;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum Task {
    Table,
    Id,
    ActivityId,
    Title,
    Description,
    Status,
    Priority,
    AssignedTo,
    DueDate,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Task::Table)
                .if_not_exists()
                .col(ColumnDef::new(Task::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Task::ActivityId).uuid().not_null())
                .col(ColumnDef::new(Task::Title).string().not_null())
                .col(ColumnDef::new(Task::Description).text().null())
                .col(ColumnDef::new(Task::Status).string_len(16).not_null().default("todo"))
                .col(ColumnDef::new(Task::Priority).string_len(16).not_null().default("medium"))
                .col(ColumnDef::new(Task::AssignedTo).uuid().null())
                .col(ColumnDef::new(Task::DueDate).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Task::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Task::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Task::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_task_activity")
                        .from(Task::Table, Task::ActivityId)
                        .to(Activity::Table, Activity::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_task_assigned_to")
                        .from(Task::Table, Task::AssignedTo)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_task_created_by")
                        .from(Task::Table, Task::CreatedBy)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_task_activity")
                .table(Task::Table)
                .col(Task::ActivityId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Task::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
