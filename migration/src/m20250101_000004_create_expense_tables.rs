use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_activity_tables::Activity;
use crate::m20250101_000003_create_task_table::Task;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Expense {
    Table,
    Id,
    TaskId,
    ActivityId,
    Description,
    Amount,
    PaidBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExpenseShare {
    Table,
    Id,
    ExpenseId,
    UserId,
    Percentage,
    Amount,
    IsPaid,
    PaidAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Expense::Table)
                .if_not_exists()
                .col(ColumnDef::new(Expense::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Expense::TaskId).uuid().not_null())
                .col(ColumnDef::new(Expense::ActivityId).uuid().not_null())
                .col(ColumnDef::new(Expense::Description).string().not_null())
                .col(ColumnDef::new(Expense::Amount).double().not_null())
                .col(ColumnDef::new(Expense::PaidBy).uuid().not_null())
                .col(ColumnDef::new(Expense::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_expense_task")
                        .from(Expense::Table, Expense::TaskId)
                        .to(Task::Table, Task::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_expense_activity")
                        .from(Expense::Table, Expense::ActivityId)
                        .to(Activity::Table, Activity::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_expense_paid_by")
                        .from(Expense::Table, Expense::PaidBy)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_expense_task")
                .table(Expense::Table)
                .col(Expense::TaskId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_expense_activity")
                .table(Expense::Table)
                .col(Expense::ActivityId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(ExpenseShare::Table)
                .if_not_exists()
                .col(ColumnDef::new(ExpenseShare::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(ExpenseShare::ExpenseId).uuid().not_null())
                .col(ColumnDef::new(ExpenseShare::UserId).uuid().not_null())
                .col(ColumnDef::new(ExpenseShare::Percentage).double().not_null())
                .col(ColumnDef::new(ExpenseShare::Amount).double().not_null())
                .col(ColumnDef::new(ExpenseShare::IsPaid).boolean().not_null().default(false))
                .col(ColumnDef::new(ExpenseShare::PaidAt).timestamp_with_time_zone().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_expense_share_expense")
                        .from(ExpenseShare::Table, ExpenseShare::ExpenseId)
                        .to(Expense::Table, Expense::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_expense_share_user")
                        .from(ExpenseShare::Table, ExpenseShare::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_expense_share_expense_user")
                .table(ExpenseShare::Table)
                .col(ExpenseShare::ExpenseId)
                .col(ExpenseShare::UserId)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(ExpenseShare::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Expense::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
