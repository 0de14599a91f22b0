pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_activity_tables;
mod m20250101_000003_create_task_table;
mod m20250101_000004_create_expense_tables;
mod m20250101_000005_create_invitation_table;
mod m20250101_000006_create_refresh_token_table;
mod m20250101_000007_unique_pending_invitation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_activity_tables::Migration),
            Box::new(m20250101_000003_create_task_table::Migration),
            Box::new(m20250101_000004_create_expense_tables::Migration),
            Box::new(m20250101_000005_create_invitation_table::Migration),
            Box::new(m20250101_000006_create_refresh_token_table::Migration),
            Box::new(m20250101_000007_unique_pending_invitation::Migration),
        ]
    }
}
