use chrono::Utc;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Invitation {
    Table,
    ActivityId,
    InvitedUserId,
    Status,
    ExpiresAt,
    RespondedAt,
}

const PENDING_INDEX: &str = "uk_invitation_pending";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // stale pending rows would otherwise collide with a fresh invite for the same pair
        let now = Utc::now();
        m.exec_stmt(
            Query::update()
                .table(Invitation::Table)
                .value(Invitation::Status, "expired")
                .value(Invitation::RespondedAt, now)
                .and_where(Expr::col(Invitation::Status).eq("pending"))
                .and_where(Expr::col(Invitation::ExpiresAt).lte(now))
                .to_owned(),
        ).await?;

        // at most one pending invitation per (activity, user)
        m.create_index(
            Index::create()
                .name(PENDING_INDEX)
                .table(Invitation::Table)
                .col(Invitation::ActivityId)
                .col(Invitation::InvitedUserId)
                .unique()
                .and_where(Expr::col(Invitation::Status).eq("pending"))
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_index(Index::drop().name(PENDING_INDEX).table(Invitation::Table).to_owned()).await?;
        Ok(())
    }
}
