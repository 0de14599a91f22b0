use crate::db::activity::insert_membership;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::token;
use chrono::{DateTime, Utc};
use entity::activity::Entity as Activity;
use entity::activity_user::Entity as Membership;
use entity::invitation::{
    ActiveModel as InviteActive, Column, Entity as Invite, InvitationStatus, Model as InviteModel,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

const INVITE_CODE_LEN: usize = 16;

impl DatabaseService {
    pub async fn create_invitation(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        invited_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<InviteModel, AppError> {
        // Validate related records so we can send domain errors instead of 500s
        self.get_activity(activity_id).await?;
        self.get_user_by_id(&user_id).await?;

        if self.get_membership(activity_id, user_id).await?.is_some() {
            return Err(AppError::Conflict("User is already a participant".into()));
        }

        let now = Utc::now();
        self.expire_stale_invitations(activity_id, user_id, now).await?;
        if self.has_open_invitation(activity_id, user_id).await? {
            return Err(AppError::AlreadyExists);
        }

        let result = InviteActive {
            id: Set(token::new_nanoid(INVITE_CODE_LEN)),
            activity_id: Set(activity_id),
            invited_user_id: Set(user_id),
            invited_by: Set(invited_by),
            status: Set(InvitationStatus::Pending),
            expires_at: Set(expires_at),
            created_at: Set(now),
            responded_at: Set(None),
        }
        .insert(&self.database_connection)
        .await;

        match result {
            Ok(invite) => Ok(invite),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(AppError::BadRequest("Related record missing".to_string()))
                }
                _ => Err(err.into()),
            },
        }
    }

    pub async fn get_invitation(&self, id: &str) -> Result<InviteModel, AppError> {
        Ok(Invite::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or(DbErr::RecordNotFound("Invitation not found".into()))?)
    }

    /// The user's pending, unexpired invitations together with the activity name.
    pub async fn list_open_invitations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(InviteModel, String)>, AppError> {
        let rows = Invite::find()
            .filter(Column::InvitedUserId.eq(user_id))
            .filter(Column::Status.eq(InvitationStatus::Pending))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .order_by_desc(Column::CreatedAt)
            .find_also_related(Activity)
            .all(&self.database_connection)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(invite, activity)| activity.map(|a| (invite, a.name)))
            .collect())
    }

    pub async fn list_open_invitations_for_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<InviteModel>, AppError> {
        Ok(Invite::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::Status.eq(InvitationStatus::Pending))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn has_open_invitation(&self, activity_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(Invite::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::InvitedUserId.eq(user_id))
            .filter(Column::Status.eq(InvitationStatus::Pending))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// Moves lapsed pending invitations for the pair to `expired` so the pending-unique index
    /// admits a new one.
    async fn expire_stale_invitations(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let res = Invite::update_many()
            .col_expr(Column::Status, Expr::value(InvitationStatus::Expired))
            .col_expr(Column::RespondedAt, Expr::value(now))
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::InvitedUserId.eq(user_id))
            .filter(Column::Status.eq(InvitationStatus::Pending))
            .filter(Column::ExpiresAt.lte(now))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }

    /// Marks the invitation accepted and creates the membership in the same transaction.
    pub async fn accept_invitation(&self, invite_id: &str, user_id: Uuid) -> Result<InviteModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let inv = Invite::find_by_id(invite_id.to_string())
            .one(&txn)
            .await?
            .ok_or(DbErr::RecordNotFound("Invitation not found".into()))?;

        if let Err(err) = check_respondable(&inv, user_id) {
            txn.rollback().await?;
            return Err(err);
        }

        let now = Utc::now();
        let activity_id = inv.activity_id;
        let mut am: InviteActive = inv.into();
        am.status = Set(InvitationStatus::Accepted);
        am.responded_at = Set(Some(now));
        let accepted = am.update(&txn).await?;

        let already_member = Membership::find_by_id((activity_id, user_id))
            .one(&txn)
            .await?
            .is_some();
        if !already_member {
            insert_membership(&txn, activity_id, user_id, false).await?;
        }

        txn.commit().await?;
        info!("user {} joined activity {} via invitation {}", user_id, activity_id, invite_id);
        Ok(accepted)
    }

    pub async fn reject_invitation(&self, invite_id: &str, user_id: Uuid) -> Result<InviteModel, AppError> {
        let inv = self.get_invitation(invite_id).await?;
        check_respondable(&inv, user_id)?;

        let mut am: InviteActive = inv.into();
        am.status = Set(InvitationStatus::Rejected);
        am.responded_at = Set(Some(Utc::now()));
        Ok(am.update(&self.database_connection).await?)
    }

    /// Withdraws a pending invitation. The row is kept as `cancelled`.
    pub async fn cancel_invitation(&self, invite: InviteModel) -> Result<(), AppError> {
        if invite.status != InvitationStatus::Pending {
            return Err(AppError::Conflict("Invitation is no longer pending".into()));
        }
        let mut am: InviteActive = invite.into();
        am.status = Set(InvitationStatus::Cancelled);
        am.responded_at = Set(Some(Utc::now()));
        am.update(&self.database_connection).await?;
        Ok(())
    }
}

/// Only the invitee may answer, and only while the invitation is pending and unexpired.
fn check_respondable(inv: &InviteModel, user_id: Uuid) -> Result<(), AppError> {
    if inv.invited_user_id != user_id {
        return Err(AppError::Forbidden);
    }
    if inv.status != InvitationStatus::Pending {
        return Err(AppError::Conflict("Invitation is no longer pending".into()));
    }
    if !inv.is_open(Utc::now()) {
        return Err(AppError::Conflict("Invitation has expired".into()));
    }
    Ok(())
}
