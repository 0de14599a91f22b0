use crate::db::database_service::DatabaseService;
use crate::types::activity::{Access, ActivityAccess, RActivityCreate, RActivityUpdate};
use crate::types::error::AppError;
use crate::utils::token;
use chrono::Utc;
use entity::activity::{ActiveModel as ActivityActive, Entity as Activity, Model as ActivityModel};
use entity::activity_user::{
    ActiveModel as MembershipActive, Entity as Membership, Model as MembershipModel,
};
use entity::task::Entity as Task;
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

impl DatabaseService {
    /// Creates the activity and makes its creator the first admin participant.
    pub async fn create_activity(
        &self,
        creator: Uuid,
        payload: RActivityCreate,
    ) -> Result<ActivityModel, AppError> {
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let activity = ActivityActive {
            id: Set(token::new_id()),
            name: Set(payload.name),
            description: Set(payload.description),
            location: Set(payload.location),
            start_date: Set(payload.start_date),
            end_date: Set(payload.end_date),
            created_by: Set(creator),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        insert_membership(&txn, activity.id, creator, true).await?;

        txn.commit().await?;
        info!("activity {} created by {}", activity.id, creator);
        Ok(activity)
    }

    pub async fn get_activity(&self, id: Uuid) -> Result<ActivityModel, AppError> {
        Ok(Activity::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Activity not found".into()))?)
    }

    pub async fn get_membership(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<MembershipModel>, AppError> {
        Ok(Membership::find_by_id((activity_id, user_id))
            .one(&self.database_connection)
            .await?)
    }

    /// 404 if the activity does not exist, 403 if the caller lacks the requested access.
    pub async fn authorize_activity(
        &self,
        activity_id: Uuid,
        user_id: Uuid,
        access: Access,
    ) -> Result<ActivityAccess, AppError> {
        let activity = self.get_activity(activity_id).await?;
        let membership = self.get_membership(activity_id, user_id).await?;

        let is_creator = activity.created_by == user_id;
        let is_admin = is_creator || membership.as_ref().is_some_and(|m| m.is_admin);
        let allowed = match access {
            Access::Member => is_creator || membership.is_some(),
            Access::Admin => is_admin,
            Access::Creator => is_creator,
        };

        if !allowed {
            return Err(AppError::Forbidden);
        }
        Ok(ActivityAccess { activity, is_admin, is_creator })
    }

    /// Rejects users who are not current participants. Used for assignees, payers and share holders.
    pub async fn ensure_participant(&self, activity_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        match self.get_membership(activity_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::BadRequest(format!(
                "User {user_id} is not a participant of this activity"
            ))),
        }
    }

    pub async fn list_activities_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityModel>, AppError> {
        let member_of: Vec<Uuid> = Membership::find()
            .filter(entity::activity_user::Column::UserId.eq(user_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|m| m.activity_id)
            .collect();

        Ok(Activity::find()
            .filter(
                Condition::any()
                    .add(entity::activity::Column::CreatedBy.eq(user_id))
                    .add(entity::activity::Column::Id.is_in(member_of)),
            )
            .order_by_asc(entity::activity::Column::StartDate)
            .order_by_asc(entity::activity::Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn update_activity(
        &self,
        activity: ActivityModel,
        patch: RActivityUpdate,
    ) -> Result<ActivityModel, AppError> {
        let mut am: ActivityActive = activity.into();

        if let Some(name) = patch.name {
            am.name = Set(name);
        }
        if let Some(description) = patch.description {
            am.description = Set(description);
        }
        if let Some(location) = patch.location {
            am.location = Set(location);
        }
        if let Some(start) = patch.start_date {
            am.start_date = Set(start);
        }
        if let Some(end) = patch.end_date {
            am.end_date = Set(end);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.database_connection).await?)
    }

    /// Memberships, tasks, expenses, shares and invitations go with it via cascade.
    pub async fn delete_activity(&self, activity_id: Uuid) -> Result<(), AppError> {
        let res = Activity::delete_by_id(activity_id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Activity not found".into()));
        }
        info!("activity {} deleted", activity_id);
        Ok(())
    }

    /// Participants with their user rows, in join order.
    pub async fn list_participants(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<(MembershipModel, UserModel)>, AppError> {
        Ok(Membership::find()
            .filter(entity::activity_user::Column::ActivityId.eq(activity_id))
            .order_by_asc(entity::activity_user::Column::JoinedAt)
            .find_also_related(User)
            .all(&self.database_connection)
            .await?
            .into_iter()
            .filter_map(|(membership, user)| user.map(|u| (membership, u)))
            .collect())
    }

    pub async fn participant_ids(&self, activity_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        Ok(Membership::find()
            .filter(entity::activity_user::Column::ActivityId.eq(activity_id))
            .order_by_asc(entity::activity_user::Column::JoinedAt)
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect())
    }

    /// Drops a membership and unassigns the user's tasks in that activity. The creator can never be removed.
    pub async fn remove_participant(
        &self,
        activity: &ActivityModel,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        if activity.created_by == user_id {
            return Err(AppError::BadRequest(
                "The activity creator cannot be removed from its participants".into(),
            ));
        }

        let txn = self.database_connection.begin().await?;

        let res = Membership::delete_by_id((activity.id, user_id)).exec(&txn).await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound("Participant not found".into()));
        }

        Task::update_many()
            .col_expr(entity::task::Column::AssignedTo, Expr::value(Option::<Uuid>::None))
            .col_expr(entity::task::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::task::Column::ActivityId.eq(activity.id))
            .filter(entity::task::Column::AssignedTo.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        info!("user {} removed from activity {}", user_id, activity.id);
        Ok(())
    }

    pub async fn set_participant_admin(
        &self,
        activity: &ActivityModel,
        user_id: Uuid,
        is_admin: bool,
    ) -> Result<MembershipModel, AppError> {
        if activity.created_by == user_id && !is_admin {
            return Err(AppError::BadRequest("The activity creator is always an admin".into()));
        }

        let membership = self
            .get_membership(activity.id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;

        if membership.is_admin == is_admin {
            return Ok(membership);
        }

        let mut am: MembershipActive = membership.into();
        am.is_admin = Set(is_admin);
        Ok(am.update(&self.database_connection).await?)
    }
}

/// Shared by activity creation and invitation acceptance so both run inside their own transaction.
pub(crate) async fn insert_membership<C: ConnectionTrait>(
    conn: &C,
    activity_id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<MembershipModel, AppError> {
    Ok(MembershipActive {
        activity_id: Set(activity_id),
        user_id: Set(user_id),
        is_admin: Set(is_admin),
        joined_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?)
}
