use actix_web::{delete, get, put, web};
use entity::activity_user::Model as MembershipModel;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::database_service::DatabaseService;
use crate::types::activity::{Access, ParticipantRes, RParticipantAdmin};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthUser;

#[get("/{id}/participants")]
pub async fn list_participants(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<ParticipantRes>> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Member).await?;

    let participants = db
        .list_participants(access.activity.id)
        .await?
        .into_iter()
        .map(|(membership, user)| ParticipantRes::new(&access.activity, membership, user))
        .collect();
    Ok(ApiResponse::Ok(participants))
}

/// Admins may remove anyone but the creator; everybody else may only remove themselves (leave).
#[delete("/{id}/participants/{user_id}")]
pub async fn remove_participant(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<()> {
    let (activity_id, user_id) = path.into_inner();
    let access = db.authorize_activity(activity_id, auth.id, Access::Member).await?;

    if user_id != auth.id && !access.is_admin {
        return Err(AppError::Forbidden);
    }

    db.remove_participant(&access.activity, user_id).await?;
    Ok(ApiResponse::NoContent)
}

#[put("/{id}/participants/{user_id}/admin")]
pub async fn set_participant_admin(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Json<RParticipantAdmin>,
) -> ApiResult<MembershipModel> {
    let (activity_id, user_id) = path.into_inner();
    let access = db.authorize_activity(activity_id, auth.id, Access::Creator).await?;

    let membership = db
        .set_participant_admin(&access.activity, user_id, data.is_admin)
        .await?;
    Ok(ApiResponse::Ok(membership))
}
