use actix_web::{delete, get, post, put, web};
use entity::activity::Model as ActivityModel;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::activity::{
    check_date_range, Access, ActivityDetailRes, ParticipantRes, RActivityCreate, RActivityUpdate,
};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthUser;

/// Activities the caller participates in or created.
#[get("")]
pub async fn list_activities(auth: AuthUser, db: web::Data<Arc<DatabaseService>>) -> ApiResult<Vec<ActivityModel>> {
    Ok(ApiResponse::Ok(db.list_activities_for_user(auth.id).await?))
}

#[post("")]
pub async fn create_activity(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RActivityCreate>,
) -> ApiResult<ActivityModel> {
    data.validate()?;
    check_date_range(data.start_date, data.end_date)?;

    let activity = db.create_activity(auth.id, data.into_inner()).await?;
    Ok(ApiResponse::Created(activity))
}

#[get("/{id}")]
pub async fn get_activity(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<ActivityDetailRes> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Member).await?;

    let participants = db
        .list_participants(access.activity.id)
        .await?
        .into_iter()
        .map(|(membership, user)| ParticipantRes::new(&access.activity, membership, user))
        .collect();

    Ok(ApiResponse::Ok(ActivityDetailRes {
        activity: access.activity,
        is_admin: access.is_admin,
        participants,
    }))
}

#[put("/{id}")]
pub async fn update_activity(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
    data: web::Json<RActivityUpdate>,
) -> ApiResult<ActivityModel> {
    data.validate()?;
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Admin).await?;

    check_date_range(
        data.start_date.unwrap_or(access.activity.start_date),
        data.end_date.unwrap_or(access.activity.end_date),
    )?;

    let activity = db.update_activity(access.activity, data.into_inner()).await?;
    Ok(ApiResponse::Ok(activity))
}

/// Creator only.
#[delete("/{id}")]
pub async fn delete_activity(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Creator).await?;
    db.delete_activity(access.activity.id).await?;
    info!("user {} deleted activity {}", auth.id, access.activity.id);
    Ok(ApiResponse::NoContent)
}
