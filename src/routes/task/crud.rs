use actix_web::{delete, get, patch, post, put, web};
use entity::task::Model as TaskModel;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::error::AppError;
use crate::types::expense::ExpenseRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::task::{RTaskCreate, RTaskStatus, RTaskUpdate};
use crate::utils::webutils::AuthUser;

#[post("")]
pub async fn create_task(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RTaskCreate>,
) -> ApiResult<TaskModel> {
    data.validate()?;
    let access = db.authorize_activity(data.activity_id, auth.id, Access::Member).await?;

    if let Some(assignee) = data.assigned_to {
        db.ensure_participant(access.activity.id, assignee).await?;
    }

    let task = db.create_task(auth.id, data.into_inner()).await?;
    Ok(ApiResponse::Created(task))
}

#[get("/{id}")]
pub async fn get_task(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<TaskModel> {
    let task = db.get_task(path.into_inner()).await?;
    db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;
    Ok(ApiResponse::Ok(task))
}

#[put("/{id}")]
pub async fn update_task(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
    data: web::Json<RTaskUpdate>,
) -> ApiResult<TaskModel> {
    data.validate()?;
    let task = db.get_task(path.into_inner()).await?;
    db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;

    if let Some(Some(assignee)) = data.assigned_to {
        db.ensure_participant(task.activity_id, assignee).await?;
    }

    let task = db.update_task(task, data.into_inner()).await?;
    Ok(ApiResponse::Ok(task))
}

#[patch("/{id}/status")]
pub async fn set_task_status(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
    data: web::Json<RTaskStatus>,
) -> ApiResult<TaskModel> {
    let task = db.get_task(path.into_inner()).await?;
    db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;

    let task = db.set_task_status(task, data.into_inner().status).await?;
    Ok(ApiResponse::Ok(task))
}

/// The task's creator or an activity admin.
#[delete("/{id}")]
pub async fn delete_task(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    let task = db.get_task(path.into_inner()).await?;
    let access = db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;

    if task.created_by != auth.id && !access.is_admin {
        return Err(AppError::Forbidden);
    }

    db.delete_task(task.id).await?;
    Ok(ApiResponse::NoContent)
}

#[get("/{id}/expenses")]
pub async fn task_expenses(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<ExpenseRes>> {
    let task = db.get_task(path.into_inner()).await?;
    db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;

    let expenses = db.list_expenses_for_task(task.id).await?;
    Ok(ApiResponse::Ok(expenses.into_iter().map(ExpenseRes::from).collect()))
}
