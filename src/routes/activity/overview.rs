use actix_web::{get, web};
use entity::{invitation::Model as InviteModel, task::Model as TaskModel};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::expense::ExpenseRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::balance::{compute_balances, Balance};
use crate::utils::webutils::AuthUser;

#[get("/{id}/tasks")]
pub async fn activity_tasks(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<TaskModel>> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Member).await?;
    Ok(ApiResponse::Ok(db.list_tasks_for_activity(access.activity.id).await?))
}

#[get("/{id}/expenses")]
pub async fn activity_expenses(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<ExpenseRes>> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Member).await?;
    let expenses = db.list_expenses_for_activity(access.activity.id).await?;
    Ok(ApiResponse::Ok(expenses.into_iter().map(ExpenseRes::from).collect()))
}

#[get("/{id}/balances")]
pub async fn activity_balances(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<Balance>> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Member).await?;

    let participants = db.participant_ids(access.activity.id).await?;
    let expenses = db.list_expenses_for_activity(access.activity.id).await?;
    Ok(ApiResponse::Ok(compute_balances(&participants, &expenses)))
}

/// Pending invitations, admins only.
#[get("/{id}/invitations")]
pub async fn activity_invitations(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<InviteModel>> {
    let access = db.authorize_activity(path.into_inner(), auth.id, Access::Admin).await?;
    Ok(ApiResponse::Ok(db.list_open_invitations_for_activity(access.activity.id).await?))
}
