use actix_web::{delete, get, patch, web};
use entity::expense_share::Model as ShareModel;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::error::AppError;
use crate::types::expense::{ExpenseRes, RShareStatus};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthUser;

#[get("/{id}")]
pub async fn get_expense(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<ExpenseRes> {
    let expense = db.get_expense_with_shares(path.into_inner()).await?;
    db.authorize_activity(expense.0.activity_id, auth.id, Access::Member).await?;
    Ok(ApiResponse::Ok(expense.into()))
}

/// The payer or an activity admin.
#[delete("/{id}")]
pub async fn delete_expense(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    let expense = db.get_expense(path.into_inner()).await?;
    let access = db.authorize_activity(expense.activity_id, auth.id, Access::Member).await?;

    if expense.paid_by != auth.id && !access.is_admin {
        return Err(AppError::Forbidden);
    }

    db.delete_expense(expense.id).await?;
    Ok(ApiResponse::NoContent)
}

/// Marks a share paid or unpaid. Allowed for the share holder and the payer.
#[patch("/shares/{share_id}")]
pub async fn set_share_status(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
    data: web::Json<RShareStatus>,
) -> ApiResult<ShareModel> {
    let share = db.get_share(path.into_inner()).await?;
    let expense = db.get_expense(share.expense_id).await?;
    db.authorize_activity(expense.activity_id, auth.id, Access::Member).await?;

    if share.user_id != auth.id && expense.paid_by != auth.id {
        return Err(AppError::Forbidden);
    }

    let share = db.set_share_paid(share, data.is_paid).await?;
    Ok(ApiResponse::Ok(share))
}
