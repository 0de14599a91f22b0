use actix_web::{post, web};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::expense::{ExpenseRes, RExpenseCreate, SplitMethod};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::split::{equal_split, percentage_split, round2};
use crate::utils::webutils::AuthUser;

/// Records an expense on a task and splits it between participants.
#[post("")]
pub async fn create_expense(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RExpenseCreate>,
) -> ApiResult<ExpenseRes> {
    data.validate()?;
    let data = data.into_inner();

    let task = db.get_task(data.task_id).await?;
    let access = db.authorize_activity(task.activity_id, auth.id, Access::Member).await?;
    let activity_id = access.activity.id;

    let paid_by = data.paid_by.unwrap_or(auth.id);
    db.ensure_participant(activity_id, paid_by).await?;

    let amount = round2(data.amount);
    let allocations = match data.split {
        SplitMethod::Equal { participants: Some(users) } => {
            for user in &users {
                db.ensure_participant(activity_id, *user).await?;
            }
            equal_split(amount, &users)?
        }
        SplitMethod::Equal { participants: None } => {
            let users = db.participant_ids(activity_id).await?;
            equal_split(amount, &users)?
        }
        SplitMethod::Percentage { shares } => {
            for share in &shares {
                db.ensure_participant(activity_id, share.user_id).await?;
            }
            let shares: Vec<_> = shares.iter().map(|s| (s.user_id, s.percentage)).collect();
            percentage_split(amount, &shares)?
        }
    };
    debug!("splitting {:.2} between {} participants", amount, allocations.len());

    let expense = db
        .create_expense(&task, paid_by, data.description.trim().to_string(), amount, allocations)
        .await?;
    Ok(ApiResponse::Created(expense.into()))
}
