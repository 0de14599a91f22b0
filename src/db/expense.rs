use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::split::{validate_allocation, ShareAllocation};
use crate::utils::token;
use chrono::Utc;
use entity::expense::{ActiveModel as ExpenseActive, Column, Entity as Expense, Model as ExpenseModel};
use entity::expense_share::{
    ActiveModel as ShareActive, Entity as Share, Model as ShareModel,
};
use entity::task::Model as TaskModel;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

pub type ExpenseWithShares = (ExpenseModel, Vec<ShareModel>);

impl DatabaseService {
    /// Writes the expense and its shares in one transaction. The allocation is re-validated
    /// here so no share set that breaks the percentage/amount invariants reaches the table.
    pub async fn create_expense(
        &self,
        task: &TaskModel,
        paid_by: Uuid,
        description: String,
        amount: f64,
        allocations: Vec<ShareAllocation>,
    ) -> Result<ExpenseWithShares, AppError> {
        validate_allocation(amount, &allocations)?;

        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let expense = ExpenseActive {
            id: Set(token::new_id()),
            task_id: Set(task.id),
            activity_id: Set(task.activity_id),
            description: Set(description),
            amount: Set(amount),
            paid_by: Set(paid_by),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut shares = Vec::with_capacity(allocations.len());
        for allocation in allocations {
            // the payer's own share is settled from the start
            let is_paid = allocation.user_id == paid_by;
            let share = ShareActive {
                id: Set(token::new_id()),
                expense_id: Set(expense.id),
                user_id: Set(allocation.user_id),
                percentage: Set(allocation.percentage),
                amount: Set(allocation.amount),
                is_paid: Set(is_paid),
                paid_at: Set(is_paid.then_some(now)),
            }
            .insert(&txn)
            .await?;
            shares.push(share);
        }

        txn.commit().await?;
        info!("expense {} of {:.2} recorded on task {}", expense.id, amount, task.id);
        Ok((expense, shares))
    }

    pub async fn get_expense(&self, id: Uuid) -> Result<ExpenseModel, AppError> {
        Ok(Expense::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Expense not found".into()))?)
    }

    pub async fn get_expense_with_shares(&self, id: Uuid) -> Result<ExpenseWithShares, AppError> {
        let expense = self.get_expense(id).await?;
        let shares = Share::find()
            .filter(entity::expense_share::Column::ExpenseId.eq(expense.id))
            .all(&self.database_connection)
            .await?;
        Ok((expense, shares))
    }

    pub async fn list_expenses_for_activity(&self, activity_id: Uuid) -> Result<Vec<ExpenseWithShares>, AppError> {
        Ok(Expense::find()
            .filter(Column::ActivityId.eq(activity_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .find_with_related(Share)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_expenses_for_task(&self, task_id: Uuid) -> Result<Vec<ExpenseWithShares>, AppError> {
        Ok(Expense::find()
            .filter(Column::TaskId.eq(task_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .find_with_related(Share)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<(), AppError> {
        let res = Expense::delete_by_id(id).exec(&self.database_connection).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Expense not found".into()));
        }
        Ok(())
    }

    pub async fn get_share(&self, id: Uuid) -> Result<ShareModel, AppError> {
        Ok(Share::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Expense share not found".into()))?)
    }

    /// Idempotent: asking for the state a share already has returns it untouched,
    /// so `paid_at` keeps the time it was first paid.
    pub async fn set_share_paid(&self, share: ShareModel, is_paid: bool) -> Result<ShareModel, AppError> {
        if share.is_paid == is_paid {
            return Ok(share);
        }
        let mut am: ShareActive = share.into();
        am.is_paid = Set(is_paid);
        am.paid_at = Set(is_paid.then(Utc::now));
        Ok(am.update(&self.database_connection).await?)
    }
}
