use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::task::{RTaskCreate, RTaskUpdate};
use crate::utils::token;
use chrono::Utc;
use entity::task::{ActiveModel as TaskActive, Column, Entity as Task, Model as TaskModel, TaskStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

impl DatabaseService {
    /// The assignee, if any, must be checked as a participant by the caller.
    pub async fn create_task(&self, created_by: Uuid, payload: RTaskCreate) -> Result<TaskModel, AppError> {
        let now = Utc::now();
        Ok(TaskActive {
            id: Set(token::new_id()),
            activity_id: Set(payload.activity_id),
            title: Set(payload.title),
            description: Set(payload.description),
            status: Set(payload.status.unwrap_or_default()),
            priority: Set(payload.priority.unwrap_or_default()),
            assigned_to: Set(payload.assigned_to),
            due_date: Set(payload.due_date),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_task(&self, id: Uuid) -> Result<TaskModel, AppError> {
        Ok(Task::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Task not found".into()))?)
    }

    pub async fn list_tasks_for_activity(&self, activity_id: Uuid) -> Result<Vec<TaskModel>, AppError> {
        Ok(Task::find()
            .filter(Column::ActivityId.eq(activity_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn update_task(&self, task: TaskModel, patch: RTaskUpdate) -> Result<TaskModel, AppError> {
        let mut am: TaskActive = task.into();

        if let Some(title) = patch.title {
            am.title = Set(title);
        }
        if let Some(description) = patch.description {
            am.description = Set(description);
        }
        if let Some(status) = patch.status {
            am.status = Set(status);
        }
        if let Some(priority) = patch.priority {
            am.priority = Set(priority);
        }
        if let Some(assigned_to) = patch.assigned_to {
            am.assigned_to = Set(assigned_to);
        }
        if let Some(due_date) = patch.due_date {
            am.due_date = Set(due_date);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn set_task_status(&self, task: TaskModel, status: TaskStatus) -> Result<TaskModel, AppError> {
        if task.status == status {
            return Ok(task);
        }
        let mut am: TaskActive = task.into();
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Expenses recorded against the task are removed with it.
    pub async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        let res = Task::delete_by_id(id).exec(&self.database_connection).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
