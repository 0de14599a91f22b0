use chrono::{DateTime, Utc};
use entity::task::{TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::present;

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RTaskCreate {
    pub activity_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update. For `description`, `assigned_to` and `due_date`, an explicit `null` clears
/// the value while an absent key leaves it untouched.
#[derive(Serialize, Deserialize, Validate, Debug, Default)]
pub struct RTaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "present")]
    pub assigned_to: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTaskStatus {
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_assignee_differs_from_missing_assignee() {
        let cleared: RTaskUpdate = serde_json::from_str(r#"{"assigned_to": null}"#).unwrap();
        assert_eq!(cleared.assigned_to, Some(None));

        let untouched: RTaskUpdate = serde_json::from_str(r#"{"title": "Book hostel"}"#).unwrap();
        assert_eq!(untouched.assigned_to, None);
        assert_eq!(untouched.title.as_deref(), Some("Book hostel"));
        assert_eq!(untouched.description, None);
    }

    #[test]
    fn null_description_clears_it() {
        let cleared: RTaskUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert!(cleared.validate().is_ok());

        let long: RTaskUpdate =
            serde_json::from_str(&format!(r#"{{"description": "{}"}}"#, "x".repeat(2001))).unwrap();
        assert!(long.validate().is_err());
    }

    #[test]
    fn status_uses_snake_case() {
        let body: RTaskStatus = serde_json::from_str(r#"{"status": "in_progress"}"#).unwrap();
        assert_eq!(body.status, TaskStatus::InProgress);
    }
}
