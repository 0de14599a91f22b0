use chrono::{DateTime, Utc};
use entity::{activity, activity_user, user};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{error::AppError, present};

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RActivityCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial update. Every field but `name` may be cleared with an explicit `null`.
#[derive(Serialize, Deserialize, Validate, Debug, Default)]
pub struct RActivityUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[validate(length(max = 200))]
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RParticipantAdmin {
    pub is_admin: bool,
}

/// What a caller must be to touch an activity-scoped resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any participant, or the creator.
    Member,
    /// A participant flagged admin, or the creator.
    Admin,
    Creator,
}

/// Result of a successful access check.
#[derive(Debug, Clone)]
pub struct ActivityAccess {
    pub activity: activity::Model,
    pub is_admin: bool,
    pub is_creator: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticipantRes {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_creator: bool,
    pub joined_at: DateTime<Utc>,
}

impl ParticipantRes {
    pub fn new(activity: &activity::Model, membership: activity_user::Model, user: user::Model) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            is_admin: membership.is_admin,
            is_creator: activity.created_by == user.id,
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ActivityDetailRes {
    #[serde(flatten)]
    pub activity: activity::Model,
    pub is_admin: bool,
    pub participants: Vec<ParticipantRes>,
}

pub fn check_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::Validation(
            "end_date must not be before start_date".to_string(),
        )),
        _ => Ok(()),
    }
}
