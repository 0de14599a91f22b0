use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::token::TokenPair;

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RUserRegister {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RUserLogin {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Validate, Debug, Default)]
pub struct RUserUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct RPasswordChange {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct RRefreshToken {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct UserSearchQuery {
    #[validate(length(min = 1, max = 100))]
    pub q: String,
}

/// Insert payload for the users table. The password is already hashed.
pub struct DBUserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRes {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::user::Model> for UserRes {
    fn from(u: entity::user::Model) -> Self {
        Self { id: u.id, name: u.name, email: u.email, created_at: u.created_at }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthRes {
    pub user: UserRes,
    #[serde(flatten)]
    pub tokens: TokenPair,
}
