use crate::db::database_service::DatabaseService;
use crate::types::{error::AppError, user::DBUserCreate};
use crate::utils::token;
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    sea_query::LikeExpr, ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

const SEARCH_LIMIT: u64 = 20;

impl DatabaseService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Signup. Email uniqueness is checked up front and backed by the unique index.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        let now = Utc::now();

        Ok(UserActive {
            id: Set(token::new_id()),
            name: Set(payload.name),
            email: Set(payload.email),
            password_hash: Set(payload.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<UserModel, AppError> {
        let user = self.get_user_by_id(&user_id).await?;

        if let Some(email) = &email {
            if *email != user.email && self.user_exists_by_email(email).await? {
                return Err(AppError::AlreadyExists);
            }
        }

        let mut am: UserActive = user.into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(email) = email {
            am.email = Set(email);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn update_user_password(&self, user_id: Uuid, password_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.password_hash = Set(password_hash);
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await?;
        Ok(())
    }

    /// Users whose email or name contains `query` literally, for picking invitees.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserModel>, AppError> {
        let pattern = like_pattern(query);
        Ok(User::find()
            .filter(
                Condition::any()
                    .add(Column::Email.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::Name.like(LikeExpr::new(pattern).escape('\\'))),
            )
            .order_by_asc(Column::Name)
            .limit(SEARCH_LIMIT)
            .all(&self.database_connection)
            .await?)
    }

    /// Display names for a set of users in one query. Unknown ids are absent from the map.
    pub async fn user_names(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, String>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = User::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.database_connection)
            .await?;
        Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
    }
}

/// Substring pattern with `%`, `_` and the escape character itself matched literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
