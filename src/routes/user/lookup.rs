use actix_web::{get, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{UserRes, UserSearchQuery};
use crate::utils::webutils::AuthUser;

#[get("/search")]
pub async fn search_users(
    _auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    query: web::Query<UserSearchQuery>,
) -> ApiResult<Vec<UserRes>> {
    query.validate()?;
    let users = db.search_users(query.q.trim()).await?;
    Ok(ApiResponse::Ok(users.into_iter().map(UserRes::from).collect()))
}

#[get("/{id}")]
pub async fn get_user(
    _auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<Uuid>,
) -> ApiResult<UserRes> {
    let user = db.get_user_by_id(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(user.into()))
}
