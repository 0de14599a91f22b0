use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::issue_token_pair;
use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{AuthRes, DBUserCreate, RUserRegister};
use crate::utils::{jwt::JwtService, token::hash_secret, webutils::normalize_email};

#[post("/register")]
pub async fn register(
    db: web::Data<Arc<DatabaseService>>,
    jwt: web::Data<JwtService>,
    data: web::Json<RUserRegister>,
) -> ApiResult<AuthRes> {
    data.validate()?;
    let data = data.into_inner();

    let user = db
        .create_user(DBUserCreate {
            name: data.name.trim().to_string(),
            email: normalize_email(&data.email),
            password_hash: hash_secret(&data.password)?,
        })
        .await?;
    info!("user {} registered", user.id);

    let tokens = issue_token_pair(&db, &jwt, &user).await?;
    Ok(ApiResponse::Created(AuthRes { user: user.into(), tokens }))
}
