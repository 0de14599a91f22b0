use actix_web::{post, web};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

use super::issue_token_pair;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{AuthRes, RUserLogin};
use crate::utils::{jwt::JwtService, token::verify_secret, webutils::normalize_email};

#[post("/login")]
pub async fn login(
    db: web::Data<Arc<DatabaseService>>,
    jwt: web::Data<JwtService>,
    data: web::Json<RUserLogin>,
) -> ApiResult<AuthRes> {
    data.validate()?;

    // unknown email and wrong password look the same from outside
    let user = match db.get_user_by_email(&normalize_email(&data.email)).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(AppError::Unauthorized),
        Err(err) => return Err(err),
    };
    if !verify_secret(&data.password, &user.password_hash)? {
        warn!("failed login for user {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let tokens = issue_token_pair(&db, &jwt, &user).await?;
    Ok(ApiResponse::Ok(AuthRes { user: user.into(), tokens }))
}
