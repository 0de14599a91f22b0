use actix_web::{get, put, web};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RPasswordChange, RUserUpdate, UserRes};
use crate::utils::token::{hash_secret, verify_secret};
use crate::utils::webutils::{normalize_email, AuthUser};

#[get("/me")]
pub async fn get_me(auth: AuthUser, db: web::Data<Arc<DatabaseService>>) -> ApiResult<UserRes> {
    let user = db.get_user_by_id(&auth.id).await?;
    Ok(ApiResponse::Ok(user.into()))
}

#[put("/me")]
pub async fn update_me(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RUserUpdate>,
) -> ApiResult<UserRes> {
    data.validate()?;
    let data = data.into_inner();

    let user = db
        .update_user_profile(
            auth.id,
            data.name.map(|n| n.trim().to_string()),
            data.email.as_deref().map(normalize_email),
        )
        .await?;
    Ok(ApiResponse::Ok(user.into()))
}

/// Changing the password signs out every other session.
#[put("/me/password")]
pub async fn change_password(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RPasswordChange>,
) -> ApiResult<()> {
    data.validate()?;

    let user = db.get_user_by_id(&auth.id).await?;
    if !verify_secret(&data.current_password, &user.password_hash)? {
        warn!("wrong current password for user {}", user.id);
        return Err(AppError::Forbidden);
    }

    db.update_user_password(user.id, hash_secret(&data.new_password)?).await?;
    let revoked = db.revoke_all_refresh_tokens(user.id).await?;
    info!("password changed for user {}, {} refresh tokens revoked", user.id, revoked);

    Ok(ApiResponse::NoContent)
}
