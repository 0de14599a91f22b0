use actix_web::{post, web};
use std::sync::Arc;
use validator::Validate;

use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPair;
use crate::types::user::RRefreshToken;
use crate::utils::jwt::JwtService;

/// Trades a refresh token for a new pair. The old refresh token stops working.
#[post("/refresh")]
pub async fn refresh(
    db: web::Data<Arc<DatabaseService>>,
    jwt: web::Data<JwtService>,
    data: web::Json<RRefreshToken>,
) -> ApiResult<TokenPair> {
    data.validate()?;

    let (user_id, refresh_token) = db
        .rotate_refresh_token(&data.refresh_token, jwt.refresh_ttl())
        .await?;
    let user = db.get_user_by_id(&user_id).await?;
    let (access_token, expires_in) = jwt.issue(user.id, &user.email)?;

    Ok(ApiResponse::Ok(TokenPair::bearer(access_token, refresh_token, expires_in)))
}

#[post("/logout")]
pub async fn logout(
    db: web::Data<Arc<DatabaseService>>,
    data: web::Json<RRefreshToken>,
) -> ApiResult<()> {
    db.revoke_refresh_token(&data.refresh_token).await?;
    Ok(ApiResponse::NoContent)
}
