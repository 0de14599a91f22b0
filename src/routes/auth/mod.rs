use crate::db::database_service::DatabaseService;
use crate::types::{error::AppError, token::TokenPair};
use crate::utils::jwt::JwtService;
use entity::user::Model as UserModel;

pub mod login;
pub mod register;
pub mod session;

/// Access token plus a freshly stored refresh token for `user`.
pub(crate) async fn issue_token_pair(
    db: &DatabaseService,
    jwt: &JwtService,
    user: &UserModel,
) -> Result<TokenPair, AppError> {
    let (access_token, expires_in) = jwt.issue(user.id, &user.email)?;
    let refresh_token = db.issue_refresh_token(user.id, jwt.refresh_ttl()).await?;
    Ok(TokenPair::bearer(access_token, refresh_token, expires_in))
}
