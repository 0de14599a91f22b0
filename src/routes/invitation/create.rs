use actix_web::{post, web};
use chrono::{Duration, Utc};
use entity::invitation::Model as InviteModel;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::error::AppError;
use crate::types::invitation::RInvitationCreate;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::{normalize_email, AuthUser};

#[post("")]
pub async fn create_invitation(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    data: web::Json<RInvitationCreate>,
) -> ApiResult<InviteModel> {
    data.validate()?;
    let access = db.authorize_activity(data.activity_id, auth.id, Access::Admin).await?;

    let invitee = match (&data.email, data.user_id) {
        (Some(email), None) => db.get_user_by_email(&normalize_email(email)).await?.id,
        (None, Some(user_id)) => user_id,
        _ => {
            return Err(AppError::Validation(
                "exactly one of email or user_id is required".to_string(),
            ))
        }
    };

    let expires_at = Utc::now() + Duration::days(config.invitation_ttl_days);
    let invite = db
        .create_invitation(access.activity.id, invitee, auth.id, expires_at)
        .await?;

    info!("user {} invited {} to activity {}", auth.id, invitee, access.activity.id);
    Ok(ApiResponse::Created(invite))
}
