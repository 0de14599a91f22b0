use actix_web::{delete, get, post, web};
use entity::invitation::Model as InviteModel;
use std::sync::Arc;

use crate::db::database_service::DatabaseService;
use crate::types::activity::Access;
use crate::types::invitation::{InvitationAcceptRes, InvitationRes};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthUser;

/// Pending, unexpired invitations addressed to the caller.
#[get("")]
pub async fn list_my_invitations(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
) -> ApiResult<Vec<InvitationRes>> {
    let invites = db.list_open_invitations_for_user(auth.id).await?;
    let inviter_ids = invites.iter().map(|(invitation, _)| invitation.invited_by).collect();
    let names = db.user_names(inviter_ids).await?;

    let res = invites
        .into_iter()
        .map(|(invitation, activity_name)| {
            let invited_by_name = names.get(&invitation.invited_by).cloned();
            InvitationRes { invitation, activity_name, invited_by_name }
        })
        .collect();
    Ok(ApiResponse::Ok(res))
}

#[post("/{id}/accept")]
pub async fn accept_invitation(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<InvitationAcceptRes> {
    let invite = db.accept_invitation(&path.into_inner(), auth.id).await?;
    Ok(ApiResponse::Ok(InvitationAcceptRes {
        message: "Invitation accepted".to_string(),
        activity_id: invite.activity_id,
    }))
}

#[post("/{id}/reject")]
pub async fn reject_invitation(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<InviteModel> {
    let invite = db.reject_invitation(&path.into_inner(), auth.id).await?;
    Ok(ApiResponse::Ok(invite))
}

/// The inviter or an activity admin may withdraw a pending invitation.
#[delete("/{id}")]
pub async fn cancel_invitation(
    auth: AuthUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<()> {
    let invite = db.get_invitation(&path.into_inner()).await?;

    if invite.invited_by != auth.id {
        db.authorize_activity(invite.activity_id, auth.id, Access::Admin).await?;
    }

    db.cancel_invitation(invite).await?;
    Ok(ApiResponse::NoContent)
}
