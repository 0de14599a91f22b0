use entity::invitation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Invitee is given either by email or by id.
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RInvitationCreate {
    pub activity_id: Uuid,
    #[validate(email)]
    pub email: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InvitationRes {
    #[serde(flatten)]
    pub invitation: invitation::Model,
    pub activity_name: String,
    pub invited_by_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InvitationAcceptRes {
    pub message: String,
    pub activity_id: Uuid,
}
