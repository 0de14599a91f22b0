pub mod activity;
pub mod activity_user;
pub mod expense;
pub mod expense_share;
pub mod invitation;
pub mod refresh_token;
pub mod task;
pub mod user;

/*
 Users exist on their own. An activity is created by one user who becomes its first admin participant.
 Everybody else joins through an invitation that the invitee accepts.
 Tasks live inside an activity; expenses hang off a task and are split into shares between participants.
 */
