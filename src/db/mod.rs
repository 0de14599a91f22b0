pub mod activity;
pub mod database_service;
pub mod expense;
pub mod invitation;
pub mod refresh_token;
pub mod task;
pub mod user;
