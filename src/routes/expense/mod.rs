pub mod create;
pub mod manage;
