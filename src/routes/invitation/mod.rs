pub mod create;
pub mod respond;
