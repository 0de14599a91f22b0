pub mod crud;
pub mod overview;
pub mod participants;
