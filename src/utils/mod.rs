pub mod balance;
pub mod jwt;
pub mod split;
pub mod token;
pub mod webutils;
