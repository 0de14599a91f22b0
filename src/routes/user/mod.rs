pub mod lookup;
pub mod me;
