pub mod candidate;
pub mod position;
pub mod status;
