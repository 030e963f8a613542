//! Advanced Medical - injury, treatment and healing simulation for campaign personnel

pub mod core;
pub mod medical;
pub mod personnel;
