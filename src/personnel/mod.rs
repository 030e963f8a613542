//! Roster records the medical systems read from and write to
//!
//! The campaign owns these; the medical engine only reads attributes, mutates
//! the injury list and appends to the medical log.

pub mod doctor;
pub mod patient;

pub use doctor::Doctor;
pub use patient::{Gender, LogEntry, Patient, PersonnelStatus, UnitClass};
