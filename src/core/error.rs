use thiserror::Error;

use crate::medical::{BodyLocation, InjuryKind};

#[derive(Error, Debug)]
pub enum MedicalError {
    #[error("{kind} cannot be placed on the {location}")]
    InvalidLocation {
        kind: InjuryKind,
        location: BodyLocation,
    },

    #[error("{kind} severity {severity} outside 1..={max}")]
    InvalidSeverity {
        kind: InjuryKind,
        severity: u32,
        max: u32,
    },

    #[error("Unknown injury kind: {0}")]
    UnknownInjuryKind(String),

    #[error("Unknown injury code: {0}")]
    UnknownInjuryCode(u8),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MedicalError>;
