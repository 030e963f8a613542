pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, MedicalConfig, SKILL_TIERS};
pub use error::{MedicalError, Result};
pub use types::{Day, InjuryId, PersonId};
