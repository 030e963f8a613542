//! Medical configuration with documented constants
//!
//! All tunables of the healing engine are collected here with explanations of
//! their purpose. Defaults reproduce the tabletop rules.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::error::{MedicalError, Result};

/// Number of skill tiers covered by the fumble/critical tables (levels 0-10)
pub const SKILL_TIERS: usize = 11;

/// Configuration for the medical systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalConfig {
    // === TREATMENT ===
    /// Days a patient waits between two treatment passes by their doctor
    ///
    /// At 1, a doctor treats every patient once per day.
    pub healing_waiting_period: u32,

    /// Percentile fumble band indexed by doctor skill level (0-10)
    ///
    /// A treatment roll strictly below this value worsens the injury.
    pub fumble_limits: Vec<u32>,

    /// Percentile critical band indexed by doctor skill level (0-10)
    ///
    /// A treatment roll strictly above this value shortens the healing time.
    pub crit_limits: Vec<u32>,

    // === EXPERIENCE ===
    /// Successful treatments a doctor needs before a task XP award
    pub n_tasks_xp: u32,

    /// XP awarded once `n_tasks_xp` treatments are done (0 disables)
    pub task_xp: u32,

    /// XP for a roll in the bottom tenth of the fumble band
    pub mistake_xp: u32,

    /// XP for a roll in the top tenth of the critical band
    pub success_xp: u32,

    // === NATURAL HEALING ===
    /// Daily percent chance that an untreated injury takes one more day
    pub untreated_complication_chance: u32,

    /// Untreated soft-tissue injuries turn permanent on a 1-in-N roll
    ///
    /// At 6, 1 in 6 (about 17%) becomes permanent instead of healing.
    pub soft_tissue_permanence_one_in: u32,

    /// Percent chance that a fresh injury's healing time gets jittered
    ///
    /// The jitter is the roll itself, so at 5 the healing time moves by at
    /// most 4%.
    pub healing_jitter_chance: u32,
}

impl Default for MedicalConfig {
    fn default() -> Self {
        Self {
            healing_waiting_period: 1,
            fumble_limits: vec![50, 40, 30, 20, 12, 6, 5, 4, 3, 2, 0],
            crit_limits: vec![98, 97, 94, 89, 84, 79, 74, 69, 64, 59, 49],

            n_tasks_xp: 25,
            task_xp: 1,
            mistake_xp: 0,
            success_xp: 0,

            untreated_complication_chance: 30,
            soft_tissue_permanence_one_in: 6,
            healing_jitter_chance: 5,
        }
    }
}

impl MedicalConfig {
    /// Parse a config from TOML; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MedicalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fumble limit for a skill level; out-of-range levels clamp to the table ends
    ///
    /// An empty table never fumbles.
    pub fn fumble_limit(&self, level: u32) -> u32 {
        lookup_tier(&self.fumble_limits, level).unwrap_or(0)
    }

    /// Critical limit for a skill level; out-of-range levels clamp to the table ends
    ///
    /// An empty table never crits.
    pub fn crit_limit(&self, level: u32) -> u32 {
        lookup_tier(&self.crit_limits, level).unwrap_or(100)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.fumble_limits.len() != SKILL_TIERS || self.crit_limits.len() != SKILL_TIERS {
            return Err(MedicalError::InvalidConfig(format!(
                "fumble_limits and crit_limits need {} entries (got {} and {})",
                SKILL_TIERS,
                self.fumble_limits.len(),
                self.crit_limits.len()
            )));
        }

        // Better doctors never fumble more often
        if self.fumble_limits.windows(2).any(|w| w[1] > w[0]) {
            return Err(MedicalError::InvalidConfig(
                "fumble_limits must not increase with skill".into(),
            ));
        }

        for (level, (fumble, crit)) in self
            .fumble_limits
            .iter()
            .zip(&self.crit_limits)
            .enumerate()
        {
            if fumble > crit || *crit > 100 {
                return Err(MedicalError::InvalidConfig(format!(
                    "skill {}: fumble limit {} must be <= crit limit {} <= 100",
                    level, fumble, crit
                )));
            }
        }

        if self.untreated_complication_chance > 100 || self.healing_jitter_chance > 100 {
            return Err(MedicalError::InvalidConfig(
                "percent chances must be <= 100".into(),
            ));
        }

        if self.n_tasks_xp == 0 || self.soft_tissue_permanence_one_in == 0 {
            return Err(MedicalError::InvalidConfig(
                "n_tasks_xp and soft_tissue_permanence_one_in must be positive".into(),
            ));
        }

        Ok(())
    }
}

fn tier(level: u32) -> usize {
    (level as usize).min(SKILL_TIERS - 1)
}

/// Table entry for a skill level, falling back to the last entry of a short table
fn lookup_tier(table: &[u32], level: u32) -> Option<u32> {
    table.get(tier(level)).or(table.last()).copied()
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<MedicalConfig> = OnceLock::new();

/// Get the global medical config (initializes with defaults if not set)
pub fn config() -> &'static MedicalConfig {
    CONFIG.get_or_init(MedicalConfig::default)
}

/// Set the global medical config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: MedicalConfig) -> std::result::Result<(), MedicalConfig> {
    CONFIG.set(config)
}
