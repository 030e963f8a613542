//! Doctor records: the treating specialist

use serde::{Deserialize, Serialize};

use crate::core::types::PersonId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: PersonId,
    pub name: String,
    /// Holds a doctor role; anyone else cannot treat
    pub is_doctor: bool,
    /// Doctor skill level (0-10), None if never trained
    pub skill_level: Option<u32>,
    /// Successful treatments since the last task XP award
    pub n_tasks: u32,
    pub xp: u32,
}

impl Doctor {
    pub fn new(name: impl Into<String>, skill_level: u32) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            is_doctor: true,
            skill_level: Some(skill_level),
            n_tasks: 0,
            xp: 0,
        }
    }

    /// Can this person run a treatment pass?
    pub fn is_qualified(&self) -> bool {
        self.is_doctor
    }

    /// Skill level used for the treatment tables; untrained counts as 0
    pub fn effective_skill(&self) -> u32 {
        self.skill_level.unwrap_or(0)
    }

    pub fn award_xp(&mut self, amount: u32) {
        self.xp += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_skill_is_lowest_tier() {
        let mut doctor = Doctor::new("Vasquez", 5);
        doctor.skill_level = None;
        assert_eq!(doctor.effective_skill(), 0);
    }

    #[test]
    fn test_award_xp_accumulates() {
        let mut doctor = Doctor::new("Vasquez", 3);
        doctor.award_xp(2);
        doctor.award_xp(1);
        assert_eq!(doctor.xp, 3);
    }
}
