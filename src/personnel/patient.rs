//! Patient records: the carrier of injuries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, InjuryId, PersonId};
use crate::medical::modifiers::{total_modifiers, ModifiedSkill};
use crate::medical::{BodyLocation, Injury, InjuryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn possessive(&self) -> &'static str {
        match self {
            Gender::Male => "his",
            Gender::Female => "her",
            Gender::Unspecified => "their",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PersonnelStatus {
    #[default]
    Active,
    /// Died of medical complications
    Dead,
}

/// What the patient was crewing when hit; selects the hit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    Mek,
    Aerospace,
    Vehicle,
    BattleArmor,
    Infantry,
}

impl UnitClass {
    /// Pilots sitting in a mek or fighter cockpit
    pub fn is_cockpit(&self) -> bool {
        matches!(self, UnitClass::Mek | UnitClass::Aerospace)
    }
}

/// Dated entry in a patient's medical history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub day: Day,
    pub text: String,
}

/// A person who can carry injuries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
    pub status: PersonnelStatus,
    /// Unit currently crewed, if any
    pub unit_class: Option<UnitClass>,
    /// Healing-time multiplier in percent (100 = normal)
    pub ability_time_modifier: u32,
    /// Days before the assigned doctor can treat again
    pub days_to_wait_for_healing: u32,
    injuries: Vec<Injury>,
    #[serde(default)]
    next_injury_id: u32,
    pub log: Vec<LogEntry>,
}

impl Patient {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            gender,
            status: PersonnelStatus::Active,
            unit_class: None,
            ability_time_modifier: 100,
            days_to_wait_for_healing: 0,
            injuries: Vec::new(),
            next_injury_id: 0,
            log: Vec::new(),
        }
    }

    pub fn with_unit_class(mut self, unit_class: UnitClass) -> Self {
        self.unit_class = Some(unit_class);
        self
    }

    pub fn with_ability_time_modifier(mut self, percent: u32) -> Self {
        self.ability_time_modifier = percent;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.status == PersonnelStatus::Dead
    }

    pub fn injuries(&self) -> &[Injury] {
        &self.injuries
    }

    pub fn injury(&self, id: InjuryId) -> Option<&Injury> {
        self.injuries.iter().find(|i| i.id == id)
    }

    pub fn injury_mut(&mut self, id: InjuryId) -> Option<&mut Injury> {
        self.injuries.iter_mut().find(|i| i.id == id)
    }

    /// Attach an injury, assigning it a fresh id
    pub fn add_injury(&mut self, mut injury: Injury) -> InjuryId {
        let id = InjuryId(self.next_injury_id);
        self.next_injury_id += 1;
        injury.id = id;
        self.injuries.push(injury);
        id
    }

    pub fn remove_injury(&mut self, id: InjuryId) -> Option<Injury> {
        let idx = self.injuries.iter().position(|i| i.id == id)?;
        Some(self.injuries.remove(idx))
    }

    /// Swap an injury for a worse one in a single step
    ///
    /// Returns None (and attaches nothing) if `old` is no longer present.
    pub fn replace_injury(&mut self, old: InjuryId, new: Injury) -> Option<InjuryId> {
        self.remove_injury(old)?;
        Some(self.add_injury(new))
    }

    /// Is this location (or the limb it hangs off) gone?
    pub fn is_location_missing(&self, location: BodyLocation) -> bool {
        let lost = |loc: BodyLocation| {
            self.injuries
                .iter()
                .any(|i| i.kind == InjuryKind::LostLimb && i.location == loc)
        };
        lost(location) || location.parent().map_or(false, lost)
    }

    /// Any injury still healing or not yet settled into a permanent state
    pub fn needs_treatment(&self) -> bool {
        self.injuries.iter().any(|i| i.is_open())
    }

    /// Total skill penalties from all injuries
    pub fn injury_modifiers(&self) -> BTreeMap<ModifiedSkill, i32> {
        total_modifiers(&self.injuries)
    }

    pub fn reset_worked_on(&mut self) {
        for injury in &mut self.injuries {
            injury.worked_on = false;
        }
    }

    pub fn log_event(&mut self, day: Day, text: impl Into<String>) {
        self.log.push(LogEntry {
            day,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lost_limb(location: BodyLocation) -> Injury {
        Injury::new(InjuryKind::LostLimb, location, 1, 28)
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut patient = Patient::new("Kai", Gender::Unspecified);
        let a = patient.add_injury(Injury::new(InjuryKind::Cut, BodyLocation::Chest, 1, 3));
        let b = patient.add_injury(Injury::new(InjuryKind::Cut, BodyLocation::Chest, 1, 3));
        assert_ne!(a, b);
        patient.remove_injury(a);
        let c = patient.add_injury(Injury::new(InjuryKind::Cut, BodyLocation::Chest, 1, 3));
        assert_ne!(a, c);
    }

    #[test]
    fn test_lost_arm_takes_hand_with_it() {
        let mut patient = Patient::new("Kai", Gender::Unspecified);
        patient.add_injury(lost_limb(BodyLocation::LeftArm));
        assert!(patient.is_location_missing(BodyLocation::LeftArm));
        assert!(patient.is_location_missing(BodyLocation::LeftHand));
        assert!(!patient.is_location_missing(BodyLocation::RightHand));
    }

    #[test]
    fn test_lost_hand_keeps_arm() {
        let mut patient = Patient::new("Kai", Gender::Unspecified);
        patient.add_injury(lost_limb(BodyLocation::RightHand));
        assert!(patient.is_location_missing(BodyLocation::RightHand));
        assert!(!patient.is_location_missing(BodyLocation::RightArm));
    }

    #[test]
    fn test_replace_missing_injury_is_noop() {
        let mut patient = Patient::new("Kai", Gender::Unspecified);
        let id = patient.add_injury(Injury::new(InjuryKind::Cut, BodyLocation::Chest, 1, 3));
        patient.remove_injury(id);
        let replaced = patient.replace_injury(
            id,
            Injury::new(InjuryKind::Bruise, BodyLocation::Chest, 1, 2),
        );
        assert!(replaced.is_none());
        assert!(patient.injuries().is_empty());
    }

    #[test]
    fn test_settled_permanent_needs_no_treatment() {
        let mut patient = Patient::new("Kai", Gender::Unspecified);
        let id = patient.add_injury(lost_limb(BodyLocation::LeftLeg));
        assert!(patient.needs_treatment());
        if let Some(injury) = patient.injury_mut(id) {
            injury.time = 0;
        }
        assert!(!patient.needs_treatment());
    }
}
