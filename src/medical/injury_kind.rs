//! Injury kinds: the fixed catalog of everything that can go wrong with a body
//!
//! Each kind declares where it can occur, how severe it can get, how long it
//! takes to heal and how it is described. Stress transitions live in
//! [`crate::medical::stress`], skill penalties in [`crate::medical::modifiers`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::MedicalError;
use crate::medical::body_location::BodyLocation;
use crate::personnel::Gender;

/// How bad an injury is for the carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InjuryLevel {
    /// Heals on its own
    Minor,
    /// Needs care, takes weeks
    Major,
    /// Never fully goes away
    Chronic,
    /// Will kill without intervention
    Deadly,
}

/// Every injury kind the catalog knows, in numeric-code order
///
/// The numeric code is part of the save format and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InjuryKind {
    Cut,
    Bruise,
    Laceration,
    Sprain,
    Concussion,
    BrokenRib,
    BruisedKidney,
    BrokenLimb,
    BrokenCollarBone,
    InternalBleeding,
    LostLimb,
    CerebralContusion,
    PuncturedLung,
    /// Chronic traumatic encephalopathy
    Cte,
    BrokenBack,
    SeveredSpine,
}

impl InjuryKind {
    /// Returns all injury kinds in code order
    pub fn all() -> [InjuryKind; 16] {
        [
            InjuryKind::Cut,
            InjuryKind::Bruise,
            InjuryKind::Laceration,
            InjuryKind::Sprain,
            InjuryKind::Concussion,
            InjuryKind::BrokenRib,
            InjuryKind::BruisedKidney,
            InjuryKind::BrokenLimb,
            InjuryKind::BrokenCollarBone,
            InjuryKind::InternalBleeding,
            InjuryKind::LostLimb,
            InjuryKind::CerebralContusion,
            InjuryKind::PuncturedLung,
            InjuryKind::Cte,
            InjuryKind::BrokenBack,
            InjuryKind::SeveredSpine,
        ]
    }

    /// Stable numeric code used by save files
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<InjuryKind> {
        Self::all().get(code as usize).copied()
    }

    /// Stable string key, e.g. "am:broken_limb"
    pub fn key(&self) -> &'static str {
        match self {
            InjuryKind::Cut => "am:cut",
            InjuryKind::Bruise => "am:bruise",
            InjuryKind::Laceration => "am:laceration",
            InjuryKind::Sprain => "am:sprain",
            InjuryKind::Concussion => "am:concussion",
            InjuryKind::BrokenRib => "am:broken_rib",
            InjuryKind::BruisedKidney => "am:bruised_kidney",
            InjuryKind::BrokenLimb => "am:broken_limb",
            InjuryKind::BrokenCollarBone => "am:broken_collar_bone",
            InjuryKind::InternalBleeding => "am:internal_bleeding",
            InjuryKind::LostLimb => "am:lost_limb",
            InjuryKind::CerebralContusion => "am:cerebral_contusion",
            InjuryKind::PuncturedLung => "am:punctured_lung",
            InjuryKind::Cte => "am:cte",
            InjuryKind::BrokenBack => "am:broken_back",
            InjuryKind::SeveredSpine => "am:severed_spine",
        }
    }

    pub fn from_key(key: &str) -> Option<InjuryKind> {
        Self::all().into_iter().find(|kind| kind.key() == key)
    }

    /// Can this kind of injury occur at `location`?
    pub fn is_valid_in_location(&self, location: BodyLocation) -> bool {
        use BodyLocation::*;
        match self {
            InjuryKind::Cut | InjuryKind::Bruise | InjuryKind::Laceration => {
                !matches!(location, Generic | Internal)
            }
            InjuryKind::Sprain | InjuryKind::BrokenLimb | InjuryKind::LostLimb => location.is_limb(),
            InjuryKind::Concussion | InjuryKind::CerebralContusion | InjuryKind::Cte => {
                location == Head
            }
            InjuryKind::BrokenRib
            | InjuryKind::BrokenCollarBone
            | InjuryKind::PuncturedLung
            | InjuryKind::BrokenBack => location == Chest,
            InjuryKind::BruisedKidney => location == Abdomen,
            InjuryKind::InternalBleeding => matches!(location, Abdomen | Internal),
            InjuryKind::SeveredSpine => matches!(location, Chest | Abdomen),
        }
    }

    /// Locations this kind can occur at
    pub fn allowed_locations(&self) -> Vec<BodyLocation> {
        BodyLocation::all()
            .into_iter()
            .filter(|location| self.is_valid_in_location(*location))
            .collect()
    }

    /// Highest severity; the valid range is `1..=max_severity`
    pub fn max_severity(&self) -> u32 {
        match self {
            InjuryKind::Concussion => 2,
            InjuryKind::InternalBleeding => 3,
            _ => 1,
        }
    }

    pub fn is_valid_severity(&self, severity: u32) -> bool {
        (1..=self.max_severity()).contains(&severity)
    }

    /// Base days to heal before any modifiers
    pub fn recovery_days(&self, severity: u32) -> u32 {
        match self {
            InjuryKind::Cut => 3,
            InjuryKind::Bruise => 2,
            InjuryKind::Laceration => 7,
            InjuryKind::Sprain => 12,
            InjuryKind::Concussion => 14,
            InjuryKind::BrokenRib => 20,
            InjuryKind::BruisedKidney => 10,
            InjuryKind::BrokenLimb => 30,
            InjuryKind::BrokenCollarBone => 22,
            InjuryKind::InternalBleeding => 20 * severity,
            InjuryKind::LostLimb => 28,
            InjuryKind::CerebralContusion => 90,
            InjuryKind::PuncturedLung => 20,
            InjuryKind::Cte => 200,
            InjuryKind::BrokenBack => 150,
            InjuryKind::SeveredSpine => 180,
        }
    }

    /// Permanent kinds never heal away on their own
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            InjuryKind::LostLimb | InjuryKind::Cte | InjuryKind::SeveredSpine
        )
    }

    /// Soft-tissue kinds may settle into a permanent condition if left untreated
    pub fn is_soft_tissue(&self) -> bool {
        matches!(
            self,
            InjuryKind::BrokenLimb
                | InjuryKind::Sprain
                | InjuryKind::Concussion
                | InjuryKind::BrokenCollarBone
        )
    }

    /// Classification of an instance with the given severity
    pub fn level(&self, severity: u32) -> InjuryLevel {
        match self {
            InjuryKind::Cut
            | InjuryKind::Bruise
            | InjuryKind::Laceration
            | InjuryKind::Sprain
            | InjuryKind::BrokenRib
            | InjuryKind::BruisedKidney => InjuryLevel::Minor,
            InjuryKind::Concussion if severity > 1 => InjuryLevel::Major,
            InjuryKind::Concussion => InjuryLevel::Minor,
            InjuryKind::InternalBleeding if severity > 2 => InjuryLevel::Deadly,
            InjuryKind::InternalBleeding
            | InjuryKind::BrokenLimb
            | InjuryKind::BrokenCollarBone
            | InjuryKind::CerebralContusion
            | InjuryKind::PuncturedLung
            | InjuryKind::BrokenBack => InjuryLevel::Major,
            InjuryKind::LostLimb | InjuryKind::Cte | InjuryKind::SeveredSpine => {
                InjuryLevel::Chronic
            }
        }
    }

    /// Short lowercase name, e.g. "broken limb"
    pub fn simple_name(&self) -> &'static str {
        match self {
            InjuryKind::Cut => "cut",
            InjuryKind::Bruise => "bruise",
            InjuryKind::Laceration => "laceration",
            InjuryKind::Sprain => "sprain",
            InjuryKind::Concussion => "concussion",
            InjuryKind::BrokenRib => "broken rib",
            InjuryKind::BruisedKidney => "bruised kidney",
            InjuryKind::BrokenLimb => "broken limb",
            InjuryKind::BrokenCollarBone => "broken collar bone",
            InjuryKind::InternalBleeding => "internal bleeding",
            InjuryKind::LostLimb => "lost limb",
            InjuryKind::CerebralContusion => "cerebral contusion",
            InjuryKind::PuncturedLung => "punctured lung",
            InjuryKind::Cte => "CTE",
            InjuryKind::BrokenBack => "broken back",
            InjuryKind::SeveredSpine => "severed spine",
        }
    }

    /// Display name of an instance, e.g. "Broken left arm"
    pub fn name(&self, location: BodyLocation, severity: u32) -> String {
        match self {
            InjuryKind::Cut | InjuryKind::Bruise | InjuryKind::Laceration => {
                format!("{} ({})", capitalize(self.simple_name()), location)
            }
            InjuryKind::Sprain => format!("Sprained {}", location),
            InjuryKind::BrokenLimb => format!("Broken {}", location),
            InjuryKind::LostLimb => format!("Missing {}", location),
            InjuryKind::Concussion if severity > 1 => "Severe concussion".to_string(),
            InjuryKind::InternalBleeding => match severity {
                1 => "Internal bleeding".to_string(),
                2 => "Severe internal bleeding".to_string(),
                _ => "Critical internal bleeding".to_string(),
            },
            InjuryKind::Cte => "Chronic traumatic encephalopathy".to_string(),
            InjuryKind::SeveredSpine => format!("Severed spine ({})", spine_region(location)),
            _ => capitalize(self.simple_name()),
        }
    }

    /// Narrative description of an instance on a carrier of `gender`
    pub fn fluff(&self, location: BodyLocation, severity: u32, gender: Gender) -> String {
        let pos = gender.possessive();
        match self {
            InjuryKind::Cut => format!("A cut on {} {}", pos, location),
            InjuryKind::Bruise => format!("A bruise on {} {}", pos, location),
            InjuryKind::Laceration => format!("A deep laceration on {} {}", pos, location),
            InjuryKind::Sprain => format!("A sprained {}", location),
            InjuryKind::Concussion if severity > 1 => "A severe concussion".to_string(),
            InjuryKind::Concussion => "A concussion".to_string(),
            InjuryKind::BrokenRib => "A broken rib".to_string(),
            InjuryKind::BruisedKidney => "A bruised kidney".to_string(),
            InjuryKind::BrokenLimb => format!("A broken bone in {} {}", pos, location),
            InjuryKind::BrokenCollarBone => "A broken collar bone".to_string(),
            InjuryKind::InternalBleeding => match severity {
                1 => "Bleeding internally".to_string(),
                2 => "Severe internal bleeding".to_string(),
                _ => "Critical internal bleeding, life-threatening".to_string(),
            },
            InjuryKind::LostLimb => format!("Lost {} {}", pos, location),
            InjuryKind::CerebralContusion => "A cerebral contusion".to_string(),
            InjuryKind::PuncturedLung => "A punctured lung".to_string(),
            InjuryKind::Cte => "Lasting damage to the brain".to_string(),
            InjuryKind::BrokenBack => "A broken back".to_string(),
            InjuryKind::SeveredSpine => {
                format!("A severed spine in {} {}", pos, spine_region(location))
            }
        }
    }
}

impl fmt::Display for InjuryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

impl From<InjuryKind> for u8 {
    fn from(kind: InjuryKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for InjuryKind {
    type Error = MedicalError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        InjuryKind::from_code(code).ok_or(MedicalError::UnknownInjuryCode(code))
    }
}

fn spine_region(location: BodyLocation) -> &'static str {
    match location {
        BodyLocation::Abdomen => "lower back",
        _ => "upper back",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense_and_stable() {
        for (i, kind) in InjuryKind::all().into_iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(InjuryKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(InjuryKind::Cut.code(), 0);
        assert_eq!(InjuryKind::InternalBleeding.code(), 9);
        assert_eq!(InjuryKind::SeveredSpine.code(), 15);
        assert_eq!(InjuryKind::from_code(16), None);
    }

    #[test]
    fn test_keys_unique() {
        for kind in InjuryKind::all() {
            assert_eq!(InjuryKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(InjuryKind::from_key("am:hangnail"), None);
    }

    #[test]
    fn test_every_kind_has_a_location() {
        for kind in InjuryKind::all() {
            assert!(!kind.allowed_locations().is_empty(), "{} has no locations", kind);
        }
    }

    #[test]
    fn test_internal_bleeding_scales_with_severity() {
        let kind = InjuryKind::InternalBleeding;
        assert_eq!(kind.recovery_days(1), 20);
        assert_eq!(kind.recovery_days(2), 40);
        assert_eq!(kind.recovery_days(3), 60);
        assert_eq!(kind.level(3), InjuryLevel::Deadly);
        assert_eq!(kind.level(2), InjuryLevel::Major);
    }

    #[test]
    fn test_limb_kinds_only_on_limbs() {
        assert!(InjuryKind::BrokenLimb.is_valid_in_location(BodyLocation::LeftFoot));
        assert!(!InjuryKind::BrokenLimb.is_valid_in_location(BodyLocation::Chest));
        assert!(!InjuryKind::LostLimb.is_valid_in_location(BodyLocation::Head));
    }

    #[test]
    fn test_concussion_level_depends_on_severity() {
        assert_eq!(InjuryKind::Concussion.level(1), InjuryLevel::Minor);
        assert_eq!(InjuryKind::Concussion.level(2), InjuryLevel::Major);
    }

    #[test]
    fn test_names_include_location() {
        assert_eq!(
            InjuryKind::BrokenLimb.name(BodyLocation::LeftArm, 1),
            "Broken left arm"
        );
        assert_eq!(InjuryKind::Cut.name(BodyLocation::Chest, 1), "Cut (chest)");
        assert_eq!(
            InjuryKind::LostLimb.fluff(BodyLocation::RightHand, 1, Gender::Female),
            "Lost her right hand"
        );
        assert_eq!(
            InjuryKind::Cut.fluff(BodyLocation::LeftLeg, 1, Gender::Unspecified),
            "A cut on their left leg"
        );
    }
}
