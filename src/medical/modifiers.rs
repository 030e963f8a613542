//! Skill-check penalties contributed by open injuries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::medical::body_location::BodyLocation;
use crate::medical::injury::Injury;
use crate::medical::injury_kind::InjuryKind;

/// Skill a penalty applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModifiedSkill {
    Piloting,
    Gunnery,
}

/// A target-number penalty (higher is worse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub skill: ModifiedSkill,
    pub value: i32,
    /// Stays after the injury settles
    pub permanent: bool,
}

impl Modifier {
    fn new(skill: ModifiedSkill, value: i32, permanent: bool) -> Self {
        Self {
            skill,
            value,
            permanent,
        }
    }
}

/// Penalties for one injury; permanent injuries yield permanent modifiers
pub fn injury_modifiers(injury: &Injury) -> Vec<Modifier> {
    use ModifiedSkill::*;

    let (piloting, gunnery) = match injury.kind {
        InjuryKind::Cut | InjuryKind::Bruise | InjuryKind::Laceration => (0, 0),
        InjuryKind::Sprain => limb_penalty(injury.location, 1),
        InjuryKind::BrokenLimb => limb_penalty(injury.location, 2),
        InjuryKind::LostLimb => limb_penalty(injury.location, 3),
        InjuryKind::Concussion => {
            let value = injury.severity as i32;
            (value, value)
        }
        InjuryKind::CerebralContusion => (2, 2),
        InjuryKind::Cte => (3, 3),
        InjuryKind::BrokenRib => (1, 0),
        InjuryKind::BrokenCollarBone => (1, 1),
        InjuryKind::PuncturedLung => (2, 0),
        InjuryKind::BruisedKidney => (0, 0),
        InjuryKind::InternalBleeding => (injury.severity as i32, 0),
        InjuryKind::BrokenBack => (4, 1),
        InjuryKind::SeveredSpine => (5, 0),
    };

    let mut modifiers = Vec::new();
    if piloting != 0 {
        modifiers.push(Modifier::new(Piloting, piloting, injury.permanent));
    }
    if gunnery != 0 {
        modifiers.push(Modifier::new(Gunnery, gunnery, injury.permanent));
    }
    modifiers
}

/// Legs hamper piloting, arms hamper gunnery
fn limb_penalty(location: BodyLocation, value: i32) -> (i32, i32) {
    if location.is_leg() {
        (value, 0)
    } else {
        (0, value)
    }
}

/// Sum of all penalties per skill
pub fn total_modifiers<'a>(injuries: impl IntoIterator<Item = &'a Injury>) -> BTreeMap<ModifiedSkill, i32> {
    let mut totals = BTreeMap::new();
    for modifier in injuries.into_iter().flat_map(|i| i.modifiers()) {
        *totals.entry(modifier.skill).or_insert(0) += modifier.value;
    }
    totals
}
