//! Injury instances carried by a patient
//!
//! An injury tracks its kind, location, severity, remaining healing time and
//! whether it was treated today.

use serde::{Deserialize, Serialize};

use crate::core::types::InjuryId;
use crate::medical::body_location::BodyLocation;
use crate::medical::injury_kind::{InjuryKind, InjuryLevel};
use crate::medical::modifiers::Modifier;
use crate::personnel::Gender;

/// An injury on a specific body location
///
/// Only [`crate::medical::InjuryCatalog`] builds these, so location and
/// severity always satisfy the kind's constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injury {
    /// Assigned by the carrier when the injury is attached
    pub id: InjuryId,
    /// Serialized as the kind's numeric code
    pub kind: InjuryKind,
    pub location: BodyLocation,
    /// Severity, doubling as the hit count this injury absorbed
    pub severity: u32,
    /// Days left until healed
    pub time: u32,
    /// Healing time at creation
    pub original_time: u32,
    pub permanent: bool,
    /// Treated during the current day
    #[serde(default)]
    pub worked_on: bool,
}

impl Injury {
    pub(crate) fn new(kind: InjuryKind, location: BodyLocation, severity: u32, time: u32) -> Self {
        Self {
            id: InjuryId::default(),
            kind,
            location,
            severity,
            time,
            original_time: time,
            permanent: kind.is_permanent(),
            worked_on: false,
        }
    }

    pub fn level(&self) -> InjuryLevel {
        self.kind.level(self.severity)
    }

    pub fn name(&self) -> String {
        self.kind.name(self.location, self.severity)
    }

    pub fn fluff(&self, gender: Gender) -> String {
        self.kind.fluff(self.location, self.severity, gender)
    }

    /// Skill-check penalties this injury imposes while present
    pub fn modifiers(&self) -> Vec<Modifier> {
        crate::medical::modifiers::injury_modifiers(self)
    }

    /// Still healing (or permanent and not yet settled)
    pub fn is_open(&self) -> bool {
        self.time > 0 || !self.permanent
    }

    /// Fraction of the original healing time already elapsed, 0.0-1.0
    pub fn healed_fraction(&self) -> f32 {
        if self.original_time == 0 {
            return 1.0;
        }
        (1.0 - self.time as f32 / self.original_time as f32).clamp(0.0, 1.0)
    }
}
