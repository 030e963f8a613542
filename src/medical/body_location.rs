//! Body locations for injury tracking and weighted hit-location tables

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::medical::dice::RandomSource;

/// Anatomical site an injury is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyLocation {
    Head,
    Chest,
    Abdomen,
    LeftArm,
    LeftHand,
    LeftLeg,
    LeftFoot,
    RightArm,
    RightHand,
    RightLeg,
    RightFoot,
    /// Whole-body conditions with no specific site
    Generic,
    /// Internal organs, not reachable by a hit roll
    Internal,
}

impl BodyLocation {
    /// Returns all body locations
    pub fn all() -> [BodyLocation; 13] {
        [
            BodyLocation::Head,
            BodyLocation::Chest,
            BodyLocation::Abdomen,
            BodyLocation::LeftArm,
            BodyLocation::LeftHand,
            BodyLocation::LeftLeg,
            BodyLocation::LeftFoot,
            BodyLocation::RightArm,
            BodyLocation::RightHand,
            BodyLocation::RightLeg,
            BodyLocation::RightFoot,
            BodyLocation::Generic,
            BodyLocation::Internal,
        ]
    }

    /// Is this an arm, hand, leg or foot?
    pub fn is_limb(&self) -> bool {
        self.is_arm() || self.is_hand() || self.is_leg()
    }

    /// Is this a leg zone (including feet)?
    pub fn is_leg(&self) -> bool {
        matches!(
            self,
            BodyLocation::LeftLeg
                | BodyLocation::RightLeg
                | BodyLocation::LeftFoot
                | BodyLocation::RightFoot
        )
    }

    /// Is this an arm zone?
    pub fn is_arm(&self) -> bool {
        matches!(self, BodyLocation::LeftArm | BodyLocation::RightArm)
    }

    /// Is this a hand zone?
    pub fn is_hand(&self) -> bool {
        matches!(self, BodyLocation::LeftHand | BodyLocation::RightHand)
    }

    /// The location this one hangs off; losing the parent loses this too
    pub fn parent(&self) -> Option<BodyLocation> {
        match self {
            BodyLocation::LeftHand => Some(BodyLocation::LeftArm),
            BodyLocation::RightHand => Some(BodyLocation::RightArm),
            BodyLocation::LeftFoot => Some(BodyLocation::LeftLeg),
            BodyLocation::RightFoot => Some(BodyLocation::RightLeg),
            _ => None,
        }
    }

    /// Lowercase display name, e.g. "left arm"
    pub fn name(&self) -> &'static str {
        match self {
            BodyLocation::Head => "head",
            BodyLocation::Chest => "chest",
            BodyLocation::Abdomen => "abdomen",
            BodyLocation::LeftArm => "left arm",
            BodyLocation::LeftHand => "left hand",
            BodyLocation::LeftLeg => "left leg",
            BodyLocation::LeftFoot => "left foot",
            BodyLocation::RightArm => "right arm",
            BodyLocation::RightHand => "right hand",
            BodyLocation::RightLeg => "right leg",
            BodyLocation::RightFoot => "right foot",
            BodyLocation::Generic => "body",
            BodyLocation::Internal => "internal organs",
        }
    }
}

impl fmt::Display for BodyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cumulative hit-location table
///
/// Entries are `(threshold, location)` with strictly increasing thresholds; a
/// draw `d` in `1..=span` lands on the first entry whose threshold is `>= d`.
#[derive(Debug, Clone, Copy)]
pub struct HitTable {
    entries: &'static [(u32, BodyLocation)],
}

impl HitTable {
    /// Infantry, vehicle crews and everyone not in a cockpit
    pub const GENERAL: HitTable = HitTable {
        entries: &[
            (25, BodyLocation::Head),
            (41, BodyLocation::LeftLeg),
            (48, BodyLocation::LeftFoot),
            (64, BodyLocation::RightLeg),
            (71, BodyLocation::RightFoot),
            (91, BodyLocation::LeftArm),
            (98, BodyLocation::LeftHand),
            (118, BodyLocation::RightArm),
            (125, BodyLocation::RightHand),
            (165, BodyLocation::Chest),
            (200, BodyLocation::Abdomen),
        ],
    };

    /// Mek and aerospace pilots: the cockpit shields the limbs, not the head
    pub const MEK_AND_AERO: HitTable = HitTable {
        entries: &[
            (40, BodyLocation::Head),
            (50, BodyLocation::LeftLeg),
            (53, BodyLocation::LeftFoot),
            (63, BodyLocation::RightLeg),
            (66, BodyLocation::RightFoot),
            (80, BodyLocation::LeftArm),
            (88, BodyLocation::LeftHand),
            (102, BodyLocation::RightArm),
            (110, BodyLocation::RightHand),
            (160, BodyLocation::Chest),
            (200, BodyLocation::Abdomen),
        ],
    };

    /// Highest threshold; draws span `1..=span`
    pub fn span(&self) -> u32 {
        self.entries.last().map_or(0, |(threshold, _)| *threshold)
    }

    /// Location for a 1-based draw, or None past the end of the table
    pub fn lookup(&self, draw: u32) -> Option<BodyLocation> {
        let idx = self.entries.partition_point(|(threshold, _)| *threshold < draw);
        self.entries.get(idx).map(|(_, location)| *location)
    }

    /// Width of the band a location occupies in the table
    pub fn weight(&self, location: BodyLocation) -> u32 {
        let mut previous = 0;
        let mut weight = 0;
        for (threshold, entry) in self.entries {
            if *entry == location {
                weight += threshold - previous;
            }
            previous = *threshold;
        }
        weight
    }
}

/// Roll a body location on `table`, re-rolling until `is_valid` accepts it
///
/// The caller must guarantee that at least one location in the table passes
/// `is_valid`; otherwise this never returns. Head, chest and abdomen can never
/// be lost, so excluding missing limbs always satisfies this.
pub fn resolve_hit_location<R, F>(table: &HitTable, rng: &mut R, is_valid: F) -> BodyLocation
where
    R: RandomSource + ?Sized,
    F: Fn(BodyLocation) -> bool,
{
    let span = table.span();
    loop {
        let draw = rng.draw(span) + 1;
        if let Some(location) = table.lookup(draw) {
            if is_valid(location) {
                return location;
            }
        }
    }
}
