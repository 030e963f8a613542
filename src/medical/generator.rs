//! Combat injury generation
//!
//! Turns the hit count a patient took in a fight into concrete injuries: each
//! hit picks a body location, hits pile up per location, and the pile height
//! selects an injury from that location's severity ladder.

use std::collections::BTreeMap;

use crate::core::types::InjuryId;
use crate::medical::body_location::{resolve_hit_location, BodyLocation, HitTable};
use crate::medical::catalog::InjuryCatalog;
use crate::medical::dice::RandomSource;
use crate::medical::effect::EffectContext;
use crate::medical::injury::Injury;
use crate::medical::injury_kind::InjuryKind;
use crate::medical::stress::gen_stress_ledger;
use crate::personnel::Patient;

/// Critical-hit bonus for anyone outside a mek or fighter cockpit
const EXPOSED_CRIT_MODIFIER: u32 = 2;

/// Total on 2d6 + hits + modifier above which a hit lands twice
const CRIT_THRESHOLD: u32 = 12;

/// Percent chance a broken back comes with a severed spine
const SEVERED_SPINE_CHANCE: u32 = 15;

/// Hit table and critical modifier for the patient's unit
pub fn hit_profile(patient: &Patient) -> (HitTable, u32) {
    match patient.unit_class {
        Some(unit) if unit.is_cockpit() => (HitTable::MEK_AND_AERO, 0),
        _ => (HitTable::GENERAL, EXPOSED_CRIT_MODIFIER),
    }
}

/// Spread `hits` over body locations
///
/// Missing locations are never drawn. Every hit adds one to its location and a
/// critical adds a second; the critical check uses the fight's total hit count,
/// so heavy fights cluster damage.
pub fn accumulate_hits<R: RandomSource + ?Sized>(
    patient: &Patient,
    hits: u32,
    rng: &mut R,
) -> BTreeMap<BodyLocation, u32> {
    let (table, crit_modifier) = hit_profile(patient);
    let mut accumulator = BTreeMap::new();

    for _ in 0..hits {
        let location =
            resolve_hit_location(&table, rng, |loc| !patient.is_location_missing(loc));
        *accumulator.entry(location).or_insert(0) += 1;

        if is_critical(rng.d6n(2), hits, crit_modifier) {
            *accumulator.entry(location).or_insert(0) += 1;
        }
    }

    accumulator
}

/// Does a 2d6 `roll` in a fight of `hits` hits land a second time?
pub fn is_critical(roll: u32, hits: u32, crit_modifier: u32) -> bool {
    roll.saturating_add(hits).saturating_add(crit_modifier) > CRIT_THRESHOLD
}

/// Injury kinds and severities for `level` accumulated hits on one location
pub fn severity_ladder<R: RandomSource + ?Sized>(
    location: BodyLocation,
    level: u32,
    rng: &mut R,
) -> Vec<(InjuryKind, u32)> {
    if level == 0 {
        return Vec::new();
    }

    match location {
        loc if loc.is_limb() => match level {
            1 => vec![(cut_or_bruise(rng), 1)],
            2 => vec![(InjuryKind::Sprain, 1)],
            3 => vec![(InjuryKind::BrokenLimb, 1)],
            _ => vec![(InjuryKind::LostLimb, 1)],
        },
        BodyLocation::Head => match level {
            1 => vec![(InjuryKind::Laceration, 1)],
            2 | 3 => vec![(InjuryKind::Concussion, level - 1)],
            4 => vec![(InjuryKind::CerebralContusion, 1)],
            _ => vec![(InjuryKind::Cte, 1)],
        },
        BodyLocation::Chest => match level {
            1 => vec![(cut_or_bruise(rng), 1)],
            2 => vec![(InjuryKind::BrokenRib, 1)],
            3 => vec![(InjuryKind::BrokenCollarBone, 1)],
            4 => vec![(InjuryKind::PuncturedLung, 1)],
            _ => {
                let mut kinds = vec![(InjuryKind::BrokenBack, 1)];
                if rng.percent(SEVERED_SPINE_CHANCE) {
                    kinds.push((InjuryKind::SeveredSpine, 1));
                }
                kinds
            }
        },
        BodyLocation::Abdomen => match level {
            1 => vec![(cut_or_bruise(rng), 1)],
            2 => vec![(InjuryKind::BruisedKidney, 1)],
            _ => {
                let severity = (level - 2).min(InjuryKind::InternalBleeding.max_severity());
                vec![(InjuryKind::InternalBleeding, severity)]
            }
        },
        _ => Vec::new(),
    }
}

/// Injuries for `level` accumulated hits on one location
pub fn injuries_for_location<R: RandomSource + ?Sized>(
    catalog: &InjuryCatalog,
    patient: &Patient,
    location: BodyLocation,
    level: u32,
    rng: &mut R,
) -> Vec<Injury> {
    severity_ladder(location, level, rng)
        .into_iter()
        .map(|(kind, severity)| catalog.new_injury(patient, kind, location, severity, rng))
        .collect()
}

fn cut_or_bruise<R: RandomSource + ?Sized>(rng: &mut R) -> InjuryKind {
    if rng.draw(2) == 0 {
        InjuryKind::Cut
    } else {
        InjuryKind::Bruise
    }
}

/// New injuries for a patient who took `hits` hits in a fight
///
/// Nothing is attached; the caller decides what to do with them.
pub fn generate_combat_injuries<R: RandomSource + ?Sized>(
    catalog: &InjuryCatalog,
    patient: &Patient,
    hits: u32,
    rng: &mut R,
) -> Vec<Injury> {
    let accumulator = accumulate_hits(patient, hits, rng);
    let mut injuries = Vec::new();
    for (location, level) in accumulator {
        injuries.extend(injuries_for_location(catalog, patient, location, level, rng));
    }
    injuries
}

/// Process a patient returning from a fight with `hits` fresh hits
///
/// Existing injuries first face their stress effects, then the new combat
/// injuries are attached. Returns the ids of the new injuries.
pub fn diagnose<R: RandomSource + ?Sized>(
    ctx: &EffectContext<'_>,
    patient: &mut Patient,
    hits: u32,
    rng: &mut R,
) -> Vec<InjuryId> {
    if patient.is_dead() || hits == 0 {
        return Vec::new();
    }

    let stress = gen_stress_ledger(patient, hits);
    for description in stress.descriptions() {
        tracing::debug!(patient = %patient.name, "{}", description);
    }
    stress.apply(ctx, patient, None, rng);
    if patient.is_dead() {
        return Vec::new();
    }

    let injuries = generate_combat_injuries(ctx.catalog, patient, hits, rng);
    if injuries.is_empty() {
        return Vec::new();
    }

    let names: Vec<String> = injuries.iter().map(|i| i.name()).collect();
    let worst = injuries.iter().map(|i| i.level()).max();
    tracing::info!(patient = %patient.name, hits, injuries = injuries.len(), worst = ?worst, "returned from combat injured");
    patient.log_event(
        ctx.day,
        format!("Returned from combat with: {}", names.join(", ")),
    );

    injuries
        .into_iter()
        .map(|injury| patient.add_injury(injury))
        .collect()
}
