//! Stress transitions: what an open injury risks when its carrier is hit again
//!
//! Odds grow with the fresh hit count through [`RollGate::Stress`]. The kinds
//! chain into each other:
//!
//! - concussion -> severe concussion -> cerebral contusion -> CTE -> death
//! - broken rib -> punctured lung
//! - bruised kidney -> internal bleeding -> worse bleeding -> death

use crate::medical::body_location::BodyLocation;
use crate::medical::effect::{Effect, EffectAction, EffectLedger, RollGate};
use crate::medical::injury::Injury;
use crate::medical::injury_kind::InjuryKind;
use crate::personnel::Patient;

/// Fresh hits beyond which CTE kills without a roll
const CTE_CERTAIN_DEATH_HITS: u32 = 4;

/// Stress effects of every injury `patient` carries, for `hits` fresh hits
pub fn gen_stress_ledger(patient: &Patient, hits: u32) -> EffectLedger {
    patient
        .injuries()
        .iter()
        .flat_map(|injury| stress_effects(patient, injury, hits))
        .collect()
}

/// Effects `injury` risks when `patient` takes `hits` fresh hits
pub fn stress_effects(patient: &Patient, injury: &Injury, hits: u32) -> Vec<Effect> {
    if hits == 0 {
        return Vec::new();
    }

    let gate = RollGate::Stress { hits };
    let chance = gate.chance_percent();
    let escalate = |kind: InjuryKind, location: BodyLocation, severity: u32, what: &str| {
        Effect::new(
            format!("{}% chance of {}'s {} {}", chance, patient.name, injury.kind, what),
            EffectAction::Escalate {
                injury: injury.id,
                kind,
                location,
                severity,
                gate,
            },
        )
    };

    match injury.kind {
        InjuryKind::Concussion if injury.severity < InjuryKind::Concussion.max_severity() => {
            vec![escalate(
                InjuryKind::Concussion,
                BodyLocation::Head,
                injury.severity + 1,
                "worsening",
            )]
        }
        InjuryKind::Concussion => vec![escalate(
            InjuryKind::CerebralContusion,
            BodyLocation::Head,
            1,
            "developing into a cerebral contusion",
        )],
        InjuryKind::CerebralContusion => vec![escalate(
            InjuryKind::Cte,
            BodyLocation::Head,
            1,
            "developing into chronic traumatic encephalopathy",
        )],
        InjuryKind::Cte if hits > CTE_CERTAIN_DEATH_HITS => vec![Effect::new(
            format!("certain death for {}", patient.name),
            EffectAction::Death {
                gate: RollGate::Always,
            },
        )],
        InjuryKind::Cte => vec![Effect::new(
            format!("{}% chance of {} dying of brain trauma", chance, patient.name),
            EffectAction::Death { gate },
        )],
        InjuryKind::BrokenRib => vec![escalate(
            InjuryKind::PuncturedLung,
            BodyLocation::Chest,
            1,
            "puncturing a lung",
        )],
        InjuryKind::BruisedKidney => vec![escalate(
            InjuryKind::InternalBleeding,
            injury.location,
            1,
            "causing internal bleeding",
        )],
        InjuryKind::InternalBleeding
            if injury.severity < InjuryKind::InternalBleeding.max_severity() =>
        {
            vec![escalate(
                InjuryKind::InternalBleeding,
                injury.location,
                injury.severity + 1,
                "worsening",
            )]
        }
        InjuryKind::InternalBleeding => vec![Effect::new(
            format!("{}% chance of {} bleeding to death", chance, patient.name),
            EffectAction::Death { gate },
        )],
        _ => Vec::new(),
    }
}
