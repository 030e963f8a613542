//! Effect ledger: observe first, mutate afterwards
//!
//! Resolution passes only describe what may happen. Every description is
//! computed from the state before any effect of the pass runs; the ledger then
//! applies the effects in order against a single random source.

use serde::{Deserialize, Serialize};

use crate::core::config::MedicalConfig;
use crate::core::types::{Day, InjuryId};
use crate::medical::body_location::BodyLocation;
use crate::medical::catalog::InjuryCatalog;
use crate::medical::dice::RandomSource;
use crate::medical::injury_kind::InjuryKind;
use crate::personnel::{Doctor, Patient, PersonnelStatus};

/// Random check guarding an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollGate {
    /// No roll
    Always,
    /// Passes when a percentile draw is below the value
    Percent(u32),
    /// Passes when `d6 - 1 + hits >= 5`
    Stress { hits: u32 },
    /// Passes on one face of an n-sided draw
    OneIn(u32),
}

impl RollGate {
    pub fn passes<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        match *self {
            RollGate::Always => true,
            RollGate::Percent(percent) => rng.draw(100) < percent,
            RollGate::Stress { hits } => rng.draw(6) + hits >= 5,
            RollGate::OneIn(sides) => rng.draw(sides) == 0,
        }
    }

    /// Chance of passing in whole percent, capped at 100
    pub fn chance_percent(&self) -> u32 {
        match *self {
            RollGate::Always => 100,
            RollGate::Percent(percent) => percent.min(100),
            RollGate::Stress { hits } => {
                let chance = ((1 + hits) as f64 * 100.0 / 6.0).round() as u32;
                chance.min(100)
            }
            RollGate::OneIn(sides) => {
                if sides == 0 {
                    100
                } else {
                    (100.0 / sides as f64).round() as u32
                }
            }
        }
    }
}

/// The mutation an effect performs when applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectAction {
    /// Replace an injury with a worse one
    Escalate {
        injury: InjuryId,
        kind: InjuryKind,
        location: BodyLocation,
        severity: u32,
        gate: RollGate,
    },
    /// The carrier dies of complications
    Death { gate: RollGate },
    /// Treatment went wrong: the injury takes longer
    TreatmentFumble { injury: InjuryId },
    /// Treatment went exceptionally well
    TreatmentCritical { injury: InjuryId, days: u32 },
    /// Plain treatment success, counts toward the doctor's task XP
    TreatmentSuccess { injury: InjuryId },
    /// XP for the treating doctor
    AwardXp { amount: u32 },
    /// Untreated injury takes one more day
    Complication { injury: InjuryId, gate: RollGate },
    /// Heal outright, unless the gate turns it permanent
    HealOrSettle { injury: InjuryId, permanence: RollGate },
    /// Heal and remove
    Heal { injury: InjuryId },
    /// One day of natural recovery
    Recover { injury: InjuryId },
    /// Permanent injury reaches its final state
    Settle { injury: InjuryId },
}

/// A pending effect and its pre-mutation description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub description: String,
    pub action: EffectAction,
}

impl Effect {
    pub fn new(description: impl Into<String>, action: EffectAction) -> Self {
        Self {
            description: description.into(),
            action,
        }
    }
}

/// What applying an effect needs besides the records it mutates
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub catalog: &'a InjuryCatalog,
    pub config: &'a MedicalConfig,
    pub day: Day,
}

/// Ordered list of pending effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLedger {
    effects: Vec<Effect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.description.as_str()).collect()
    }

    /// Apply every effect in order; returns how many fired
    pub fn apply<R: RandomSource + ?Sized>(
        self,
        ctx: &EffectContext<'_>,
        patient: &mut Patient,
        mut doctor: Option<&mut Doctor>,
        rng: &mut R,
    ) -> usize {
        let mut fired = 0;
        for effect in &self.effects {
            if apply_effect(effect, ctx, patient, doctor.as_deref_mut(), rng) {
                fired += 1;
            }
        }
        fired
    }
}

impl Extend<Effect> for EffectLedger {
    fn extend<T: IntoIterator<Item = Effect>>(&mut self, iter: T) {
        self.effects.extend(iter);
    }
}

impl FromIterator<Effect> for EffectLedger {
    fn from_iter<T: IntoIterator<Item = Effect>>(iter: T) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EffectLedger {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

/// Execute one effect; returns false if its gate failed or its target is gone
///
/// An effect on an injury that an earlier effect of the same pass already
/// removed is skipped. Dead patients are not mutated further.
pub fn apply_effect<R: RandomSource + ?Sized>(
    effect: &Effect,
    ctx: &EffectContext<'_>,
    patient: &mut Patient,
    doctor: Option<&mut Doctor>,
    rng: &mut R,
) -> bool {
    if patient.is_dead() {
        return false;
    }

    let day = ctx.day;
    let doctor_name = doctor
        .as_ref()
        .map_or_else(|| "The doctor".to_string(), |d| d.name.clone());

    match effect.action {
        EffectAction::Escalate {
            injury,
            kind,
            location,
            severity,
            gate,
        } => {
            let Some(old_name) = patient.injury(injury).map(|i| i.name()) else {
                return false;
            };
            if !gate.passes(rng) {
                return false;
            }
            let worse = ctx.catalog.new_injury(patient, kind, location, severity, rng);
            let new_name = worse.name();
            patient.replace_injury(injury, worse);
            tracing::debug!(patient = %patient.name, from = %old_name, to = %new_name, "injury escalated");
            patient.log_event(day, format!("{} worsened into {}", old_name, new_name));
            true
        }
        EffectAction::Death { gate } => {
            if !gate.passes(rng) {
                return false;
            }
            patient.status = PersonnelStatus::Dead;
            tracing::info!(patient = %patient.name, "died of medical complications");
            patient.log_event(day, "Died of medical complications");
            true
        }
        EffectAction::TreatmentFumble { injury } => {
            let Some(target) = patient.injury_mut(injury) else {
                return false;
            };
            let time = target.time;
            let worsened = ((time as f64 * 1.2).ceil() as u32).max(time + 5);
            target.time = worsened;
            target.worked_on = true;
            let name = target.name();
            tracing::debug!(patient = %patient.name, injury = %name, time, worsened, "treatment fumbled");
            patient.log_event(
                day,
                format!(
                    "{} made a mistake treating {}; healing now takes {} days",
                    doctor_name, name, worsened
                ),
            );
            true
        }
        EffectAction::TreatmentCritical { injury, days } => {
            let Some(target) = patient.injury_mut(injury) else {
                return false;
            };
            target.time = target.time.saturating_sub(days);
            target.worked_on = true;
            let name = target.name();
            tracing::debug!(patient = %patient.name, injury = %name, days, "critical treatment");
            patient.log_event(
                day,
                format!(
                    "{} did amazing work on {} ({} fewer day(s) to heal)",
                    doctor_name, name, days
                ),
            );
            true
        }
        EffectAction::TreatmentSuccess { injury } => {
            let Some(target) = patient.injury_mut(injury) else {
                return false;
            };
            target.worked_on = true;
            let name = target.name();
            if let Some(doctor) = doctor {
                let config = ctx.config;
                if config.task_xp > 0 && doctor.n_tasks >= config.n_tasks_xp {
                    doctor.award_xp(config.task_xp);
                    doctor.n_tasks = 0;
                    tracing::debug!(doctor = %doctor.name, xp = config.task_xp, "task XP awarded");
                } else {
                    doctor.n_tasks += 1;
                }
            }
            tracing::debug!(patient = %patient.name, injury = %name, "treated");
            patient.log_event(day, format!("{} successfully treated {}", doctor_name, name));
            true
        }
        EffectAction::AwardXp { amount } => match doctor {
            Some(doctor) => {
                doctor.award_xp(amount);
                true
            }
            None => false,
        },
        EffectAction::Complication { injury, gate } => {
            if patient.injury(injury).is_none() || !gate.passes(rng) {
                return false;
            }
            let Some(target) = patient.injury_mut(injury) else {
                return false;
            };
            target.time += 1;
            let name = target.name();
            tracing::debug!(patient = %patient.name, injury = %name, "untreated complication");
            patient.log_event(day, format!("{} did not heal properly", name));
            true
        }
        EffectAction::HealOrSettle { injury, permanence } => {
            if patient.injury(injury).is_none() {
                return false;
            }
            if permanence.passes(rng) {
                let Some(target) = patient.injury_mut(injury) else {
                    return false;
                };
                target.permanent = true;
                target.time = 0;
                let name = target.name();
                tracing::debug!(patient = %patient.name, injury = %name, "became permanent");
                patient.log_event(day, format!("{} became permanent", name));
            } else {
                heal(patient, injury, day);
            }
            true
        }
        EffectAction::Heal { injury } => heal(patient, injury, day),
        EffectAction::Recover { injury } => match patient.injury_mut(injury) {
            Some(target) => {
                target.time = target.time.saturating_sub(1);
                true
            }
            None => false,
        },
        EffectAction::Settle { injury } => match patient.injury_mut(injury) {
            Some(target) => {
                target.time = 0;
                true
            }
            None => false,
        },
    }
}

fn heal(patient: &mut Patient, injury: InjuryId, day: Day) -> bool {
    match patient.remove_injury(injury) {
        Some(healed) => {
            let name = healed.name();
            tracing::debug!(patient = %patient.name, injury = %name, "healed");
            patient.log_event(day, format!("{} healed", name));
            true
        }
        None => false,
    }
}
