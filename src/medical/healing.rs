//! Daily healing resolution
//!
//! Once per campaign day every patient goes through up to three passes:
//!
//! 1. Treatment, if a qualified doctor is assigned and the waiting period is
//!    over: one fumble / critical / success roll per untreated injury.
//! 2. Untreated complications, if no qualified doctor is assigned.
//! 3. Natural healing, always.
//!
//! Each pass collects its effects into an [`EffectLedger`] before any of them
//! runs.

use crate::core::config::MedicalConfig;
use crate::medical::dice::RandomSource;
use crate::medical::effect::{Effect, EffectAction, EffectContext, EffectLedger, RollGate};
use crate::personnel::{Doctor, Patient};

/// Treatment pass: one outcome per injury the doctor has not yet worked on
///
/// The treatment roll is drawn here so the descriptions can name the outcome;
/// the effects themselves only mutate when applied.
pub fn gen_medical_treatment<R: RandomSource + ?Sized>(
    config: &MedicalConfig,
    patient: &Patient,
    doctor: &Doctor,
    rng: &mut R,
) -> EffectLedger {
    let level = doctor.effective_skill();
    let fumble_limit = config.fumble_limit(level);
    let crit_limit = config.crit_limit(level);

    // Extremes of each band teach the doctor something
    let mistake_band = (fumble_limit / 10).max(1);
    let brilliance_band = (99 - ((99 - crit_limit) as f64 / 10.0).round() as u32).min(98);

    let mut ledger = EffectLedger::new();
    let mut xp = 0;

    for injury in patient.injuries() {
        // Nothing left to treat at zero days; natural healing settles it
        if injury.worked_on || injury.time == 0 {
            continue;
        }

        let roll = rng.draw(100);
        if roll < mistake_band {
            xp += config.mistake_xp;
        } else if roll > brilliance_band {
            xp += config.success_xp;
        }

        let name = injury.name();
        let crit_reduction = injury.time / 10;

        if roll < fumble_limit {
            ledger.push(Effect::new(
                format!(
                    "{} made a mistake in the treatment of {}'s {}, which will worsen",
                    doctor.name, patient.name, name
                ),
                EffectAction::TreatmentFumble { injury: injury.id },
            ));
        } else if roll > crit_limit && crit_reduction > 0 {
            ledger.push(Effect::new(
                format!(
                    "{} performed amazing work treating {}'s {} ({} fewer day(s) to heal)",
                    doctor.name, patient.name, name, crit_reduction
                ),
                EffectAction::TreatmentCritical {
                    injury: injury.id,
                    days: crit_reduction,
                },
            ));
        } else {
            let xp_chance = (100.0 / config.n_tasks_xp as f64).round() as u32;
            ledger.push(Effect::new(
                format!(
                    "{} successfully treated {}'s {} [{}% chance of gaining {} XP]",
                    doctor.name, patient.name, name, xp_chance, config.task_xp
                ),
                EffectAction::TreatmentSuccess { injury: injury.id },
            ));
        }
    }

    if xp > 0 {
        ledger.push(Effect::new(
            format!("{} gains {} XP", doctor.name, xp),
            EffectAction::AwardXp { amount: xp },
        ));
    }

    ledger
}

/// Untreated pass: open injuries nobody is caring for may get worse
pub fn gen_untreated_effects(config: &MedicalConfig, patient: &Patient) -> EffectLedger {
    let gate = RollGate::Percent(config.untreated_complication_chance);
    patient
        .injuries()
        .iter()
        .filter(|i| i.time > 0 && !i.permanent && !i.worked_on)
        .map(|injury| {
            Effect::new(
                format!(
                    "{}% chance of {}'s {} getting worse",
                    gate.chance_percent(),
                    patient.name,
                    injury.name()
                ),
                EffectAction::Complication {
                    injury: injury.id,
                    gate,
                },
            )
        })
        .collect()
}

/// Natural healing pass
///
/// Injuries at one day or less heal and disappear, except that untreated
/// soft-tissue injuries may instead settle into a permanent condition.
/// Everything else loses a day; permanent injuries stop at zero.
pub fn gen_natural_healing(config: &MedicalConfig, patient: &Patient) -> EffectLedger {
    let permanence = RollGate::OneIn(config.soft_tissue_permanence_one_in);
    let mut ledger = EffectLedger::new();

    for injury in patient.injuries() {
        let name = injury.name();
        if injury.time <= 1 && !injury.permanent {
            if injury.kind.is_soft_tissue() && !injury.worked_on {
                let settle = permanence.chance_percent();
                ledger.push(Effect::new(
                    format!(
                        "{}% chance of {} healing, {}% chance of it becoming permanent",
                        100 - settle,
                        name,
                        settle
                    ),
                    EffectAction::HealOrSettle {
                        injury: injury.id,
                        permanence,
                    },
                ));
            } else {
                ledger.push(Effect::new(
                    format!("certain healing of {}", name),
                    EffectAction::Heal { injury: injury.id },
                ));
            }
        } else if injury.time > 1 {
            ledger.push(Effect::new(
                format!("{} heals by one day", name),
                EffectAction::Recover { injury: injury.id },
            ));
        } else if injury.time == 1 && injury.permanent {
            ledger.push(Effect::new(
                format!("{} is permanent and stops healing", name),
                EffectAction::Settle { injury: injury.id },
            ));
        }
    }

    ledger
}

/// Run one day of medical care for `patient`
///
/// `doctor` is whoever is assigned to the patient; an absent or unqualified
/// doctor selects the untreated path. Returns every effect collected this day,
/// in application order.
pub fn resolve_daily_healing<R: RandomSource + ?Sized>(
    ctx: &EffectContext<'_>,
    patient: &mut Patient,
    doctor: Option<&mut Doctor>,
    rng: &mut R,
) -> Vec<Effect> {
    if patient.is_dead() {
        return Vec::new();
    }

    let config = ctx.config;
    let mut collected = Vec::new();

    match doctor {
        Some(doctor) if doctor.is_qualified() => {
            if patient.days_to_wait_for_healing == 0 && patient.needs_treatment() {
                let treatment = gen_medical_treatment(config, patient, doctor, rng);
                collected.extend_from_slice(treatment.effects());
                treatment.apply(ctx, patient, Some(doctor), rng);
                patient.days_to_wait_for_healing = config.healing_waiting_period;
            }
        }
        _ => {
            if patient.needs_treatment() {
                let untreated = gen_untreated_effects(config, patient);
                collected.extend_from_slice(untreated.effects());
                untreated.apply(ctx, patient, None, rng);
            }
        }
    }

    let natural = gen_natural_healing(config, patient);
    collected.extend_from_slice(natural.effects());
    natural.apply(ctx, patient, None, rng);

    patient.days_to_wait_for_healing = patient.days_to_wait_for_healing.saturating_sub(1);
    patient.reset_worked_on();

    tracing::debug!(
        patient = %patient.name,
        effects = collected.len(),
        injuries = patient.injuries().len(),
        "daily healing resolved"
    );

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medical::catalog::InjuryCatalog;
    use crate::medical::dice::ScriptedRolls;
    use crate::medical::{BodyLocation, InjuryKind};
    use crate::personnel::Gender;

    struct Fixture {
        catalog: InjuryCatalog,
        config: MedicalConfig,
        patient: Patient,
    }

    impl Fixture {
        fn new() -> Self {
            let config = MedicalConfig::default();
            Self {
                catalog: InjuryCatalog::new(&config),
                config,
                patient: Patient::new("Ada", Gender::Female),
            }
        }

        fn injure(&mut self, kind: InjuryKind, location: BodyLocation, time: u32) -> crate::core::InjuryId {
            let mut rolls = ScriptedRolls::constant(99);
            let mut injury = self.catalog.new_injury(&self.patient, kind, location, 1, &mut rolls);
            injury.time = time;
            self.patient.add_injury(injury)
        }

        fn ctx(&self) -> EffectContext<'_> {
            EffectContext {
                catalog: &self.catalog,
                config: &self.config,
                day: 1,
            }
        }
    }

    #[test]
    fn test_fumble_description_and_outcome() {
        let mut fx = Fixture::new();
        let id = fx.injure(InjuryKind::BrokenLimb, BodyLocation::LeftArm, 30);
        let doctor = Doctor::new("Vasquez", 0);

        let mut rolls = ScriptedRolls::constant(10);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        assert_eq!(ledger.len(), 1);
        assert!(matches!(ledger.effects()[0].action, EffectAction::TreatmentFumble { .. }));

        let ctx = fx.ctx();
        let mut patient = fx.patient.clone();
        ledger.apply(&ctx, &mut patient, None, &mut rolls);
        let injury = patient.injury(id).expect("fumble must not remove the injury");
        assert_eq!(injury.time, 36);
        assert!(injury.worked_on);
    }

    #[test]
    fn test_fumble_on_short_injury_adds_five_days() {
        let mut fx = Fixture::new();
        let id = fx.injure(InjuryKind::Cut, BodyLocation::Chest, 3);
        let doctor = Doctor::new("Vasquez", 0);
        let mut rolls = ScriptedRolls::constant(10);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        let ctx = fx.ctx();
        let mut patient = fx.patient.clone();
        ledger.apply(&ctx, &mut patient, None, &mut rolls);
        assert_eq!(patient.injury(id).map(|i| i.time), Some(8));
    }

    #[test]
    fn test_critical_cuts_a_tenth() {
        let mut fx = Fixture::new();
        let id = fx.injure(InjuryKind::BrokenBack, BodyLocation::Chest, 150);
        let doctor = Doctor::new("Vasquez", 10);
        // 99 > crit limit 49 at skill 10
        let mut rolls = ScriptedRolls::constant(99);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        assert_eq!(
            ledger.effects()[0].action,
            EffectAction::TreatmentCritical { injury: id, days: 15 }
        );
    }

    #[test]
    fn test_critical_rounds_down() {
        let mut fx = Fixture::new();
        let sprain = fx.injure(InjuryKind::Sprain, BodyLocation::RightLeg, 15);
        let short = fx.injure(InjuryKind::Bruise, BodyLocation::Chest, 9);
        let doctor = Doctor::new("Vasquez", 10);
        let mut rolls = ScriptedRolls::constant(99);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        assert_eq!(
            ledger.effects()[0].action,
            EffectAction::TreatmentCritical { injury: sprain, days: 1 }
        );
        // Under ten days there is nothing to shave off
        assert_eq!(
            ledger.effects()[1].action,
            EffectAction::TreatmentSuccess { injury: short }
        );
    }

    #[test]
    fn test_zero_day_injury_left_to_natural_healing() {
        let mut fx = Fixture::new();
        fx.injure(InjuryKind::Cut, BodyLocation::Chest, 0);
        let doctor = Doctor::new("Vasquez", 0);
        let mut rolls = ScriptedRolls::constant(10);
        assert!(gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls).is_empty());
    }

    #[test]
    fn test_middle_roll_is_success() {
        let mut fx = Fixture::new();
        let id = fx.injure(InjuryKind::Sprain, BodyLocation::LeftLeg, 12);
        let doctor = Doctor::new("Vasquez", 5);
        let mut rolls = ScriptedRolls::constant(50);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        assert_eq!(
            ledger.effects()[0].action,
            EffectAction::TreatmentSuccess { injury: id }
        );
        assert!(ledger.effects()[0].description.contains("4% chance of gaining 1 XP"));
    }

    #[test]
    fn test_mistake_xp_awarded_on_worst_rolls() {
        let mut fx = Fixture::new();
        fx.config.mistake_xp = 2;
        fx.injure(InjuryKind::Cut, BodyLocation::Chest, 3);
        let doctor = Doctor::new("Vasquez", 0);
        let mut rolls = ScriptedRolls::constant(0);
        let ledger = gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.effects()[1].action, EffectAction::AwardXp { amount: 2 });
    }

    #[test]
    fn test_settled_permanent_not_treated() {
        let mut fx = Fixture::new();
        fx.injure(InjuryKind::LostLimb, BodyLocation::LeftArm, 0);
        let doctor = Doctor::new("Vasquez", 5);
        let mut rolls = ScriptedRolls::constant(50);
        assert!(gen_medical_treatment(&fx.config, &fx.patient, &doctor, &mut rolls).is_empty());
    }

    #[test]
    fn test_untreated_skips_permanent_and_worked_on() {
        let mut fx = Fixture::new();
        fx.injure(InjuryKind::LostLimb, BodyLocation::LeftArm, 10);
        let cut = fx.injure(InjuryKind::Cut, BodyLocation::Chest, 3);
        let treated = fx.injure(InjuryKind::Bruise, BodyLocation::Chest, 2);
        if let Some(injury) = fx.patient.injury_mut(treated) {
            injury.worked_on = true;
        }

        let ledger = gen_untreated_effects(&fx.config, &fx.patient);
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.effects()[0].action,
            EffectAction::Complication {
                injury: cut,
                gate: RollGate::Percent(30)
            }
        );
    }

    #[test]
    fn test_natural_healing_transitions() {
        let mut fx = Fixture::new();
        let long = fx.injure(InjuryKind::Cut, BodyLocation::Chest, 5);
        let done = fx.injure(InjuryKind::Bruise, BodyLocation::Chest, 1);
        let soft = fx.injure(InjuryKind::Sprain, BodyLocation::LeftLeg, 1);
        let perm = fx.injure(InjuryKind::LostLimb, BodyLocation::RightLeg, 1);
        let settled = fx.injure(InjuryKind::LostLimb, BodyLocation::RightArm, 0);

        let ledger = gen_natural_healing(&fx.config, &fx.patient);
        let actions: Vec<EffectAction> = ledger.effects().iter().map(|e| e.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                EffectAction::Recover { injury: long },
                EffectAction::Heal { injury: done },
                EffectAction::HealOrSettle {
                    injury: soft,
                    permanence: RollGate::OneIn(6)
                },
                EffectAction::Settle { injury: perm },
            ]
        );
        assert!(actions.iter().all(|a| *a != EffectAction::Settle { injury: settled }));
        assert!(ledger.effects()[2].description.starts_with("83% chance"));
    }

    #[test]
    fn test_treated_soft_tissue_heals_for_sure() {
        let mut fx = Fixture::new();
        let soft = fx.injure(InjuryKind::BrokenLimb, BodyLocation::LeftArm, 1);
        if let Some(injury) = fx.patient.injury_mut(soft) {
            injury.worked_on = true;
        }
        let ledger = gen_natural_healing(&fx.config, &fx.patient);
        assert_eq!(ledger.effects()[0].action, EffectAction::Heal { injury: soft });
    }

    #[test]
    fn test_doctor_respects_waiting_period() {
        let mut fx = Fixture::new();
        fx.config.healing_waiting_period = 3;
        fx.injure(InjuryKind::BrokenLimb, BodyLocation::LeftArm, 30);
        let mut doctor = Doctor::new("Vasquez", 5);
        let mut rolls = ScriptedRolls::constant(50);
        let ctx = EffectContext {
            catalog: &fx.catalog,
            config: &fx.config,
            day: 1,
        };
        let mut patient = fx.patient.clone();

        let treated_days: Vec<bool> = (0..6)
            .map(|_| {
                resolve_daily_healing(&ctx, &mut patient, Some(&mut doctor), &mut rolls)
                    .iter()
                    .any(|e| matches!(e.action, EffectAction::TreatmentSuccess { .. }))
            })
            .collect();
        assert_eq!(treated_days, vec![true, false, false, true, false, false]);
        assert_eq!(doctor.n_tasks, 2);
    }

    #[test]
    fn test_unqualified_doctor_means_untreated() {
        let mut fx = Fixture::new();
        fx.injure(InjuryKind::Cut, BodyLocation::Chest, 3);
        let mut helper = Doctor::new("Rook", 9);
        helper.is_doctor = false;
        let mut rolls = ScriptedRolls::constant(50);
        let ctx = fx.ctx();
        let mut patient = fx.patient.clone();
        let effects = resolve_daily_healing(&ctx, &mut patient, Some(&mut helper), &mut rolls);
        assert!(matches!(effects[0].action, EffectAction::Complication { .. }));
    }

    #[test]
    fn test_worked_on_cleared_at_end_of_day() {
        let mut fx = Fixture::new();
        fx.injure(InjuryKind::BrokenLimb, BodyLocation::LeftArm, 30);
        let mut doctor = Doctor::new("Vasquez", 5);
        let mut rolls = ScriptedRolls::constant(50);
        let ctx = fx.ctx();
        let mut patient = fx.patient.clone();
        resolve_daily_healing(&ctx, &mut patient, Some(&mut doctor), &mut rolls);
        assert!(patient.injuries().iter().all(|i| !i.worked_on));
        assert_eq!(patient.injuries()[0].time, 29);
    }
}
