//! Advanced medical system
//!
//! Injuries are discrete records on a patient with a kind, a body location, a
//! severity and a remaining healing time. Combat hits become injuries through
//! [`generator`], existing injuries may worsen under fresh hits through
//! [`stress`], and [`healing`] resolves one day of treatment and recovery.
//! All state changes flow through an [`EffectLedger`].

pub mod body_location;
pub mod catalog;
pub mod dice;
pub mod effect;
pub mod generator;
pub mod healing;
pub mod injury;
pub mod injury_kind;
pub mod modifiers;
pub mod stress;

pub use body_location::{resolve_hit_location, BodyLocation, HitTable};
pub use catalog::{register_injury_catalog, InjuryCatalog};
pub use dice::{RandomSource, ScriptedRolls};
pub use effect::{apply_effect, Effect, EffectAction, EffectContext, EffectLedger, RollGate};
pub use generator::{diagnose, generate_combat_injuries};
pub use healing::{
    gen_medical_treatment, gen_natural_healing, gen_untreated_effects, resolve_daily_healing,
};
pub use injury::Injury;
pub use injury_kind::{InjuryKind, InjuryLevel};
pub use modifiers::{injury_modifiers, total_modifiers, ModifiedSkill, Modifier};
pub use stress::{gen_stress_ledger, stress_effects};
