//! Injury catalog: the only factory for injury instances

use std::sync::OnceLock;

use crate::core::config::MedicalConfig;
use crate::core::error::{MedicalError, Result};
use crate::medical::body_location::BodyLocation;
use crate::medical::dice::RandomSource;
use crate::medical::injury::Injury;
use crate::medical::injury_kind::InjuryKind;
use crate::personnel::Patient;

/// Registry of the injury kinds in play
///
/// Built once at startup and passed by reference into the engine.
#[derive(Debug, Clone)]
pub struct InjuryCatalog {
    kinds: Vec<InjuryKind>,
    /// Percent chance that a fresh healing time gets jittered
    jitter_chance: u32,
}

impl Default for InjuryCatalog {
    fn default() -> Self {
        Self::new(&MedicalConfig::default())
    }
}

static CATALOG: OnceLock<InjuryCatalog> = OnceLock::new();

/// Register the full catalog; repeated calls return the same instance
pub fn register_injury_catalog() -> &'static InjuryCatalog {
    CATALOG.get_or_init(InjuryCatalog::default)
}

impl InjuryCatalog {
    /// Catalog with every injury kind registered
    pub fn new(config: &MedicalConfig) -> Self {
        Self::with_kinds(config, InjuryKind::all())
    }

    /// Catalog restricted to a subset of kinds
    pub fn with_kinds(config: &MedicalConfig, kinds: impl IntoIterator<Item = InjuryKind>) -> Self {
        let mut kinds: Vec<InjuryKind> = kinds.into_iter().collect();
        kinds.sort();
        kinds.dedup();
        Self {
            kinds,
            jitter_chance: config.healing_jitter_chance,
        }
    }

    /// Process-wide catalog, see [`register_injury_catalog`]
    pub fn global() -> &'static InjuryCatalog {
        register_injury_catalog()
    }

    pub fn kinds(&self) -> &[InjuryKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: InjuryKind) -> bool {
        self.kinds.binary_search(&kind).is_ok()
    }

    /// Resolve a save-file kind code
    pub fn by_code(&self, code: u8) -> Result<InjuryKind> {
        InjuryKind::from_code(code)
            .filter(|kind| self.contains(*kind))
            .ok_or(MedicalError::UnknownInjuryCode(code))
    }

    /// Resolve a stable key such as "am:concussion"
    pub fn by_key(&self, key: &str) -> Result<InjuryKind> {
        InjuryKind::from_key(key)
            .filter(|kind| self.contains(*kind))
            .ok_or_else(|| MedicalError::UnknownInjuryKind(key.to_string()))
    }

    /// Build an injury, checking the kind's location and severity constraints
    pub fn try_new_injury<R: RandomSource + ?Sized>(
        &self,
        patient: &Patient,
        kind: InjuryKind,
        location: BodyLocation,
        severity: u32,
        rng: &mut R,
    ) -> Result<Injury> {
        if !self.contains(kind) {
            return Err(MedicalError::UnknownInjuryKind(kind.key().to_string()));
        }
        if !kind.is_valid_in_location(location) {
            return Err(MedicalError::InvalidLocation { kind, location });
        }
        if !kind.is_valid_severity(severity) {
            return Err(MedicalError::InvalidSeverity {
                kind,
                severity,
                max: kind.max_severity(),
            });
        }

        let time = self.gen_healing_time(patient, kind, severity, rng);
        Ok(Injury::new(kind, location, severity, time))
    }

    /// Build an injury; a constraint violation is a caller bug and panics
    pub fn new_injury<R: RandomSource + ?Sized>(
        &self,
        patient: &Patient,
        kind: InjuryKind,
        location: BodyLocation,
        severity: u32,
        rng: &mut R,
    ) -> Injury {
        match self.try_new_injury(patient, kind, location, severity, rng) {
            Ok(injury) => injury,
            Err(err) => panic!("injury catalog contract violated: {}", err),
        }
    }

    /// Days to heal a fresh injury of `kind` on `patient`
    ///
    /// On a `jitter_chance` roll the time moves by up to the roll itself in
    /// percent; lacerations add 1d6 days for infection risk. The patient's
    /// ability time modifier scales the result.
    pub fn gen_healing_time<R: RandomSource + ?Sized>(
        &self,
        patient: &Patient,
        kind: InjuryKind,
        severity: u32,
        rng: &mut R,
    ) -> u32 {
        let mut percent = 100u64;
        let roll = rng.draw(100);
        if roll < self.jitter_chance {
            // Below 4 is a complication, the rest a fortunate recovery
            if rng.d6() < 4 {
                percent += roll as u64;
            } else {
                percent -= roll as u64;
            }
        }

        let mut days = kind.recovery_days(severity) as u64;
        if kind == InjuryKind::Laceration {
            days += rng.d6() as u64;
        }

        let scaled = days * percent * patient.ability_time_modifier as u64;
        ((scaled + 5_000) / 10_000) as u32
    }
}
