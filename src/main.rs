//! Medsim - Headless Medical Runner
//!
//! Sends one patient into a fight, then runs daily healing until the injuries
//! are gone, the patient dies or the day limit is reached.

use std::path::PathBuf;

use advanced_medical::core::{config, set_config, MedicalConfig, Result};
use advanced_medical::medical::{diagnose, resolve_daily_healing, EffectContext, InjuryCatalog};
use advanced_medical::personnel::{Doctor, Gender, Patient, PersonnelStatus, UnitClass};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Headless medical runner - combat injuries and recovery for one patient
#[derive(Parser, Debug)]
#[command(name = "medsim")]
#[command(about = "Simulate combat injuries and daily healing for a single patient")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Hits taken in the fight
    #[arg(long, default_value_t = 3)]
    hits: u32,

    /// Maximum days of healing to simulate
    #[arg(long, default_value_t = 60)]
    days: u32,

    /// Unit the patient fought in
    #[arg(long, value_enum, default_value_t = UnitArg::Infantry)]
    unit: UnitArg,

    /// Skill level of the assigned doctor (0-10)
    #[arg(long, default_value_t = 5)]
    doctor_skill: u32,

    /// Leave the patient untreated
    #[arg(long)]
    no_doctor: bool,

    /// Medical config TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Mek,
    Aerospace,
    Vehicle,
    BattleArmor,
    Infantry,
}

impl From<UnitArg> for UnitClass {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Mek => UnitClass::Mek,
            UnitArg::Aerospace => UnitClass::Aerospace,
            UnitArg::Vehicle => UnitClass::Vehicle,
            UnitArg::BattleArmor => UnitClass::BattleArmor,
            UnitArg::Infantry => UnitClass::Infantry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// One simulated day
#[derive(Serialize)]
struct DayReport {
    day: u32,
    effects: Vec<String>,
    open_injuries: usize,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    seed: u64,
    hits: u32,
    new_injuries: Vec<String>,
    days: Vec<DayReport>,
    patient: Patient,
    doctor: Option<Doctor>,
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("advanced_medical=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let loaded = MedicalConfig::load(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("medical config already set, ignoring {}", path.display());
        }
    }
    let config = config();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(seed, hits = args.hits, "medsim starting");

    let catalog = InjuryCatalog::new(config);
    let mut patient = Patient::new("Patient", Gender::Unspecified).with_unit_class(args.unit.into());
    let mut doctor = (!args.no_doctor).then(|| Doctor::new("Doctor", args.doctor_skill));

    let combat = EffectContext {
        catalog: &catalog,
        config,
        day: 0,
    };
    let new_ids = diagnose(&combat, &mut patient, args.hits, &mut rng);
    let new_injuries: Vec<String> = new_ids
        .iter()
        .filter_map(|id| patient.injury(*id))
        .map(|injury| format!("{} ({:?}, {} days)", injury.name(), injury.level(), injury.time))
        .collect();

    let mut days = Vec::new();
    for day in 1..=args.days {
        if patient.is_dead() || !patient.needs_treatment() {
            break;
        }
        let ctx = EffectContext {
            catalog: &catalog,
            config,
            day,
        };
        let effects = resolve_daily_healing(&ctx, &mut patient, doctor.as_mut(), &mut rng);
        days.push(DayReport {
            day,
            effects: effects.into_iter().map(|e| e.description).collect(),
            open_injuries: patient.injuries().iter().filter(|i| i.is_open()).count(),
        });
    }

    let report = RunReport {
        seed,
        hits: args.hits,
        new_injuries,
        days,
        patient,
        doctor,
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &RunReport) {
    println!("=== Medsim (seed {}) ===", report.seed);
    println!("Hits taken: {}", report.hits);
    if report.new_injuries.is_empty() {
        println!("No new injuries");
    }
    for injury in &report.new_injuries {
        println!("  + {}", injury);
    }

    for day in &report.days {
        println!();
        println!("--- Day {} ({} open) ---", day.day, day.open_injuries);
        for effect in &day.effects {
            println!("  {}", effect);
        }
    }

    println!();
    println!("=== Medical log ===");
    for entry in &report.patient.log {
        println!("[day {:>3}] {}", entry.day, entry.text);
    }

    println!();
    let status = match report.patient.status {
        PersonnelStatus::Active => "active",
        PersonnelStatus::Dead => "dead",
    };
    println!("Status: {}", status);
    for injury in report.patient.injuries() {
        let state = if injury.permanent { "permanent" } else { "healing" };
        println!("  {} - {} ({} days left)", injury.name(), state, injury.time);
    }
    for (skill, penalty) in report.patient.injury_modifiers() {
        println!("  {:?} penalty: {}", skill, penalty);
    }
    if let Some(doctor) = &report.doctor {
        println!("Doctor XP: {} ({} tasks toward next award)", doctor.xp, doctor.n_tasks);
    }
}
