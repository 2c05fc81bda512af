//! Headless balance simulator for the combat tables
//!
//! Runs the real encounter state machine with an auto-battle policy and
//! reports win rates per enemy.
//!
//! Usage:
//!   cargo run -p combat_sim -- [OPTIONS]

mod loadout;
mod simulation;

use clap::Parser;
use combat_core::{CombatTables, ConfigError, EncounterError};
use loadout::Loadout;
use simulation::{simulate_enemy, SimReport};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, Level};

/// Simulate encounters against the enemy table
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Auto-battle every enemy and report win rates", long_about = None)]
#[command(version)]
struct Args {
    /// Enemy id to fight; every enemy when omitted
    #[arg(short, long)]
    enemy: Option<String>,

    /// Fights per enemy, seeds increase by one per run
    #[arg(short, long, default_value_t = 100)]
    runs: u32,

    /// First RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Player level to build the loadout for
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Directory holding skills/items/enemies/constants TOML files
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Log every fight
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum SimError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("encounter: {0}")]
    Encounter(#[from] EncounterError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), SimError> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let tables = match &args.config_dir {
        Some(dir) => CombatTables::load_dir(dir)?,
        None => CombatTables::default_tables()?,
    };
    let loadout = Loadout::for_level(&tables, args.level);
    info!(
        level = loadout.stats.level,
        skills = loadout.skills.unlocked.len(),
        runs = args.runs,
        seed = args.seed,
        "starting simulation"
    );

    let enemy_ids: Vec<String> = match &args.enemy {
        Some(id) => vec![id.clone()],
        None => tables.enemy_ids().into_iter().map(str::to_string).collect(),
    };

    let reports = enemy_ids
        .iter()
        .map(|id| simulate_enemy(&tables, &loadout, id, args.runs, args.seed))
        .collect::<Result<Vec<SimReport>, _>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.summary_line());
        }
    }

    Ok(())
}
