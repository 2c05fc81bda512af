//! Headless encounter simulation
//!
//! Drives `Encounter` with a fixed auto-battle policy so enemy tables can be
//! balanced without a frontend. Each run gets its own seeded RNG.

use crate::loadout::Loadout;
use combat_core::prelude::*;
use combat_core::{EncounterError, ItemEffect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

/// Fights still going after this many rounds are abandoned
pub const MAX_ROUNDS: u32 = 200;

/// Heal once HP drops below this fraction of max
const HEAL_THRESHOLD: f64 = 0.35;

/// One finished (or abandoned) fight
#[derive(Debug, Clone, Serialize)]
pub struct FightRecord {
    pub seed: u64,
    /// `None` when the fight hit the round cap
    pub outcome: Option<Outcome>,
    pub rounds: u32,
    pub hp_left: i32,
    pub sp_left: i32,
    pub skills_cast: u32,
    pub items_used: u32,
}

/// What the policy wants to do from `Choosing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Skill(usize),
    Item(usize),
    Attack,
}

/// Pick an action: heal when low, otherwise the biggest affordable hit
fn choose(enc: &Encounter<'_>, tables: &CombatTables, loadout: &Loadout) -> Choice {
    let player = enc.player();
    let hurt = (player.hp as f64) < player.max_hp as f64 * HEAL_THRESHOLD;
    let skills = loadout.skills.unlocked_skills(&tables.skills);

    if hurt {
        let heal = skills.iter().position(|s| {
            matches!(s.effect, SkillEffect::Heal | SkillEffect::Drain) && s.sp_cost <= player.sp
        });
        if let Some(index) = heal {
            return Choice::Skill(index);
        }
        let kit = loadout
            .bag
            .consumables(&tables.items)
            .iter()
            .position(|name| {
                tables
                    .item(name)
                    .is_some_and(|item| item.effect == Some(ItemEffect::Heal))
            });
        if let Some(index) = kit {
            return Choice::Item(index);
        }
    }

    let strongest = skills
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            matches!(s.effect, SkillEffect::Damage | SkillEffect::Drain) && s.sp_cost <= player.sp
        })
        .max_by_key(|(_, s)| s.base_value)
        .map(|(index, _)| index);

    match strongest {
        Some(index) => Choice::Skill(index),
        None => Choice::Attack,
    }
}

/// Run one fight to completion and return its record
pub fn run_fight(
    tables: &CombatTables,
    loadout: &Loadout,
    enemy_id: &str,
    seed: u64,
) -> Result<FightRecord, EncounterError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut loadout = loadout.clone();
    let mut enc = Encounter::new(tables, &loadout.stats, &loadout.equipment, enemy_id)?;
    let mut skills_cast = 0;
    let mut items_used = 0;

    while !enc.phase().is_terminal() && enc.rounds() < MAX_ROUNDS {
        match enc.phase() {
            Phase::Choosing => match choose(&enc, tables, &loadout) {
                Choice::Skill(index) => {
                    if enc.open_skill_menu(&loadout.skills) && enc.use_skill(index) {
                        skills_cast += 1;
                    } else {
                        enc.cancel_menu();
                        enc.attack(&mut rng);
                    }
                }
                Choice::Item(index) => {
                    if enc.open_item_menu(&loadout.bag) && enc.use_item(index, &mut loadout.bag) {
                        items_used += 1;
                    } else {
                        enc.cancel_menu();
                        enc.attack(&mut rng);
                    }
                }
                Choice::Attack => {
                    enc.attack(&mut rng);
                }
            },
            _ => {
                // Jitter the pacing a little so timers are exercised as well
                let dt = rng.gen_range(0.1..0.5);
                enc.update(dt, &mut rng);
            }
        }
    }

    let outcome = enc.outcome();
    let mut stats = loadout.stats.clone();
    let mut progression = Progression::with_skills(
        tables.constants.leveling.base_xp,
        loadout.skills.clone(),
    );
    let (hp_left, sp_left) = match enc.acknowledge(&mut stats, &mut progression) {
        Some(summary) => (summary.hp, summary.sp),
        None => (enc.player().hp, enc.player().sp),
    };

    debug!(
        seed,
        enemy = enemy_id,
        outcome = ?outcome,
        rounds = enc.rounds(),
        "fight finished"
    );

    Ok(FightRecord {
        seed,
        outcome,
        rounds: enc.rounds(),
        hp_left,
        sp_left,
        skills_cast,
        items_used,
    })
}

/// Aggregated results for one enemy
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub enemy_id: String,
    pub enemy_name: String,
    pub level: u32,
    pub num_runs: u32,

    // === Outcomes ===
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub timed_out: u32,

    // === Averages ===
    pub win_rate: f64,
    pub avg_rounds: f64,
    /// Over victories only
    pub avg_hp_left: f64,
    pub avg_skills_cast: f64,
    pub avg_items_used: f64,
}

impl SimReport {
    pub fn from_fights(enemy: &EnemyTemplate, level: u32, fights: &[FightRecord]) -> Self {
        let num_runs = fights.len() as u32;
        let count = |o: Outcome| fights.iter().filter(|f| f.outcome == Some(o)).count() as u32;
        let victories = count(Outcome::Victory);
        let runs = num_runs.max(1) as f64;

        let avg = |field: fn(&FightRecord) -> u32| {
            fights.iter().map(|r| field(r) as f64).sum::<f64>() / runs
        };
        let avg_hp_left = fights
            .iter()
            .filter(|f| f.outcome == Some(Outcome::Victory))
            .map(|f| f.hp_left as f64)
            .sum::<f64>()
            / victories.max(1) as f64;

        SimReport {
            enemy_id: enemy.id.clone(),
            enemy_name: enemy.name.clone(),
            level,
            num_runs,
            victories,
            defeats: count(Outcome::Defeat),
            fled: count(Outcome::Fled),
            timed_out: fights.iter().filter(|f| f.outcome.is_none()).count() as u32,
            win_rate: victories as f64 / runs,
            avg_rounds: avg(|r| r.rounds),
            avg_hp_left,
            avg_skills_cast: avg(|r| r.skills_cast),
            avg_items_used: avg(|r| r.items_used),
        }
    }

    /// One human-readable summary line
    pub fn summary_line(&self) -> String {
        format!(
            "{:<16} L{:<3} runs {:>5}  win {:>5.1}%  lose {:>4}  rounds {:>5.1}  hp left {:>5.1}",
            self.enemy_name,
            self.level,
            self.num_runs,
            self.win_rate * 100.0,
            self.defeats,
            self.avg_rounds,
            self.avg_hp_left,
        )
    }
}

/// Run `runs` fights against one enemy with seeds `seed..seed + runs`
pub fn simulate_enemy(
    tables: &CombatTables,
    loadout: &Loadout,
    enemy_id: &str,
    runs: u32,
    seed: u64,
) -> Result<SimReport, EncounterError> {
    let enemy = tables
        .enemy(enemy_id)
        .ok_or_else(|| EncounterError::UnknownEnemy(enemy_id.to_string()))?;

    let fights = (0..runs as u64)
        .map(|i| run_fight(tables, loadout, enemy_id, seed.wrapping_add(i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SimReport::from_fights(enemy, loadout.stats.level, &fights))
}
