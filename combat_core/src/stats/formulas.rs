//! Combat formulas - Pure functions from raw stats to combat numbers
//!
//! Nothing in here holds state. Every function is defined for all integer
//! inputs; out-of-range results are clamped rather than reported.
//!
//! Hit chance: `clamp(0.85 + 0.03 * (attacker_dex - defender_dex), 0.30, 0.99)`
//! - 5 dex vs 5 dex: 85%
//! - 10 dex vs 5 dex: 100% -> capped at 99%
//! - 1 dex vs 20 dex: 28% -> floored at 30%

use super::{EquipmentBonuses, PlayerStats};
use crate::skill::{SkillDef, StatScaling};

/// Flat attack every character starts with before strength
pub const BASE_ATTACK: i32 = 3;

/// Stat value treated as "no bonus, no penalty"
pub const NEUTRAL_STAT: i32 = 3;

pub const BASE_HIT_CHANCE: f64 = 0.85;
pub const HIT_CHANCE_PER_DEX: f64 = 0.03;
pub const MIN_HIT_CHANCE: f64 = 0.30;
pub const MAX_HIT_CHANCE: f64 = 0.99;

pub const BASE_FLEE_CHANCE: f64 = 0.40;
pub const FLEE_CHANCE_PER_DEX: f64 = 0.03;
pub const MIN_FLEE_CHANCE: f64 = 0.20;
pub const MAX_FLEE_CHANCE: f64 = 0.80;

/// Dexterity lost to hit rolls while Despondent
pub const DESPONDENT_DEX_PENALTY: i32 = 4;

/// Attack power from strength and gear
pub fn effective_attack(stats: &PlayerStats, equipment: &EquipmentBonuses) -> i32 {
    BASE_ATTACK
        .saturating_add(stats.strength)
        .saturating_add(equipment.strength)
}

/// Defense from resilience and gear
pub fn effective_defense(stats: &PlayerStats, equipment: &EquipmentBonuses) -> i32 {
    stats.resilience.saturating_add(equipment.resilience)
}

/// Chance for an attack to land
pub fn calc_hit_chance(attacker_dex: i32, defender_dex: i32) -> f64 {
    let diff = attacker_dex as f64 - defender_dex as f64;
    (BASE_HIT_CHANCE + diff * HIT_CHANCE_PER_DEX).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Chance for the player to escape an encounter
pub fn calc_flee_chance(player_dex: i32, enemy_dex: i32) -> f64 {
    let diff = player_dex as f64 - enemy_dex as f64;
    (BASE_FLEE_CHANCE + diff * FLEE_CHANCE_PER_DEX).clamp(MIN_FLEE_CHANCE, MAX_FLEE_CHANCE)
}

/// Debuff length after constitution: -1 turn per 3 CON above 3, minimum 1
pub fn calc_debuff_duration(base_turns: u32, constitution: i32) -> u32 {
    let reduction = (constitution.saturating_sub(NEUTRAL_STAT) / 3).max(0) as u32;
    base_turns.saturating_sub(reduction).max(1)
}

/// Skill power multiplier from intelligence (1.0 at INT 3)
pub fn calc_skill_multiplier(intelligence: i32) -> f64 {
    1.0 + (intelligence as f64 - NEUTRAL_STAT as f64) * 0.05
}

/// Scaled magnitude of a skill, never below 1
///
/// `stat_value` is ignored when the skill does not scale with a stat.
pub fn calc_skill_effect(skill: &SkillDef, stat_value: i32) -> i32 {
    let stat = match skill.stat_scaling {
        StatScaling::None => NEUTRAL_STAT,
        StatScaling::Intelligence | StatScaling::Strength => stat_value,
    };
    let scaled = skill.base_value as f64
        * (1.0 + (stat as f64 - NEUTRAL_STAT as f64) * skill.scaling_factor);
    // `as` saturates, so huge stat values cannot wrap
    (scaled.round() as i32).max(1)
}

/// SP restored at the end of every round
pub fn calc_sp_regen(intelligence: i32) -> i32 {
    1 + (intelligence.saturating_sub(NEUTRAL_STAT) / 3).max(0)
}

/// Damage of a basic hit; `offset` is the -1..=1 variance roll
pub fn calc_basic_damage(attack: i32, defense: i32, offset: i32) -> i32 {
    attack
        .saturating_sub(defense)
        .saturating_add(offset)
        .max(1)
}
