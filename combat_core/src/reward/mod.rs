//! Rewards - Post-encounter XP, money, and level-ups
//!
//! The encounter never touches level or XP itself. It hands the enemy's
//! rewards to a [`RewardGrantor`] and reports how the encounter ended.

use crate::skill::{skill_points_for_level, PlayerSkills};
use crate::stats::{points_for_level, PlayerStats};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// What one reward grant changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpReport {
    pub xp_gained: u32,
    pub money_gained: u32,
    pub levels_gained: u32,
    pub stat_points: u32,
    pub skill_points: u32,
    /// Level after the grant
    pub level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Collaborator that owns level/XP bookkeeping
pub trait RewardGrantor {
    /// Credit XP and money, levelling up as many times as the XP allows
    fn grant(&mut self, stats: &mut PlayerStats, xp: u32, money: u32) -> LevelUpReport;

    /// Called once per finished encounter
    ///
    /// `scripted_enemy` is set when the encounter was a one-off placed enemy.
    fn on_encounter_end(&mut self, outcome: Outcome, scripted_enemy: Option<&str>);
}

/// XP needed to go from `level` to `level + 1`
pub fn xp_to_next_level(level: u32, base_xp: u32) -> u32 {
    level.saturating_mul(base_xp)
}

/// Standard progression rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub base_xp: u32,
    pub skills: PlayerSkills,
    /// Scripted enemies already beaten
    pub defeated: BTreeSet<String>,
}

impl Progression {
    pub fn new(base_xp: u32) -> Self {
        Progression {
            base_xp,
            skills: PlayerSkills::default(),
            defeated: BTreeSet::new(),
        }
    }

    pub fn with_skills(base_xp: u32, skills: PlayerSkills) -> Self {
        Progression {
            skills,
            ..Self::new(base_xp)
        }
    }

    pub fn is_defeated(&self, enemy_id: &str) -> bool {
        self.defeated.contains(enemy_id)
    }
}

impl RewardGrantor for Progression {
    fn grant(&mut self, stats: &mut PlayerStats, xp: u32, money: u32) -> LevelUpReport {
        let mut report = LevelUpReport {
            xp_gained: xp,
            money_gained: money,
            ..Default::default()
        };

        stats.xp = stats.xp.saturating_add(xp);
        stats.money = stats.money.saturating_add(money);

        // A zero base_xp would never stop levelling
        if self.base_xp > 0 {
            while stats.xp >= xp_to_next_level(stats.level, self.base_xp) {
                stats.xp -= xp_to_next_level(stats.level, self.base_xp);
                stats.level += 1;

                let points = points_for_level(stats.level);
                let skill_points = skill_points_for_level(stats.level);
                stats.unspent_points += points;
                self.skills.skill_points += skill_points;
                stats.heal_full();

                report.levels_gained += 1;
                report.stat_points += points;
                report.skill_points += skill_points;
                info!(level = stats.level, points, skill_points, "level up");
            }
        }

        report.level = stats.level;
        report
    }

    fn on_encounter_end(&mut self, outcome: Outcome, scripted_enemy: Option<&str>) {
        if outcome != Outcome::Victory {
            return;
        }
        if let Some(id) = scripted_enemy {
            self.defeated.insert(id.to_string());
        }
    }
}
