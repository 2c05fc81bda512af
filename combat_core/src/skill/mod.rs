//! Skills - Definitions, the skill tree, and in-combat resolution

mod resolver;

pub use resolver::{apply_skill, scaling_stat_value, SkillOutcome};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// What a skill does when cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEffect {
    /// Direct damage to the enemy, ignores defense
    Damage,
    /// Restore player HP
    Heal,
    /// Raise player defense until the encounter ends
    BuffDefense,
    /// Damage the enemy and heal the player by the same amount
    Drain,
    /// Lower enemy attack for a few rounds
    DebuffAttack {
        /// Also lower enemy defense by the same amount
        #[serde(default)]
        lowers_defense: bool,
    },
    /// Clear every status effect on the player
    CureStatus,
}

/// Which stat a skill's magnitude scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatScaling {
    Intelligence,
    Strength,
    None,
}

/// Immutable skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sp_cost: i32,
    pub effect: SkillEffect,
    pub base_value: i32,
    pub stat_scaling: StatScaling,
    #[serde(default)]
    pub scaling_factor: f64,
    /// Position in the skill tree grid
    #[serde(default)]
    pub tree_row: u32,
    #[serde(default)]
    pub tree_col: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default = "default_unlock_cost")]
    pub unlock_cost: u32,
}

fn default_unlock_cost() -> u32 {
    1
}

/// Skill points awarded on reaching `level` (none for level 1, a bonus every 5th)
pub fn skill_points_for_level(level: u32) -> u32 {
    if level <= 1 {
        return 0;
    }
    if level % 5 == 0 {
        2
    } else {
        1
    }
}

/// Which skills the player has unlocked and the points left to spend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSkills {
    pub unlocked: BTreeSet<String>,
    pub skill_points: u32,
}

impl PlayerSkills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `skill_id` can be unlocked right now
    pub fn can_unlock(&self, skill_id: &str, skills: &HashMap<String, SkillDef>) -> bool {
        if self.unlocked.contains(skill_id) {
            return false;
        }
        let Some(skill) = skills.get(skill_id) else {
            return false;
        };
        if self.skill_points < skill.unlock_cost {
            return false;
        }
        skill
            .prerequisites
            .iter()
            .all(|prereq| self.unlocked.contains(prereq))
    }

    /// Unlock a skill, spending its cost. Returns false if not allowed.
    pub fn unlock(&mut self, skill_id: &str, skills: &HashMap<String, SkillDef>) -> bool {
        if !self.can_unlock(skill_id, skills) {
            return false;
        }
        if let Some(skill) = skills.get(skill_id) {
            self.skill_points -= skill.unlock_cost;
            self.unlocked.insert(skill_id.to_string());
            return true;
        }
        false
    }

    /// Unlocked skills in tree order; ids missing from the table are skipped
    pub fn unlocked_skills<'a>(&self, skills: &'a HashMap<String, SkillDef>) -> Vec<&'a SkillDef> {
        let mut list: Vec<&SkillDef> = self
            .unlocked
            .iter()
            .filter_map(|id| skills.get(id))
            .collect();
        list.sort_by_key(|s| (s.tree_row, s.tree_col));
        list
    }
}
