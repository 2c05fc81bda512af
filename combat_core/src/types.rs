//! Core types shared across the combat modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of an encounter something applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// Named status effects that can be attached to a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// 2 damage per tick
    Poison,
    /// Skips the afflicted side's next action
    Stun,
    /// 1 damage per tick and -2 attack while active
    Burn,
    /// -4 dexterity for hit rolls
    Despondent,
}

impl StatusKind {
    /// Get all status kinds
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Poison,
            StatusKind::Stun,
            StatusKind::Burn,
            StatusKind::Despondent,
        ]
    }

    /// Turns the effect lasts before constitution reduction
    pub fn base_duration(self) -> u32 {
        match self {
            StatusKind::Stun => 1,
            StatusKind::Poison | StatusKind::Burn | StatusKind::Despondent => 3,
        }
    }

    /// HP lost at each end-of-round tick
    pub fn tick_damage(self) -> i32 {
        match self {
            StatusKind::Poison => 2,
            StatusKind::Burn => 1,
            StatusKind::Stun | StatusKind::Despondent => 0,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            StatusKind::Poison => "Poison",
            StatusKind::Stun => "Stun",
            StatusKind::Burn => "Burn",
            StatusKind::Despondent => "Despondent",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active status effect on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Rounds left before the effect wears off
    pub turns_remaining: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, turns: u32) -> Self {
        StatusEffect {
            kind,
            turns_remaining: turns,
        }
    }

    /// Refresh the remaining duration (re-application never stacks)
    pub fn refresh(&mut self, turns: u32) {
        self.turns_remaining = turns;
    }

    /// Count down one round, returns true if the effect expired
    pub fn tick(&mut self) -> bool {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        self.turns_remaining == 0
    }
}

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory => f.write_str("victory"),
            Outcome::Defeat => f.write_str("defeat"),
            Outcome::Fled => f.write_str("fled"),
        }
    }
}
