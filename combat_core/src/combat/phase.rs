//! Encounter phases

use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the encounter is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the player to pick an action
    Choosing,
    /// Skill list open (sub-menu of Choosing)
    SkillSelect,
    /// Item list open (sub-menu of Choosing)
    ItemSelect,
    /// Player action applied; enemy acts when the timer runs out
    PlayerResolving,
    /// Enemy action applied; round ends when the timer runs out
    EnemyResolving,
    Victory,
    Defeat,
    Fled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    /// Accepting a new player action (including sub-menus)
    pub fn is_player_input(self) -> bool {
        matches!(self, Phase::Choosing | Phase::SkillSelect | Phase::ItemSelect)
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Victory => Some(Outcome::Victory),
            Phase::Defeat => Some(Outcome::Defeat),
            Phase::Fled => Some(Outcome::Fled),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Choosing => "choosing",
            Phase::SkillSelect => "skill_select",
            Phase::ItemSelect => "item_select",
            Phase::PlayerResolving => "player_resolving",
            Phase::EnemyResolving => "enemy_resolving",
            Phase::Victory => "victory",
            Phase::Defeat => "defeat",
            Phase::Fled => "fled",
        };
        f.write_str(name)
    }
}
