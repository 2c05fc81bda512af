//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable combat constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub timing: TimingConstants,
    #[serde(default)]
    pub defeat: DefeatConstants,
    #[serde(default)]
    pub leveling: LevelingConstants,
}

/// Phase pacing in seconds (cosmetic only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConstants {
    /// Pause after an attack, skill, item, or failed flee
    #[serde(default = "default_action_delay")]
    pub action_delay: f64,
    /// Pause after defending
    #[serde(default = "default_defend_delay")]
    pub defend_delay: f64,
    /// Pause after the enemy acts
    #[serde(default = "default_enemy_delay")]
    pub enemy_delay: f64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            action_delay: 0.6,
            defend_delay: 0.4,
            enemy_delay: 0.6,
        }
    }
}

fn default_action_delay() -> f64 {
    0.6
}
fn default_defend_delay() -> f64 {
    0.4
}
fn default_enemy_delay() -> f64 {
    0.6
}

/// Penalties applied after losing an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefeatConstants {
    /// Fraction of money lost (floored)
    #[serde(default = "default_money_loss")]
    pub money_loss: f64,
    /// Fraction of max HP the player respawns with
    #[serde(default = "default_respawn_hp")]
    pub respawn_hp: f64,
}

impl Default for DefeatConstants {
    fn default() -> Self {
        DefeatConstants {
            money_loss: 0.30,
            respawn_hp: 0.60,
        }
    }
}

fn default_money_loss() -> f64 {
    0.30
}
fn default_respawn_hp() -> f64 {
    0.60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingConstants {
    /// XP to reach the next level is `level * base_xp`
    #[serde(default = "default_base_xp")]
    pub base_xp: u32,
}

impl Default for LevelingConstants {
    fn default() -> Self {
        LevelingConstants { base_xp: 100 }
    }
}

fn default_base_xp() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_constants_use_defaults() {
        let constants: GameConstants = toml::from_str("[defeat]\nmoney_loss = 0.5\n").unwrap();
        assert!((constants.defeat.money_loss - 0.5).abs() < f64::EPSILON);
        assert!((constants.defeat.respawn_hp - 0.60).abs() < f64::EPSILON);
        assert_eq!(constants.leveling.base_xp, 100);
        assert!((constants.timing.defend_delay - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shipped_constants_match_defaults() {
        let shipped: GameConstants =
            toml::from_str(include_str!("../../config/constants.toml")).unwrap();
        assert_eq!(shipped, GameConstants::default());
    }
}
