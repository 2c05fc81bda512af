//! Enemy table loading

use super::ConfigError;
use crate::types::StatusKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Special move an enemy may use instead of a normal attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    /// Status inflicted on the player when the ability fires
    pub status_effect: StatusKind,
    /// Probability in [0, 1] of using the ability on a given turn
    pub chance: f64,
}

/// Immutable enemy definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub dexterity: i32,
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub money_reward: u32,
    #[serde(default)]
    pub ability: Option<Ability>,
}

/// Container for enemy definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemiesConfig {
    #[serde(rename = "enemies")]
    pub enemies: Vec<EnemyTemplate>,
}

fn into_map(config: EnemiesConfig) -> HashMap<String, EnemyTemplate> {
    config
        .enemies
        .into_iter()
        .map(|enemy| (enemy.id.clone(), enemy))
        .collect()
}

/// Load enemy templates from a TOML file, keyed by id
pub fn load_enemy_configs(path: &Path) -> Result<HashMap<String, EnemyTemplate>, ConfigError> {
    let config: EnemiesConfig = super::load_toml(path)?;
    Ok(into_map(config))
}

/// Load enemy templates from a TOML string, keyed by id
pub fn parse_enemy_configs(content: &str) -> Result<HashMap<String, EnemyTemplate>, ConfigError> {
    let config: EnemiesConfig = super::parse_toml(content)?;
    Ok(into_map(config))
}

pub(super) fn validate_enemies(enemies: &HashMap<String, EnemyTemplate>) -> Result<(), ConfigError> {
    for enemy in enemies.values() {
        if enemy.hp <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "enemy '{}' must have positive hp",
                enemy.id
            )));
        }
        if let Some(ability) = &enemy.ability {
            if !(0.0..=1.0).contains(&ability.chance) {
                return Err(ConfigError::ValidationError(format!(
                    "enemy '{}' ability chance {} outside [0, 1]",
                    enemy.id, ability.chance
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enemy_with_ability() {
        let toml = r#"
[[enemies]]
id = "sludge"
name = "Sludge"
hp = 15
attack = 5
defense = 1
dexterity = 3
xp_reward = 12

[enemies.ability]
name = "Ooze"
status_effect = "despondent"
chance = 0.5
"#;
        let enemies = parse_enemy_configs(toml).unwrap();
        let sludge = &enemies["sludge"];
        assert_eq!(sludge.money_reward, 0);
        let ability = sludge.ability.as_ref().unwrap();
        assert_eq!(ability.status_effect, StatusKind::Despondent);
        assert!(validate_enemies(&enemies).is_ok());
    }

    #[test]
    fn test_ability_chance_out_of_range() {
        let toml = r#"
[[enemies]]
id = "sludge"
name = "Sludge"
hp = 15
attack = 5
defense = 1
dexterity = 3

[enemies.ability]
name = "Ooze"
status_effect = "poison"
chance = 1.5
"#;
        let enemies = parse_enemy_configs(toml).unwrap();
        assert!(validate_enemies(&enemies).is_err());
    }

    #[test]
    fn test_unknown_status_is_parse_error() {
        let toml = r#"
[[enemies]]
id = "sludge"
name = "Sludge"
hp = 15
attack = 5
defense = 1
dexterity = 3

[enemies.ability]
name = "Ooze"
status_effect = "frozen"
chance = 0.5
"#;
        assert!(matches!(
            parse_enemy_configs(toml),
            Err(ConfigError::ParseError(_))
        ));
    }
}
