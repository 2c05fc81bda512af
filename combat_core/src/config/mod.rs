//! Configuration loading from TOML files

mod constants;
mod enemies;
mod items;
mod skills;

pub use constants::{DefeatConstants, GameConstants, LevelingConstants, TimingConstants};
pub use enemies::{load_enemy_configs, parse_enemy_configs, Ability, EnemyTemplate};
pub use items::{load_item_configs, parse_item_configs};
pub use skills::{load_skill_configs, parse_skill_configs};

use crate::item::ItemDef;
use crate::skill::SkillDef;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Every immutable table an encounter reads
#[derive(Debug, Clone)]
pub struct CombatTables {
    /// Skills keyed by id
    pub skills: HashMap<String, SkillDef>,
    /// Items keyed by display name
    pub items: HashMap<String, ItemDef>,
    /// Enemy templates keyed by id
    pub enemies: HashMap<String, EnemyTemplate>,
    pub constants: GameConstants,
}

impl CombatTables {
    /// Tables shipped with the crate
    pub fn default_tables() -> Result<Self, ConfigError> {
        Self::from_strs(
            include_str!("../../config/skills.toml"),
            include_str!("../../config/items.toml"),
            include_str!("../../config/enemies.toml"),
            include_str!("../../config/constants.toml"),
        )
    }

    /// Parse and validate tables from TOML text
    pub fn from_strs(
        skills: &str,
        items: &str,
        enemies: &str,
        constants: &str,
    ) -> Result<Self, ConfigError> {
        let tables = CombatTables {
            skills: parse_skill_configs(skills)?,
            items: parse_item_configs(items)?,
            enemies: parse_enemy_configs(enemies)?,
            constants: parse_toml(constants)?,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Load `skills.toml`, `items.toml`, `enemies.toml` and `constants.toml` from a directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let tables = CombatTables {
            skills: load_skill_configs(&dir.join("skills.toml"))?,
            items: load_item_configs(&dir.join("items.toml"))?,
            enemies: load_enemy_configs(&dir.join("enemies.toml"))?,
            constants: load_toml(&dir.join("constants.toml"))?,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Cross-check the tables
    pub fn validate(&self) -> Result<(), ConfigError> {
        skills::validate_skills(&self.skills)?;
        items::validate_items(&self.items)?;
        enemies::validate_enemies(&self.enemies)?;
        if self.constants.leveling.base_xp == 0 {
            return Err(ConfigError::ValidationError(
                "leveling.base_xp must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn item(&self, name: &str) -> Option<&ItemDef> {
        self.items.get(name)
    }

    /// Enemy ids in sorted order
    pub fn enemy_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.enemies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
