//! Item table loading

use super::ConfigError;
use crate::item::{ItemDef, ItemKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for item definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    #[serde(rename = "items")]
    pub items: Vec<ItemDef>,
}

fn into_map(config: ItemsConfig) -> HashMap<String, ItemDef> {
    config
        .items
        .into_iter()
        .map(|item| (item.name.clone(), item))
        .collect()
}

/// Load item definitions from a TOML file, keyed by name
pub fn load_item_configs(path: &Path) -> Result<HashMap<String, ItemDef>, ConfigError> {
    let config: ItemsConfig = super::load_toml(path)?;
    Ok(into_map(config))
}

/// Load item definitions from a TOML string, keyed by name
pub fn parse_item_configs(content: &str) -> Result<HashMap<String, ItemDef>, ConfigError> {
    let config: ItemsConfig = super::parse_toml(content)?;
    Ok(into_map(config))
}

/// Consumables need an effect, and value-based effects need a positive value
pub(super) fn validate_items(items: &HashMap<String, ItemDef>) -> Result<(), ConfigError> {
    for item in items.values() {
        match (item.kind, item.effect) {
            (ItemKind::Consumable, None) => {
                return Err(ConfigError::ValidationError(format!(
                    "consumable '{}' has no effect",
                    item.name
                )));
            }
            (_, Some(effect)) if effect.uses_value() && item.effect_value <= 0 => {
                return Err(ConfigError::ValidationError(format!(
                    "item '{}' needs a positive effect_value",
                    item.name
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
