//! Items - Consumable definitions, the inventory seam, and in-combat use

use crate::combat::EffectTargets;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Usable in combat
    Consumable,
    /// Crafting input, never offered in combat
    Material,
}

/// What using a consumable does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    Heal,
    /// Direct damage, ignores defense
    Damage,
    BuffDefense,
    CureStatus,
}

impl ItemEffect {
    /// Whether the effect reads `effect_value`
    pub fn uses_value(&self) -> bool {
        !matches!(self, ItemEffect::CureStatus)
    }
}

/// Immutable item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    #[serde(default)]
    pub effect_value: i32,
}

impl ItemDef {
    pub fn is_consumable(&self) -> bool {
        self.kind == ItemKind::Consumable && self.effect.is_some()
    }
}

/// Player inventory as seen by an encounter
pub trait Inventory {
    /// Names of held items usable in combat
    fn consumables(&self, items: &HashMap<String, ItemDef>) -> Vec<String>;

    /// Take one item out. Returns false if none was held.
    fn remove(&mut self, name: &str) -> bool;
}

/// Item counts keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemBag {
    counts: BTreeMap<String, u32>,
}

impl ItemBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.counts.entry(name.to_string()).or_insert(0) += count;
    }

    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl Inventory for ItemBag {
    fn consumables(&self, items: &HashMap<String, ItemDef>) -> Vec<String> {
        self.counts
            .keys()
            .filter(|name| items.get(name.as_str()).is_some_and(ItemDef::is_consumable))
            .cloned()
            .collect()
    }

    fn remove(&mut self, name: &str) -> bool {
        let Some(count) = self.counts.get_mut(name) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(name);
        }
        true
    }
}

/// Result of using one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub message: String,
    pub enemy_defeated: bool,
}

/// Apply an item's effect to the encounter
///
/// Removing the item from the inventory is the caller's job.
pub fn apply_item(item: &ItemDef, targets: &mut EffectTargets<'_>) -> ItemOutcome {
    let value = item.effect_value;
    let message = match item.effect {
        Some(ItemEffect::Heal) => {
            let healed = targets.heal_player(value);
            format!("Used {}! Restored {} HP.", item.name, healed)
        }
        Some(ItemEffect::Damage) => {
            targets.damage_enemy(value);
            format!("Used {}! Dealt {} damage.", item.name, value)
        }
        Some(ItemEffect::BuffDefense) => {
            targets.buff_defense(value);
            format!("Used {}! Defense +{}.", item.name, value)
        }
        Some(ItemEffect::CureStatus) => {
            targets.cure_player();
            format!("Used {}! Status effects cleared.", item.name)
        }
        None => format!("{} can't be used here.", item.name),
    };
    debug!(item = %item.name, ?item.effect, value, "item used");

    ItemOutcome {
        message,
        enemy_defeated: targets.enemy_defeated(),
    }
}
