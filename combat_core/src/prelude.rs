//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Outcome, Side, StatusEffect, StatusKind};
pub use crate::stats::{EquipmentBonuses, PlayerStats, StatKind};

// Encounter
pub use crate::combat::{Combatant, Dice, Encounter, EncounterSummary, Phase};

// Skills and items
pub use crate::skill::{PlayerSkills, SkillDef, SkillEffect};
pub use crate::item::{Inventory, ItemBag, ItemDef};

// Rewards
pub use crate::reward::{Progression, RewardGrantor};

// Config
pub use crate::config::{CombatTables, EnemyTemplate};
