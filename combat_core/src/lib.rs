//! combat_core - Turn-based encounter engine
//!
//! This library provides:
//! - Stat formulas: hit/flee chance, damage, skill scaling, SP regen
//! - StatusEffectEngine: Poison/Stun/Burn/Despondent lifecycle for both sides
//! - Skills and items: definitions, the skill tree, effect resolution
//! - Encounter: the Choosing -> PlayerResolving -> EnemyResolving state machine
//! - Rewards: the RewardGrantor seam and standard level-up progression
//! - Config: immutable data tables loaded from TOML

pub mod combat;
pub mod config;
pub mod item;
pub mod prelude;
pub mod reward;
pub mod skill;
pub mod stats;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    Combatant, Dice, EffectTargets, Encounter, EncounterError, EncounterSummary, Modifiers, Phase,
    ScriptedDice,
};
pub use config::{Ability, CombatTables, ConfigError, EnemyTemplate, GameConstants};
pub use item::{apply_item, Inventory, ItemBag, ItemDef, ItemEffect, ItemKind};
pub use reward::{LevelUpReport, Progression, RewardGrantor};
pub use skill::{apply_skill, PlayerSkills, SkillDef, SkillEffect, SkillOutcome, StatScaling};
pub use stats::{EquipmentBonuses, PlayerStats, StatKind};
pub use status::{StatusEffectEngine, TickReport};
pub use types::{Outcome, Side, StatusEffect, StatusKind};
