//! Combatant - Ephemeral per-encounter fighter

use crate::config::EnemyTemplate;
use crate::stats::{effective_attack, effective_defense, EquipmentBonuses, PlayerStats};
use serde::{Deserialize, Serialize};

/// Live HP/SP/attack/defense for one side of an encounter
///
/// `attack` and `defense` are effective values. Buffs, debuffs and Burn mutate
/// them directly and are responsible for restoring them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    /// Always 0 for enemies
    pub sp: i32,
    pub max_sp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Combatant {
    /// Build the player's combatant from persistent stats plus gear
    ///
    /// Equipment max HP is folded into both the cap and the current value;
    /// it is subtracted again when HP is synced back.
    pub fn player(stats: &PlayerStats, equipment: &EquipmentBonuses) -> Self {
        let max_hp = (stats.max_hp + equipment.max_hp).max(1);
        let max_sp = (stats.max_sp + equipment.max_sp).max(0);
        Combatant {
            name: "Player".to_string(),
            hp: (stats.current_hp + equipment.max_hp).clamp(0, max_hp),
            max_hp,
            sp: stats.current_sp.clamp(0, max_sp),
            max_sp,
            attack: effective_attack(stats, equipment).max(0),
            defense: effective_defense(stats, equipment).max(0),
        }
    }

    /// Build a fresh enemy from its template
    pub fn enemy(template: &EnemyTemplate) -> Self {
        Combatant {
            name: template.name.clone(),
            hp: template.hp,
            max_hp: template.hp,
            sp: 0,
            max_sp: 0,
            attack: template.attack,
            defense: template.defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Lose HP, floored at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Gain HP, capped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Spend SP if there is enough. Returns false and spends nothing otherwise.
    pub fn spend_sp(&mut self, cost: i32) -> bool {
        if self.sp < cost {
            return false;
        }
        self.sp -= cost.max(0);
        true
    }

    /// Regain SP, capped at max
    pub fn restore_sp(&mut self, amount: i32) -> i32 {
        let before = self.sp;
        self.sp = (self.sp + amount.max(0)).min(self.max_sp);
        self.sp - before
    }

    /// Lower attack, floored at 0. Returns the amount actually removed.
    pub fn lower_attack(&mut self, amount: i32) -> i32 {
        let before = self.attack;
        self.attack = (self.attack - amount).max(0);
        before - self.attack
    }
}
