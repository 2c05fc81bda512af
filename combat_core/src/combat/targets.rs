//! Effect targets - The mutable slice of an encounter that skills and items touch

use super::Combatant;
use crate::status::StatusEffectEngine;
use serde::{Deserialize, Serialize};

/// Rounds a skill debuff stays on the enemy
pub const DEBUFF_TURNS: u32 = 3;

/// Temporary stat changes made by skills and items during one encounter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Sum of every defense buff granted and not yet removed
    pub defense_buff: i32,
    pub enemy_atk_debuff: i32,
    pub enemy_def_debuff: i32,
    pub debuff_turns_remaining: u32,
    /// Enemy values before any debuff, used for restoration
    pub enemy_base_attack: i32,
    pub enemy_base_defense: i32,
}

impl Modifiers {
    /// Record the enemy's starting attack/defense
    pub fn new(enemy: &Combatant) -> Self {
        Modifiers {
            enemy_base_attack: enemy.attack,
            enemy_base_defense: enemy.defense,
            ..Default::default()
        }
    }

    /// Raise player defense until the encounter ends
    pub fn buff_defense(&mut self, player: &mut Combatant, value: i32) {
        self.defense_buff += value;
        player.defense += value;
    }

    /// Take back every defense buff. Returns the amount removed.
    pub fn remove_defense_buff(&mut self, player: &mut Combatant) -> i32 {
        let removed = self.defense_buff;
        player.defense -= removed;
        self.defense_buff = 0;
        removed
    }

    pub fn has_enemy_debuff(&self) -> bool {
        self.debuff_turns_remaining > 0
    }

    /// Replace any active enemy debuff with a new one
    ///
    /// Debuffs never stack: the previous one is cleared back to base values
    /// first and the countdown restarts.
    pub fn debuff_enemy(&mut self, enemy: &mut Combatant, value: i32, lowers_defense: bool) {
        self.clear_enemy_debuffs(enemy);

        self.enemy_atk_debuff = value;
        enemy.attack = (self.enemy_base_attack - value).max(0);
        if lowers_defense {
            self.enemy_def_debuff = value;
            enemy.defense = (self.enemy_base_defense - value).max(0);
        }
        self.debuff_turns_remaining = DEBUFF_TURNS;
    }

    /// Restore enemy attack/defense to their recorded base values
    pub fn clear_enemy_debuffs(&mut self, enemy: &mut Combatant) {
        enemy.attack = self.enemy_base_attack;
        enemy.defense = self.enemy_base_defense;
        self.enemy_atk_debuff = 0;
        self.enemy_def_debuff = 0;
        self.debuff_turns_remaining = 0;
    }

    /// Count the debuff down one round. Returns true if it just expired.
    pub fn tick_debuff(&mut self, enemy: &mut Combatant) -> bool {
        if self.debuff_turns_remaining == 0 {
            return false;
        }
        self.debuff_turns_remaining -= 1;
        if self.debuff_turns_remaining == 0 {
            self.clear_enemy_debuffs(enemy);
            return true;
        }
        false
    }
}

/// Borrowed view of everything a skill or item may change
pub struct EffectTargets<'a> {
    pub player: &'a mut Combatant,
    pub enemy: &'a mut Combatant,
    pub statuses: &'a mut StatusEffectEngine,
    pub modifiers: &'a mut Modifiers,
}

impl<'a> EffectTargets<'a> {
    /// Damage the enemy directly (no defense). Returns HP removed.
    pub fn damage_enemy(&mut self, value: i32) -> i32 {
        self.enemy.take_damage(value)
    }

    /// Heal the player. Returns HP actually restored.
    pub fn heal_player(&mut self, value: i32) -> i32 {
        self.player.heal(value)
    }

    pub fn buff_defense(&mut self, value: i32) {
        self.modifiers.buff_defense(self.player, value);
    }

    pub fn debuff_enemy(&mut self, value: i32, lowers_defense: bool) {
        self.modifiers.debuff_enemy(self.enemy, value, lowers_defense);
    }

    /// Clear the player's status effects
    pub fn cure_player(&mut self) {
        self.statuses.cure(self.player);
    }

    pub fn enemy_defeated(&self) -> bool {
        !self.enemy.is_alive()
    }
}
