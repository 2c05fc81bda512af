//! Player stats - Persistent character sheet and equipment bonuses
//!
//! The combat engine reads these once when an encounter starts and writes HP/SP
//! back once when it ends. Everything in between works on ephemeral combatants.

pub mod formulas;

pub use formulas::{
    calc_basic_damage, calc_debuff_duration, calc_flee_chance, calc_hit_chance,
    calc_skill_effect, calc_skill_multiplier, calc_sp_regen, effective_attack, effective_defense,
};

use serde::{Deserialize, Serialize};

/// Persistent player character sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub level: u32,
    pub xp: u32,
    pub money: u32,
    /// Stat points waiting to be allocated
    pub unspent_points: u32,

    // === Resources ===
    pub max_hp: i32,
    pub max_sp: i32,
    pub current_hp: i32,
    pub current_sp: i32,

    // === Attributes ===
    pub strength: i32,
    pub dexterity: i32,
    pub resilience: i32,
    pub constitution: i32,
    pub intelligence: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        PlayerStats {
            level: 1,
            xp: 0,
            money: 0,
            unspent_points: 0,
            max_hp: 30,
            max_sp: 10,
            current_hp: 30,
            current_sp: 10,
            strength: 5,
            dexterity: 5,
            resilience: 3,
            constitution: 3,
            intelligence: 3,
        }
    }
}

/// Allocatable stats on the character screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    MaxHp,
    MaxSp,
    Strength,
    Dexterity,
    Resilience,
    Constitution,
    Intelligence,
}

impl StatKind {
    /// Stats in character-screen order
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::MaxHp,
            StatKind::MaxSp,
            StatKind::Strength,
            StatKind::Dexterity,
            StatKind::Resilience,
            StatKind::Constitution,
            StatKind::Intelligence,
        ]
    }

    /// How much a single point raises this stat
    pub fn point_value(self) -> i32 {
        match self {
            StatKind::MaxHp => 3,
            StatKind::MaxSp => 2,
            _ => 1,
        }
    }
}

impl PlayerStats {
    /// Spend one unspent point on a stat
    ///
    /// Returns false when no points are available. Raising a maximum also
    /// raises the current value by the same amount.
    pub fn allocate(&mut self, stat: StatKind) -> bool {
        if self.unspent_points == 0 {
            return false;
        }
        self.unspent_points -= 1;

        let amount = stat.point_value();
        match stat {
            StatKind::MaxHp => {
                self.max_hp += amount;
                self.current_hp += amount;
            }
            StatKind::MaxSp => {
                self.max_sp += amount;
                self.current_sp += amount;
            }
            StatKind::Strength => self.strength += amount,
            StatKind::Dexterity => self.dexterity += amount,
            StatKind::Resilience => self.resilience += amount,
            StatKind::Constitution => self.constitution += amount,
            StatKind::Intelligence => self.intelligence += amount,
        }
        true
    }

    /// Restore HP and SP to their maximums
    pub fn heal_full(&mut self) {
        self.current_hp = self.max_hp;
        self.current_sp = self.max_sp;
    }
}

/// Stat points awarded on reaching `level` (none for level 1)
pub fn points_for_level(level: u32) -> u32 {
    if level <= 1 {
        0
    } else if level % 10 == 0 {
        4
    } else {
        2
    }
}

/// Summed bonuses from everything the player has equipped
///
/// Additive on top of the base stats. Gear never changes mid-encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentBonuses {
    pub strength: i32,
    pub resilience: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub max_hp: i32,
    pub max_sp: i32,
}

impl EquipmentBonuses {
    /// Sum the bonuses of several pieces of gear
    pub fn total<'a>(pieces: impl IntoIterator<Item = &'a EquipmentBonuses>) -> Self {
        pieces
            .into_iter()
            .fold(EquipmentBonuses::default(), |acc, piece| EquipmentBonuses {
                strength: acc.strength + piece.strength,
                resilience: acc.resilience + piece.resilience,
                dexterity: acc.dexterity + piece.dexterity,
                intelligence: acc.intelligence + piece.intelligence,
                max_hp: acc.max_hp + piece.max_hp,
                max_sp: acc.max_sp + piece.max_sp,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_level() {
        assert_eq!(points_for_level(1), 0);
        assert_eq!(points_for_level(2), 2);
        assert_eq!(points_for_level(9), 2);
        assert_eq!(points_for_level(10), 4);
        assert_eq!(points_for_level(20), 4);
    }

    #[test]
    fn test_allocate_spends_point() {
        let mut stats = PlayerStats {
            unspent_points: 2,
            ..Default::default()
        };

        assert!(stats.allocate(StatKind::MaxHp));
        assert_eq!(stats.max_hp, 33);
        assert_eq!(stats.current_hp, 33);

        assert!(stats.allocate(StatKind::Dexterity));
        assert_eq!(stats.dexterity, 6);

        // Out of points
        assert!(!stats.allocate(StatKind::Strength));
        assert_eq!(stats.strength, 5);
    }

    #[test]
    fn test_equipment_total() {
        let helmet = EquipmentBonuses {
            resilience: 2,
            max_hp: 5,
            ..Default::default()
        };
        let ring = EquipmentBonuses {
            intelligence: 1,
            max_hp: 3,
            ..Default::default()
        };

        let total = EquipmentBonuses::total([&helmet, &ring]);
        assert_eq!(total.resilience, 2);
        assert_eq!(total.intelligence, 1);
        assert_eq!(total.max_hp, 8);
    }

    #[test]
    fn test_stats_partial_toml() {
        let stats: PlayerStats = toml::from_str("level = 4\nstrength = 9").unwrap();
        assert_eq!(stats.level, 4);
        assert_eq!(stats.strength, 9);
        assert_eq!(stats.max_hp, 30);
    }
}
