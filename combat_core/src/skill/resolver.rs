//! Skill resolution - Applies one cast to an encounter

use super::{SkillDef, SkillEffect, StatScaling};
use crate::combat::EffectTargets;
use crate::stats::formulas::NEUTRAL_STAT;
use crate::stats::{calc_skill_effect, EquipmentBonuses, PlayerStats};
use tracing::debug;

/// Result of casting a skill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillOutcome {
    pub messages: Vec<String>,
    /// The cast dropped the enemy to 0 HP
    pub enemy_defeated: bool,
    /// SP actually spent (0 when the cast was refused)
    pub sp_cost: i32,
    /// Computed effect magnitude
    pub value: i32,
}

impl SkillOutcome {
    /// Whether the cast went off at all
    pub fn resolved(&self) -> bool {
        self.sp_cost > 0 || self.value > 0
    }
}

/// Stat value a skill scales with: base plus equipment, or neutral for none
pub fn scaling_stat_value(
    skill: &SkillDef,
    stats: &PlayerStats,
    equipment: &EquipmentBonuses,
) -> i32 {
    match skill.stat_scaling {
        StatScaling::Intelligence => stats.intelligence + equipment.intelligence,
        StatScaling::Strength => stats.strength + equipment.strength,
        StatScaling::None => NEUTRAL_STAT,
    }
}

/// Cast `skill`, deducting its SP before anything else
///
/// Callers check SP beforehand; if the player still cannot pay, nothing
/// happens and the outcome carries a single "Not enough SP!" message.
pub fn apply_skill(
    skill: &SkillDef,
    targets: &mut EffectTargets<'_>,
    stats: &PlayerStats,
    equipment: &EquipmentBonuses,
) -> SkillOutcome {
    if !targets.player.spend_sp(skill.sp_cost) {
        return SkillOutcome {
            messages: vec!["Not enough SP!".to_string()],
            ..Default::default()
        };
    }

    let stat_value = scaling_stat_value(skill, stats, equipment);
    let value = calc_skill_effect(skill, stat_value);
    debug!(skill = %skill.id, stat_value, value, "skill cast");

    let message = match skill.effect {
        SkillEffect::Damage => {
            targets.damage_enemy(value);
            format!("{}! Dealt {} damage.", skill.name, value)
        }
        SkillEffect::Heal => {
            let healed = targets.heal_player(value);
            format!("{}! Restored {} HP.", skill.name, healed)
        }
        SkillEffect::BuffDefense => {
            targets.buff_defense(value);
            format!("{}! Defense +{}.", skill.name, value)
        }
        SkillEffect::Drain => {
            targets.damage_enemy(value);
            let healed = targets.heal_player(value);
            format!("{}! Drained {}, healed {}.", skill.name, value, healed)
        }
        SkillEffect::DebuffAttack { lowers_defense } => {
            targets.debuff_enemy(value, lowers_defense);
            if lowers_defense {
                format!(
                    "{}! Enemy ATK-{}, DEF-{} for 3 turns.",
                    skill.name, value, value
                )
            } else {
                format!("{}! Enemy ATK-{} for 3 turns.", skill.name, value)
            }
        }
        SkillEffect::CureStatus => {
            targets.cure_player();
            format!("{}! Status effects cleared.", skill.name)
        }
    };

    SkillOutcome {
        messages: vec![message],
        enemy_defeated: targets.enemy_defeated(),
        sp_cost: skill.sp_cost,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Combatant, Modifiers};
    use crate::config::CombatTables;
    use crate::status::StatusEffectEngine;
    use crate::types::{Side, StatusKind};

    struct Arena {
        player: Combatant,
        enemy: Combatant,
        statuses: StatusEffectEngine,
        modifiers: Modifiers,
    }

    impl Arena {
        fn new() -> Self {
            let player = Combatant {
                name: "Player".to_string(),
                hp: 20,
                max_hp: 30,
                sp: 10,
                max_sp: 10,
                attack: 8,
                defense: 3,
            };
            let enemy = Combatant {
                name: "Volt Wraith".to_string(),
                hp: 20,
                max_hp: 20,
                sp: 0,
                max_sp: 0,
                attack: 10,
                defense: 2,
            };
            let modifiers = Modifiers::new(&enemy);
            Arena {
                player,
                enemy,
                statuses: StatusEffectEngine::new(),
                modifiers,
            }
        }

        fn cast(&mut self, skill: &SkillDef, stats: &PlayerStats) -> SkillOutcome {
            let mut targets = EffectTargets {
                player: &mut self.player,
                enemy: &mut self.enemy,
                statuses: &mut self.statuses,
                modifiers: &mut self.modifiers,
            };
            apply_skill(skill, &mut targets, stats, &EquipmentBonuses::default())
        }
    }

    fn skill(id: &str) -> SkillDef {
        let tables = CombatTables::default_tables().unwrap();
        tables.skills[id].clone()
    }

    #[test]
    fn test_damage_skill_deducts_sp_first() {
        let mut arena = Arena::new();
        let outcome = arena.cast(&skill("shrapnel_blast"), &PlayerStats::default());

        assert_eq!(arena.player.sp, 8);
        assert_eq!(outcome.sp_cost, 2);
        assert_eq!(arena.enemy.hp, 14);
        assert_eq!(outcome.messages, vec!["Shrapnel Blast! Dealt 6 damage."]);
        assert!(!outcome.enemy_defeated);
    }

    #[test]
    fn test_intelligence_scales_damage() {
        let mut arena = Arena::new();
        let stats = PlayerStats {
            intelligence: 13,
            ..Default::default()
        };
        // 6 * (1 + 10 * 0.05) = 9
        let outcome = arena.cast(&skill("shrapnel_blast"), &stats);
        assert_eq!(outcome.value, 9);
    }

    #[test]
    fn test_heal_reports_actual_amount() {
        let mut arena = Arena::new();
        arena.player.hp = 25;
        let outcome = arena.cast(&skill("patchwork_heal"), &PlayerStats::default());

        assert_eq!(arena.player.hp, 30);
        assert_eq!(outcome.messages, vec!["Patchwork Heal! Restored 5 HP."]);
    }

    #[test]
    fn test_drain_uses_one_value() {
        let mut arena = Arena::new();
        arena.enemy.hp = 3;
        let outcome = arena.cast(&skill("scrap_leech"), &PlayerStats::default());

        assert_eq!(arena.enemy.hp, 0);
        assert_eq!(arena.player.hp, 25);
        assert!(outcome.enemy_defeated);
        assert_eq!(outcome.messages, vec!["Scrap Leech! Drained 5, healed 5."]);
    }

    #[test]
    fn test_buff_defense_accumulates() {
        let mut arena = Arena::new();
        arena.cast(&skill("jury_rig_shield"), &PlayerStats::default());
        arena.cast(&skill("jury_rig_shield"), &PlayerStats::default());

        assert_eq!(arena.modifiers.defense_buff, 8);
        assert_eq!(arena.player.defense, 11);
    }

    #[test]
    fn test_emp_pulse_lowers_defense_too() {
        let mut arena = Arena::new();
        let outcome = arena.cast(&skill("emp_pulse"), &PlayerStats::default());

        assert_eq!(arena.enemy.attack, 8);
        assert_eq!(arena.enemy.defense, 0);
        assert_eq!(
            outcome.messages,
            vec!["EMP Pulse! Enemy ATK-2, DEF-2 for 3 turns."]
        );

        // Overclock replaces it and restores defense
        arena.cast(&skill("overclock"), &PlayerStats::default());
        assert_eq!(arena.enemy.attack, 7);
        assert_eq!(arena.enemy.defense, 2);
    }

    #[test]
    fn test_cure_status_clears_player() {
        let mut arena = Arena::new();
        arena.statuses.apply_status(
            Side::Player,
            StatusKind::Burn,
            3,
            &mut arena.player,
            &mut arena.enemy,
        );
        assert_eq!(arena.player.attack, 6);

        let outcome = arena.cast(&skill("system_purge"), &PlayerStats::default());
        assert_eq!(arena.player.attack, 8);
        assert!(arena.statuses.statuses(Side::Player).is_empty());
        assert_eq!(outcome.messages, vec!["System Purge! Status effects cleared."]);
    }

    #[test]
    fn test_not_enough_sp_is_refused() {
        let mut arena = Arena::new();
        arena.player.sp = 1;
        let outcome = arena.cast(&skill("magnet_storm"), &PlayerStats::default());

        assert!(!outcome.resolved());
        assert_eq!(arena.player.sp, 1);
        assert_eq!(arena.enemy.hp, 20);
    }
}
