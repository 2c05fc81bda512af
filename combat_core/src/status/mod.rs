//! Status effects - Per-encounter Poison/Stun/Burn/Despondent bookkeeping
//!
//! Rules:
//! - At most one effect of each kind per side; re-applying refreshes the
//!   remaining turns and never re-triggers side effects.
//! - Player-side durations are shortened by constitution.
//! - Burn takes 2 attack when first applied. The player's penalty is tracked in
//!   `burn_attack_reduction` and given back exactly; the enemy's is given back
//!   as `min(base_attack, attack + 2)` so it can never exceed the template.

mod tick;

pub use tick::TickReport;

use crate::combat::Combatant;
use crate::stats::calc_debuff_duration;
use crate::types::{Side, StatusEffect, StatusKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Attack removed when Burn lands
pub const BURN_ATTACK_PENALTY: i32 = 2;

/// Active status effects for both sides of one encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffectEngine {
    player: Vec<StatusEffect>,
    enemy: Vec<StatusEffect>,
    /// Attack currently withheld from the player by Burn
    burn_attack_reduction: i32,
}

impl StatusEffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, side: Side) -> &Vec<StatusEffect> {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn list_mut(&mut self, side: Side) -> &mut Vec<StatusEffect> {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Active effects on one side, in application order
    pub fn statuses(&self, side: Side) -> &[StatusEffect] {
        self.list(side)
    }

    pub fn has_status(&self, side: Side, kind: StatusKind) -> bool {
        self.list(side).iter().any(|e| e.kind == kind)
    }

    /// Attack currently withheld from the player by Burn
    pub fn burn_attack_reduction(&self) -> i32 {
        self.burn_attack_reduction
    }

    /// Apply or refresh a status effect
    ///
    /// `constitution` only matters for the player side.
    pub fn apply_status(
        &mut self,
        side: Side,
        kind: StatusKind,
        constitution: i32,
        player: &mut Combatant,
        enemy: &mut Combatant,
    ) {
        let duration = match side {
            Side::Player => calc_debuff_duration(kind.base_duration(), constitution),
            Side::Enemy => kind.base_duration(),
        };

        if let Some(existing) = self.list_mut(side).iter_mut().find(|e| e.kind == kind) {
            existing.refresh(duration);
            debug!(?side, %kind, duration, "status refreshed");
            return;
        }

        self.list_mut(side).push(StatusEffect::new(kind, duration));
        debug!(?side, %kind, duration, "status applied");

        if kind == StatusKind::Burn {
            match side {
                Side::Player => {
                    self.burn_attack_reduction = player.lower_attack(BURN_ATTACK_PENALTY);
                }
                Side::Enemy => {
                    enemy.lower_attack(BURN_ATTACK_PENALTY);
                }
            }
        }
    }

    /// End-of-round processing for both sides (player first)
    ///
    /// Poison and Burn deal their damage before counting down. Expired effects
    /// are removed with one "wore off" message each; Burn expiry gives attack
    /// back.
    pub fn tick(
        &mut self,
        player: &mut Combatant,
        enemy: &mut Combatant,
        enemy_base_attack: i32,
    ) -> TickReport {
        let mut report = TickReport::new();

        for kind in tick::tick_side(Side::Player, &mut self.player, player, &mut report) {
            if kind == StatusKind::Burn {
                player.attack += self.burn_attack_reduction;
                self.burn_attack_reduction = 0;
            }
            report.messages.push(format!("{} wore off!", kind));
            report.expired.push((Side::Player, kind));
        }

        for kind in tick::tick_side(Side::Enemy, &mut self.enemy, enemy, &mut report) {
            if kind == StatusKind::Burn {
                enemy.attack = enemy_base_attack.min(enemy.attack + BURN_ATTACK_PENALTY);
            }
            report
                .messages
                .push(format!("{}'s {} wore off!", enemy.name, kind));
            report.expired.push((Side::Enemy, kind));
        }

        report
    }

    /// Consume the player's Stun. Returns true if one was present.
    pub fn remove_player_stun(&mut self) -> bool {
        Self::remove_kind(&mut self.player, StatusKind::Stun)
    }

    /// Consume the enemy's Stun. Returns true if one was present.
    pub fn remove_enemy_stun(&mut self) -> bool {
        Self::remove_kind(&mut self.enemy, StatusKind::Stun)
    }

    fn remove_kind(list: &mut Vec<StatusEffect>, kind: StatusKind) -> bool {
        let before = list.len();
        list.retain(|e| e.kind != kind);
        list.len() != before
    }

    /// Remove every effect from both sides
    ///
    /// Gives back the player's Burn penalty and returns how much was restored.
    pub fn clear_all(&mut self, player: &mut Combatant) -> i32 {
        let restored = self.restore_player_burn(player);
        self.player.clear();
        self.enemy.clear();
        restored
    }

    /// Remove every effect from the player only (enemy effects stay)
    pub fn cure(&mut self, player: &mut Combatant) {
        self.restore_player_burn(player);
        self.player.clear();
    }

    fn restore_player_burn(&mut self, player: &mut Combatant) -> i32 {
        let restored = self.burn_attack_reduction;
        player.attack += restored;
        self.burn_attack_reduction = 0;
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Combatant {
        Combatant {
            name: "Player".to_string(),
            hp: 30,
            max_hp: 30,
            sp: 10,
            max_sp: 10,
            attack: 8,
            defense: 3,
        }
    }

    fn enemy() -> Combatant {
        Combatant {
            name: "Rust Golem".to_string(),
            hp: 25,
            max_hp: 25,
            sp: 0,
            max_sp: 0,
            attack: 7,
            defense: 4,
        }
    }

    #[test]
    fn test_reapply_refreshes_without_duplicating() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Poison, 3, &mut p, &mut e);
        engine.tick(&mut p, &mut e, 7);
        assert_eq!(engine.statuses(Side::Player)[0].turns_remaining, 2);

        engine.apply_status(Side::Player, StatusKind::Poison, 3, &mut p, &mut e);
        assert_eq!(engine.statuses(Side::Player).len(), 1);
        assert_eq!(engine.statuses(Side::Player)[0].turns_remaining, 3);
    }

    #[test]
    fn test_constitution_shortens_player_only() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Poison, 9, &mut p, &mut e);
        engine.apply_status(Side::Enemy, StatusKind::Poison, 9, &mut p, &mut e);

        assert_eq!(engine.statuses(Side::Player)[0].turns_remaining, 1);
        assert_eq!(engine.statuses(Side::Enemy)[0].turns_remaining, 3);
    }

    #[test]
    fn test_player_burn_lifecycle() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        assert_eq!(p.attack, 6);
        assert_eq!(engine.burn_attack_reduction(), 2);
        assert_eq!(engine.statuses(Side::Player).len(), 1);
        assert_eq!(engine.statuses(Side::Player)[0].turns_remaining, 3);

        let mut messages = Vec::new();
        for _ in 0..3 {
            messages.extend(engine.tick(&mut p, &mut e, 7).messages);
        }

        assert_eq!(p.attack, 8);
        assert_eq!(p.hp, 27);
        assert!(!engine.has_status(Side::Player, StatusKind::Burn));
        assert_eq!(engine.burn_attack_reduction(), 0);
        let wore_off = messages.iter().filter(|m| *m == "Burn wore off!").count();
        assert_eq!(wore_off, 1);
    }

    #[test]
    fn test_burn_refresh_does_not_stack_penalty() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        assert_eq!(p.attack, 6);
    }

    #[test]
    fn test_player_burn_records_actual_reduction() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());
        p.attack = 1;

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        assert_eq!(p.attack, 0);
        assert_eq!(engine.burn_attack_reduction(), 1);

        engine.cure(&mut p);
        assert_eq!(p.attack, 1);
    }

    #[test]
    fn test_enemy_burn_restore_capped_at_base() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Enemy, StatusKind::Burn, 0, &mut p, &mut e);
        assert_eq!(e.attack, 5);

        // Something else already restored the enemy to base (e.g. a debuff clearing)
        e.attack = 7;
        for _ in 0..3 {
            engine.tick(&mut p, &mut e, 7);
        }
        assert_eq!(e.attack, 7);
        assert_eq!(e.hp, 22);
    }

    #[test]
    fn test_enemy_burn_restores_when_below_base() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Enemy, StatusKind::Burn, 0, &mut p, &mut e);
        engine.tick(&mut p, &mut e, 7);
        engine.tick(&mut p, &mut e, 7);
        let report = engine.tick(&mut p, &mut e, 7);
        assert_eq!(e.attack, 7);
        assert_eq!(report.expired_count(Side::Enemy, StatusKind::Burn), 1);
        assert_eq!(
            report.messages.last().map(String::as_str),
            Some("Rust Golem's Burn wore off!")
        );
    }

    #[test]
    fn test_tick_message_order_player_first() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Enemy, StatusKind::Poison, 0, &mut p, &mut e);
        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);

        let report = engine.tick(&mut p, &mut e, 7);
        assert_eq!(
            report.messages,
            vec!["Burn dealt 1 damage!", "Rust Golem took 2 poison damage!"]
        );
    }

    #[test]
    fn test_stun_removed_on_check() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Stun, 3, &mut p, &mut e);
        engine.tick(&mut p, &mut e, 7);
        assert!(engine.has_status(Side::Player, StatusKind::Stun));

        assert!(engine.remove_player_stun());
        assert!(!engine.remove_player_stun());
        assert!(!engine.remove_enemy_stun());
    }

    #[test]
    fn test_cure_leaves_enemy_untouched() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        engine.apply_status(Side::Enemy, StatusKind::Poison, 0, &mut p, &mut e);

        engine.cure(&mut p);
        assert_eq!(p.attack, 8);
        assert!(engine.statuses(Side::Player).is_empty());
        assert!(engine.has_status(Side::Enemy, StatusKind::Poison));
    }

    #[test]
    fn test_cure_is_idempotent() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        engine.cure(&mut p);
        let after_first = p.clone();
        engine.cure(&mut p);

        assert_eq!(p, after_first);
        assert_eq!(p.attack, 8);
    }

    #[test]
    fn test_clear_all_returns_restored_amount() {
        let mut engine = StatusEffectEngine::new();
        let (mut p, mut e) = (player(), enemy());

        engine.apply_status(Side::Player, StatusKind::Burn, 3, &mut p, &mut e);
        engine.apply_status(Side::Enemy, StatusKind::Stun, 0, &mut p, &mut e);

        assert_eq!(engine.clear_all(&mut p), 2);
        assert_eq!(p.attack, 8);
        assert!(engine.statuses(Side::Enemy).is_empty());
        assert_eq!(engine.clear_all(&mut p), 0);
    }
}
