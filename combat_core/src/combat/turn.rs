//! Enemy turn and end-of-round processing

use super::dice::Dice;
use super::encounter::Encounter;
use super::phase::Phase;
use crate::stats::{calc_basic_damage, calc_hit_chance, calc_sp_regen};
use crate::types::Side;
use tracing::debug;

impl<'a> Encounter<'a> {
    /// Enemy acts once the player's resolving timer runs out
    ///
    /// Order: Stun check, then the special ability roll, then a normal attack.
    pub(super) fn enemy_turn(&mut self, dice: &mut impl Dice) {
        if self.statuses.remove_enemy_stun() {
            self.say(format!("{} is stunned and can't move!", self.enemy.name));
            self.enemy_action_done();
            return;
        }

        let template = self.template;
        if let Some(ability) = &template.ability {
            let roll = dice.chance();
            debug!(roll, chance = ability.chance, ability = %ability.name, "ability roll");
            if roll < ability.chance {
                self.statuses.apply_status(
                    Side::Player,
                    ability.status_effect,
                    self.stats.constitution,
                    &mut self.player,
                    &mut self.enemy,
                );

                let raw = calc_basic_damage(self.enemy.attack, self.player.defense, dice.offset());
                let mut damage = (raw / 2).max(1);
                if self.defending {
                    damage = (damage / 2).max(1);
                }
                self.player.take_damage(damage);
                self.say(format!(
                    "{}! {} inflicted! -{} HP",
                    ability.name, ability.status_effect, damage
                ));
                self.enemy_action_done();
                return;
            }
        }

        let chance = calc_hit_chance(template.dexterity, self.player_hit_dexterity());
        let roll = dice.chance();
        debug!(roll, chance, "enemy hit roll");
        if roll > chance {
            self.say(format!("{} missed!", self.enemy.name));
            self.enemy_action_done();
            return;
        }

        let raw = calc_basic_damage(self.enemy.attack, self.player.defense, dice.offset());
        let damage = if self.defending { (raw / 2).max(1) } else { raw };
        self.player.take_damage(damage);
        self.say(format!("{} hits you for {} damage!", self.enemy.name, damage));
        self.enemy_action_done();
    }

    /// Defending lasts exactly one enemy action
    fn enemy_action_done(&mut self) {
        self.defending = false;
        if self.player.is_alive() {
            let delay = self.tables.constants.timing.enemy_delay;
            self.set_phase(Phase::EnemyResolving, delay);
        } else {
            self.enter_defeat();
        }
    }

    /// Bookkeeping once the enemy's resolving timer runs out
    ///
    /// Debuff countdown, status tick, death checks, SP regen, then either
    /// back to Choosing or straight into another enemy turn if the player is
    /// stunned.
    pub(super) fn end_round(&mut self) {
        self.rounds += 1;

        if self.modifiers.tick_debuff(&mut self.enemy) {
            debug!(enemy = %self.enemy.name, "skill debuff expired");
        }

        let report = self.statuses.tick(
            &mut self.player,
            &mut self.enemy,
            self.modifiers.enemy_base_attack,
        );

        if !self.enemy.is_alive() {
            self.enter_victory();
            return;
        }
        if !self.player.is_alive() {
            self.enter_defeat();
            return;
        }

        let regen = calc_sp_regen(self.stats.intelligence + self.equipment.intelligence);
        self.player.restore_sp(regen);

        self.say(report.messages.join(" "));

        if self.statuses.remove_player_stun() {
            self.say("You are stunned and can't move!");
            self.defending = false;
            let delay = self.tables.constants.timing.action_delay;
            self.set_phase(Phase::PlayerResolving, delay);
        } else {
            self.set_phase(Phase::Choosing, 0.0);
        }
    }
}
