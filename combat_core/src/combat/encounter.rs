//! Encounter - The turn state machine for one fight
//!
//! Player actions are applied the moment they are chosen. The resolving
//! phases only hold a pacing timer; when it runs out `update` runs the
//! enemy's turn or the end-of-round bookkeeping.

use super::dice::Dice;
use super::phase::Phase;
use super::result::EncounterSummary;
use super::targets::{EffectTargets, Modifiers};
use super::Combatant;
use crate::config::{CombatTables, EnemyTemplate};
use crate::item::{apply_item, Inventory};
use crate::reward::RewardGrantor;
use crate::skill::{apply_skill, PlayerSkills};
use crate::stats::formulas::DESPONDENT_DEX_PENALTY;
use crate::stats::{
    calc_basic_damage, calc_flee_chance, calc_hit_chance, EquipmentBonuses, PlayerStats,
};
use crate::status::StatusEffectEngine;
use crate::types::{Outcome, Side, StatusKind};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure to start an encounter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncounterError {
    #[error("Unknown enemy id: {0}")]
    UnknownEnemy(String),
}

/// One fight between the player and a single enemy
#[derive(Debug, Clone)]
pub struct Encounter<'a> {
    pub(super) tables: &'a CombatTables,
    pub(super) template: &'a EnemyTemplate,
    /// Placed one-off enemy; reported to the grantor on completion
    pub(super) scripted: bool,

    /// Persistent stats as read at the start
    pub(super) stats: PlayerStats,
    pub(super) equipment: EquipmentBonuses,

    pub(super) player: Combatant,
    pub(super) enemy: Combatant,
    pub(super) statuses: StatusEffectEngine,
    pub(super) modifiers: Modifiers,
    pub(super) defending: bool,

    pub(super) phase: Phase,
    pub(super) phase_timer: f64,
    pub(super) skill_menu: Vec<String>,
    pub(super) item_menu: Vec<String>,
    pub(super) message: String,
    pub(super) log: Vec<String>,
    pub(super) rounds: u32,
    pub(super) acknowledged: bool,
}

impl<'a> Encounter<'a> {
    /// Start a fight against `enemy_id`
    ///
    /// `stats` is read here and not again until `acknowledge`.
    pub fn new(
        tables: &'a CombatTables,
        stats: &PlayerStats,
        equipment: &EquipmentBonuses,
        enemy_id: &str,
    ) -> Result<Self, EncounterError> {
        let template = tables
            .enemy(enemy_id)
            .ok_or_else(|| EncounterError::UnknownEnemy(enemy_id.to_string()))?;

        let player = Combatant::player(stats, equipment);
        let enemy = Combatant::enemy(template);
        let modifiers = Modifiers::new(&enemy);
        info!(enemy = %template.id, player_hp = player.hp, "encounter started");

        Ok(Encounter {
            tables,
            template,
            scripted: false,
            stats: stats.clone(),
            equipment: *equipment,
            player,
            enemy,
            statuses: StatusEffectEngine::new(),
            modifiers,
            defending: false,
            phase: Phase::Choosing,
            phase_timer: 0.0,
            skill_menu: Vec::new(),
            item_menu: Vec::new(),
            message: format!("{} appears!", template.name),
            log: vec![format!("{} appears!", template.name)],
            rounds: 0,
            acknowledged: false,
        })
    }

    /// Mark this as a placed one-off enemy
    pub fn scripted(mut self) -> Self {
        self.scripted = true;
        self
    }

    // === Accessors ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn enemy_template(&self) -> &EnemyTemplate {
        self.template
    }

    pub fn statuses(&self) -> &StatusEffectEngine {
        &self.statuses
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn phase_timer(&self) -> f64 {
        self.phase_timer
    }

    /// Current one-line message for the UI
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every message shown so far, oldest first
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Skill ids in the open skill menu
    pub fn skill_menu(&self) -> &[String] {
        &self.skill_menu
    }

    /// Item names in the open item menu
    pub fn item_menu(&self) -> &[String] {
        &self.item_menu
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// True once the result has been acknowledged and written back
    pub fn is_over(&self) -> bool {
        self.acknowledged
    }

    // === Helpers ===

    pub(super) fn say(&mut self, message: impl Into<String>) {
        self.message = message.into();
        if !self.message.is_empty() {
            self.log.push(self.message.clone());
        }
    }

    pub(super) fn set_phase(&mut self, phase: Phase, timer: f64) {
        debug!(from = %self.phase, to = %phase, timer, "phase change");
        self.phase = phase;
        self.phase_timer = timer;
    }

    /// Player dexterity for hit rolls (gear included, Despondent applied)
    pub(super) fn player_hit_dexterity(&self) -> i32 {
        let dex = self.stats.dexterity + self.equipment.dexterity;
        if self.statuses.has_status(Side::Player, StatusKind::Despondent) {
            dex - DESPONDENT_DEX_PENALTY
        } else {
            dex
        }
    }

    pub(super) fn targets(&mut self) -> EffectTargets<'_> {
        EffectTargets {
            player: &mut self.player,
            enemy: &mut self.enemy,
            statuses: &mut self.statuses,
            modifiers: &mut self.modifiers,
        }
    }

    pub(super) fn enter_victory(&mut self) {
        self.set_phase(Phase::Victory, 0.0);
        self.say(format!("Defeated {}!", self.enemy.name));
        info!(enemy = %self.template.id, rounds = self.rounds, "victory");
    }

    pub(super) fn enter_defeat(&mut self) {
        self.set_phase(Phase::Defeat, 0.0);
        self.say("You were defeated...");
        info!(enemy = %self.template.id, rounds = self.rounds, "defeat");
    }

    fn accepts(&self, phase: Phase, action: &str) -> bool {
        if self.phase != phase {
            debug!(phase = %self.phase, action, "action ignored outside its phase");
            return false;
        }
        true
    }

    fn player_action_done(&mut self) {
        let delay = self.tables.constants.timing.action_delay;
        self.set_phase(Phase::PlayerResolving, delay);
    }

    // === Player actions ===

    /// Basic attack. A miss still uses the turn.
    pub fn attack(&mut self, dice: &mut impl Dice) -> bool {
        if !self.accepts(Phase::Choosing, "attack") {
            return false;
        }
        self.defending = false;

        let chance = calc_hit_chance(self.player_hit_dexterity(), self.template.dexterity);
        let roll = dice.chance();
        debug!(roll, chance, "player hit roll");
        if roll > chance {
            self.say("Attack missed!");
            self.player_action_done();
            return true;
        }

        let damage = calc_basic_damage(self.player.attack, self.enemy.defense, dice.offset());
        self.enemy.take_damage(damage);
        self.say(format!("Hit {} for {} damage!", self.enemy.name, damage));

        if self.enemy.is_alive() {
            self.player_action_done();
        } else {
            self.enter_victory();
        }
        true
    }

    /// Halve the next enemy hit
    pub fn defend(&mut self) -> bool {
        if !self.accepts(Phase::Choosing, "defend") {
            return false;
        }
        self.defending = true;
        self.say("Bracing for impact...");
        let delay = self.tables.constants.timing.defend_delay;
        self.set_phase(Phase::PlayerResolving, delay);
        true
    }

    /// Try to escape. Failure hands the turn to the enemy.
    pub fn flee(&mut self, dice: &mut impl Dice) -> bool {
        if !self.accepts(Phase::Choosing, "flee") {
            return false;
        }
        self.defending = false;

        let player_dex = self.stats.dexterity + self.equipment.dexterity;
        let chance = calc_flee_chance(player_dex, self.template.dexterity);
        let roll = dice.chance();
        debug!(roll, chance, "flee roll");
        if roll < chance {
            self.set_phase(Phase::Fled, 0.0);
            self.say("Got away safely!");
            info!(enemy = %self.template.id, "fled");
        } else {
            self.say("Couldn't escape!");
            self.player_action_done();
        }
        true
    }

    /// Open the skill list. Nothing changes if no skill is unlocked.
    pub fn open_skill_menu(&mut self, skills: &PlayerSkills) -> bool {
        if !self.accepts(Phase::Choosing, "open_skill_menu") {
            return false;
        }
        let unlocked = skills.unlocked_skills(&self.tables.skills);
        if unlocked.is_empty() {
            self.say("No skills!");
            return false;
        }
        self.skill_menu = unlocked.iter().map(|s| s.id.clone()).collect();
        self.set_phase(Phase::SkillSelect, 0.0);
        true
    }

    /// Open the item list. Nothing changes if no consumable is held.
    pub fn open_item_menu(&mut self, inventory: &dyn Inventory) -> bool {
        if !self.accepts(Phase::Choosing, "open_item_menu") {
            return false;
        }
        let consumables = inventory.consumables(&self.tables.items);
        if consumables.is_empty() {
            self.say("No items!");
            return false;
        }
        self.item_menu = consumables;
        self.set_phase(Phase::ItemSelect, 0.0);
        true
    }

    /// Close a sub-menu without doing anything
    pub fn cancel_menu(&mut self) -> bool {
        if !matches!(self.phase, Phase::SkillSelect | Phase::ItemSelect) {
            return false;
        }
        self.skill_menu.clear();
        self.item_menu.clear();
        self.set_phase(Phase::Choosing, 0.0);
        true
    }

    /// Cast the skill at `index` in the open skill menu
    ///
    /// With too little SP the menu stays open and nothing is spent.
    pub fn use_skill(&mut self, index: usize) -> bool {
        if !self.accepts(Phase::SkillSelect, "use_skill") {
            return false;
        }
        let Some(skill_id) = self.skill_menu.get(index) else {
            return false;
        };
        let tables = self.tables;
        let Some(skill) = tables.skill(skill_id) else {
            warn!(skill = %skill_id, "skill missing from table, ignoring");
            return false;
        };

        if self.player.sp < skill.sp_cost {
            self.say("Not enough SP!");
            return false;
        }

        self.defending = false;
        self.skill_menu.clear();
        let mut targets = EffectTargets {
            player: &mut self.player,
            enemy: &mut self.enemy,
            statuses: &mut self.statuses,
            modifiers: &mut self.modifiers,
        };
        let outcome = apply_skill(skill, &mut targets, &self.stats, &self.equipment);
        self.say(outcome.messages.join(" "));

        if outcome.enemy_defeated {
            self.enter_victory();
        } else {
            self.player_action_done();
        }
        true
    }

    /// Use the item at `index` in the open item menu, taking one from `inventory`
    pub fn use_item(&mut self, index: usize, inventory: &mut dyn Inventory) -> bool {
        if !self.accepts(Phase::ItemSelect, "use_item") {
            return false;
        }
        let Some(name) = self.item_menu.get(index) else {
            return false;
        };
        let tables = self.tables;
        let Some(item) = tables.item(name) else {
            warn!(item = %name, "item missing from table, ignoring");
            return false;
        };

        self.item_menu.clear();
        if !inventory.remove(&item.name) {
            self.say("No items!");
            self.set_phase(Phase::Choosing, 0.0);
            return false;
        }

        self.defending = false;
        let outcome = apply_item(item, &mut self.targets());
        self.say(outcome.message);

        if outcome.enemy_defeated {
            self.enter_victory();
        } else {
            self.player_action_done();
        }
        true
    }

    // === Time ===

    /// Advance the pacing timer; runs the enemy turn or end of round when it expires
    pub fn update(&mut self, dt: f64, dice: &mut impl Dice) {
        if !matches!(self.phase, Phase::PlayerResolving | Phase::EnemyResolving) {
            return;
        }
        self.phase_timer -= dt;
        if self.phase_timer > 0.0 {
            return;
        }
        match self.phase {
            Phase::PlayerResolving => self.enemy_turn(dice),
            Phase::EnemyResolving => self.end_round(),
            _ => {}
        }
    }

    /// Expire the current pacing timer immediately
    pub fn skip_wait(&mut self, dice: &mut impl Dice) {
        let remaining = self.phase_timer.max(0.0);
        self.update(remaining, dice);
    }

    // === Completion ===

    /// Finish a terminal encounter and write results back
    ///
    /// Removes defense buffs and Burn penalties, clears statuses, syncs HP/SP
    /// into `stats`, then grants rewards or applies the defeat penalty.
    /// Returns `None` before the encounter has ended or after the first call.
    pub fn acknowledge(
        &mut self,
        stats: &mut PlayerStats,
        grantor: &mut dyn RewardGrantor,
    ) -> Option<EncounterSummary> {
        let outcome = self.phase.outcome()?;
        if self.acknowledged {
            return None;
        }
        self.acknowledged = true;

        self.modifiers.remove_defense_buff(&mut self.player);
        self.statuses.clear_all(&mut self.player);
        self.modifiers.clear_enemy_debuffs(&mut self.enemy);

        stats.current_hp = (self.player.hp - self.equipment.max_hp)
            .max(1)
            .min(stats.max_hp);
        stats.current_sp = self.player.sp.min(stats.max_sp).max(0);

        let scripted = self.scripted.then_some(self.template.id.as_str());
        let mut summary = EncounterSummary {
            outcome,
            enemy_id: self.template.id.clone(),
            rounds: self.rounds,
            xp_gained: 0,
            money_gained: 0,
            level_up: None,
            money_lost: 0,
            hp: 0,
            sp: 0,
        };

        match outcome {
            Outcome::Victory => {
                let report =
                    grantor.grant(stats, self.template.xp_reward, self.template.money_reward);
                summary.xp_gained = self.template.xp_reward;
                summary.money_gained = self.template.money_reward;
                summary.level_up = Some(report);
            }
            Outcome::Defeat => {
                let defeat = &self.tables.constants.defeat;
                let lost = (f64::from(stats.money) * defeat.money_loss).floor() as u32;
                stats.money = stats.money.saturating_sub(lost);
                stats.current_hp = ((f64::from(stats.max_hp) * defeat.respawn_hp).floor() as i32)
                    .max(1);
                stats.current_sp = stats.max_sp;
                summary.money_lost = lost;
            }
            Outcome::Fled => {}
        }
        grantor.on_encounter_end(outcome, scripted);

        summary.hp = stats.current_hp;
        summary.sp = stats.current_sp;
        info!(%outcome, enemy = %summary.enemy_id, rounds = summary.rounds, "encounter finished");
        Some(summary)
    }
}
