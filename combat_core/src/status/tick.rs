//! End-of-round status processing

use crate::combat::Combatant;
use crate::types::{Side, StatusEffect, StatusKind};

/// Result of one end-of-round status tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Messages in processing order (player side first)
    pub messages: Vec<String>,
    /// HP the player lost to damage-over-time
    pub player_damage: i32,
    /// HP the enemy lost to damage-over-time
    pub enemy_damage: i32,
    /// Effects that wore off this tick
    pub expired: Vec<(Side, StatusKind)>,
}

impl TickReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count "wore off" events for one kind on one side
    pub fn expired_count(&self, side: Side, kind: StatusKind) -> usize {
        self.expired
            .iter()
            .filter(|(s, k)| *s == side && *k == kind)
            .count()
    }
}

/// Apply damage-over-time and count down every effect on one side
///
/// Stun is skipped: it is consumed by the stun check at the start of the
/// afflicted side's action rather than counted down here.
/// Returns the kinds that expired, in list order.
pub(super) fn tick_side(
    side: Side,
    statuses: &mut Vec<StatusEffect>,
    target: &mut Combatant,
    report: &mut TickReport,
) -> Vec<StatusKind> {
    let mut expired = Vec::new();

    for effect in statuses.iter_mut() {
        if effect.kind == StatusKind::Stun {
            continue;
        }

        let damage = effect.kind.tick_damage();
        if damage > 0 {
            let lost = target.take_damage(damage);
            match side {
                Side::Player => {
                    report.player_damage += lost;
                    report
                        .messages
                        .push(format!("{} dealt {} damage!", effect.kind, damage));
                }
                Side::Enemy => {
                    report.enemy_damage += lost;
                    report.messages.push(format!(
                        "{} took {} {} damage!",
                        target.name,
                        damage,
                        effect.kind.name().to_lowercase()
                    ));
                }
            }
        }

        if effect.tick() {
            expired.push(effect.kind);
        }
    }

    statuses.retain(|e| e.turns_remaining > 0 || e.kind == StatusKind::Stun);
    expired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Combatant {
        Combatant {
            name: "Scrap Rat".to_string(),
            hp: 10,
            max_hp: 10,
            sp: 0,
            max_sp: 0,
            attack: 4,
            defense: 1,
        }
    }

    #[test]
    fn test_poison_damages_before_countdown() {
        let mut statuses = vec![StatusEffect::new(StatusKind::Poison, 1)];
        let mut rat = target();
        let mut report = TickReport::new();

        let expired = tick_side(Side::Enemy, &mut statuses, &mut rat, &mut report);

        assert_eq!(rat.hp, 8);
        assert_eq!(report.enemy_damage, 2);
        assert_eq!(expired, vec![StatusKind::Poison]);
        assert!(statuses.is_empty());
        assert_eq!(report.messages, vec!["Scrap Rat took 2 poison damage!"]);
    }

    #[test]
    fn test_stun_not_counted_down() {
        let mut statuses = vec![StatusEffect::new(StatusKind::Stun, 1)];
        let mut rat = target();
        let mut report = TickReport::new();

        let expired = tick_side(Side::Enemy, &mut statuses, &mut rat, &mut report);

        assert!(expired.is_empty());
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].turns_remaining, 1);
    }

    #[test]
    fn test_dot_damage_clamped() {
        let mut statuses = vec![StatusEffect::new(StatusKind::Poison, 3)];
        let mut rat = target();
        rat.hp = 1;
        let mut report = TickReport::new();

        tick_side(Side::Player, &mut statuses, &mut rat, &mut report);

        assert_eq!(rat.hp, 0);
        assert_eq!(report.player_damage, 1);
        assert_eq!(report.messages, vec!["Poison dealt 2 damage!"]);
    }
}
