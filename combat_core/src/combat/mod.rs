//! Combat - Combatants, the encounter state machine, and its pieces

mod combatant;
mod dice;
mod encounter;
mod phase;
mod result;
mod targets;
mod turn;

pub use combatant::Combatant;
pub use dice::{Dice, ScriptedDice};
pub use encounter::{Encounter, EncounterError};
pub use phase::Phase;
pub use result::EncounterSummary;
pub use targets::{EffectTargets, Modifiers, DEBUFF_TURNS};
