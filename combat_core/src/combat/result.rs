//! EncounterSummary - What a finished encounter handed back

use crate::reward::LevelUpReport;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// Returned once by `Encounter::acknowledge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub outcome: Outcome,
    pub enemy_id: String,
    /// Full rounds completed (enemy turn plus end-of-round)
    pub rounds: u32,

    // === Rewards (victory only) ===
    pub xp_gained: u32,
    pub money_gained: u32,
    pub level_up: Option<LevelUpReport>,

    // === Penalties (defeat only) ===
    pub money_lost: u32,

    // === Synced state ===
    /// Persistent HP after the encounter
    pub hp: i32,
    /// Persistent SP after the encounter
    pub sp: i32,
}

impl EncounterSummary {
    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Victory
    }
}
