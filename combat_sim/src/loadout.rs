//! Loadout - A reproducible player build for a given level

use combat_core::reward::xp_to_next_level;
use combat_core::{
    CombatTables, EquipmentBonuses, ItemBag, PlayerSkills, PlayerStats, Progression,
    RewardGrantor, StatKind,
};

/// Order stat points are spent in, repeated until none are left
const ALLOCATION_ORDER: &[StatKind] = &[
    StatKind::Strength,
    StatKind::MaxHp,
    StatKind::Intelligence,
    StatKind::Resilience,
    StatKind::Dexterity,
];

/// Everything the auto-battler brings into a fight
#[derive(Debug, Clone)]
pub struct Loadout {
    pub stats: PlayerStats,
    pub equipment: EquipmentBonuses,
    pub skills: PlayerSkills,
    pub bag: ItemBag,
}

impl Loadout {
    /// Level a fresh character to `level` through the normal reward path
    pub fn for_level(tables: &CombatTables, level: u32) -> Self {
        let base_xp = tables.constants.leveling.base_xp;
        let mut stats = PlayerStats::default();
        let mut progression = Progression::new(base_xp);

        let xp: u32 = (1..level.max(1))
            .map(|l| xp_to_next_level(l, base_xp))
            .sum();
        progression.grant(&mut stats, xp, 0);

        let mut order = ALLOCATION_ORDER.iter().cycle();
        while stats.unspent_points > 0 {
            match order.next() {
                Some(stat) => {
                    stats.allocate(*stat);
                }
                None => break,
            }
        }
        stats.heal_full();

        let mut skills = progression.skills;
        unlock_in_tree_order(&mut skills, tables);

        Loadout {
            stats,
            equipment: EquipmentBonuses::default(),
            skills,
            bag: starter_bag(),
        }
    }
}

/// Spend skill points row by row until nothing else can be bought
fn unlock_in_tree_order(skills: &mut PlayerSkills, tables: &CombatTables) {
    let mut tree: Vec<_> = tables.skills.values().collect();
    tree.sort_by_key(|s| (s.tree_row, s.tree_col));

    loop {
        let unlocked = tree
            .iter()
            .find(|s| skills.can_unlock(&s.id, &tables.skills))
            .map(|s| s.id.clone());
        match unlocked {
            Some(id) => {
                skills.unlock(&id, &tables.skills);
            }
            None => break,
        }
    }
}

fn starter_bag() -> ItemBag {
    let mut bag = ItemBag::new();
    bag.add("Repair Kit", 2);
    bag.add("Antidote Chip", 1);
    bag
}
