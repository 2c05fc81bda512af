//! Property tests: random fights never leave HP/SP or statuses out of bounds

use combat_core::prelude::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn all_skills(tables: &CombatTables) -> PlayerSkills {
    let mut skills = PlayerSkills::new();
    skills.unlocked.extend(tables.skills.keys().cloned());
    skills
}

fn stocked_bag() -> ItemBag {
    let mut bag = ItemBag::new();
    bag.add("Repair Kit", 3);
    bag.add("Voltage Spike", 2);
    bag.add("Iron Plating", 2);
    bag.add("Antidote Chip", 2);
    bag.add("Scrap Metal", 5);
    bag
}

fn check_bounds(enc: &Encounter<'_>) {
    for c in [enc.player(), enc.enemy()] {
        assert!(c.hp >= 0 && c.hp <= c.max_hp, "{} hp {} / {}", c.name, c.hp, c.max_hp);
        assert!(c.sp >= 0 && c.sp <= c.max_sp, "{} sp {} / {}", c.name, c.sp, c.max_sp);
    }
    for side in [Side::Player, Side::Enemy] {
        for kind in StatusKind::all() {
            let count = enc
                .statuses()
                .statuses(side)
                .iter()
                .filter(|e| e.kind == *kind)
                .count();
            assert!(count <= 1, "{:?} has {} x {}", side, count, kind);
        }
    }
}

/// Random policy; returns the finished encounter's outcome
fn play(seed: u64, enemy_id: &str, stats: &PlayerStats) -> Outcome {
    let tables = CombatTables::default_tables().unwrap();
    let skills = all_skills(&tables);
    let mut bag = stocked_bag();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let gear = EquipmentBonuses {
        max_hp: 4,
        intelligence: 2,
        ..Default::default()
    };

    let mut enc = Encounter::new(&tables, stats, &gear, enemy_id).unwrap();
    for _ in 0..2000 {
        if enc.phase().is_terminal() {
            break;
        }
        match enc.phase() {
            Phase::Choosing => match rng.gen_range(0..6) {
                0 | 1 => {
                    enc.attack(&mut rng);
                }
                2 => {
                    enc.defend();
                }
                3 => {
                    enc.open_skill_menu(&skills);
                }
                4 => {
                    enc.open_item_menu(&bag);
                }
                _ => {
                    enc.flee(&mut rng);
                }
            },
            Phase::SkillSelect => {
                let index = rng.gen_range(0..enc.skill_menu().len());
                if !enc.use_skill(index) {
                    enc.cancel_menu();
                }
            }
            Phase::ItemSelect => {
                let index = rng.gen_range(0..enc.item_menu().len());
                if !enc.use_item(index, &mut bag) {
                    enc.cancel_menu();
                }
            }
            _ => enc.update(0.25, &mut rng),
        }
        check_bounds(&enc);
    }

    let mut after = stats.clone();
    let mut progression = Progression::new(tables.constants.leveling.base_xp);
    let summary = enc
        .acknowledge(&mut after, &mut progression)
        .expect("fight should finish");
    assert!(after.current_hp >= 1 && after.current_hp <= after.max_hp);
    assert!(after.current_sp >= 0 && after.current_sp <= after.max_sp);
    assert_eq!(enc.player().defense, 3);
    summary.outcome
}

proptest! {
    #[test]
    fn random_fights_stay_in_bounds(seed in any::<u64>(), enemy in 0usize..5) {
        let ids = ["scrap_rat", "rust_golem", "volt_wraith", "glitch_phantom", "junk_drone"];
        play(seed, ids[enemy], &PlayerStats::default());
    }

    #[test]
    fn weak_player_fights_stay_in_bounds(seed in any::<u64>(), hp in 1i32..10, sp in 0i32..4) {
        let stats = PlayerStats {
            current_hp: hp,
            current_sp: sp,
            ..Default::default()
        };
        play(seed, "volt_wraith", &stats);
    }
}

#[test]
fn seeded_fight_is_reproducible() {
    let stats = PlayerStats::default();
    assert_eq!(play(42, "rust_golem", &stats), play(42, "rust_golem", &stats));
}
