use slay_the_dragon::boss::*;
use slay_the_dragon::entities::*;
use slay_the_dragon::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn grid() -> Grid {
    Grid { size: 25 }
}

fn boss_with_hp(hp: u32) -> Boss {
    Boss {
        cell: Cell::new(12, 12),
        hp,
        cooldown: 0,
    }
}

// ── spawn_boss ────────────────────────────────────────────────────────────────

#[test]
fn spawn_boss_full_hp_not_on_player() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let boss = spawn_boss(&config, grid(), Cell::new(0, 0), &mut rng);
        assert_eq!(boss.hp, 10);
        assert_eq!(boss.cooldown, 0);
        assert!(grid().contains(boss.cell));
        assert_ne!(boss.cell, Cell::new(0, 0));
    }
}

// ── strike ────────────────────────────────────────────────────────────────────

#[test]
fn strike_takes_one_hp_and_teleports() {
    let boss = boss_with_hp(6);
    let player = boss.cell;
    let hit = strike(&boss, grid(), player, &mut seeded_rng());
    assert_eq!(hit.hp, 5);
    assert_ne!(hit.cell, player);
    assert!(grid().contains(hit.cell));
}

#[test]
fn strike_keeps_cooldown() {
    let mut boss = boss_with_hp(6);
    boss.cooldown = 3;
    let hit = strike(&boss, grid(), boss.cell, &mut seeded_rng());
    assert_eq!(hit.cooldown, 3);
}

#[test]
fn strike_saturates_at_zero() {
    let boss = boss_with_hp(0);
    let hit = strike(&boss, grid(), boss.cell, &mut seeded_rng());
    assert_eq!(hit.hp, 0);
    assert!(hit.is_defeated());
}

// ── update_cooldown ───────────────────────────────────────────────────────────

#[test]
fn cooldown_counts_down_and_stops_at_zero() {
    let mut boss = boss_with_hp(7);
    boss.cooldown = 1;
    let boss = update_cooldown(&boss);
    assert_eq!(boss.cooldown, 0);
    let boss = update_cooldown(&boss);
    assert_eq!(boss.cooldown, 0);
}

// ── shoot ─────────────────────────────────────────────────────────────────────

#[test]
fn shoot_emits_one_fireball_per_direction() {
    let config = GameConfig::default();
    let (boss, volley) = shoot(&boss_with_hp(7), &config);
    assert_eq!(volley.len(), 4);
    assert_eq!(boss.cooldown, 5);
    for direction in Direction::ALL {
        assert_eq!(
            volley.iter().filter(|p| p.direction == direction).count(),
            1,
            "expected exactly one fireball heading {:?}",
            direction
        );
    }
    assert!(volley.iter().all(|p| p.cell == Cell::new(12, 12)));
}

#[test]
fn shoot_blocked_by_cooldown() {
    let config = GameConfig::default();
    let (boss, _) = shoot(&boss_with_hp(6), &config);
    let (again, volley) = shoot(&boss, &config);
    assert!(volley.is_empty());
    assert_eq!(again.cooldown, 5);
}

#[test]
fn shoot_only_inside_hp_window() {
    let config = GameConfig::default();
    for hp in [0, 3, 4, 8, 9, 10] {
        let (boss, volley) = shoot(&boss_with_hp(hp), &config);
        assert!(volley.is_empty(), "hp {} should not fire a volley", hp);
        assert_eq!(boss.cooldown, 0);
    }
    for hp in [5, 6, 7] {
        let (_, volley) = shoot(&boss_with_hp(hp), &config);
        assert_eq!(volley.len(), 4, "hp {} should fire a volley", hp);
    }
}

#[test]
fn shoot_does_not_mutate_original() {
    let config = GameConfig::default();
    let boss = boss_with_hp(7);
    let _ = shoot(&boss, &config);
    assert_eq!(boss.cooldown, 0);
}

// ── spawn_random ──────────────────────────────────────────────────────────────

#[test]
fn spawn_random_count_depends_on_hp() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    assert_eq!(spawn_random(&boss_with_hp(4), &config, grid(), &mut rng).len(), 2);
    assert_eq!(spawn_random(&boss_with_hp(3), &config, grid(), &mut rng).len(), 3);
    assert_eq!(spawn_random(&boss_with_hp(1), &config, grid(), &mut rng).len(), 5);
    assert_eq!(spawn_random(&boss_with_hp(0), &config, grid(), &mut rng).len(), 6);
}

#[test]
fn spawn_random_silent_at_or_above_threshold() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for hp in [5, 7, 10] {
        assert!(spawn_random(&boss_with_hp(hp), &config, grid(), &mut rng).is_empty());
    }
}

#[test]
fn spawn_random_cells_and_lifetimes_in_range() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..20 {
        for p in spawn_random(&boss_with_hp(0), &config, grid(), &mut rng) {
            assert!(grid().contains(p.cell));
            assert!((10..=30).contains(&p.remaining_lifetime));
        }
    }
}

#[test]
fn spawn_random_is_reproducible_under_seed() {
    let config = GameConfig::default();
    let a = spawn_random(&boss_with_hp(2), &config, grid(), &mut seeded_rng());
    let b = spawn_random(&boss_with_hp(2), &config, grid(), &mut seeded_rng());
    assert_eq!(a, b);
}
