/// Boss controller.
///
/// Which attack fires is a pure function of the boss's HP and cooldown.
/// Randomness only decides where transient fireballs and teleports land,
/// and always comes through the injected RNG.
use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{
    Boss, Cell, Direction, Grid, LinearProjectile, TransientProjectile,
};

/// Fresh boss at full HP on a random cell that is not `player`.
pub fn spawn_boss(config: &GameConfig, grid: Grid, player: Cell, rng: &mut impl Rng) -> Boss {
    Boss {
        cell: grid.random_cell_except(rng, player),
        hp: config.boss_hp,
        cooldown: 0,
    }
}

/// The player landed on the boss: one damage, then teleport away from them.
pub fn strike(boss: &Boss, grid: Grid, player: Cell, rng: &mut impl Rng) -> Boss {
    let hp = boss.hp.saturating_sub(1);
    let cell = grid.random_cell_except(rng, player);
    debug!(hp, x = cell.x, y = cell.y, "boss hit and teleported");
    Boss { cell, hp, ..*boss }
}

pub fn update_cooldown(boss: &Boss) -> Boss {
    Boss {
        cooldown: boss.cooldown.saturating_sub(1),
        ..*boss
    }
}

/// Straight-line volley: one fireball per cardinal direction from the boss
/// cell, only inside the HP window and with the cooldown elapsed.
pub fn shoot(boss: &Boss, config: &GameConfig) -> (Boss, Vec<LinearProjectile>) {
    if !config.shoot_hp.contains(&boss.hp) || boss.cooldown != 0 {
        return (*boss, Vec::new());
    }
    let volley: Vec<LinearProjectile> = Direction::ALL
        .iter()
        .map(|&direction| LinearProjectile {
            cell: boss.cell,
            direction,
        })
        .collect();
    debug!(hp = boss.hp, "boss fires volley");
    let boss = Boss {
        cooldown: config.shoot_cooldown,
        ..*boss
    };
    (boss, volley)
}

/// Low-HP attack: `spawn_count_base - hp` fireballs scattered over the board,
/// each with its own lifetime.
pub fn spawn_random(
    boss: &Boss,
    config: &GameConfig,
    grid: Grid,
    rng: &mut impl Rng,
) -> Vec<TransientProjectile> {
    if boss.hp >= config.spawn_hp_below {
        return Vec::new();
    }
    let count = config.spawn_count_base.saturating_sub(boss.hp);
    (0..count)
        .map(|_| TransientProjectile {
            cell: grid.random_cell(rng),
            remaining_lifetime: rng.gen_range(config.transient_lifetime.clone()),
        })
        .collect()
}
