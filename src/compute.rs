/// Pure game-logic functions: the tick scheduler and the session state machine.
///
/// Every public function takes an immutable reference to the current
/// `Session` (and, where needed, a clock reading and an RNG handle) and
/// returns a brand-new `Session`. Side effects are limited to the injected RNG.
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::boss;
use crate::collision;
use crate::config::GameConfig;
use crate::entities::{
    Cell, Grid, LinearProjectile, MoveIntent, Phase, Player, PowerUp, Projectile, Session,
    TransientProjectile,
};
use crate::error::{GameError, Result};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a session waiting in the intro screen.
pub fn init_session(config: &GameConfig, rng: &mut impl Rng) -> Session {
    let grid = Grid {
        size: config.grid_size,
    };
    let player = Player {
        cell: Cell::new(0, 0),
        invincible_until: None,
    };
    Session {
        config: config.clone(),
        grid,
        player,
        boss: boss::spawn_boss(config, grid, player.cell, rng),
        projectiles: Vec::new(),
        power_up: None,
        phase: Phase::Intro,
        score: config.initial_score,
        elapsed_ticks: 0,
        moves_made: 0,
        powerups_collected: 0,
        started_at: None,
        last_powerup_spawn: None,
    }
}

// ── Phase transitions ────────────────────────────────────────────────────────

/// Intro → Playing.
pub fn start(state: &Session, now: Instant) -> Result<Session> {
    if state.phase != Phase::Intro {
        return Err(GameError::IllegalTransition {
            from: state.phase,
            action: "start",
        });
    }
    info!(grid = state.grid.size, boss_hp = state.boss.hp, "game started");
    Ok(Session {
        phase: Phase::Playing,
        started_at: Some(now),
        last_powerup_spawn: Some(now),
        ..state.clone()
    })
}

/// GameOver → Playing with every owned entity and counter rebuilt.
pub fn restart(state: &Session, now: Instant, rng: &mut impl Rng) -> Result<Session> {
    if !state.phase.is_game_over() {
        return Err(GameError::IllegalTransition {
            from: state.phase,
            action: "restart",
        });
    }
    info!(previous = %state.phase, score = state.score, "game restarted");
    let fresh = init_session(&state.config, rng);
    Ok(Session {
        phase: Phase::Playing,
        started_at: Some(now),
        last_powerup_spawn: Some(now),
        ..fresh
    })
}

// ── Input-driven movement (pure) ─────────────────────────────────────────────

/// Apply a movement intent. Each axis step is taken only if it keeps the
/// player on the board; rejected steps are silently dropped.
pub fn move_player(state: &Session, intent: MoveIntent) -> Session {
    let intent = MoveIntent::new(intent.dx, intent.dy);
    let from = state.player.cell;
    let mut to = from;
    if state.grid.contains(Cell::new(from.x + intent.dx, from.y)) {
        to.x += intent.dx;
    }
    if state.grid.contains(Cell::new(to.x, from.y + intent.dy)) {
        to.y += intent.dy;
    }
    if to == from {
        return state.clone();
    }
    Session {
        player: Player {
            cell: to,
            ..state.player
        },
        moves_made: state.moves_made + 1,
        ..state.clone()
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Advance one projectile by a tick. `None` means it is gone: a linear
/// fireball that would leave the board, or a transient one that burned out.
pub fn advance_projectile(projectile: &Projectile, grid: Grid) -> Option<Projectile> {
    match *projectile {
        Projectile::Linear(p) => {
            let (dx, dy) = p.direction.delta();
            let cell = Cell::new(p.cell.x + dx, p.cell.y + dy);
            grid.contains(cell)
                .then_some(Projectile::Linear(LinearProjectile { cell, ..p }))
        }
        Projectile::Transient(p) => {
            let remaining_lifetime = p.remaining_lifetime.saturating_sub(1);
            (remaining_lifetime > 0).then_some(Projectile::Transient(TransientProjectile {
                remaining_lifetime,
                ..p
            }))
        }
    }
}

// ── Power-up spawning ────────────────────────────────────────────────────────

/// Place a power-up if none is on the board and either the random draw hits
/// or the spawn interval has elapsed. Never lands on the player.
fn spawn_power_up(state: &Session, now: Instant, rng: &mut impl Rng) -> Session {
    if state.power_up.is_some() {
        return state.clone();
    }
    let lucky = rng.gen_ratio(1, state.config.powerup_chance);
    let due = state.last_powerup_spawn.map_or(true, |last| {
        now.saturating_duration_since(last) >= state.config.powerup_interval
    });
    if !(lucky || due) {
        return state.clone();
    }
    let cell = state.grid.random_cell_except(rng, state.player.cell);
    debug!(x = cell.x, y = cell.y, lucky, "power-up spawned");
    Session {
        power_up: Some(PowerUp { cell }),
        last_powerup_spawn: Some(now),
        ..state.clone()
    }
}

// ── Per-tick scheduler (RNG and clock are injected) ──────────────────────────

/// Advance the simulation by one tick. Outside `Playing` the state is
/// returned unchanged.
///
/// Order: player move, boss strike (a defeat ends the tick before any attack
/// fires), cooldown, boss attacks, projectile movement, collisions, then
/// power-up spawn and score decay.
pub fn tick(state: &Session, intent: MoveIntent, now: Instant, rng: &mut impl Rng) -> Session {
    if state.phase != Phase::Playing {
        return state.clone();
    }

    // ── 1. Move the player ───────────────────────────────────────────────────
    let mut next = move_player(state, intent);
    next.elapsed_ticks += 1;

    // ── 2. Player strikes the boss ───────────────────────────────────────────
    if next.player.cell == next.boss.cell {
        next.boss = boss::strike(&next.boss, next.grid, next.player.cell, rng);
        if next.boss.is_defeated() {
            next.phase = Phase::GameOverWin;
            next.score = next.score.saturating_add(next.config.win_bonus);
            info!(score = next.score, ticks = next.elapsed_ticks, "boss defeated");
            return next;
        }
    }

    // ── 3. Boss attacks ──────────────────────────────────────────────────────
    next.boss = boss::update_cooldown(&next.boss);
    let (armed, volley) = boss::shoot(&next.boss, &next.config);
    next.boss = armed;
    next.projectiles.extend(volley.into_iter().map(Projectile::Linear));
    let scattered = boss::spawn_random(&next.boss, &next.config, next.grid, rng);

    // ── 4. Move / age projectiles ────────────────────────────────────────────
    // A fresh volley leaves the boss cell this tick. Fresh scatters are not
    // aged until the next tick, so a lifetime of `L` is on the board `L` ticks.
    let grid = next.grid;
    next.projectiles = next
        .projectiles
        .iter()
        .filter_map(|p| advance_projectile(p, grid))
        .chain(scattered.into_iter().map(Projectile::Transient))
        .collect();

    // ── 5. Collisions ────────────────────────────────────────────────────────
    let next = collision::evaluate(&next, now);
    if next.phase != Phase::Playing {
        return next;
    }

    // ── 6. Power-up & score decay ────────────────────────────────────────────
    let mut next = spawn_power_up(&next, now, rng);
    next.score = next.score.saturating_sub(next.config.score_decay);
    next
}

/// How long the caller should wait before the next tick.
pub fn tick_interval(state: &Session) -> Duration {
    if state.player.is_invincible() {
        state.config.invincible_tick_period()
    } else {
        state.config.tick_period()
    }
}
