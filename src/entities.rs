/// All game entity types: pure data plus read-only helpers.
///
/// Nothing in this module advances the simulation; that lives in `compute`,
/// `boss` and `collision`.
use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

// ── Board ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Square board of `size` x `size` cells, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub size: i32,
}

impl Grid {
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    pub fn random_cell(&self, rng: &mut impl Rng) -> Cell {
        Cell::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size))
    }

    /// Uniform random cell other than `avoid`. Falls back to any cell on a
    /// board too small to have a second one.
    pub fn random_cell_except(&self, rng: &mut impl Rng, avoid: Cell) -> Cell {
        if self.size < 2 {
            return self.random_cell(rng);
        }
        loop {
            let cell = self.random_cell(rng);
            if cell != avoid {
                return cell;
            }
        }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Per-tick movement request from the input layer. Each axis is in {-1, 0, 1}.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub dx: i32,
    pub dy: i32,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent { dx: 0, dy: 0 };

    /// Build an intent, squashing each axis to a unit step.
    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl From<Direction> for MoveIntent {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        MoveIntent { dx, dy }
    }
}

// ── Player & boss ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub cell: Cell,
    /// Set while a power-up is active; cleared by the first tick at or past it.
    pub invincible_until: Option<Instant>,
}

impl Player {
    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boss {
    pub cell: Cell,
    pub hp: u32,
    /// Ticks until the next straight-line volley is allowed.
    pub cooldown: u32,
}

impl Boss {
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Fireball travelling one cell per tick until it would leave the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearProjectile {
    pub cell: Cell,
    pub direction: Direction,
}

/// Stationary fireball that burns out after a number of ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransientProjectile {
    pub cell: Cell,
    pub remaining_lifetime: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projectile {
    Linear(LinearProjectile),
    Transient(TransientProjectile),
}

impl Projectile {
    pub fn cell(&self) -> Cell {
        match self {
            Projectile::Linear(p) => p.cell,
            Projectile::Transient(p) => p.cell,
        }
    }
}

// ── Bonus item ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUp {
    pub cell: Cell,
}

// ── Render view ───────────────────────────────────────────────────────────────

/// Anything the presentation layer may draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entity {
    Player(Player),
    Boss(Boss),
    LinearProjectile(LinearProjectile),
    TransientProjectile(TransientProjectile),
    PowerUp(PowerUp),
}

impl Entity {
    pub fn cell(&self) -> Cell {
        match self {
            Entity::Player(p) => p.cell,
            Entity::Boss(b) => b.cell,
            Entity::LinearProjectile(p) => p.cell,
            Entity::TransientProjectile(p) => p.cell,
            Entity::PowerUp(p) => p.cell,
        }
    }
}

impl From<Projectile> for Entity {
    fn from(projectile: Projectile) -> Self {
        match projectile {
            Projectile::Linear(p) => Entity::LinearProjectile(p),
            Projectile::Transient(p) => Entity::TransientProjectile(p),
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Playing,
    GameOverWin,
    GameOverLose,
}

impl Phase {
    pub fn is_game_over(self) -> bool {
        matches!(self, Phase::GameOverWin | Phase::GameOverLose)
    }

    pub fn result(self) -> Option<GameResult> {
        match self {
            Phase::GameOverWin => Some(GameResult::Win),
            Phase::GameOverLose => Some(GameResult::Lose),
            Phase::Intro | Phase::Playing => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Intro => "intro",
            Phase::Playing => "playing",
            Phase::GameOverWin => "game-over (win)",
            Phase::GameOverLose => "game-over (lose)",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Lose,
}

/// The complete state of one playthrough. Cloneable so update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub grid: Grid,
    pub player: Player,
    pub boss: Boss,
    /// Active fireballs of both kinds, in spawn order.
    pub projectiles: Vec<Projectile>,
    /// At most one power-up is on the board at a time.
    pub power_up: Option<PowerUp>,
    pub phase: Phase,
    pub score: i64,
    pub elapsed_ticks: u64,
    pub moves_made: u32,
    pub powerups_collected: u32,
    /// Clock reading when play began; `None` while in the intro.
    pub started_at: Option<Instant>,
    /// Reference point for the timed power-up spawn.
    pub last_powerup_spawn: Option<Instant>,
}

impl Session {
    pub fn linear_projectiles(&self) -> impl Iterator<Item = &LinearProjectile> + '_ {
        self.projectiles.iter().filter_map(|p| match p {
            Projectile::Linear(l) => Some(l),
            Projectile::Transient(_) => None,
        })
    }

    pub fn transient_projectiles(&self) -> impl Iterator<Item = &TransientProjectile> + '_ {
        self.projectiles.iter().filter_map(|p| match p {
            Projectile::Transient(t) => Some(t),
            Projectile::Linear(_) => None,
        })
    }

    /// Everything drawable, back to front. A defeated boss is left out.
    pub fn entities(&self) -> Vec<Entity> {
        let mut out = Vec::with_capacity(self.projectiles.len() + 3);
        if let Some(power_up) = self.power_up {
            out.push(Entity::PowerUp(power_up));
        }
        out.extend(self.projectiles.iter().copied().map(Entity::from));
        if !self.boss.is_defeated() {
            out.push(Entity::Boss(self.boss));
        }
        out.push(Entity::Player(self.player));
        out
    }
}
