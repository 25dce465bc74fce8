/// Tunable game constants.
///
/// Every number the simulation depends on lives here so that tests and the
/// binary can build sessions with different rules without touching logic.
use std::ops::{Range, RangeInclusive};
use std::time::Duration;

use crate::error::{GameError, Result};

/// Largest board the terminal shell can address: two columns per cell plus
/// the border must fit in a `u16` screen coordinate.
pub const MAX_GRID_SIZE: i32 = 1000;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Cells per side of the square board.
    pub grid_size: i32,
    /// Boss HP at the start of every session.
    pub boss_hp: u32,
    /// Ticks the boss waits between straight-line volleys.
    pub shoot_cooldown: u32,
    /// HP window in which the boss fires straight-line volleys.
    pub shoot_hp: Range<u32>,
    /// Below this HP the boss scatters transient fireballs every tick.
    pub spawn_hp_below: u32,
    /// Transient fireballs per tick are `spawn_count_base - hp`.
    pub spawn_count_base: u32,
    /// Lifetime (ticks) drawn for each transient fireball.
    pub transient_lifetime: RangeInclusive<u32>,
    pub initial_score: i64,
    /// Subtracted from the score on every playing tick.
    pub score_decay: i64,
    /// Subtracted from the score when a power-up is picked up.
    pub powerup_penalty: i64,
    /// Added to the score when the boss is defeated.
    pub win_bonus: i64,
    /// Per-tick spawn chance for the power-up, as `1 in n`.
    pub powerup_chance: u32,
    /// A power-up is forced once this much time passed since the previous spawn.
    pub powerup_interval: Duration,
    /// How long a picked-up power-up protects the player.
    pub invincibility: Duration,
    pub tick_hz: u32,
    /// Tick rate while the player is invincible.
    pub invincible_tick_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            boss_hp: 10,
            shoot_cooldown: 5,
            shoot_hp: 5..8,
            spawn_hp_below: 5,
            spawn_count_base: 6,
            transient_lifetime: 10..=30,
            initial_score: 1000,
            score_decay: 1,
            powerup_penalty: 50,
            win_bonus: 500,
            powerup_chance: 150,
            powerup_interval: Duration::from_secs(15),
            invincibility: Duration::from_secs(5),
            tick_hz: 10,
            invincible_tick_hz: 20,
        }
    }
}

impl GameConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "grid size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.boss_hp == 0 {
            return Err(GameError::InvalidConfig("boss HP must be positive".into()));
        }
        if self.tick_hz == 0 || self.invincible_tick_hz == 0 {
            return Err(GameError::InvalidConfig("tick rates must be positive".into()));
        }
        if self.transient_lifetime.is_empty() || *self.transient_lifetime.start() == 0 {
            return Err(GameError::InvalidConfig(format!(
                "transient lifetime range {:?} must be non-empty and start above 0",
                self.transient_lifetime
            )));
        }
        if self.powerup_chance == 0 {
            return Err(GameError::InvalidConfig(
                "power-up chance denominator must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz
    }

    pub fn invincible_tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.invincible_tick_hz
    }
}
