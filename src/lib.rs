//! Grid-based dragon fight: the render-free simulation core.
//!
//! A `Session` owns the player, the boss, every live fireball and the
//! power-up. `compute::tick` advances it one step at a time; the caller
//! supplies the movement intent, a monotonic clock reading and the RNG.

pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod summary;

pub use config::GameConfig;
pub use error::{GameError, Result};
