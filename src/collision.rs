/// Collision & outcome evaluation, run once per tick after every entity has
/// moved.
use std::time::Instant;

use tracing::{debug, info};

use crate::entities::{Phase, Player, Session};

/// Drop invincibility once its window has run out.
pub fn expire_invincibility(player: &Player, now: Instant) -> Player {
    match player.invincible_until {
        Some(until) if now >= until => {
            debug!("invincibility expired");
            Player {
                invincible_until: None,
                ..*player
            }
        }
        _ => *player,
    }
}

/// Resolve this tick's overlaps into a new session.
///
/// Lethal hits are judged against the invincibility the player had before any
/// power-up is collected this tick, so standing on a fireball and a power-up
/// at once is still a loss.
pub fn evaluate(state: &Session, now: Instant) -> Session {
    let mut next = state.clone();
    next.player = expire_invincibility(&state.player, now);

    if !next.player.is_invincible() {
        let hit = next
            .projectiles
            .iter()
            .position(|p| p.cell() == next.player.cell);
        if let Some(index) = hit {
            info!(
                projectile = ?next.projectiles[index],
                tick = next.elapsed_ticks,
                "player hit by fireball"
            );
            next.phase = Phase::GameOverLose;
            return next;
        }
    }

    if let Some(power_up) = next.power_up {
        if power_up.cell == next.player.cell {
            next.player.invincible_until = Some(now + next.config.invincibility);
            next.score = next.score.saturating_sub(next.config.powerup_penalty);
            next.powerups_collected += 1;
            next.power_up = None;
            debug!(collected = next.powerups_collected, "power-up collected");
        }
    }

    next
}
