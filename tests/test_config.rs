use std::time::Duration;

use slay_the_dragon::config::MAX_GRID_SIZE;
use slay_the_dragon::{GameConfig, GameError};

fn rejected(config: GameConfig) -> bool {
    matches!(config.validate(), Err(GameError::InvalidConfig(_)))
}

#[test]
fn default_config_is_valid() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn default_matches_classic_rules() {
    let c = GameConfig::default();
    assert_eq!(c.grid_size, 25);
    assert_eq!(c.boss_hp, 10);
    assert_eq!(c.shoot_cooldown, 5);
    assert_eq!(c.shoot_hp, 5..8);
    assert_eq!(c.invincibility, Duration::from_secs(5));
    assert_eq!(c.tick_period(), Duration::from_millis(100));
}

#[test]
fn tiny_grid_rejected() {
    assert!(rejected(GameConfig {
        grid_size: 1,
        ..GameConfig::default()
    }));
}

#[test]
fn oversized_grid_rejected() {
    assert!(rejected(GameConfig {
        grid_size: 40_000,
        ..GameConfig::default()
    }));
    assert!(rejected(GameConfig {
        grid_size: MAX_GRID_SIZE + 1,
        ..GameConfig::default()
    }));
}

#[test]
fn largest_grid_fits_terminal_coordinates() {
    let config = GameConfig {
        grid_size: MAX_GRID_SIZE,
        ..GameConfig::default()
    };
    assert!(config.validate().is_ok());
    // two columns per cell plus both border columns
    assert!(u16::try_from(config.grid_size * 2 + 2).is_ok());
}

#[test]
fn single_tick_lifetime_accepted() {
    let config = GameConfig {
        transient_lifetime: 1..=1,
        ..GameConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn zero_boss_hp_rejected() {
    assert!(rejected(GameConfig {
        boss_hp: 0,
        ..GameConfig::default()
    }));
}

#[test]
fn zero_tick_rate_rejected() {
    assert!(rejected(GameConfig {
        invincible_tick_hz: 0,
        ..GameConfig::default()
    }));
}

#[test]
fn bad_lifetime_range_rejected() {
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = GameConfig {
        transient_lifetime: 30..=10,
        ..GameConfig::default()
    };
    assert!(rejected(inverted));
    assert!(rejected(GameConfig {
        transient_lifetime: 0..=5,
        ..GameConfig::default()
    }));
}

#[test]
fn zero_powerup_chance_rejected() {
    assert!(rejected(GameConfig {
        powerup_chance: 0,
        ..GameConfig::default()
    }));
}

#[test]
fn error_message_names_the_problem() {
    let err = GameConfig {
        grid_size: 0,
        ..GameConfig::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid configuration: grid size must be at least 2, got 0"
    );
}

#[test]
fn oversized_grid_message_names_the_limit() {
    let err = GameConfig {
        grid_size: 40_000,
        ..GameConfig::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid configuration: grid size must be at most 1000, got 40000"
    );
}
