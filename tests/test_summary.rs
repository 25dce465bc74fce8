use std::time::{Duration, Instant};

use slay_the_dragon::compute::{init_session, start, tick};
use slay_the_dragon::entities::*;
use slay_the_dragon::summary::{append_record, read_records, SessionSummary};
use slay_the_dragon::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn lost_game(t0: Instant) -> Session {
    let mut rng = StdRng::seed_from_u64(42);
    let s = init_session(&GameConfig::default(), &mut rng);
    let mut s = start(&s, t0).unwrap();
    s.boss.cell = Cell::new(20, 20);
    s.projectiles.push(Projectile::Linear(LinearProjectile {
        cell: Cell::new(2, 0),
        direction: Direction::Left,
    }));
    // Player steps right into the incoming fireball
    tick(&s, Direction::Right.into(), t0 + Duration::from_secs(2), &mut rng)
}

#[test]
fn no_summary_while_playing() {
    let t0 = Instant::now();
    let s = start(
        &init_session(&GameConfig::default(), &mut StdRng::seed_from_u64(1)),
        t0,
    )
    .unwrap();
    assert!(s.summary(t0).is_none());
}

#[test]
fn summary_after_loss() {
    let t0 = Instant::now();
    let s = lost_game(t0);
    assert_eq!(s.phase, Phase::GameOverLose);
    let summary = s.summary(t0 + Duration::from_secs(2)).unwrap();
    assert_eq!(summary.game_result, GameResult::Lose);
    assert_eq!(summary.total_move, 1);
    assert_eq!(summary.powerups_collected, 0);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.score, 1000);
    assert!((summary.time - 2.0).abs() < 1e-9);
}

#[test]
fn summary_uses_analysis_column_names() {
    let summary = SessionSummary {
        game_result: GameResult::Win,
        score: 1200,
        total_move: 42,
        time: 31.5,
        powerups_collected: 2,
        ticks: 315,
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["game_result"], "win");
    assert_eq!(json["total_move"], 42);
    assert_eq!(json["power-up_collected"], 2);
    assert_eq!(json["time"], 31.5);
}

#[test]
fn records_append_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.jsonl");
    let t0 = Instant::now();
    let first = lost_game(t0).summary(t0 + Duration::from_secs(2)).unwrap();
    let second = SessionSummary {
        game_result: GameResult::Win,
        score: 1400,
        total_move: 80,
        time: 12.0,
        powerups_collected: 1,
        ticks: 120,
    };

    append_record(&path, &first).unwrap();
    append_record(&path, &second).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert_eq!(read_records(&path).unwrap(), vec![first, second]);
}

#[test]
fn reading_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_records(&dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, slay_the_dragon::GameError::Io(_)));
}

#[test]
fn best_score_comes_from_read_back_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.jsonl");
    for (result, score) in [(GameResult::Lose, 870), (GameResult::Win, 1320), (GameResult::Lose, 990)] {
        let summary = SessionSummary {
            game_result: result,
            score,
            total_move: 10,
            time: 5.0,
            powerups_collected: 0,
            ticks: 50,
        };
        append_record(&path, &summary).unwrap();
    }
    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().map(|r| r.score).max(), Some(1320));
}
