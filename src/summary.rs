/// Post-game statistics.
///
/// One record per finished game, with the same columns the score-analysis
/// tool reads: `game_result`, `score`, `total_move`, `time`,
/// `power-up_collected`. Records are appended to a file as JSON lines.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{GameResult, Session};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub game_result: GameResult,
    pub score: i64,
    pub total_move: u32,
    /// Wall-clock seconds from start to game over.
    pub time: f64,
    #[serde(rename = "power-up_collected")]
    pub powerups_collected: u32,
    pub ticks: u64,
}

impl Session {
    /// Statistics for a finished game; `None` until the session reaches a
    /// game-over phase.
    pub fn summary(&self, now: Instant) -> Option<SessionSummary> {
        let game_result = self.phase.result()?;
        let time = self
            .started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0);
        Some(SessionSummary {
            game_result,
            score: self.score,
            total_move: self.moves_made,
            time,
            powerups_collected: self.powerups_collected,
            ticks: self.elapsed_ticks,
        })
    }
}

/// Append one record as a JSON line, creating the file if needed.
pub fn append_record(path: &Path, summary: &SessionSummary) -> Result<()> {
    let mut line = serde_json::to_string(summary)?;
    line.push('\n');
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    info!(path = %path.display(), result = ?summary.game_result, "session summary recorded");
    Ok(())
}

/// Read back every record in a statistics file.
pub fn read_records(path: &Path) -> Result<Vec<SessionSummary>> {
    let text = std::fs::read_to_string(path)?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str::<SessionSummary>(line)?))
        .collect()
}
