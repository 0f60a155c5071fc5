//! Best finished runs of the process
//!
//! Runs are ordered by score, then by how quickly the score was reached.
//! A run that exactly matches one already on the board lands below it.

use serde::{Deserialize, Serialize};

use crate::sim::GameOverCause;

/// Runs kept on the board
pub const BOARD_SIZE: usize = 10;

/// Outcome of one finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u32,
    /// Simulated seconds from reset to game over
    pub elapsed: f32,
    pub cause: GameOverCause,
}

impl RunRecord {
    /// Higher score wins; on equal scores the shorter run wins
    pub fn outranks(&self, other: &RunRecord) -> bool {
        self.score > other.score || (self.score == other.score && self.elapsed < other.elapsed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    records: Vec<RunRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board position `run` would take, 0-based. Zero-score runs and runs
    /// that fall off the end of a full board get no position.
    fn slot(&self, run: &RunRecord) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let index = self.records.partition_point(|r| !run.outranks(r));
        (index < BOARD_SIZE).then_some(index)
    }

    /// 1-based rank `run` would earn, without recording it
    pub fn rank_for(&self, run: &RunRecord) -> Option<usize> {
        self.slot(run).map(|i| i + 1)
    }

    /// Record a finished run, returning its 1-based rank if it made the board
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        let index = self.slot(&run)?;
        self.records.insert(index, run);
        self.records.truncate(BOARD_SIZE);

        let rank = index + 1;
        log::info!(
            "Run placed #{} on the board: score {} in {:.1}s ({:?})",
            rank,
            run.score,
            run.elapsed,
            run.cause
        );
        Some(rank)
    }

    /// Best run first
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.records.first()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
