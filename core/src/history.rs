use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Difficulty, Pos, Seed, UserActionDetail};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

/// Record of one finished game, produced exactly once when the game leaves
/// the active phase. Immutable after creation; the persistence collaborator
/// owns storage and retention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayHistory {
    pub result: GameResult,
    /// Elapsed play time in seconds.
    pub time: u32,
    pub difficulty: Difficulty,
    pub seed: Seed,
    pub actions: Vec<UserActionDetail>,
    pub date: DateTime<Utc>,
}

impl PlayHistory {
    /// The opening move, used to retry the same layout.
    pub fn first_step(&self) -> Option<Pos> {
        self.actions.first().map(|detail| detail.action.position)
    }

    /// How many times this layout has been played, read from the seed
    /// suffix. External achievement rules key off this.
    pub fn retry_iteration(&self) -> u32 {
        self.seed.iteration()
    }
}

/// Best-time entry produced alongside the history record on a win.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub time: u32,
    pub date: DateTime<Utc>,
}
