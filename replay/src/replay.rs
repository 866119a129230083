use std::time::Duration;

use serde::{Deserialize, Serialize};

use revanche_core::{
    Difficulty, Game, GameError, GameResult, PlayHistory, Result, Score, Seed, UserActionDetail,
};

use crate::{CancelToken, StepTimer};

/// Inter-step delay policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayPacing {
    /// Original human pacing, from the recorded inter-action delays.
    #[default]
    Recorded,
    /// Constant interval between steps.
    Fixed(Duration),
}

/// Outcome of advancing a replay by one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayStep {
    Applied {
        action: UserActionDetail,
        score: Score,
        /// How long to wait before the next step.
        delay: Duration,
    },
    Finished {
        result: Option<GameResult>,
    },
}

/// Cooperative replay of a recorded game against a freshly generated,
/// seed-identical board.
///
/// Each [`step`](Replay::step) applies exactly one recorded action through
/// the same reveal/flag/chord path as live play, so a completed replay
/// reproduces the original session's final board and result exactly. The
/// caller owns the pacing: wait out the returned delay, then step again.
/// Cancellation is observed at the next step and is permanent.
#[derive(Debug)]
pub struct Replay {
    game: Game,
    actions: Vec<UserActionDetail>,
    cursor: usize,
    pacing: ReplayPacing,
    cancel: CancelToken,
    aborted: bool,
}

impl Replay {
    pub fn new(
        seed: Seed,
        difficulty: Difficulty,
        actions: Vec<UserActionDetail>,
        pacing: ReplayPacing,
    ) -> Self {
        if actions.is_empty() {
            log::warn!("replay requested with an empty action log, nothing to play back");
        }
        Self {
            game: Game::new_seeded(difficulty, seed),
            actions,
            cursor: 0,
            pacing,
            cancel: CancelToken::new(),
            aborted: false,
        }
    }

    pub fn from_history(entry: &PlayHistory, pacing: ReplayPacing) -> Self {
        Self::new(
            entry.seed.clone(),
            entry.difficulty,
            entry.actions.clone(),
            pacing,
        )
    }

    /// Handle for cancelling this replay from outside the driving loop.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    /// Index of the next action to apply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.aborted
            || self.cancel.is_cancelled()
            || self.cursor >= self.actions.len()
            || self.game.phase().is_terminal()
    }

    /// Applies the next recorded action, or reports completion.
    pub fn step(&mut self) -> Result<ReplayStep> {
        if self.aborted || self.cancel.is_cancelled() {
            self.aborted = true;
            return Ok(ReplayStep::Finished {
                result: self.game.result(),
            });
        }

        self.check_board_shape()?;

        if self.cursor >= self.actions.len() || self.game.phase().is_terminal() {
            return Ok(ReplayStep::Finished {
                result: self.game.result(),
            });
        }

        let detail = self.actions[self.cursor];
        self.cursor += 1;
        let score = self.game.apply(detail.action);

        let delay = match self.pacing {
            ReplayPacing::Recorded => Duration::from_millis(detail.time.max(0) as u64),
            ReplayPacing::Fixed(interval) => interval,
        };

        Ok(ReplayStep::Applied {
            action: detail,
            score,
            delay,
        })
    }

    fn check_board_shape(&mut self) -> Result<()> {
        if self.game.board().size() != self.game.config().size() {
            self.aborted = true;
            log::warn!("board no longer matches the configured size, aborting replay");
            return Err(GameError::BoardShapeMismatch);
        }
        Ok(())
    }
}

/// Drives a replay to completion, waiting between steps on `timer`.
///
/// Cancellation that fires while waiting is observed on the next step and
/// halts the run, leaving the board in a valid partial state.
pub fn run(replay: &mut Replay, timer: &mut dyn StepTimer) -> Result<Option<GameResult>> {
    loop {
        match replay.step()? {
            ReplayStep::Applied { delay, .. } => timer.wait(delay),
            ReplayStep::Finished { result } => return Ok(result),
        }
    }
}
