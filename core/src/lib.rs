//! Deterministic minesweeper game core.
//!
//! Seeded board generation, flood-fill and chord reveals, the
//! Init → Gaming → {GameOver, Win} state machine, and the action log that
//! makes every finished game retryable and replayable. Rendering, input
//! devices, and persistence live in external collaborators; this crate only
//! consumes [`UserAction`]s and produces state transitions plus
//! [`PlayHistory`] entries.

use serde::{Deserialize, Serialize};

pub use action::*;
pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use history::*;
pub use seed::*;
pub use types::*;

mod action;
mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod history;
mod seed;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated construction; rejects boards the mine-placement loop could
    /// never fill (`mines` must stay below `rows * cols - 1`).
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines.saturating_add(1) >= cell_count(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.rows, self.cols)
    }

    /// Cells that must be revealed to win.
    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// The three canonical presets; a difficulty change is a full game reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(9, 9, 10),
            Self::Medium => GameConfig::new_unchecked(16, 16, 40),
            Self::Hard => GameConfig::new_unchecked(16, 30, 99),
        }
    }
}
