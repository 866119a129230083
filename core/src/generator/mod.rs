use crate::{Board, CellCount, Coord, GameConfig, GameError, Pos, Result, Seed};
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate_into(self, config: GameConfig, board: &mut Board) -> Result<()>;
}

/// Places mines by rejection-sampling positions from a [`SeededRandom`]
/// sequence, keeping the first-clicked cell mine-free.
///
/// The same seed base, safe cell, and config always produce the same layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededBoardGenerator {
    seed: Seed,
    safe: Pos,
}

impl SeededBoardGenerator {
    pub fn new(seed: Seed, safe: Pos) -> Self {
        Self { seed, safe }
    }
}

impl BoardGenerator for SeededBoardGenerator {
    fn generate_into(self, config: GameConfig, board: &mut Board) -> Result<()> {
        if board.size() != config.size() {
            return Err(GameError::BoardShapeMismatch);
        }
        if !board.contains(self.safe) {
            return Err(GameError::InvalidCoords);
        }

        // `GameConfig` construction guarantees mines < total - 1, so the
        // rejection loop always finds enough free cells.
        let mut rng = SeededRandom::new(self.seed.base());
        let mut placed: CellCount = 0;
        while placed < config.mines {
            let r = rng.next_index(u32::from(config.rows)) as Coord;
            let c = rng.next_index(u32::from(config.cols)) as Coord;
            let pos = Pos::new(r, c);
            if pos == self.safe || board[pos].is_mine {
                continue;
            }
            board[pos].is_mine = true;
            placed += 1;
        }

        board.compute_adjacency();
        log::debug!(
            "placed {} mines on a {}x{} board (seed {}, safe cell {:?})",
            placed,
            config.rows,
            config.cols,
            self.seed,
            self.safe
        );
        Ok(())
    }
}

/// Generates the mine layout for `board` in place, minting a fresh seed when
/// the caller supplies none. Returns the seed actually used; callers must
/// persist it to make the game retryable and replayable.
pub fn generate_board_in_place(
    config: GameConfig,
    board: &mut Board,
    safe: Pos,
    seed: Option<Seed>,
) -> Result<Seed> {
    let seed = seed.unwrap_or_else(Seed::generate);
    SeededBoardGenerator::new(seed.clone(), safe).generate_into(config, board)?;
    Ok(seed)
}
