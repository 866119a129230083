use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{Cell, CellCount, Coord, GameConfig, GameError, NeighborIter, Pos, Result};

/// Sentinel returned by [`Board::reveal_around_in_place`] when the chord
/// exposed a mine; distinct from "0 cells revealed".
pub const CHORD_MINE_HIT: i32 = -1;

/// 2-D grid of [`Cell`]s, `rows × cols` fixed for one game instance.
///
/// Exclusively owned by the active game session; every mutating operation
/// takes `&mut self` and completes before any reader can observe the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Fully hidden, mine-free placeholder board sized for `config`.
    pub fn empty(config: GameConfig) -> Self {
        Self {
            cells: Array2::default([config.rows as usize, config.cols as usize]),
        }
    }

    /// Board with an explicit mine layout and adjacency counts filled in.
    pub fn with_mines(rows: Coord, cols: Coord, mines: &[Pos]) -> Result<Self> {
        let mut cells: Array2<Cell> = Array2::default([rows as usize, cols as usize]);

        for &pos in mines {
            if pos.r >= rows || pos.c >= cols {
                return Err(GameError::InvalidCoords);
            }
            cells[pos.to_nd_index()].is_mine = true;
        }

        let mut board = Self { cells };
        board.compute_adjacency();
        Ok(board)
    }

    pub fn rows(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn cols(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn size(&self) -> (Coord, Coord) {
        (self.rows(), self.cols())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.r < self.rows() && pos.c < self.cols()
    }

    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.cells[pos.to_nd_index()]
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    pub fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.size())
    }

    /// Recomputes `adjacent_mines` for every non-mine cell from the current
    /// mine layout; run once after mine placement.
    pub(crate) fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for r in 0..rows {
            for c in 0..cols {
                let pos = Pos::new(r, c);
                if self[pos].is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(pos)
                    .filter(|&neighbor| self[neighbor].is_mine)
                    .count() as u8;
                self[pos].adjacent_mines = count;
            }
        }
    }

    /// Reveals the cell at `pos`, flood-filling across zero-adjacency cells.
    ///
    /// No-op (returns 0) when the target is out of bounds, already revealed,
    /// or flagged. Returns the number of cells newly revealed, mines
    /// excluded. Iterative on an explicit work stack so large boards cannot
    /// exhaust the call stack.
    pub fn reveal_cell_in_place(&mut self, pos: Pos) -> CellCount {
        if !self.contains(pos) {
            return 0;
        }
        if !self[pos].is_untouched() {
            return 0;
        }

        let mut revealed: CellCount = 0;
        let mut stack = vec![pos];

        while let Some(visit) = stack.pop() {
            let cell = self[visit];
            if !cell.is_untouched() {
                continue;
            }

            self[visit].is_revealed = true;
            if !cell.is_mine {
                revealed += 1;
            }

            if cell.adjacent_mines == 0 && !cell.is_mine {
                for neighbor in self.iter_neighbors(visit) {
                    let next = self[neighbor];
                    if !next.is_revealed && !next.is_mine {
                        stack.push(neighbor);
                    }
                }
            }
        }

        log::trace!("revealed {} cells from {:?}", revealed, pos);
        revealed
    }

    /// Flagged cells in the clipped 8-neighborhood of `pos`.
    pub fn count_flagged_around(&self, pos: Pos) -> u8 {
        if !self.contains(pos) {
            return 0;
        }
        self.iter_neighbors(pos)
            .filter(|&neighbor| self[neighbor].is_flagged)
            .count() as u8
    }

    /// Chord operation: reveals every unflagged, unrevealed neighbor of an
    /// already-revealed numbered cell.
    ///
    /// Returns [`CHORD_MINE_HIT`] the moment an unflagged neighbor turns out
    /// to be a mine, leaving neighbors processed so far revealed; otherwise
    /// the total number of cells revealed (0 if nothing qualified). The
    /// eligibility rule (flagged-neighbor count equals the cell's number)
    /// is the caller's responsibility.
    pub fn reveal_around_in_place(&mut self, pos: Pos) -> i32 {
        if !self.contains(pos) {
            return 0;
        }

        let mut revealed: i32 = 0;
        for neighbor in self.iter_neighbors(pos) {
            let cell = self[neighbor];
            if !cell.is_untouched() {
                continue;
            }
            if cell.is_mine {
                return CHORD_MINE_HIT;
            }
            revealed += i32::from(self.reveal_cell_in_place(neighbor));
        }
        revealed
    }

    /// End-of-game disclosure on loss: reveals every mine, touching nothing
    /// else.
    pub fn reveal_all_mines_in_place(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.is_revealed = true;
            }
        }
    }
}

impl Index<Pos> for Board {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

impl IndexMut<Pos> for Board {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        &mut self.cells[pos.to_nd_index()]
    }
}
