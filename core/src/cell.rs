use serde::{Deserialize, Serialize};

/// Single board cell, owned by the [`Board`](crate::Board) that contains it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// A hidden cell a reveal or flag may still act on.
    pub const fn is_untouched(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
