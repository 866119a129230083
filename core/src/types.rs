use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position `{ r, c }`, 0-indexed from the top-left corner.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub r: Coord,
    pub c: Coord,
}

impl Pos {
    pub const fn new(r: Coord, c: Coord) -> Self {
        Self { r, c }
    }

    pub const fn to_nd_index(self) -> [usize; 2] {
        [self.r as usize, self.c as usize]
    }
}

pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    let rows = rows as CellCount;
    let cols = cols as CellCount;
    rows.saturating_mul(cols)
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: (Coord, Coord)) -> Option<Pos> {
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_r = pos.r.checked_add_signed(dr.try_into().ok()?)?;
    if next_r >= rows {
        return None;
    }

    let next_c = pos.c.checked_add_signed(dc.try_into().ok()?)?;
    if next_c >= cols {
        return None;
    }

    Some(Pos::new(next_r, next_c))
}

/// Iterator over the clipped 8-neighborhood of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Pos,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Pos, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_iter_yields_eight_in_the_interior() {
        let neighbors: Vec<_> = NeighborIter::new(Pos::new(1, 1), (3, 3)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn neighbor_iter_clips_at_corners_and_edges() {
        let corner: Vec<_> = NeighborIter::new(Pos::new(0, 0), (3, 3)).collect();
        assert_eq!(
            corner,
            vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );

        let edge: Vec<_> = NeighborIter::new(Pos::new(0, 1), (3, 3)).collect();
        assert_eq!(edge.len(), 5);
    }

    #[test]
    fn cell_count_covers_the_largest_board() {
        assert_eq!(cell_count(9, 9), 81);
        assert_eq!(cell_count(255, 255), 255 * 255);
    }
}
