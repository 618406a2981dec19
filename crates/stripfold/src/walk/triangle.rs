//! Strip walk on the triangular grid.

use super::Walker;
use crate::grid::Coord;

/// Heading of the strip relative to the triangle rows.
///
/// `Base` runs along a row to the right; `Up` and `Down` are the two other
/// lattice directions, both heading left, crossing horizontal edges upward
/// and downward respectively.
///
/// Folding follows the cell's orientation, not the crease index: on an upright
/// cell a fold cycles Base → Down → Up → Base, on an upside-down cell
/// Base → Up → Down → Base (see [`Direction::fold`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Base,
    Up,
    Down,
}

impl Direction {
    /// Heading after folding over the edge this heading would leave `cell` by.
    ///
    /// The folded edge depends on the cell's orientation, so the same heading
    /// turns differently in upright and upside-down triangles.
    #[inline]
    pub fn fold(self, cell: Coord) -> Self {
        let upside_down = cell.is_upside_down();
        match (self, upside_down) {
            (Direction::Base, false) => Direction::Down,
            (Direction::Base, true) => Direction::Up,
            (Direction::Up, false) => Direction::Base,
            (Direction::Up, true) => Direction::Down,
            (Direction::Down, false) => Direction::Up,
            (Direction::Down, true) => Direction::Base,
        }
    }

    /// Neighbour of `cell` across the edge this heading leaves it by.
    #[inline]
    pub fn advance(self, cell: Coord) -> Coord {
        let upside_down = cell.is_upside_down();
        match self {
            Direction::Base => cell.offset(1, 0),
            Direction::Up if upside_down => cell.offset(0, 1),
            Direction::Up => cell.offset(-1, 0),
            Direction::Down if upside_down => cell.offset(-1, 0),
            Direction::Down => cell.offset(0, -1),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TriangleWalker {
    pos: Coord,
    dir: Direction,
}

impl TriangleWalker {
    #[inline]
    pub fn new(start: Coord) -> Self {
        Self {
            pos: start,
            dir: Direction::Base,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.dir
    }
}

impl Walker for TriangleWalker {
    #[inline]
    fn crease(&mut self, _index: u32, folded: bool) {
        if folded {
            self.dir = self.dir.fold(self.pos);
        } else {
            self.pos = self.dir.advance(self.pos);
        }
    }

    #[inline]
    fn position(&self) -> Coord {
        self.pos
    }
}
