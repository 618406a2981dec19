//! Strip walk on the square grid.
//!
//! Even creases act on the vertical axis, odd creases on the horizontal one, so
//! an unfolded strip climbs as a staircase: up, right, up, right, ...

use super::Walker;
use crate::grid::Coord;

/// One flip-able compass axis: `positive` is North (vertical) or East (horizontal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Axis {
    pub positive: bool,
}

impl Axis {
    #[inline]
    fn step(self) -> i64 {
        if self.positive {
            1
        } else {
            -1
        }
    }

    #[inline]
    fn flip(&mut self) {
        self.positive = !self.positive;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SquareWalker {
    pos: Coord,
    north_south: Axis,
    east_west: Axis,
}

impl SquareWalker {
    /// Starts heading North-East.
    #[inline]
    pub fn new(start: Coord) -> Self {
        Self {
            pos: start,
            north_south: Axis { positive: true },
            east_west: Axis { positive: true },
        }
    }

    /// `(north, east)` flags of the current heading.
    #[inline]
    pub fn heading(&self) -> (bool, bool) {
        (self.north_south.positive, self.east_west.positive)
    }
}

impl Walker for SquareWalker {
    #[inline]
    fn crease(&mut self, index: u32, folded: bool) {
        let vertical = index % 2 == 0;
        match (vertical, folded) {
            (true, true) => self.north_south.flip(),
            (false, true) => self.east_west.flip(),
            (true, false) => self.pos = self.pos.offset(0, self.north_south.step()),
            (false, false) => self.pos = self.pos.offset(self.east_west.step(), 0),
        }
    }

    #[inline]
    fn position(&self) -> Coord {
        self.pos
    }
}
