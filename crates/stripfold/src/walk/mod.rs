//! Coordinate mapping: where does the end of a folded strip land?
//!
//! Purpose
//! - Turn a crease bit-string into the grid cell occupied by the last cell of
//!   the strip, by walking the strip crease by crease from its start cell.
//! - Provide the full path variant for tracing and debugging.
//!
//! Model
//! - A flat crease advances one cell in the current direction.
//! - A folded crease turns the strip over the shared edge: the next cell lies on
//!   top of the current one, so only the direction changes.
//!
//! Everything here is pure and allocation-free except [`fold_path`], so the walk
//! can run from any number of threads at once.

mod square;
mod triangle;

pub use square::{Axis, SquareWalker};
pub use triangle::{Direction, TriangleWalker};

use crate::bits::is_folded;
use crate::grid::{Coord, GridKind};

/// One strip walk on a particular tiling.
pub trait Walker {
    /// Apply crease `index` (folded or flat) to the walk state.
    fn crease(&mut self, index: u32, folded: bool);
    /// Cell currently occupied by the end of the strip.
    fn position(&self) -> Coord;
}

/// Run `walker` over the first `length` creases of `bits`, reporting every cell
/// the strip occupies (start included) to `visit`.
#[inline]
pub fn walk<W: Walker>(mut walker: W, bits: u64, length: u32, mut visit: impl FnMut(Coord)) -> Coord {
    visit(walker.position());
    for index in 0..length {
        walker.crease(index, is_folded(bits, index));
        visit(walker.position());
    }
    walker.position()
}

/// Landing cell of the strip encoded by `bits`.
///
/// Bits at or above `length` are ignored.
pub fn map_to_cell(bits: u64, start: Coord, length: u32, kind: GridKind) -> Coord {
    match kind {
        GridKind::Triangle => walk(TriangleWalker::new(start), bits, length, |_| {}),
        GridKind::Square => walk(SquareWalker::new(start), bits, length, |_| {}),
    }
}

/// Every cell occupied by the strip, `length + 1` entries from start to landing cell.
pub fn fold_path(bits: u64, start: Coord, length: u32, kind: GridKind) -> Vec<Coord> {
    let mut path = Vec::with_capacity(length as usize + 1);
    match kind {
        GridKind::Triangle => walk(TriangleWalker::new(start), bits, length, |c| path.push(c)),
        GridKind::Square => walk(SquareWalker::new(start), bits, length, |c| path.push(c)),
    };
    path
}
