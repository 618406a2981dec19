//! The sparse grid itself.

use std::collections::btree_map::{self, BTreeMap};

use nalgebra::Vector2;

use super::{Bounds, Cell, Coord, GridKind, Mode, Tiling};
use crate::error::{FoldError, Result};

/// Drawing-facing view of one populated cell.
#[derive(Clone, Debug)]
pub struct ShapeView {
    pub coord: Coord,
    pub score: u32,
    pub corners: Vec<Vector2<f64>>,
    pub center: Vector2<f64>,
}

/// Cells visited while folding one strip, keyed by coordinate.
///
/// Invariants:
/// - Only visited coordinates are present.
/// - `length`, `flipped` and `kind` describe the strip the grid was built for and
///   never change.
#[derive(Clone, Debug)]
pub struct Grid {
    kind: GridKind,
    length: u32,
    flipped: bool,
    keep_history: bool,
    cells: BTreeMap<Coord, Cell>,
}

impl Grid {
    pub fn new(kind: GridKind, length: u32, flipped: bool) -> Self {
        Self {
            kind,
            length,
            flipped,
            keep_history: false,
            cells: BTreeMap::new(),
        }
    }

    /// Retain every landing bit-string per cell (memory grows with the run).
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    #[inline]
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    #[inline]
    pub fn tiling(&self) -> &'static dyn Tiling {
        self.kind.tiling()
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    #[inline]
    pub fn keeps_history(&self) -> bool {
        self.keep_history
    }

    /// Cell the unfolded strip starts on.
    #[inline]
    pub fn start(&self) -> Coord {
        Coord::start(self.flipped)
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// Insert a fresh cell; callers check [`Grid::get`] first.
    pub fn add(&mut self, at: Coord, initial_score: u32) -> Result<&mut Cell> {
        match self.cells.entry(at) {
            btree_map::Entry::Occupied(_) => Err(FoldError::DuplicateCell { x: at.x, y: at.y }),
            btree_map::Entry::Vacant(slot) => Ok(slot.insert(Cell::new(at, initial_score))),
        }
    }

    /// Fold `bits` into the aggregate of the cell at `at`.
    ///
    /// MIN keeps the smallest popcount, COUNT adds one; both track the best
    /// sequence and append to the history when it is retained. A COUNT that
    /// would overflow leaves the cell unchanged and fails.
    pub fn record_fold(&mut self, at: Coord, bits: u64, mode: Mode) -> Result<()> {
        let keep = self.keep_history;
        let cell = self
            .cells
            .get_mut(&at)
            .ok_or(FoldError::MissingCell { x: at.x, y: at.y })?;
        cell.record(bits, mode, keep)
    }

    /// Largest score over all cells; `0` when empty.
    pub fn max_score(&self) -> u32 {
        self.cells.values().map(Cell::score).max().unwrap_or(0)
    }

    /// Extent of the populated cells; [`Bounds::EMPTY`] when there are none.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::EMPTY;
        for &c in self.cells.keys() {
            b.include(c);
        }
        b
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Populated cells in coordinate order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    /// Populated cells with their geometry for cells of side `side`.
    pub fn shapes(&self, side: f64) -> impl Iterator<Item = ShapeView> + '_ {
        let tiling = self.tiling();
        self.cells.values().map(move |cell| ShapeView {
            coord: cell.coord(),
            score: cell.score(),
            corners: tiling.corners(cell.coord(), side),
            center: tiling.center(cell.coord(), side),
        })
    }

    /// Outline of the unfolded strip this grid was built for.
    pub fn strip_outline(&self, side: f64) -> Vec<Vector2<f64>> {
        self.tiling().strip_outline(self.length, side, self.flipped)
    }
}
