//! Per-cell aggregate record.

use super::{Coord, Mode};
use crate::bits::popcount;
use crate::error::{FoldError, Result};

/// Everything known about one visited cell.
///
/// Invariants:
/// - `best` is `None` only until the first fold is recorded.
/// - `history` is empty unless the owning grid retains fold history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    score: u32,
    best: Option<u64>,
    history: Vec<u64>,
}

impl Cell {
    pub(crate) fn new(coord: Coord, score: u32) -> Self {
        Self {
            coord,
            score,
            best: None,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Minimum folds (MIN) or number of landing bit-strings (COUNT).
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Fewest-fold bit-string seen so far; the first one wins ties.
    #[inline]
    pub fn best(&self) -> Option<u64> {
        self.best
    }

    /// Landing bit-strings in arrival order (empty without history retention).
    #[inline]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Landing bit-strings ordered by fold count, arrival order within a count.
    pub fn history_by_weight(&self) -> Vec<u64> {
        let mut folds = self.history.clone();
        folds.sort_by_key(|&bits| popcount(bits));
        folds
    }

    pub(crate) fn record(&mut self, bits: u64, mode: Mode, keep_history: bool) -> Result<()> {
        let folds = popcount(bits);
        self.score = match mode {
            Mode::Min => self.score.min(folds),
            Mode::Count => self.score.checked_add(1).ok_or(FoldError::ScoreOverflow {
                x: self.coord.x,
                y: self.coord.y,
            })?,
        };
        if self.best.map_or(true, |best| folds < popcount(best)) {
            self.best = Some(bits);
        }
        if keep_history {
            self.history.push(bits);
        }
        Ok(())
    }
}
