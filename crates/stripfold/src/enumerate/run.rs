//! Run driver: traverse, map, aggregate.

use std::time::Instant;

use super::{BitStrings, EnumCfg};
use crate::bits::popcount;
use crate::error::Result;
use crate::grid::Grid;
use crate::walk::map_to_cell;

/// Outcome of one run.
#[derive(Clone, Debug)]
pub struct Enumeration {
    pub grid: Grid,
    /// Number of bit-strings mapped and recorded.
    pub visited: u64,
}

/// Fold every bit-string selected by `cfg` onto a fresh grid.
///
/// Each bit-string is walked to its landing cell; the cell is added on first
/// sight with the mode's seed score and then updated with `record_fold`.
pub fn enumerate(cfg: &EnumCfg) -> Result<Enumeration> {
    cfg.validate()?;
    let started = Instant::now();
    let start = cfg.start();
    let mut grid = Grid::new(cfg.kind, cfg.length, cfg.flipped).with_history(cfg.keep_history);
    let mut visited = 0u64;

    for bits in BitStrings::new(cfg.length, cfg.max_folds) {
        let landing = map_to_cell(bits, start, cfg.length, cfg.kind);
        if grid.get(landing).is_none() {
            grid.add(landing, cfg.mode.seed_score(popcount(bits)))?;
        }
        grid.record_fold(landing, bits, cfg.mode)?;
        visited += 1;
    }

    tracing::debug!(
        length = cfg.length,
        kind = %cfg.kind,
        mode = %cfg.mode,
        max_folds = ?cfg.max_folds,
        visited,
        cells = grid.len(),
        max_score = grid.max_score(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "enumeration finished"
    );
    Ok(Enumeration { grid, visited })
}
