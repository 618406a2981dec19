//! Run configuration.

use crate::bits::MAX_STRIP_LENGTH;
use crate::error::{FoldError, Result};
use crate::grid::{Coord, GridKind, Mode};

/// One enumeration run: which strip, which tiling, which aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumCfg {
    /// Number of creases (the strip has one more cell).
    pub length: u32,
    /// Strip starts on the upside-down row (start cell `(0, 1)`).
    pub flipped: bool,
    pub kind: GridKind,
    pub mode: Mode,
    /// Skip bit-strings with more folds than this; `None` enumerates everything.
    pub max_folds: Option<u32>,
    /// Keep every landing bit-string per cell (needed for pixel-strip diagrams).
    pub keep_history: bool,
}

impl EnumCfg {
    /// Exhaustive MIN run on the triangle grid, unflipped, without history.
    pub fn new(length: u32) -> Self {
        Self {
            length,
            flipped: false,
            kind: GridKind::Triangle,
            mode: Mode::Min,
            max_folds: None,
            keep_history: false,
        }
    }

    pub fn start(&self) -> Coord {
        Coord::start(self.flipped)
    }

    pub fn validate(&self) -> Result<()> {
        if self.length > MAX_STRIP_LENGTH {
            return Err(FoldError::StripTooLong {
                length: self.length,
                max: MAX_STRIP_LENGTH,
            });
        }
        Ok(())
    }
}

impl Default for EnumCfg {
    fn default() -> Self {
        Self::new(8)
    }
}
