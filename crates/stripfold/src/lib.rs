//! Strip folding on triangle and square grids.
//!
//! A strip of `length + 1` unit cells has `length` creases; each crease is left
//! flat or folded flat onto its neighbour. Folding choices are encoded as a
//! bit-string. This crate walks every (or every cheap enough) bit-string to the
//! cell where the end of the strip lands and aggregates, per cell, the fewest
//! folds needed to get there or how many fold sequences get there.
//!
//! Layout
//! - [`bits`]: bit-string helpers, including the bounded-traversal skip.
//! - [`walk`]: the coordinate mapper (pure).
//! - [`grid`]: sparse per-cell records and tiling geometry.
//! - [`enumerate`]: exhaustive and bounded runs.

pub mod bits;
pub mod enumerate;
pub mod error;
pub mod grid;
pub mod walk;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use enumerate::{enumerate, BitStrings, EnumCfg, Enumeration};
pub use error::{FoldError, Result};
pub use grid::{Bounds, Cell, Coord, Grid, GridKind, Mode, Tiling};
pub use walk::{fold_path, map_to_cell};

/// Common exports for callers that draw or tabulate grids.
pub mod prelude {
    pub use crate::bits::{format_bits, popcount, reverse_bits, MAX_STRIP_LENGTH};
    pub use crate::enumerate::{enumerate, BitStrings, EnumCfg, Enumeration};
    pub use crate::grid::{Bounds, Cell, Coord, Grid, GridKind, Mode, ShapeView, Tiling};
    pub use crate::walk::{fold_path, map_to_cell};
    pub use nalgebra::Vector2 as Vec2;
}
