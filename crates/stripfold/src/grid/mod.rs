//! Sparse score grid over triangle or square tilings.
//!
//! Purpose
//! - Store one record per visited cell: aggregate score, best fold sequence and
//!   (optionally) every fold sequence that landed there.
//! - Expose the per-tiling geometry (corners, centroid, strip outline) that
//!   drawing code needs, without the grid itself knowing about drawing.
//!
//! Why this design
//! - Cells live in a `BTreeMap` keyed by [`Coord`]: absent means unvisited, and
//!   iteration order is stable so tables and figures are reproducible.
//! - Tilings are a closed set selected by [`GridKind`]; the geometry sits behind
//!   the [`Tiling`] trait with one zero-sized implementation per kind.
//! - Scores change only through [`Grid::record_fold`], one call per bit-string.

mod cell;
mod store;
mod tiling;
mod types;

pub use cell::Cell;
pub use store::{Grid, ShapeView};
pub use tiling::{triangle_height, SquareTiling, Tiling, TriangleTiling};
pub use types::{Bounds, Coord, GridKind, Mode};

#[cfg(test)]
mod tests;
