//! Enumeration of crease bit-strings and aggregation onto the grid.
//!
//! Purpose
//! - Drive the walk over every bit-string of a strip (exhaustive) or over the
//!   bit-strings with at most `max_folds` folds (bounded), and fold each landing
//!   cell's score into a [`crate::grid::Grid`].
//!
//! Why this design
//! - The traversal is an ordinary iterator ([`BitStrings`]) so the pruning can
//!   be checked on its own against brute force.
//! - The bounded traversal never materialises a rejected bit-string: once the
//!   fold budget is spent it jumps past the whole block of heavier ones.

mod run;
mod traverse;
mod types;

pub use run::{enumerate, Enumeration};
pub use traverse::BitStrings;
pub use types::EnumCfg;
