//! Error type shared by the grid and the enumerator.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FoldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// `add` on a coordinate that already holds a cell.
    #[error("cell ({x}, {y}) is already populated")]
    DuplicateCell { x: i64, y: i64 },

    /// `record_fold` on a coordinate that was never added.
    #[error("cell ({x}, {y}) is not populated")]
    MissingCell { x: i64, y: i64 },

    /// A COUNT score would pass `u32::MAX`.
    #[error("count at cell ({x}, {y}) overflows")]
    ScoreOverflow { x: i64, y: i64 },

    #[error("strip length {length} exceeds the supported maximum of {max} creases")]
    StripTooLong { length: u32, max: u32 },
}
