//! Bit-string traversal, exhaustive or bounded by a fold budget.

use crate::bits::{popcount, skip_saturated, space_end};

/// Bit-strings of a strip in increasing numeric order.
///
/// With a budget of `k` folds only bit-strings of popcount `<= k` are produced,
/// each exactly once. Reaching a bit-string that spends the whole budget
/// triggers a jump over every heavier successor (see [`skip_saturated`]).
#[derive(Clone, Debug)]
pub struct BitStrings {
    next: Option<u64>,
    end: u64,
    max_folds: Option<u32>,
}

impl BitStrings {
    /// Every bit-string in `0..2^length`. `length` must be at most
    /// [`crate::bits::MAX_STRIP_LENGTH`].
    pub fn exhaustive(length: u32) -> Self {
        Self {
            next: Some(0),
            end: space_end(length),
            max_folds: None,
        }
    }

    /// Bit-strings in `0..2^length` with at most `max_folds` folds.
    pub fn bounded(length: u32, max_folds: u32) -> Self {
        Self {
            next: Some(0),
            end: space_end(length),
            max_folds: Some(max_folds),
        }
    }

    pub fn new(length: u32, max_folds: Option<u32>) -> Self {
        match max_folds {
            Some(k) => Self::bounded(length, k),
            None => Self::exhaustive(length),
        }
    }
}

impl Iterator for BitStrings {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.next.filter(|&n| n < self.end)?;
        self.next = match self.max_folds {
            Some(budget) if popcount(current) >= budget => {
                let skipped = skip_saturated(current);
                tracing::trace!(current, ?skipped, budget, "fold budget spent");
                skipped
            }
            _ => current.checked_add(1),
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next.filter(|&n| n < self.end) {
            None => (0, Some(0)),
            Some(n) => (1, usize::try_from(self.end - n).ok()),
        }
    }
}

impl std::iter::FusedIterator for BitStrings {}
