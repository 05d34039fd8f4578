#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::side::ThreeSide;

/// A block aligned across three sequences: side 1 is the left one, side 2
/// the base and side 3 the right one. All sides are half-open.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MergeRange {
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
    pub start3: usize,
    pub end3: usize,
}

impl MergeRange {
    #[must_use]
    pub fn new(
        start1: usize,
        end1: usize,
        start2: usize,
        end2: usize,
        start3: usize,
        end3: usize,
    ) -> Self {
        debug_assert!(
            start1 <= end1 && start2 <= end2 && start3 <= end3,
            "Invalid merge range [{start1}, {end1}) - [{start2}, {end2}) - [{start3}, {end3})"
        );

        Self {
            start1,
            end1,
            start2,
            end2,
            start3,
            end3,
        }
    }

    #[must_use]
    pub fn start(&self, side: ThreeSide) -> usize {
        side.select(self.start1, self.start2, self.start3)
    }

    #[must_use]
    pub fn end(&self, side: ThreeSide) -> usize { side.select(self.end1, self.end2, self.end3) }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start1 == self.end1 && self.start2 == self.end2 && self.start3 == self.end3
    }
}

/// A [`MergeRange`] over line numbers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeLineFragment {
    pub start_line1: usize,
    pub end_line1: usize,
    pub start_line2: usize,
    pub end_line2: usize,
    pub start_line3: usize,
    pub end_line3: usize,
}

impl MergeLineFragment {
    #[must_use]
    pub fn start_line(&self, side: ThreeSide) -> usize {
        side.select(self.start_line1, self.start_line2, self.start_line3)
    }

    #[must_use]
    pub fn end_line(&self, side: ThreeSide) -> usize {
        side.select(self.end_line1, self.end_line2, self.end_line3)
    }
}

impl From<MergeRange> for MergeLineFragment {
    fn from(range: MergeRange) -> Self {
        Self {
            start_line1: range.start1,
            end_line1: range.end1,
            start_line2: range.start2,
            end_line2: range.end2,
            start_line3: range.start3,
            end_line3: range.end3,
        }
    }
}
