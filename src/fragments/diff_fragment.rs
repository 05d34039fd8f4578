#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diff_iterable::Range;

/// A changed region given by `[start_offset1, end_offset1)` in the first text
/// and `[start_offset2, end_offset2)` in the second one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffFragment {
    pub start_offset1: usize,
    pub end_offset1: usize,
    pub start_offset2: usize,
    pub end_offset2: usize,
}

impl DiffFragment {
    #[must_use]
    pub fn new(
        start_offset1: usize,
        end_offset1: usize,
        start_offset2: usize,
        end_offset2: usize,
    ) -> Self {
        debug_assert!(
            start_offset1 <= end_offset1 && start_offset2 <= end_offset2,
            "Invalid fragment [{start_offset1}, {end_offset1}) - [{start_offset2}, {end_offset2})"
        );

        Self {
            start_offset1,
            end_offset1,
            start_offset2,
            end_offset2,
        }
    }

    #[must_use]
    pub fn offsets(&self) -> Range {
        Range::new(
            self.start_offset1,
            self.end_offset1,
            self.start_offset2,
            self.end_offset2,
        )
    }
}

impl From<Range> for DiffFragment {
    fn from(range: Range) -> Self {
        DiffFragment::new(range.start1, range.end1, range.start2, range.end2)
    }
}
