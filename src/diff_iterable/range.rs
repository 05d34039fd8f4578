#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A block of `end1 - start1` elements of the first sequence aligned with
/// `end2 - start2` elements of the second sequence. Both sides are half-open.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
}

impl Range {
    #[must_use]
    pub fn new(start1: usize, end1: usize, start2: usize, end2: usize) -> Self {
        debug_assert!(
            start1 <= end1 && start2 <= end2,
            "Invalid range [{start1}, {end1}) - [{start2}, {end2})"
        );

        Self {
            start1,
            end1,
            start2,
            end2,
        }
    }

    #[must_use]
    pub fn len1(&self) -> usize { self.end1 - self.start1 }

    #[must_use]
    pub fn len2(&self) -> usize { self.end2 - self.start2 }

    /// True if the range is empty on both sides.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start1 == self.end1 && self.start2 == self.end2 }

    #[must_use]
    pub fn shifted(&self, shift1: usize, shift2: usize) -> Self {
        Range::new(
            self.start1 + shift1,
            self.end1 + shift1,
            self.start2 + shift2,
            self.end2 + shift2,
        )
    }
}
