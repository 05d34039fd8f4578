#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::DiffFragment;
use crate::diff_iterable::Range;

/// A changed block of whole lines.
///
/// `inner_fragments` holds the changed parts inside the block relative to
/// `start_offset1` and `start_offset2`. `None` means they were not computed
/// or the whole block is changed, `Some(vec![])` means the lines are equal
/// under the comparison policy.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineFragment {
    pub start_line1: usize,
    pub end_line1: usize,
    pub start_line2: usize,
    pub end_line2: usize,

    pub start_offset1: usize,
    pub end_offset1: usize,
    pub start_offset2: usize,
    pub end_offset2: usize,

    pub inner_fragments: Option<Vec<DiffFragment>>,
}

impl LineFragment {
    #[must_use]
    pub fn new(lines: Range, offsets: Range, inner_fragments: Option<Vec<DiffFragment>>) -> Self {
        let inner_fragments =
            drop_whole_changed_fragment(inner_fragments, offsets.len1(), offsets.len2());

        Self {
            start_line1: lines.start1,
            end_line1: lines.end1,
            start_line2: lines.start2,
            end_line2: lines.end2,
            start_offset1: offsets.start1,
            end_offset1: offsets.end1,
            start_offset2: offsets.start2,
            end_offset2: offsets.end2,
            inner_fragments,
        }
    }

    #[must_use]
    pub fn lines(&self) -> Range {
        Range::new(self.start_line1, self.end_line1, self.start_line2, self.end_line2)
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

    #[must_use]
    pub fn with_inner_fragments(&self, inner_fragments: Option<Vec<DiffFragment>>) -> Self {
        LineFragment::new(self.lines(), self.offsets(), inner_fragments)
    }
}

/// A single inner fragment spanning the whole block carries no information.
fn drop_whole_changed_fragment(
    fragments: Option<Vec<DiffFragment>>,
    length1: usize,
    length2: usize,
) -> Option<Vec<DiffFragment>> {
    match fragments.as_deref() {
        Some([only]) if only.offsets() == Range::new(0, length1, 0, length2) => None,
        _ => fragments,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_whole_inner_fragment_is_dropped() {
        let fragment = LineFragment::new(
            Range::new(0, 1, 0, 1),
            Range::new(0, 3, 0, 4),
            Some(vec![DiffFragment::new(0, 3, 0, 4)]),
        );

        assert_eq!(fragment.inner_fragments, None);
    }

    #[test]
    fn test_partial_inner_fragments_are_kept() {
        let inner = vec![DiffFragment::new(1, 2, 1, 3)];
        let fragment = LineFragment::new(
            Range::new(0, 1, 0, 1),
            Range::new(0, 3, 0, 4),
            Some(inner.clone()),
        );

        assert_eq!(fragment.inner_fragments, Some(inner));
        assert_eq!(fragment.with_inner_fragments(Some(vec![])).inner_fragments, Some(vec![]));
    }
}
