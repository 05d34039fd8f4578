//! Three-way merge of two alignments that share their first sequence.

use super::ComparisonContext;
use crate::{diff_iterable::FairDiffIterable, errors::DiffError, fragments::MergeRange};

/// Combine an alignment of base to left and one of base to right into the
/// ranges where at least one of left and right differs from the base.
///
/// The returned ranges have the left text on side 1, the base on side 2 and
/// the right text on side 3.
///
/// # Errors
///
/// `DiffError::Cancelled` if the request got cancelled.
///
/// # Panics
///
/// If the alignments disagree on the length of the base.
pub fn build_fair(
    fragments1: &FairDiffIterable,
    fragments2: &FairDiffIterable,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<MergeRange>, DiffError> {
    assert_eq!(
        fragments1.length1(),
        fragments2.length1(),
        "Both alignments must start from the same base"
    );

    let mut builder =
        MergeChangeBuilder::new(fragments1.length2(), fragments1.length1(), fragments2.length2());

    let mut unchanged1 = fragments1.unchanged().peekable();
    let mut unchanged2 = fragments2.unchanged().peekable();

    while let (Some(range1), Some(range2)) =
        (unchanged1.peek().copied(), unchanged2.peek().copied())
    {
        ctx.check_cancelled()?;

        let start_base = range1.start1.max(range2.start1);
        let end_base = range1.end1.min(range2.end1);
        if start_base < end_base {
            builder.mark_equal(
                range1.start2 + (start_base - range1.start1),
                start_base,
                range2.start2 + (start_base - range2.start1),
                end_base - start_base,
            );
        }

        if range1.end1 <= range2.end1 {
            unchanged1.next();
        }
        if range2.end1 <= range1.end1 {
            unchanged2.next();
        }
    }

    Ok(builder.finish())
}

/// Collects the gaps between three-way unchanged ranges reported in order.
#[derive(Debug)]
struct MergeChangeBuilder {
    length_left: usize,
    length_base: usize,
    length_right: usize,
    index_left: usize,
    index_base: usize,
    index_right: usize,
    changes: Vec<MergeRange>,
}

impl MergeChangeBuilder {
    fn new(length_left: usize, length_base: usize, length_right: usize) -> Self {
        Self {
            length_left,
            length_base,
            length_right,
            index_left: 0,
            index_base: 0,
            index_right: 0,
            changes: Vec::new(),
        }
    }

    fn mark_equal(&mut self, left: usize, base: usize, right: usize, count: usize) {
        debug_assert!(
            self.index_left <= left && self.index_base <= base && self.index_right <= right,
            "Unchanged ranges must be marked in order"
        );

        self.add_change(left, base, right);

        self.index_left = left + count;
        self.index_base = base + count;
        self.index_right = right + count;
    }

    fn add_change(&mut self, left: usize, base: usize, right: usize) {
        let change = MergeRange::new(
            self.index_left,
            left,
            self.index_base,
            base,
            self.index_right,
            right,
        );

        if !change.is_empty() {
            self.changes.push(change);
        }
    }

    fn finish(mut self) -> Vec<MergeRange> {
        self.add_change(self.length_left, self.length_base, self.length_right);
        self.changes
    }
}
