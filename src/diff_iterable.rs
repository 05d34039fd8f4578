//! Alignments between two sequences.
//!
//! A [`DiffIterable`] partitions `[0, length1) x [0, length2)` into an ordered
//! sequence of alternating changed and unchanged ranges. Only the changed
//! ranges are stored; unchanged ranges are the gaps between them.
//!
//! A [`FairDiffIterable`] additionally promises that every unchanged range
//! has the same length on both sides and denotes element-wise equal slices.
//! Only fair alignments can be refined further (gap correction, chunk
//! optimization, three-way merge).

use std::{iter, ops::Deref};

pub mod change_builder;
pub mod range;

pub use change_builder::{ChangeBuilder, ExpandChangeBuilder};
pub use range::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffIterable {
    length1: usize,
    length2: usize,
    changes: Vec<Range>,
}

impl DiffIterable {
    /// Create an alignment from its changed ranges. Empty ranges are dropped.
    /// The ranges must be sorted and must not overlap.
    #[must_use]
    pub fn new(changes: Vec<Range>, length1: usize, length2: usize) -> Self {
        let changes: Vec<Range> = changes.into_iter().filter(|ch| !ch.is_empty()).collect();

        let result = Self {
            length1,
            length2,
            changes,
        };
        debug_assert!(result.verify(), "Invalid changes: {result:?}");

        result
    }

    /// Create an alignment from its unchanged ranges. The ranges must be
    /// sorted, must not overlap and must have equal lengths on both sides.
    #[must_use]
    pub fn from_unchanged(unchanged: &[Range], length1: usize, length2: usize) -> Self {
        let mut builder = ChangeBuilder::new(length1, length2);
        for range in unchanged {
            builder.mark_equal_range(range.start1, range.start2, range.end1, range.end2);
        }

        builder.finish()
    }

    #[must_use]
    pub fn length1(&self) -> usize { self.length1 }

    #[must_use]
    pub fn length2(&self) -> usize { self.length2 }

    pub fn changes(&self) -> impl Iterator<Item = Range> + '_ { self.changes.iter().copied() }

    pub fn unchanged(&self) -> impl Iterator<Item = Range> + '_ {
        let starts = iter::once((0, 0)).chain(self.changes.iter().map(|ch| (ch.end1, ch.end2)));
        let ends = self
            .changes
            .iter()
            .map(|ch| (ch.start1, ch.start2))
            .chain(iter::once((self.length1, self.length2)));

        starts
            .zip(ends)
            .map(|((start1, start2), (end1, end2))| Range::new(start1, end1, start2, end2))
            .filter(|range| !range.is_empty())
    }

    /// Every range of the partition in order, flagged `true` if unchanged.
    #[must_use]
    pub fn iterate_all(&self) -> Vec<(Range, bool)> {
        let mut result = Vec::with_capacity(self.changes.len() * 2 + 1);
        let mut unchanged = self.unchanged().peekable();

        for change in &self.changes {
            while let Some(range) = unchanged.next_if(|range| range.end1 <= change.start1
                && range.end2 <= change.start2)
            {
                result.push((range, true));
            }
            result.push((*change, false));
        }
        result.extend(unchanged.map(|range| (range, true)));

        result
    }

    /// Restrict the alignment to the window `[start1, end1) x [start2, end2)`,
    /// re-based to start at zero. The window boundaries must not cut through
    /// an unchanged range on one side only.
    #[must_use]
    pub fn subiterable(&self, start1: usize, end1: usize, start2: usize, end2: usize) -> Self {
        let changes = self
            .changes
            .iter()
            .filter(|ch| {
                ch.end1 >= start1 && ch.end2 >= start2 && ch.start1 <= end1 && ch.start2 <= end2
            })
            .map(|ch| {
                Range::new(
                    ch.start1.max(start1) - start1,
                    ch.end1.min(end1) - start1,
                    ch.start2.max(start2) - start2,
                    ch.end2.min(end2) - start2,
                )
            })
            .collect();

        Self::new(changes, end1 - start1, end2 - start2)
    }

    fn verify(&self) -> bool {
        let mut last1 = 0;
        let mut last2 = 0;

        for ch in &self.changes {
            if ch.is_empty() || ch.start1 < last1 || ch.start2 < last2 {
                return false;
            }

            last1 = ch.end1;
            last2 = ch.end2;
        }

        last1 <= self.length1 && last2 <= self.length2
    }
}

/// An alignment whose unchanged ranges denote element-wise equal slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairDiffIterable(DiffIterable);

impl FairDiffIterable {
    /// Mark an alignment as fair. The caller is responsible for the element
    /// equality of the unchanged ranges, only their lengths are checked.
    #[must_use]
    pub fn fair(iterable: DiffIterable) -> Self {
        debug_assert!(
            iterable.unchanged().all(|range| range.len1() == range.len2()),
            "Unchanged ranges of a fair iterable must have equal lengths"
        );

        Self(iterable)
    }

    /// Check element-wise equality of every unchanged range.
    #[must_use]
    pub fn is_fair_for<T>(&self, data1: &[T], data2: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.0.length1 == data1.len()
            && self.0.length2 == data2.len()
            && self
                .0
                .unchanged()
                .all(|range| data1[range.start1..range.end1] == data2[range.start2..range.end2])
    }

    #[must_use]
    pub fn into_inner(self) -> DiffIterable { self.0 }
}

impl Deref for FairDiffIterable {
    type Target = DiffIterable;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<FairDiffIterable> for DiffIterable {
    fn from(fair: FairDiffIterable) -> Self { fair.0 }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> DiffIterable {
        DiffIterable::new(
            vec![Range::new(1, 2, 1, 3), Range::new(4, 4, 5, 6)],
            6,
            8,
        )
    }

    #[test]
    fn test_unchanged_ranges_fill_the_gaps() {
        assert_eq!(
            sample().unchanged().collect::<Vec<_>>(),
            vec![
                Range::new(0, 1, 0, 1),
                Range::new(2, 4, 3, 5),
                Range::new(4, 6, 6, 8)
            ]
        );
    }

    #[test]
    fn test_iterate_all_alternates() {
        let all = sample().iterate_all();

        assert_eq!(
            all,
            vec![
                (Range::new(0, 1, 0, 1), true),
                (Range::new(1, 2, 1, 3), false),
                (Range::new(2, 4, 3, 5), true),
                (Range::new(4, 4, 5, 6), false),
                (Range::new(4, 6, 6, 8), true),
            ]
        );
    }

    #[test]
    fn test_from_unchanged_is_inverse() {
        let iterable = sample();
        let unchanged: Vec<Range> = iterable.unchanged().collect();

        assert_eq!(DiffIterable::from_unchanged(&unchanged, 6, 8), iterable);
    }

    #[test]
    fn test_empty_changes_are_dropped() {
        let iterable = DiffIterable::new(vec![Range::new(1, 1, 1, 1)], 2, 2);

        assert_eq!(iterable.changes().count(), 0);
        assert_eq!(
            iterable.unchanged().collect::<Vec<_>>(),
            vec![Range::new(0, 2, 0, 2)]
        );
    }

    #[test]
    fn test_subiterable() {
        let sub = sample().subiterable(2, 6, 3, 8);

        assert_eq!(sub.length1(), 4);
        assert_eq!(sub.length2(), 5);
        assert_eq!(sub.changes().collect::<Vec<_>>(), vec![Range::new(2, 2, 2, 3)]);
    }

    #[test]
    fn test_fairness_check() {
        let data1 = ['a', 'b', 'c'];
        let data2 = ['a', 'x', 'c'];
        let fair = FairDiffIterable::fair(DiffIterable::new(vec![Range::new(1, 2, 1, 2)], 3, 3));
        let unfair = FairDiffIterable::fair(DiffIterable::new(vec![], 3, 3));

        assert!(fair.is_fair_for(&data1, &data2));
        assert!(!unfair.is_fair_for(&data1, &data2));
    }
}
