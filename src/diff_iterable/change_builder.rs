use super::{DiffIterable, Range};
use crate::comparison::trim::expand;

/// Builds an alignment from unchanged ranges reported in increasing order.
/// Everything between two reported unchanged ranges becomes a change.
#[derive(Debug, Clone)]
pub struct ChangeBuilder {
    length1: usize,
    length2: usize,
    index1: usize,
    index2: usize,
    changes: Vec<Range>,
}

impl ChangeBuilder {
    #[must_use]
    pub fn new(length1: usize, length2: usize) -> Self {
        Self {
            length1,
            length2,
            index1: 0,
            index2: 0,
            changes: Vec::new(),
        }
    }

    /// First index of the first sequence that has not been consumed yet.
    #[must_use]
    pub fn index1(&self) -> usize { self.index1 }

    /// First index of the second sequence that has not been consumed yet.
    #[must_use]
    pub fn index2(&self) -> usize { self.index2 }

    pub fn mark_equal(&mut self, index1: usize, index2: usize) {
        self.mark_equal_range(index1, index2, index1 + 1, index2 + 1);
    }

    pub fn mark_equal_count(&mut self, index1: usize, index2: usize, count: usize) {
        self.mark_equal_range(index1, index2, index1 + count, index2 + count);
    }

    /// Mark `[start1, end1) x [start2, end2)` as unchanged.
    ///
    /// # Panics
    ///
    /// If the range starts before the end of the previously marked range.
    pub fn mark_equal_range(&mut self, start1: usize, start2: usize, end1: usize, end2: usize) {
        if start1 == end1 && start2 == end2 {
            return;
        }

        assert!(
            self.index1 <= start1 && self.index2 <= start2,
            "Unchanged ranges must be marked in order: ({start1}, {start2}) is before ({}, {})",
            self.index1,
            self.index2
        );
        debug_assert!(start1 <= end1 && start2 <= end2);

        if self.index1 != start1 || self.index2 != start2 {
            self.changes
                .push(Range::new(self.index1, start1, self.index2, start2));
        }

        self.index1 = end1;
        self.index2 = end2;
    }

    #[must_use]
    pub fn finish(mut self) -> DiffIterable {
        debug_assert!(self.index1 <= self.length1 && self.index2 <= self.length2);

        if self.index1 != self.length1 || self.index2 != self.length2 {
            self.changes.push(Range::new(
                self.index1,
                self.length1,
                self.index2,
                self.length2,
            ));
        }

        DiffIterable::new(self.changes, self.length1, self.length2)
    }
}

/// A [`ChangeBuilder`] that shrinks every change by the equal elements at its
/// start and end.
#[derive(Debug, Clone)]
pub struct ExpandChangeBuilder<'a, T> {
    builder: ChangeBuilder,
    data1: &'a [T],
    data2: &'a [T],
}

impl<'a, T> ExpandChangeBuilder<'a, T>
where
    T: PartialEq,
{
    #[must_use]
    pub fn new(data1: &'a [T], data2: &'a [T]) -> Self {
        Self {
            builder: ChangeBuilder::new(data1.len(), data2.len()),
            data1,
            data2,
        }
    }

    #[must_use]
    pub fn index1(&self) -> usize { self.builder.index1() }

    #[must_use]
    pub fn index2(&self) -> usize { self.builder.index2() }

    pub fn mark_equal(&mut self, index1: usize, index2: usize) {
        self.builder.mark_equal(index1, index2);
    }

    #[must_use]
    pub fn finish(self) -> DiffIterable {
        let raw = self.builder.finish();
        let changes = raw
            .changes()
            .map(|ch| expand(self.data1, self.data2, ch.start1, ch.start2, ch.end1, ch.end2))
            .collect();

        DiffIterable::new(changes, raw.length1(), raw.length2())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_builder_creates_gaps() {
        let mut builder = ChangeBuilder::new(5, 4);
        builder.mark_equal(0, 0);
        builder.mark_equal_count(2, 1, 2);

        assert_eq!(
            builder.finish().changes().collect::<Vec<_>>(),
            vec![Range::new(1, 2, 1, 1), Range::new(4, 5, 3, 4)]
        );
    }

    #[test]
    fn test_builder_without_marks() {
        assert_eq!(
            ChangeBuilder::new(2, 3).finish().changes().collect::<Vec<_>>(),
            vec![Range::new(0, 2, 0, 3)]
        );
    }

    #[test]
    #[should_panic(expected = "Unchanged ranges must be marked in order")]
    fn test_builder_rejects_going_backwards() {
        let mut builder = ChangeBuilder::new(5, 5);
        builder.mark_equal(3, 3);
        builder.mark_equal(1, 1);
    }

    #[test]
    fn test_expand_builder_trims_equal_elements() {
        let data1 = ['a', 'x', 'b'];
        let data2 = ['a', 'y', 'b'];
        let builder = ExpandChangeBuilder::new(&data1, &data2);

        assert_eq!(
            builder.finish().changes().collect::<Vec<_>>(),
            vec![Range::new(1, 2, 1, 2)]
        );
    }
}
