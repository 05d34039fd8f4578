//! Second step of a two-step comparison.
//!
//! The first step aligns a filtered subsequence of the input (non-whitespace
//! characters, long lines). Every matched filtered element is mapped back to
//! its range in the original sequence, and the gaps between consecutive
//! matches are aligned again with a finer comparison.

use super::{ComparisonContext, by_char, by_char::CodePoints, by_line::line::Line, trim::expand};
use crate::{
    diff_iterable::{ChangeBuilder, FairDiffIterable, Range},
    errors::DiffError,
};

pub trait ChangeCorrector {
    /// `[start, end)` in the first original sequence of the filtered element
    /// at `index`.
    fn original_range1(&self, index: usize) -> (usize, usize);

    /// `[start, end)` in the second original sequence of the filtered element
    /// at `index`.
    fn original_range2(&self, index: usize) -> (usize, usize);

    /// Mark the unchanged parts of a gap between two matches, in order.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    fn match_gap(&self, builder: &mut ChangeBuilder, gap: Range) -> Result<(), DiffError>;
}

/// Running state of a correction: the builder and the end of the previous
/// match on both sides. The cursors only move forward.
#[derive(Debug)]
struct GapCorrection {
    builder: ChangeBuilder,
    last1: usize,
    last2: usize,
}

impl GapCorrection {
    fn match_gap<C>(
        &mut self,
        corrector: &C,
        end1: usize,
        end2: usize,
        ctx: ComparisonContext<'_>,
    ) -> Result<(), DiffError>
    where
        C: ChangeCorrector,
    {
        debug_assert!(self.last1 <= end1 && self.last2 <= end2, "Gap cursors moved backwards");
        ctx.check_cancelled()?;

        if self.last1 == end1 || self.last2 == end2 {
            return Ok(());
        }
        corrector.match_gap(&mut self.builder, Range::new(self.last1, end1, self.last2, end2))
    }

    fn mark_match(&mut self, (start1, end1): (usize, usize), (start2, end2): (usize, usize)) {
        self.builder.mark_equal_range(start1, start2, end1, end2);
        self.last1 = end1;
        self.last2 = end2;
    }
}

/// Expand an alignment of the filtered sequences into an alignment of the
/// original sequences of lengths `length1` and `length2`.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig` from the gap alignments.
pub fn correct<C>(
    corrector: &C,
    changes: &FairDiffIterable,
    length1: usize,
    length2: usize,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError>
where
    C: ChangeCorrector,
{
    let mut state = GapCorrection {
        builder: ChangeBuilder::new(length1, length2),
        last1: 0,
        last2: 0,
    };

    for range in changes.unchanged() {
        for i in 0..range.len1() {
            let original1 = corrector.original_range1(range.start1 + i);
            let original2 = corrector.original_range2(range.start2 + i);

            state.match_gap(corrector, original1.0, original2.0, ctx)?;
            state.mark_match(original1, original2);
        }
    }
    state.match_gap(corrector, length1, length2, ctx)?;

    Ok(FairDiffIterable::fair(state.builder.finish()))
}

/// Non-whitespace characters to all characters. Gaps hold whitespace and
/// unmatched characters and are aligned character by character.
#[derive(Debug)]
pub struct DefaultCharChangeCorrector<'a> {
    code_points1: &'a CodePoints,
    code_points2: &'a CodePoints,
    text1: &'a [char],
    text2: &'a [char],
    ctx: ComparisonContext<'a>,
}

impl<'a> DefaultCharChangeCorrector<'a> {
    #[must_use]
    pub fn new(
        code_points1: &'a CodePoints,
        code_points2: &'a CodePoints,
        text1: &'a [char],
        text2: &'a [char],
        ctx: ComparisonContext<'a>,
    ) -> Self {
        Self {
            code_points1,
            code_points2,
            text1,
            text2,
            ctx,
        }
    }
}

impl ChangeCorrector for DefaultCharChangeCorrector<'_> {
    fn original_range1(&self, index: usize) -> (usize, usize) {
        (
            self.code_points1.char_offset(index),
            self.code_points1.char_offset_after(index),
        )
    }

    fn original_range2(&self, index: usize) -> (usize, usize) {
        (
            self.code_points2.char_offset(index),
            self.code_points2.char_offset_after(index),
        )
    }

    fn match_gap(&self, builder: &mut ChangeBuilder, gap: Range) -> Result<(), DiffError> {
        let inner = by_char::compare(
            &self.text1[gap.start1..gap.end1],
            &self.text2[gap.start2..gap.end2],
            self.ctx,
        )?;

        for chunk in inner.unchanged() {
            builder.mark_equal_count(
                gap.start1 + chunk.start1,
                gap.start2 + chunk.start2,
                chunk.len1(),
            );
        }

        Ok(())
    }
}

/// Important lines to all lines. Gaps are trimmed by their equal prefix and
/// suffix and the rest is aligned line by line.
#[derive(Debug)]
pub struct SmartLineChangeCorrector<'a, 'b> {
    indexes1: &'a [usize],
    indexes2: &'a [usize],
    lines1: &'a [Line<'b>],
    lines2: &'a [Line<'b>],
    ctx: ComparisonContext<'a>,
}

impl<'a, 'b> SmartLineChangeCorrector<'a, 'b> {
    #[must_use]
    pub fn new(
        indexes1: &'a [usize],
        indexes2: &'a [usize],
        lines1: &'a [Line<'b>],
        lines2: &'a [Line<'b>],
        ctx: ComparisonContext<'a>,
    ) -> Self {
        Self {
            indexes1,
            indexes2,
            lines1,
            lines2,
            ctx,
        }
    }
}

impl ChangeCorrector for SmartLineChangeCorrector<'_, '_> {
    fn original_range1(&self, index: usize) -> (usize, usize) {
        let line = self.indexes1[index];
        (line, line + 1)
    }

    fn original_range2(&self, index: usize) -> (usize, usize) {
        let line = self.indexes2[index];
        (line, line + 1)
    }

    fn match_gap(&self, builder: &mut ChangeBuilder, gap: Range) -> Result<(), DiffError> {
        let expanded = expand(
            self.lines1,
            self.lines2,
            gap.start1,
            gap.start2,
            gap.end1,
            gap.end2,
        );

        let inner = self.ctx.diff(
            &self.lines1[expanded.start1..expanded.end1],
            &self.lines2[expanded.start2..expanded.end2],
        )?;

        builder.mark_equal_range(gap.start1, gap.start2, expanded.start1, expanded.start2);
        for chunk in inner.unchanged() {
            builder.mark_equal_count(
                expanded.start1 + chunk.start1,
                expanded.start2 + chunk.start2,
                chunk.len1(),
            );
        }
        builder.mark_equal_range(expanded.end1, expanded.end2, gap.end1, gap.end2);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        comparison::{
            policy::ComparisonPolicy,
            test_utils::{chars, context},
        },
        diff_iterable::DiffIterable,
    };

    #[test]
    fn test_char_correction_covers_whole_texts() {
        let text1 = chars(" a  b ");
        let text2 = chars("a b");
        let code_points1 = CodePoints::non_whitespace(&text1);
        let code_points2 = CodePoints::non_whitespace(&text2);
        let non_space = FairDiffIterable::fair(DiffIterable::new(vec![], 2, 2));

        let corrector = DefaultCharChangeCorrector::new(
            &code_points1,
            &code_points2,
            &text1,
            &text2,
            context(),
        );
        let result = correct(&corrector, &non_space, text1.len(), text2.len(), context()).unwrap();

        assert!(result.is_fair_for(&text1, &text2));
        assert_eq!(
            result.changes().collect::<Vec<_>>(),
            vec![
                Range::new(0, 1, 0, 0),
                Range::new(3, 4, 2, 2),
                Range::new(5, 6, 3, 3)
            ]
        );
    }

    #[test]
    fn test_smart_line_correction_aligns_short_lines_in_gaps() {
        let texts1 = [chars("first line"), chars("}"), chars("second line")];
        let texts2 = [chars("first line"), chars("x"), chars("}"), chars("second line")];
        let lines1: Vec<Line<'_>> = texts1
            .iter()
            .map(|text| Line::new(text, ComparisonPolicy::Default))
            .collect();
        let lines2: Vec<Line<'_>> = texts2
            .iter()
            .map(|text| Line::new(text, ComparisonPolicy::Default))
            .collect();

        let indexes1 = [0, 2];
        let indexes2 = [0, 3];
        let big_changes = FairDiffIterable::fair(DiffIterable::new(vec![], 2, 2));

        let corrector =
            SmartLineChangeCorrector::new(&indexes1, &indexes2, &lines1, &lines2, context());
        let result = correct(&corrector, &big_changes, 3, 4, context()).unwrap();

        assert_eq!(result.changes().collect::<Vec<_>>(), vec![Range::new(1, 1, 1, 2)]);
    }
}
