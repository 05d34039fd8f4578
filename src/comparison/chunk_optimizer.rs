//! Boundary optimization of alignments.
//!
//! When two unchanged ranges are adjacent on one side, the change between
//! them is ambiguous: `[A]{B}[C]` may equally be aligned as `[A]{B'}[C']` if
//! the elements around the boundary repeat. The optimizer either merges the
//! two unchanged ranges or moves the boundary to where a [`ShiftStrategy`]
//! finds it most readable. The set of matched elements never changes, only
//! which of the equal elements are matched.

use super::{
    ComparisonContext,
    by_line::line::Line,
    by_word::inline_chunk::InlineChunk,
    trim::{expand_backward, expand_forward, is_whitespace},
};
use crate::{
    diff_iterable::{DiffIterable, FairDiffIterable, Range},
    errors::DiffError,
    utils::side::Side,
};

pub trait ShiftStrategy {
    /// How far to move the boundary between two unchanged ranges that touch
    /// on `touch_side`. Positive values move it forward by at most
    /// `equal_forward`, negative values move it backward by at most
    /// `equal_backward`.
    fn shift(
        &self,
        touch_side: Side,
        equal_forward: usize,
        equal_backward: usize,
        range1: &Range,
        range2: &Range,
    ) -> isize;
}

/// # Errors
///
/// `DiffError::Cancelled` if the request got cancelled.
pub fn optimize<T, S>(
    data1: &[T],
    data2: &[T],
    iterable: &FairDiffIterable,
    strategy: &S,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError>
where
    T: PartialEq,
    S: ShiftStrategy,
{
    let mut ranges: Vec<Range> = Vec::new();

    for range in iterable.unchanged() {
        ctx.check_cancelled()?;

        ranges.push(range);
        process_last_ranges(data1, data2, &mut ranges, strategy);
    }

    Ok(FairDiffIterable::fair(DiffIterable::from_unchanged(
        &ranges,
        data1.len(),
        data2.len(),
    )))
}

/// Optimize the boundary between the last two ranges, repeatedly while they
/// can be merged.
fn process_last_ranges<T, S>(data1: &[T], data2: &[T], ranges: &mut Vec<Range>, strategy: &S)
where
    T: PartialEq,
    S: ShiftStrategy,
{
    while let [.., range1, range2] = ranges[..] {
        if range1.end1 != range2.start1 && range1.end2 != range2.start2 {
            return;
        }

        let count1 = range1.len1();
        let count2 = range2.len1();

        let equal_forward = expand_forward(
            data1,
            data2,
            range1.end1,
            range1.end2,
            range1.end1 + count2,
            range1.end2 + count2,
        );
        let equal_backward = expand_backward(
            data1,
            data2,
            range2.start1 - count1,
            range2.start2 - count1,
            range2.start1,
            range2.start2,
        );

        if equal_forward == 0 && equal_backward == 0 {
            return;
        }

        // [A][B][B'] => [A B][B']
        if equal_forward == count2 {
            ranges.truncate(ranges.len() - 2);
            ranges.push(Range::new(
                range1.start1,
                range1.end1 + count2,
                range1.start2,
                range1.end2 + count2,
            ));
            continue;
        }

        // [A'][A][B] => [A'][A B]
        if equal_backward == count1 {
            ranges.truncate(ranges.len() - 2);
            ranges.push(Range::new(
                range2.start1 - count1,
                range2.end1,
                range2.start2 - count1,
                range2.end2,
            ));
            continue;
        }

        let touch_side = Side::from_left(range1.end1 == range2.start1);
        let shift = strategy.shift(touch_side, equal_forward, equal_backward, &range1, &range2);
        if shift != 0 {
            let length = ranges.len();
            ranges[length - 2] = Range::new(
                range1.start1,
                range1.end1.saturating_add_signed(shift),
                range1.start2,
                range1.end2.saturating_add_signed(shift),
            );
            ranges[length - 1] = Range::new(
                range2.start1.saturating_add_signed(shift),
                range2.end1,
                range2.start2.saturating_add_signed(shift),
                range2.end2,
            );
        }
        return;
    }
}

/// Prefer boundaries between words that are separated by whitespace.
#[derive(Debug)]
pub struct WordShift<'a> {
    text1: &'a [char],
    text2: &'a [char],
    words1: &'a [InlineChunk],
    words2: &'a [InlineChunk],
}

impl<'a> WordShift<'a> {
    #[must_use]
    pub fn new(
        text1: &'a [char],
        text2: &'a [char],
        words1: &'a [InlineChunk],
        words2: &'a [InlineChunk],
    ) -> Self {
        Self {
            text1,
            text2,
            words1,
            words2,
        }
    }
}

impl ShiftStrategy for WordShift<'_> {
    fn shift(
        &self,
        touch_side: Side,
        equal_forward: usize,
        equal_backward: usize,
        _range1: &Range,
        range2: &Range,
    ) -> isize {
        let words = touch_side.select(self.words1, self.words2);
        let text = touch_side.select(self.text1, self.text2);
        let touch_start = touch_side.start(range2);

        if is_separated_with_whitespace(text, &words[touch_start - 1], &words[touch_start]) {
            return 0;
        }

        // [X]{A}[B][Y] => [X]{A}{B}[Y]
        let forward = (0..equal_forward).find(|i| {
            is_separated_with_whitespace(text, &words[touch_start + i], &words[touch_start + i + 1])
        });
        if let Some(i) = forward {
            return to_shift(i + 1);
        }

        // [X][A]{B}[Y] => [X]{A}{B}[Y]
        let backward = (0..equal_backward).find(|i| {
            is_separated_with_whitespace(
                text,
                &words[touch_start - 1 - i - 1],
                &words[touch_start - 1 - i],
            )
        });
        if let Some(i) = backward {
            return -to_shift(i + 1);
        }

        0
    }
}

fn is_separated_with_whitespace(text: &[char], word1: &InlineChunk, word2: &InlineChunk) -> bool {
    if word1.is_newline() || word2.is_newline() {
        return true;
    }

    text[word1.end()..word2.start()].iter().any(|c| is_whitespace(*c))
}

/// Prefer boundaries next to unimportant lines, such as blank lines or lone
/// braces.
#[derive(Debug)]
pub struct LineShift<'a, 'b> {
    lines1: &'a [Line<'b>],
    lines2: &'a [Line<'b>],
    threshold: usize,
}

impl<'a, 'b> LineShift<'a, 'b> {
    #[must_use]
    pub fn new(lines1: &'a [Line<'b>], lines2: &'a [Line<'b>], threshold: usize) -> Self {
        Self {
            lines1,
            lines2,
            threshold,
        }
    }

    /// Move the unchanged boundary to an unimportant line of the side where
    /// the unchanged ranges touch.
    fn unchanged_boundary_shift(
        &self,
        touch_side: Side,
        equal_forward: usize,
        equal_backward: usize,
        range2: &Range,
        threshold: usize,
    ) -> Option<isize> {
        let lines = touch_side.select(self.lines1, self.lines2);
        let touch_start = touch_side.start(range2);

        let forward = find_next_unimportant_line(lines, touch_start, equal_forward + 1, threshold);
        let backward =
            find_prev_unimportant_line(lines, touch_start - 1, equal_backward + 1, threshold);
        combine_shifts(forward, backward)
    }

    /// Move the changed block of the other side so that it starts or ends at
    /// an unimportant line.
    fn changed_boundary_shift(
        &self,
        touch_side: Side,
        equal_forward: usize,
        equal_backward: usize,
        range1: &Range,
        range2: &Range,
        threshold: usize,
    ) -> Option<isize> {
        let side = touch_side.other();
        let lines = side.select(self.lines1, self.lines2);
        let change_start = side.end(range1);
        let change_end = side.start(range2);

        let forward = find_next_unimportant_line(lines, change_start, equal_forward + 1, threshold);
        let backward =
            find_prev_unimportant_line(lines, change_end - 1, equal_backward + 1, threshold);
        combine_shifts(forward, backward)
    }
}

impl ShiftStrategy for LineShift<'_, '_> {
    fn shift(
        &self,
        touch_side: Side,
        equal_forward: usize,
        equal_backward: usize,
        range1: &Range,
        range2: &Range,
    ) -> isize {
        [0, self.threshold]
            .into_iter()
            .find_map(|threshold| {
                self.unchanged_boundary_shift(
                    touch_side,
                    equal_forward,
                    equal_backward,
                    range2,
                    threshold,
                )
                .or_else(|| {
                    self.changed_boundary_shift(
                        touch_side,
                        equal_forward,
                        equal_backward,
                        range1,
                        range2,
                        threshold,
                    )
                })
            })
            .unwrap_or(0)
    }
}

fn combine_shifts(forward: Option<usize>, backward: Option<usize>) -> Option<isize> {
    match (forward, backward) {
        (None, None) => None,
        (Some(0), _) | (_, Some(0)) => Some(0),
        (Some(forward), _) => Some(to_shift(forward)),
        (None, Some(backward)) => Some(-to_shift(backward)),
    }
}

fn find_next_unimportant_line(
    lines: &[Line<'_>],
    offset: usize,
    count: usize,
    threshold: usize,
) -> Option<usize> {
    lines
        .iter()
        .skip(offset)
        .take(count)
        .position(|line| line.non_space_chars() <= threshold)
}

fn find_prev_unimportant_line(
    lines: &[Line<'_>],
    offset: usize,
    count: usize,
    threshold: usize,
) -> Option<usize> {
    lines[..=offset]
        .iter()
        .rev()
        .take(count)
        .position(|line| line.non_space_chars() <= threshold)
}

#[allow(clippy::cast_possible_wrap)]
fn to_shift(count: usize) -> isize { count as isize }
