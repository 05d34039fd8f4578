//! Character level comparison.
//!
//! Whitespace sensitive variants align the non-whitespace characters first
//! and fill in the whitespace afterwards, so that a change in indentation
//! never breaks up the alignment of the actual content.

use super::{
    ComparisonContext,
    change_corrector::{self, DefaultCharChangeCorrector},
    trim::{expand_whitespaces_forward, is_punctuation, is_whitespace},
    whitespace_corrector,
};
use crate::{
    diff_iterable::{ChangeBuilder, DiffIterable, FairDiffIterable, Range},
    errors::DiffError,
};

/// A subsequence of a text together with the offset of every kept character
/// in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePoints {
    pub chars: Vec<char>,
    pub offsets: Vec<usize>,
}

impl CodePoints {
    #[must_use]
    pub fn filtered(text: &[char], keep: impl Fn(char) -> bool) -> Self {
        let (chars, offsets) = text
            .iter()
            .enumerate()
            .filter(|(_, c)| keep(**c))
            .map(|(offset, c)| (*c, offset))
            .unzip();

        Self { chars, offsets }
    }

    #[must_use]
    pub fn non_whitespace(text: &[char]) -> Self { Self::filtered(text, |c| !is_whitespace(c)) }

    #[must_use]
    pub fn punctuation(text: &[char]) -> Self { Self::filtered(text, is_punctuation) }

    #[must_use]
    pub fn char_offset(&self, index: usize) -> usize { self.offsets[index] }

    #[must_use]
    pub fn char_offset_after(&self, index: usize) -> usize { self.offsets[index] + 1 }

    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }
}

/// Align every character of both texts.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare(
    text1: &[char],
    text2: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    ctx.check_cancelled()?;
    ctx.diff(text1, text2)
}

/// Align the non-whitespace characters, then align the whitespace between
/// every pair of matched characters separately.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_two_step(
    text1: &[char],
    text2: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    ctx.check_cancelled()?;

    let code_points1 = CodePoints::non_whitespace(text1);
    let code_points2 = CodePoints::non_whitespace(text2);
    let non_space_changes = ctx.diff(&code_points1.chars, &code_points2.chars)?;

    let corrector =
        DefaultCharChangeCorrector::new(&code_points1, &code_points2, text1, text2, ctx);
    change_corrector::correct(&corrector, &non_space_changes, text1.len(), text2.len(), ctx)
}

/// Like [`compare_two_step`], but whitespace at the start and end of lines
/// is never reported as changed.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_trim_whitespaces(
    text1: &[char],
    text2: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<DiffIterable, DiffError> {
    let iterable = compare_two_step(text1, text2, ctx)?;
    Ok(whitespace_corrector::trim_spaces(&iterable, text1, text2))
}

/// Align the non-whitespace characters only. Whitespace is never reported as
/// changed, so the unchanged ranges of the result may differ in length.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_ignore_whitespaces(
    text1: &[char],
    text2: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<DiffIterable, DiffError> {
    ctx.check_cancelled()?;

    let code_points1 = CodePoints::non_whitespace(text1);
    let code_points2 = CodePoints::non_whitespace(text2);
    let changes = ctx.diff(&code_points1.chars, &code_points2.chars)?;

    let ranges = changes
        .changes()
        .map(|ch| {
            let (start1, end1) = if ch.start1 == ch.end1 {
                let offset = whitespace_insertion_point(
                    &code_points1,
                    &code_points2,
                    text1,
                    text2,
                    ch,
                    true,
                );
                (offset, offset)
            } else {
                (
                    code_points1.char_offset(ch.start1),
                    code_points1.char_offset_after(ch.end1 - 1),
                )
            };

            let (start2, end2) = if ch.start2 == ch.end2 {
                let offset = whitespace_insertion_point(
                    &code_points1,
                    &code_points2,
                    text1,
                    text2,
                    ch,
                    false,
                );
                (offset, offset)
            } else {
                (
                    code_points2.char_offset(ch.start2),
                    code_points2.char_offset_after(ch.end2 - 1),
                )
            };

            Range::new(start1, end1, start2, end2)
        })
        .collect();

    Ok(DiffIterable::new(ranges, text1.len(), text2.len()))
}

/// Where the empty side of a change goes: after the previous matched
/// character and the whitespace that follows it on both sides.
fn whitespace_insertion_point(
    code_points1: &CodePoints,
    code_points2: &CodePoints,
    text1: &[char],
    text2: &[char],
    change: Range,
    left: bool,
) -> usize {
    let offset1 = change
        .start1
        .checked_sub(1)
        .map_or(0, |index| code_points1.char_offset_after(index));
    let offset2 = change
        .start2
        .checked_sub(1)
        .map_or(0, |index| code_points2.char_offset_after(index));

    let start = if left { offset1 } else { offset2 };
    start + expand_whitespaces_forward(text1, text2, offset1, offset2, text1.len(), text2.len())
}

/// Align the punctuation characters only.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_punctuation(
    text1: &[char],
    text2: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    ctx.check_cancelled()?;

    let chars1 = CodePoints::punctuation(text1);
    let chars2 = CodePoints::punctuation(text2);
    let changes = ctx.diff(&chars1.chars, &chars2.chars)?;

    Ok(transfer(&chars1, &chars2, text1.len(), text2.len(), &changes))
}

/// Align the punctuation of `text1` with the punctuation of `text21`
/// followed by `text22`. The result is split into an alignment of `text1`
/// with `text21` and one of `text1` with `text22`.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_punctuation_2_side(
    text1: &[char],
    text21: &[char],
    text22: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<(FairDiffIterable, FairDiffIterable), DiffError> {
    ctx.check_cancelled()?;

    let chars1 = CodePoints::punctuation(text1);
    let chars21 = CodePoints::punctuation(text21);
    let chars22 = CodePoints::punctuation(text22);

    let chars2: Vec<char> = chars21.chars.iter().chain(&chars22.chars).copied().collect();
    let changes = ctx.diff(&chars1.chars, &chars2)?;
    let (changes1, changes2) = split_2_side(&changes, chars21.len());

    Ok((
        transfer(&chars1, &chars21, text1.len(), text21.len(), &changes1),
        transfer(&chars1, &chars22, text1.len(), text22.len(), &changes2),
    ))
}

/// Split an alignment whose second side is a concatenation at `offset`.
fn split_2_side(changes: &FairDiffIterable, offset: usize) -> (FairDiffIterable, FairDiffIterable) {
    let mut ranges1 = Vec::new();
    let mut ranges2 = Vec::new();

    for range in changes.unchanged() {
        if range.end2 <= offset {
            ranges1.push(range);
        } else if range.start2 >= offset {
            ranges2.push(Range::new(
                range.start1,
                range.end1,
                range.start2 - offset,
                range.end2 - offset,
            ));
        } else {
            let length = offset - range.start2;
            ranges1.push(Range::new(range.start1, range.start1 + length, range.start2, offset));
            ranges2.push(Range::new(range.start1 + length, range.end1, 0, range.end2 - offset));
        }
    }

    let length1 = changes.length1();
    let length2 = changes.length2();
    (
        FairDiffIterable::fair(DiffIterable::from_unchanged(&ranges1, length1, offset)),
        FairDiffIterable::fair(DiffIterable::from_unchanged(&ranges2, length1, length2 - offset)),
    )
}

/// Map an alignment of two filtered subsequences back onto the texts.
fn transfer(
    chars1: &CodePoints,
    chars2: &CodePoints,
    length1: usize,
    length2: usize,
    changes: &FairDiffIterable,
) -> FairDiffIterable {
    let mut builder = ChangeBuilder::new(length1, length2);
    for range in changes.unchanged() {
        for i in 0..range.len1() {
            builder.mark_equal(
                chars1.char_offset(range.start1 + i),
                chars2.char_offset(range.start2 + i),
            );
        }
    }

    FairDiffIterable::fair(builder.finish())
}
