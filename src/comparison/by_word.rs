//! Word level comparison.
//!
//! Words and newlines are aligned first. The alignment is then refined into
//! a character alignment by matching the punctuation between the words, and
//! finally the changes are corrected according to the whitespace policy.

use super::{
    ComparisonContext,
    chunk_optimizer::{self, WordShift},
    comparison_manager::convert_into_diff_fragments,
    line_fragment_splitter::LineFragmentSplitter,
    policy::ComparisonPolicy,
    whitespace_corrector,
};
use crate::{
    diff_iterable::{FairDiffIterable, Range},
    errors::DiffError,
    fragments::DiffFragment,
};

pub mod inline_chunk;
pub mod punctuation_matcher;

use inline_chunk::{InlineChunk, chunk_keys, count_newlines, get_inline_chunks};
use punctuation_matcher::PunctuationMatcher;

/// The changes of a block of whole lines, relative to the block's start
/// offsets, and the number of newlines the block contains on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock {
    pub fragments: Vec<DiffFragment>,
    pub offsets: Range,
    pub newlines1: usize,
    pub newlines2: usize,
}

/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare(
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<DiffFragment>, DiffError> {
    ctx.check_cancelled()?;

    let words1 = get_inline_chunks(text1);
    let words2 = get_inline_chunks(text2);
    let word_changes = compare_words(text1, text2, &words1, &words2, ctx)?;

    let changes =
        PunctuationMatcher::new(text1, text2, &words1, &words2, 0, 0, &word_changes, ctx)
            .build()?;
    let changes = whitespace_corrector::correct(&changes, text1, text2, policy);

    Ok(convert_into_diff_fragments(&changes))
}

/// Compare word by word and split the result into blocks of whole lines.
/// The blocks cover both texts without gaps.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_and_split(
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<LineBlock>, DiffError> {
    ctx.check_cancelled()?;

    let words1 = get_inline_chunks(text1);
    let words2 = get_inline_chunks(text2);
    let word_changes = compare_words(text1, text2, &words1, &words2, ctx)?;

    let word_blocks =
        LineFragmentSplitter::new(text1, text2, &words1, &words2, &word_changes, ctx).run()?;

    let mut line_blocks = Vec::with_capacity(word_blocks.len());
    for block in word_blocks {
        let offsets = block.offsets;
        let words = block.words;

        let subtext1 = &text1[offsets.start1..offsets.end1];
        let subtext2 = &text2[offsets.start2..offsets.end2];
        let subwords1 = &words1[words.start1..words.end1];
        let subwords2 = &words2[words.start2..words.end2];
        let subiterable = FairDiffIterable::fair(word_changes.subiterable(
            words.start1,
            words.end1,
            words.start2,
            words.end2,
        ));

        let changes = PunctuationMatcher::new(
            subtext1,
            subtext2,
            subwords1,
            subwords2,
            offsets.start1,
            offsets.start2,
            &subiterable,
            ctx,
        )
        .build()?;
        let changes = whitespace_corrector::correct(&changes, subtext1, subtext2, policy);

        line_blocks.push(LineBlock {
            fragments: convert_into_diff_fragments(&changes),
            offsets,
            newlines1: count_newlines(subwords1),
            newlines2: count_newlines(subwords2),
        });
    }

    Ok(line_blocks)
}

fn compare_words(
    text1: &[char],
    text2: &[char],
    words1: &[InlineChunk],
    words2: &[InlineChunk],
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    let keys1 = chunk_keys(text1, words1);
    let keys2 = chunk_keys(text2, words2);

    let word_changes = ctx.diff(&keys1, &keys2)?;

    let strategy = WordShift::new(text1, text2, words1, words2);
    chunk_optimizer::optimize(&keys1, &keys2, &word_changes, &strategy, ctx)
}
