//! Splitting of a word alignment into blocks of whole lines.
//!
//! The texts are cut at matched newlines and before matched words that
//! start a line on both sides. Neighbouring blocks are merged back when
//! splitting them would not help reading the result: when neither of them
//! has matched words, when both only differ in whitespace or when one of
//! them has no words at all.

use super::{
    ComparisonContext, by_word::inline_chunk::InlineChunk,
    comparison_util::equals_ignore_whitespaces,
};
use crate::{
    diff_iterable::{FairDiffIterable, Range},
    errors::DiffError,
};

/// A block of whole lines: the words it contains and its character offsets
/// in both texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBlock {
    pub words: Range,
    pub offsets: Range,
}

#[derive(Debug)]
struct PendingChunk {
    block: WordBlock,
    has_equal_words: bool,
    has_words_inside: bool,
    is_equal_ignore_whitespaces: bool,
}

impl PendingChunk {
    fn should_merge(&self, other: &PendingChunk) -> bool {
        // lines matched only by their newlines
        (!self.has_equal_words && !other.has_equal_words)
            || (self.is_equal_ignore_whitespaces && other.is_equal_ignore_whitespaces)
            || !self.has_words_inside
            || !other.has_words_inside
    }
}

/// Splits a word alignment into [`WordBlock`]s.
///
/// Block boundaries are word indexes of newlines: a block ends after the
/// newline at its end index. `None` stands for the boundary before the first
/// word and `words.len()` for the end of the text.
#[derive(Debug)]
pub struct LineFragmentSplitter<'a> {
    text1: &'a [char],
    text2: &'a [char],
    words1: &'a [InlineChunk],
    words2: &'a [InlineChunk],
    iterable: &'a FairDiffIterable,
    ctx: ComparisonContext<'a>,

    last1: Option<usize>,
    last2: Option<usize>,
    pending: Option<PendingChunk>,
    result: Vec<WordBlock>,
}

impl<'a> LineFragmentSplitter<'a> {
    #[must_use]
    pub fn new(
        text1: &'a [char],
        text2: &'a [char],
        words1: &'a [InlineChunk],
        words2: &'a [InlineChunk],
        iterable: &'a FairDiffIterable,
        ctx: ComparisonContext<'a>,
    ) -> Self {
        Self {
            text1,
            text2,
            words1,
            words2,
            iterable,
            ctx,
            last1: None,
            last2: None,
            pending: None,
            result: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// `DiffError::Cancelled` if the request got cancelled.
    pub fn run(mut self) -> Result<Vec<WordBlock>, DiffError> {
        let mut has_equal_words = false;

        let iterable = self.iterable;
        for range in iterable.unchanged() {
            self.ctx.check_cancelled()?;

            for i in 0..range.len1() {
                let index1 = range.start1 + i;
                let index2 = range.start2 + i;

                if self.words1[index1].is_newline() && self.words2[index2].is_newline() {
                    self.add_line_chunk(Some(index1), Some(index2), has_equal_words);
                    has_equal_words = false;
                } else {
                    if is_first_in_line(self.words1, index1)
                        && is_first_in_line(self.words2, index2)
                    {
                        self.add_line_chunk(
                            index1.checked_sub(1),
                            index2.checked_sub(1),
                            has_equal_words,
                        );
                    }
                    has_equal_words = true;
                }
            }
        }

        self.add_line_chunk(
            Some(self.words1.len()),
            Some(self.words2.len()),
            has_equal_words,
        );

        if let Some(pending) = self.pending.take() {
            self.result.push(pending.block);
        }
        Ok(self.result)
    }

    fn add_line_chunk(&mut self, end1: Option<usize>, end2: Option<usize>, has_equal_words: bool) {
        if self.last1 > end1 || self.last2 > end2 {
            return;
        }

        let chunk = self.create_chunk(end1, end2, has_equal_words);
        if chunk.block.offsets.is_empty() {
            return;
        }

        self.pending = Some(match self.pending.take() {
            Some(pending) if pending.should_merge(&chunk) => self.merge(pending, chunk),
            Some(pending) => {
                self.result.push(pending.block);
                chunk
            }
            None => chunk,
        });

        self.last1 = end1;
        self.last2 = end2;
    }

    fn merge(&self, chunk1: PendingChunk, chunk2: PendingChunk) -> PendingChunk {
        let (words1, words2) = (chunk1.block.words, chunk2.block.words);
        let (offsets1, offsets2) = (chunk1.block.offsets, chunk2.block.offsets);
        let offsets = Range::new(offsets1.start1, offsets2.end1, offsets1.start2, offsets2.end2);

        PendingChunk {
            block: WordBlock {
                words: Range::new(words1.start1, words2.end1, words1.start2, words2.end2),
                offsets,
            },
            has_equal_words: chunk1.has_equal_words || chunk2.has_equal_words,
            has_words_inside: chunk1.has_words_inside || chunk2.has_words_inside,
            is_equal_ignore_whitespaces: self.is_equal_ignore_whitespaces(offsets),
        }
    }

    fn is_equal_ignore_whitespaces(&self, offsets: Range) -> bool {
        equals_ignore_whitespaces(
            &self.text1[offsets.start1..offsets.end1],
            &self.text2[offsets.start2..offsets.end2],
        )
    }

    fn create_chunk(
        &self,
        end1: Option<usize>,
        end2: Option<usize>,
        has_equal_words: bool,
    ) -> PendingChunk {
        let offsets = Range::new(
            boundary_offset(self.words1, self.text1, self.last1),
            boundary_offset(self.words1, self.text1, end1),
            boundary_offset(self.words2, self.text2, self.last2),
            boundary_offset(self.words2, self.text2, end2),
        );
        let words = Range::new(
            words_after(self.last1, self.words1.len()),
            words_after(end1, self.words1.len()),
            words_after(self.last2, self.words2.len()),
            words_after(end2, self.words2.len()),
        );

        PendingChunk {
            block: WordBlock { words, offsets },
            has_equal_words,
            has_words_inside: has_words(&self.words1[words.start1..words.end1])
                || has_words(&self.words2[words.start2..words.end2]),
            is_equal_ignore_whitespaces: self.is_equal_ignore_whitespaces(offsets),
        }
    }
}

fn has_words(chunks: &[InlineChunk]) -> bool { chunks.iter().any(|chunk| !chunk.is_newline()) }

fn is_first_in_line(words: &[InlineChunk], index: usize) -> bool {
    index == 0 || words[index - 1].is_newline()
}

/// Character offset right after a boundary.
fn boundary_offset(words: &[InlineChunk], text: &[char], boundary: Option<usize>) -> usize {
    match boundary {
        None => 0,
        Some(index) if index == words.len() => text.len(),
        Some(index) => {
            debug_assert!(words[index].is_newline());
            words[index].end()
        }
    }
}

/// Index of the first word after a boundary.
fn words_after(boundary: Option<usize>, count: usize) -> usize {
    boundary.map_or(0, |index| (index + 1).min(count))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        comparison::{
            by_word::inline_chunk::{chunk_keys, get_inline_chunks},
            test_utils::{chars, context},
        },
        diff_iterable::DiffIterable,
    };

    fn split(text1: &str, text2: &str) -> Vec<WordBlock> {
        let text1 = chars(text1);
        let text2 = chars(text2);
        let words1 = get_inline_chunks(&text1);
        let words2 = get_inline_chunks(&text2);
        let iterable = context()
            .diff(&chunk_keys(&text1, &words1), &chunk_keys(&text2, &words2))
            .unwrap();

        LineFragmentSplitter::new(&text1, &text2, &words1, &words2, &iterable, context())
            .run()
            .unwrap()
    }

    #[test]
    fn test_splits_at_matched_newlines() {
        assert_eq!(
            split("a\nb\n", "a\nc\n"),
            vec![
                WordBlock {
                    words: Range::new(0, 2, 0, 2),
                    offsets: Range::new(0, 2, 0, 2),
                },
                WordBlock {
                    words: Range::new(2, 4, 2, 4),
                    offsets: Range::new(2, 4, 2, 4),
                },
            ]
        );
    }

    #[test]
    fn test_merges_lines_matched_only_by_newlines() {
        assert_eq!(
            split("a\nb", "c\nd"),
            vec![WordBlock {
                words: Range::new(0, 3, 0, 3),
                offsets: Range::new(0, 3, 0, 3),
            }]
        );
    }

    #[test]
    fn test_merges_blocks_of_only_newlines() {
        assert_eq!(
            split("a b\n\nc", "a c\n\nc")
                .iter()
                .map(|block| block.offsets)
                .collect::<Vec<_>>(),
            vec![Range::new(0, 5, 0, 5), Range::new(5, 6, 5, 6)]
        );
    }

    #[test]
    fn test_merged_chunk_is_compared_as_a_whole() {
        let text1 = chars("ab\n");
        let text2 = chars("a\nb\n");
        let words1 = get_inline_chunks(&text1);
        let words2 = get_inline_chunks(&text2);
        let iterable =
            FairDiffIterable::fair(DiffIterable::new(vec![Range::new(0, 2, 0, 4)], 2, 4));
        let splitter =
            LineFragmentSplitter::new(&text1, &text2, &words1, &words2, &iterable, context());

        let chunk = |offsets: Range| PendingChunk {
            block: WordBlock {
                words: Range::new(0, 0, 0, 0),
                offsets,
            },
            has_equal_words: false,
            has_words_inside: true,
            is_equal_ignore_whitespaces: splitter.is_equal_ignore_whitespaces(offsets),
        };
        let first = chunk(Range::new(0, 2, 0, 1));
        let second = chunk(Range::new(2, 3, 1, 4));
        assert!(!first.is_equal_ignore_whitespaces);
        assert!(!second.is_equal_ignore_whitespaces);

        let merged = splitter.merge(first, second);

        assert_eq!(merged.block.offsets, Range::new(0, 3, 0, 4));
        assert!(merged.is_equal_ignore_whitespaces);
    }

    #[test]
    fn test_splits_before_matched_first_words() {
        // the second lines start with the same word but the first lines
        // have a different number of newlines
        let blocks = split("x y\nfoo bar", "z\nw\nfoo baz");

        assert_eq!(blocks.last().map(|block| block.offsets), Some(Range::new(4, 11, 4, 11)));
    }
}
