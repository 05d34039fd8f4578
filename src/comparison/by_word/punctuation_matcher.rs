use super::inline_chunk::InlineChunk;
use crate::{
    comparison::{ComparisonContext, by_char},
    diff_iterable::{ChangeBuilder, FairDiffIterable, Range},
    errors::DiffError,
};

/// Turns an alignment of words into an alignment of characters by also
/// matching the punctuation in the gaps around the matched words.
///
/// The gap after a matched word and the gap before the next matched word
/// are the same gap if the words are adjacent on both sides. If they are
/// adjacent on one side only, the shared gap is matched against both gaps of
/// the other side at once.
#[derive(Debug)]
pub struct PunctuationMatcher<'a> {
    text1: &'a [char],
    text2: &'a [char],
    words1: &'a [InlineChunk],
    words2: &'a [InlineChunk],
    shift1: usize,
    shift2: usize,
    changes: &'a FairDiffIterable,
    ctx: ComparisonContext<'a>,

    builder: ChangeBuilder,
    last_gap: Option<Range>,
}

impl<'a> PunctuationMatcher<'a> {
    /// `text1` and `text2` may be windows of the texts the words were taken
    /// from, starting at `shift1` and `shift2`.
    #[must_use]
    pub fn new(
        text1: &'a [char],
        text2: &'a [char],
        words1: &'a [InlineChunk],
        words2: &'a [InlineChunk],
        shift1: usize,
        shift2: usize,
        changes: &'a FairDiffIterable,
        ctx: ComparisonContext<'a>,
    ) -> Self {
        Self {
            text1,
            text2,
            words1,
            words2,
            shift1,
            shift2,
            changes,
            ctx,
            builder: ChangeBuilder::new(text1.len(), text2.len()),
            last_gap: None,
        }
    }

    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn build(mut self) -> Result<FairDiffIterable, DiffError> {
        self.match_forward(None, None);

        let changes = self.changes;
        for range in changes.unchanged() {
            for i in 0..range.len1() {
                let index1 = range.start1 + i;
                let index2 = range.start2 + i;

                self.match_backward(index1, index2)?;
                self.builder.mark_equal_range(
                    self.start_offset1(index1),
                    self.start_offset2(index2),
                    self.end_offset1(index1),
                    self.end_offset2(index2),
                );
                self.match_forward(Some(index1), Some(index2));
            }
        }

        self.match_backward(self.words1.len(), self.words2.len())?;

        Ok(FairDiffIterable::fair(self.builder.finish()))
    }

    /// Remember the gap after the words at `index1` and `index2`, or the
    /// gap at the start of the texts.
    fn match_forward(&mut self, index1: Option<usize>, index2: Option<usize>) {
        let start1 = index1.map_or(0, |index| self.end_offset1(index));
        let start2 = index2.map_or(0, |index| self.end_offset2(index));
        let next1 = index1.map_or(0, |index| index + 1);
        let next2 = index2.map_or(0, |index| index + 1);
        let end1 = self.gap_end1(next1);
        let end2 = self.gap_end2(next2);

        self.last_gap = Some(Range::new(start1, end1, start2, end2));
    }

    /// Match the gap before the words at `index1` and `index2`, or the gap
    /// at the end of the texts, together with the remembered gap.
    fn match_backward(&mut self, index1: usize, index2: usize) -> Result<(), DiffError> {
        let start1 = if index1 == 0 { 0 } else { self.end_offset1(index1 - 1) };
        let start2 = if index2 == 0 { 0 } else { self.end_offset2(index2 - 1) };
        let end1 = self.gap_end1(index1);
        let end2 = self.gap_end2(index2);
        let gap = Range::new(start1, end1, start2, end2);

        let Some(last) = self.last_gap.take() else {
            return self.match_range(gap);
        };

        if last.start1 == gap.start1 && last.start2 == gap.start2 {
            debug_assert!(last.end1 == gap.end1 && last.end2 == gap.end2);
            self.match_range(gap)
        } else if last.start1 < gap.start1 && last.start2 < gap.start2 {
            self.match_range(last)?;
            self.match_range(gap)
        } else {
            self.match_complex_range(last, gap)
        }
    }

    fn match_range(&mut self, range: Range) -> Result<(), DiffError> {
        if range.start1 == range.end1 || range.start2 == range.end2 {
            return Ok(());
        }

        let changes = by_char::compare_punctuation(
            &self.text1[range.start1..range.end1],
            &self.text2[range.start2..range.end2],
            self.ctx,
        )?;

        for chunk in changes.unchanged() {
            self.builder.mark_equal_range(
                range.start1 + chunk.start1,
                range.start2 + chunk.start2,
                range.start1 + chunk.end1,
                range.start2 + chunk.end2,
            );
        }

        Ok(())
    }

    /// Two gaps that share one side.
    fn match_complex_range(&mut self, range1: Range, range2: Range) -> Result<(), DiffError> {
        if range1.start1 == range2.start1 && range1.end1 == range2.end1 {
            self.match_complex_range_left(range1, range2)
        } else if range1.start2 == range2.start2 && range1.end2 == range2.end2 {
            self.match_complex_range_right(range1, range2)
        } else {
            self.match_range(range1)?;
            self.match_range(range2)
        }
    }

    /// The gap of the first text against both gaps of the second one.
    fn match_complex_range_left(&mut self, range1: Range, range2: Range) -> Result<(), DiffError> {
        let (changes1, changes2) = by_char::compare_punctuation_2_side(
            &self.text1[range1.start1..range1.end1],
            &self.text2[range1.start2..range1.end2],
            &self.text2[range2.start2..range2.end2],
            self.ctx,
        )?;

        for chunk in changes1.unchanged() {
            self.builder.mark_equal_range(
                range1.start1 + chunk.start1,
                range1.start2 + chunk.start2,
                range1.start1 + chunk.end1,
                range1.start2 + chunk.end2,
            );
        }
        for chunk in changes2.unchanged() {
            self.builder.mark_equal_range(
                range2.start1 + chunk.start1,
                range2.start2 + chunk.start2,
                range2.start1 + chunk.end1,
                range2.start2 + chunk.end2,
            );
        }

        Ok(())
    }

    /// The gap of the second text against both gaps of the first one.
    fn match_complex_range_right(&mut self, range1: Range, range2: Range) -> Result<(), DiffError> {
        let (changes1, changes2) = by_char::compare_punctuation_2_side(
            &self.text2[range1.start2..range1.end2],
            &self.text1[range1.start1..range1.end1],
            &self.text1[range2.start1..range2.end1],
            self.ctx,
        )?;

        for chunk in changes1.unchanged() {
            self.builder.mark_equal_range(
                range1.start1 + chunk.start2,
                range1.start2 + chunk.start1,
                range1.start1 + chunk.end2,
                range1.start2 + chunk.end1,
            );
        }
        for chunk in changes2.unchanged() {
            self.builder.mark_equal_range(
                range2.start1 + chunk.start2,
                range2.start2 + chunk.start1,
                range2.start1 + chunk.end2,
                range2.start2 + chunk.end1,
            );
        }

        Ok(())
    }

    fn start_offset1(&self, index: usize) -> usize { self.words1[index].start() - self.shift1 }

    fn start_offset2(&self, index: usize) -> usize { self.words2[index].start() - self.shift2 }

    fn end_offset1(&self, index: usize) -> usize { self.words1[index].end() - self.shift1 }

    fn end_offset2(&self, index: usize) -> usize { self.words2[index].end() - self.shift2 }

    /// Offset of the word at `index`, or the end of the text past the last
    /// word.
    fn gap_end1(&self, index: usize) -> usize {
        if index == self.words1.len() { self.text1.len() } else { self.start_offset1(index) }
    }

    fn gap_end2(&self, index: usize) -> usize {
        if index == self.words2.len() { self.text2.len() } else { self.start_offset2(index) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::comparison::{
        by_word::inline_chunk::{chunk_keys, get_inline_chunks},
        test_utils::{chars, context},
    };

    fn match_punctuation(text1: &str, text2: &str) -> Vec<Range> {
        let text1 = chars(text1);
        let text2 = chars(text2);
        let words1 = get_inline_chunks(&text1);
        let words2 = get_inline_chunks(&text2);
        let word_changes = context()
            .diff(&chunk_keys(&text1, &words1), &chunk_keys(&text2, &words2))
            .unwrap();

        let result = PunctuationMatcher::new(
            &text1,
            &text2,
            &words1,
            &words2,
            0,
            0,
            &word_changes,
            context(),
        )
        .build()
        .unwrap();

        assert!(result.is_fair_for(&text1, &text2));
        result.changes().collect()
    }

    #[test]
    fn test_equal_texts() {
        assert_eq!(match_punctuation("f(a,b);", "f(a,b);"), vec![]);
    }

    #[test]
    fn test_changed_word_keeps_punctuation() {
        // the space is left to the whitespace correction
        assert_eq!(match_punctuation("f(a, b);", "f(a, c);"), vec![Range::new(4, 6, 4, 6)]);
    }

    #[test]
    fn test_inserted_argument() {
        assert_eq!(
            match_punctuation("f(a);", "f(a, b);"),
            vec![Range::new(3, 3, 3, 6)]
        );
    }

    #[test]
    fn test_whitespace_is_not_matched() {
        assert_eq!(match_punctuation("a b", "a  b"), vec![Range::new(1, 2, 1, 3)]);
    }
}
