//! Public entry points of the comparison pipeline.
//!
//! Texts are taken as `&str` and compared as sequences of chars: every
//! offset in the returned fragments is a char index, not a byte index.

use std::ops;

use log::{debug, trace};

use super::{
    ComparisonContext, by_char, by_line,
    by_word::{self, inline_chunk::get_inline_chunks},
    comparison_util,
    merge_range_util::{self, MergeConflictType},
    policy::{ComparisonPolicy, InnerFragmentsPolicy},
};
use crate::{
    cancellation::CancellationChecker,
    config::ComparisonConfig,
    diff_iterable::{ChangeBuilder, DiffIterable, FairDiffIterable, Range},
    errors::DiffError,
    fragments::{DiffFragment, LineFragment, MergeLineFragment},
    line_offsets::LineOffsets,
};

/// Compares texts line by line, word by word or char by char.
///
/// ```
/// use diff_comparison::{ComparisonManager, ComparisonPolicy, NeverCancelled};
///
/// let manager = ComparisonManager::default();
/// let fragments = manager
///     .compare_lines("a\nb\nc", "a\nx\nc", ComparisonPolicy::Default, &NeverCancelled)
///     .unwrap();
///
/// assert_eq!(fragments.len(), 1);
/// assert_eq!((fragments[0].start_line1, fragments[0].end_line1), (1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparisonManager {
    config: ComparisonConfig,
}

impl ComparisonManager {
    #[must_use]
    pub fn new(config: ComparisonConfig) -> Self { Self { config } }

    #[must_use]
    pub fn config(&self) -> &ComparisonConfig { &self.config }

    /// Changed blocks of whole lines, without inner fragments.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn compare_lines(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<LineFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let text1 = to_chars(text1);
        let text2 = to_chars(text2);

        compare_lines(&text1, &text2, policy, ctx)
    }

    /// Changed blocks of whole lines, each refined into word or char
    /// fragments according to `inner_policy`.
    ///
    /// Blocks that are too different to be refined are returned without
    /// inner fragments. After `max_bad_chunks` such blocks the remaining ones
    /// are not refined at all.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig` from the line alignment.
    pub fn compare_lines_inner(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        inner_policy: InnerFragmentsPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<LineFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let text1 = to_chars(text1);
        let text2 = to_chars(text2);

        let fragments = compare_lines(&text1, &text2, policy, ctx)?;
        create_inner_fragments(fragments, &text1, &text2, policy, inner_policy, ctx)
    }

    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn compare_words(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<DiffFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        by_word::compare(&to_chars(text1), &to_chars(text2), policy, ctx)
    }

    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn compare_chars(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<DiffFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        compare_chars(&to_chars(text1), &to_chars(text2), policy, ctx)
    }

    /// Like [`ComparisonManager::compare_lines_inner`] with the default
    /// policy, but the chars in `ignored1` and `ignored2` never make a
    /// difference. Changed blocks are trimmed of lines that are ignored
    /// entirely and inner fragments that are ignored on both sides are
    /// dropped.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig` from the line alignment.
    pub fn compare_lines_with_ignored_ranges(
        &self,
        text1: &str,
        text2: &str,
        ignored1: &[ops::Range<usize>],
        ignored2: &[ops::Range<usize>],
        inner_policy: InnerFragmentsPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<LineFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let text1 = to_chars(text1);
        let text2 = to_chars(text2);

        let side1 = IgnoredText::new(&text1, ignored1);
        let side2 = IgnoredText::new(&text2, ignored2);

        let contents1 = side1.elided_lines();
        let contents2 = side2.elided_lines();
        let lines1: Vec<&[char]> = contents1.iter().map(Vec::as_slice).collect();
        let lines2: Vec<&[char]> = contents2.iter().map(Vec::as_slice).collect();

        let iterable = by_line::compare(&lines1, &lines2, ComparisonPolicy::Default, ctx)?;
        let iterable = correct_ignored_lines(&iterable, &side1, &side2, ctx)?;
        let iterable = trim_ignored_lines(&iterable, &side1, &side2);

        let fragments = convert_into_line_fragments(&side1.offsets, &side2.offsets, &iterable);
        let fragments = create_inner_fragments(
            fragments,
            &text1,
            &text2,
            ComparisonPolicy::Default,
            inner_policy,
            ctx,
        )?;

        Ok(fragments
            .into_iter()
            .filter_map(|fragment| trim_ignored_inner_fragments(fragment, &side1, &side2))
            .collect())
    }

    /// Three-way line comparison: `text1` is the left text, `text2` the base
    /// and `text3` the right text.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn compare_lines_three(
        &self,
        text1: &str,
        text2: &str,
        text3: &str,
        policy: ComparisonPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<MergeLineFragment>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let text1 = to_chars(text1);
        let text2 = to_chars(text2);
        let text3 = to_chars(text3);

        let lines1 = get_line_contents(&text1, &LineOffsets::new(&text1));
        let lines2 = get_line_contents(&text2, &LineOffsets::new(&text2));
        let lines3 = get_line_contents(&text3, &LineOffsets::new(&text3));

        let ranges = by_line::compare_three(&lines1, &lines2, &lines3, policy, ctx)?;
        Ok(ranges.into_iter().map(MergeLineFragment::from).collect())
    }

    /// Classify every fragment of a three-way line comparison of the same
    /// texts, see [`merge_range_util::get_line_merge_type`].
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` if the request got cancelled.
    pub fn get_line_merge_types(
        &self,
        fragments: &[MergeLineFragment],
        text1: &str,
        text2: &str,
        text3: &str,
        policy: ComparisonPolicy,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Vec<MergeConflictType>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let texts = [to_chars(text1), to_chars(text2), to_chars(text3)];
        let offsets = texts.each_ref().map(|text| LineOffsets::new(text));

        fragments
            .iter()
            .map(|fragment| {
                merge_range_util::get_line_merge_type(
                    fragment,
                    texts.each_ref().map(Vec::as_slice),
                    offsets.each_ref(),
                    policy,
                    ctx,
                )
            })
            .collect()
    }

    /// Merge the changes of `left` and `right` to `base` if they do not
    /// overlap. Returns `None` if they do or if the texts are too different
    /// to tell.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` if the request got cancelled.
    pub fn try_resolve_conflict(
        &self,
        left: &str,
        base: &str,
        right: &str,
        cancellation: &dyn CancellationChecker,
    ) -> Result<Option<String>, DiffError> {
        let ctx = ComparisonContext::new(&self.config, cancellation);
        let left = to_chars(left);
        let base = to_chars(base);
        let right = to_chars(right);

        match merge_range_util::try_resolve_conflict(&left, &base, &right, ctx) {
            Err(error) if error.is_too_big() => {
                debug!("Not resolving the conflict: {error}");
                Ok(None)
            }
            resolved => resolved,
        }
    }

    #[must_use]
    pub fn is_equals(text1: &str, text2: &str, policy: ComparisonPolicy) -> bool {
        comparison_util::is_equals(&to_chars(text1), &to_chars(text2), policy)
    }

    /// Merge every run of adjoining fragments into a single fragment.
    #[must_use]
    pub fn squash(fragments: &[LineFragment]) -> Vec<LineFragment> {
        fragments.chunk_by(is_adjoining).map(do_squash).collect()
    }

    /// Optionally squash runs of adjoining fragments and, under
    /// [`ComparisonPolicy::IgnoreWhitespaces`], trim the fragments at the
    /// edges of every run that only differ in whitespace.
    #[must_use]
    pub fn process_blocks(
        fragments: &[LineFragment],
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        squash: bool,
        trim: bool,
    ) -> Vec<LineFragment> {
        if !squash && !trim {
            return fragments.to_vec();
        }
        if squash && !trim {
            return Self::squash(fragments);
        }

        let text1 = to_chars(text1);
        let text2 = to_chars(text2);
        fragments
            .chunk_by(is_adjoining)
            .flat_map(|run| process_adjoining(run, &text1, &text2, policy, squash))
            .collect()
    }
}

fn to_chars(text: &str) -> Vec<char> { text.chars().collect() }

fn compare_lines(
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<LineFragment>, DiffError> {
    let offsets1 = LineOffsets::new(text1);
    let offsets2 = LineOffsets::new(text2);
    let lines1 = get_line_contents(text1, &offsets1);
    let lines2 = get_line_contents(text2, &offsets2);

    let iterable = by_line::compare(&lines1, &lines2, policy, ctx)?;
    Ok(convert_into_line_fragments(&offsets1, &offsets2, &iterable))
}

fn compare_chars(
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<DiffFragment>, DiffError> {
    let iterable = match policy {
        ComparisonPolicy::Default => by_char::compare_two_step(text1, text2, ctx)?.into_inner(),
        ComparisonPolicy::TrimWhitespaces => by_char::compare_trim_whitespaces(text1, text2, ctx)?,
        ComparisonPolicy::IgnoreWhitespaces => {
            by_char::compare_ignore_whitespaces(text1, text2, ctx)?
        }
    };

    Ok(convert_into_diff_fragments(&iterable))
}

/// The contents of every line, without terminators.
#[must_use]
pub fn get_line_contents<'a>(text: &'a [char], offsets: &LineOffsets) -> Vec<&'a [char]> {
    (0..offsets.line_count())
        .map(|line| &text[offsets.line_start(line)..offsets.line_end(line)])
        .collect()
}

/// Turn the changes of a line alignment into fragments with char offsets.
/// The offsets of a block exclude the newline of its last line.
#[must_use]
pub fn convert_into_line_fragments(
    offsets1: &LineOffsets,
    offsets2: &LineOffsets,
    iterable: &DiffIterable,
) -> Vec<LineFragment> {
    iterable
        .changes()
        .map(|lines| {
            let (start_offset1, end_offset1) =
                line_range_offsets(offsets1, lines.start1, lines.end1);
            let (start_offset2, end_offset2) =
                line_range_offsets(offsets2, lines.start2, lines.end2);

            LineFragment::new(
                lines,
                Range::new(start_offset1, end_offset1, start_offset2, end_offset2),
                None,
            )
        })
        .collect()
}

fn line_range_offsets(offsets: &LineOffsets, start: usize, end: usize) -> (usize, usize) {
    if start == end {
        let offset = if start < offsets.line_count() {
            offsets.line_start(start)
        } else {
            offsets.text_length()
        };
        (offset, offset)
    } else {
        (offsets.line_start(start), offsets.line_end(end - 1))
    }
}

#[must_use]
pub fn convert_into_diff_fragments(iterable: &DiffIterable) -> Vec<DiffFragment> {
    iterable.changes().map(DiffFragment::from).collect()
}

fn create_inner_fragments(
    fragments: Vec<LineFragment>,
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    inner_policy: InnerFragmentsPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<LineFragment>, DiffError> {
    if inner_policy == InnerFragmentsPolicy::None {
        return Ok(fragments);
    }

    let mut result = Vec::with_capacity(fragments.len());
    let mut too_big_chunks = 0;

    for fragment in fragments {
        ctx.check_cancelled()?;

        let try_compute = too_big_chunks < ctx.config.max_bad_chunks;
        match refine_fragment(&fragment, text1, text2, policy, inner_policy, try_compute, ctx) {
            Ok(refined) => result.extend(refined),
            Err(error) if error.is_too_big() => {
                debug!(
                    "Keeping lines {:?} without inner fragments: {error}",
                    fragment.lines()
                );
                too_big_chunks += 1;
                result.push(fragment);
            }
            Err(error) => return Err(error),
        }
    }

    Ok(result)
}

fn refine_fragment(
    fragment: &LineFragment,
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    inner_policy: InnerFragmentsPolicy,
    try_compute: bool,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<LineFragment>, DiffError> {
    let offsets = fragment.offsets();
    let subtext1 = &text1[offsets.start1..offsets.end1];
    let subtext2 = &text2[offsets.start2..offsets.end2];

    // insertion or deletion of whole lines
    if fragment.start_line1 == fragment.end_line1 || fragment.start_line2 == fragment.end_line2 {
        if comparison_util::is_equals(subtext1, subtext2, policy) {
            return Ok(vec![fragment.with_inner_fragments(Some(vec![]))]);
        }
        return Ok(vec![fragment.clone()]);
    }

    if !try_compute {
        return Ok(vec![fragment.clone()]);
    }

    match inner_policy {
        InnerFragmentsPolicy::None => Ok(vec![fragment.clone()]),
        InnerFragmentsPolicy::Words => refine_by_words(fragment, subtext1, subtext2, policy, ctx),
        InnerFragmentsPolicy::Chars => {
            let inner = compare_chars(subtext1, subtext2, policy, ctx)?;
            Ok(vec![fragment.with_inner_fragments(Some(inner))])
        }
    }
}

/// Word fragments of a changed block, split into smaller blocks of lines
/// wherever whole lines turned out to match.
fn refine_by_words(
    fragment: &LineFragment,
    subtext1: &[char],
    subtext2: &[char],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<LineFragment>, DiffError> {
    let blocks = by_word::compare_and_split(subtext1, subtext2, policy, ctx)?;
    let Some(last) = blocks.len().checked_sub(1) else {
        return Ok(vec![fragment.clone()]);
    };

    let mut start_line1 = fragment.start_line1;
    let mut start_line2 = fragment.start_line2;

    Ok(blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let (end_line1, end_line2) = if index == last {
                (fragment.end_line1, fragment.end_line2)
            } else {
                (start_line1 + block.newlines1, start_line2 + block.newlines2)
            };

            let refined = LineFragment::new(
                Range::new(start_line1, end_line1, start_line2, end_line2),
                block.offsets.shifted(fragment.start_offset1, fragment.start_offset2),
                Some(block.fragments),
            );

            start_line1 = end_line1;
            start_line2 = end_line2;
            refined
        })
        .collect())
}

fn is_adjoining(before: &LineFragment, after: &LineFragment) -> bool {
    before.end_line1 == after.start_line1
        && before.end_line2 == after.start_line2
        && before.end_offset1 == after.start_offset1
        && before.end_offset2 == after.start_offset2
}

fn process_adjoining(
    run: &[LineFragment],
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
    squash: bool,
) -> Vec<LineFragment> {
    let mut run = run;

    if policy == ComparisonPolicy::IgnoreWhitespaces {
        while let [first, rest @ ..] = run {
            if !is_whitespace_only_change(first, text1, text2) {
                break;
            }
            run = rest;
        }
        while let [rest @ .., last] = run {
            if !is_whitespace_only_change(last, text1, text2) {
                break;
            }
            run = rest;
        }
    }

    if run.is_empty() {
        vec![]
    } else if squash {
        vec![do_squash(run)]
    } else {
        run.to_vec()
    }
}

fn is_whitespace_only_change(fragment: &LineFragment, text1: &[char], text2: &[char]) -> bool {
    if fragment.inner_fragments.as_ref().is_some_and(Vec::is_empty) {
        return true;
    }

    let offsets = fragment.offsets();
    comparison_util::equals_ignore_whitespaces(
        &text1[offsets.start1..offsets.end1],
        &text2[offsets.start2..offsets.end2],
    )
}

fn do_squash(run: &[LineFragment]) -> LineFragment {
    let (first, last) = match run {
        [only] => return only.clone(),
        [first, .., last] => (first, last),
        [] => unreachable!("Runs of adjoining fragments are never empty"),
    };

    let mut inner: Vec<DiffFragment> = Vec::new();
    for fragment in run {
        let shift1 = fragment.start_offset1 - first.start_offset1;
        let shift2 = fragment.start_offset2 - first.start_offset2;

        for part in extract_inner_fragments(fragment) {
            let shifted = DiffFragment::from(part.offsets().shifted(shift1, shift2));
            match inner.last_mut() {
                Some(previous)
                    if previous.end_offset1 == shifted.start_offset1
                        && previous.end_offset2 == shifted.start_offset2 =>
                {
                    previous.end_offset1 = shifted.end_offset1;
                    previous.end_offset2 = shifted.end_offset2;
                }
                _ => inner.push(shifted),
            }
        }
    }

    trace!("Squashed {} fragments into one with {} inner fragments", run.len(), inner.len());

    LineFragment::new(
        Range::new(first.start_line1, last.end_line1, first.start_line2, last.end_line2),
        Range::new(
            first.start_offset1,
            last.end_offset1,
            first.start_offset2,
            last.end_offset2,
        ),
        Some(inner),
    )
}

/// Inner fragments relative to the fragment's start. A fragment without
/// inner fragments is changed as a whole.
fn extract_inner_fragments(fragment: &LineFragment) -> Vec<DiffFragment> {
    match &fragment.inner_fragments {
        Some(inner) => inner.clone(),
        None => {
            let offsets = fragment.offsets();
            if offsets.is_empty() {
                vec![]
            } else {
                vec![DiffFragment::new(0, offsets.len1(), 0, offsets.len2())]
            }
        }
    }
}

/// A text together with a mask of its ignored chars.
#[derive(Debug)]
struct IgnoredText<'a> {
    text: &'a [char],
    offsets: LineOffsets,
    ignored: Vec<bool>,
}

impl<'a> IgnoredText<'a> {
    fn new(text: &'a [char], ranges: &[ops::Range<usize>]) -> Self {
        let mut ignored = vec![false; text.len()];
        for range in ranges {
            let end = range.end.min(text.len());
            let start = range.start.min(end);
            ignored[start..end].fill(true);
        }

        Self {
            text,
            offsets: LineOffsets::new(text),
            ignored,
        }
    }

    /// Line contents with the ignored chars left out.
    fn elided_lines(&self) -> Vec<Vec<char>> {
        (0..self.offsets.line_count())
            .map(|line| {
                (self.offsets.line_start(line)..self.offsets.line_end(line))
                    .filter(|offset| !self.ignored[*offset])
                    .map(|offset| self.text[offset])
                    .collect()
            })
            .collect()
    }

    fn is_ignored_range(&self, start: usize, end: usize) -> bool {
        self.ignored[start..end].iter().all(|ignored| *ignored)
    }

    /// True if the line, including its newline, is ignored entirely.
    fn is_ignored_line(&self, line: usize) -> bool {
        self.is_ignored_range(
            self.offsets.line_start(line),
            self.offsets.line_end_with_newline(line, true),
        )
    }

    /// Words of a line that are not ignored entirely.
    fn significant_words(&self, line: usize) -> Vec<&'a [char]> {
        let start = self.offsets.line_start(line);
        let content = &self.text[start..self.offsets.line_end(line)];

        get_inline_chunks(content)
            .iter()
            .filter(|chunk| !chunk.is_newline())
            .filter(|chunk| !self.is_ignored_range(start + chunk.start(), start + chunk.end()))
            .map(|chunk| &content[chunk.start()..chunk.end()])
            .collect()
    }

    /// Shrink a range of lines while its first or last line is ignored.
    fn trim_ignored_lines(&self, mut start: usize, mut end: usize) -> (usize, usize) {
        while start < end && self.is_ignored_line(start) {
            start += 1;
        }
        while start < end && self.is_ignored_line(end - 1) {
            end -= 1;
        }
        (start, end)
    }
}

/// Lines that are equal once the ignored chars are left out may still
/// differ in their words, e.g. when ignored chars were glued to a word.
/// Such lines are unmatched again.
fn correct_ignored_lines(
    iterable: &FairDiffIterable,
    side1: &IgnoredText<'_>,
    side2: &IgnoredText<'_>,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    let mut builder = ChangeBuilder::new(iterable.length1(), iterable.length2());

    for range in iterable.unchanged() {
        ctx.check_cancelled()?;

        for i in 0..range.len1() {
            let line1 = range.start1 + i;
            let line2 = range.start2 + i;
            if side1.significant_words(line1) == side2.significant_words(line2) {
                builder.mark_equal(line1, line2);
            }
        }
    }

    Ok(FairDiffIterable::fair(builder.finish()))
}

fn trim_ignored_lines(
    iterable: &DiffIterable,
    side1: &IgnoredText<'_>,
    side2: &IgnoredText<'_>,
) -> DiffIterable {
    let changes = iterable
        .changes()
        .map(|range| {
            let (start1, end1) = side1.trim_ignored_lines(range.start1, range.end1);
            let (start2, end2) = side2.trim_ignored_lines(range.start2, range.end2);
            Range::new(start1, end1, start2, end2)
        })
        .filter(|range| !range.is_empty())
        .collect();

    DiffIterable::new(changes, iterable.length1(), iterable.length2())
}

fn trim_ignored_inner_fragments(
    fragment: LineFragment,
    side1: &IgnoredText<'_>,
    side2: &IgnoredText<'_>,
) -> Option<LineFragment> {
    let Some(inner) = &fragment.inner_fragments else {
        return Some(fragment);
    };

    let kept: Vec<DiffFragment> = inner
        .iter()
        .filter(|part| {
            let start1 = fragment.start_offset1;
            let start2 = fragment.start_offset2;
            !(side1.is_ignored_range(start1 + part.start_offset1, start1 + part.end_offset1)
                && side2.is_ignored_range(start2 + part.start_offset2, start2 + part.end_offset2))
        })
        .copied()
        .collect();

    if kept.len() == inner.len() {
        Some(fragment)
    } else if kept.is_empty() {
        None
    } else {
        Some(fragment.with_inner_fragments(Some(kept)))
    }
}
