//! Line level comparison.
//!
//! Whitespace sensitive policies first align the lines ignoring whitespace
//! and then re-match the lines that are equal ignoring whitespace exactly.
//! Ignoring whitespace, only lines with enough non-whitespace characters are
//! aligned first and short lines are fitted into the gaps afterwards.

use log::trace;

use super::{
    ComparisonContext, change_corrector,
    change_corrector::SmartLineChangeCorrector,
    chunk_optimizer::{self, LineShift},
    comparison_util::equals_ignore_whitespaces,
    merge,
    policy::ComparisonPolicy,
    trim::expand,
};
use crate::{
    consts::MAX_BRUTE_FORCE_ALIGNMENT_SIZE,
    diff_iterable::{DiffIterable, ExpandChangeBuilder, FairDiffIterable},
    errors::DiffError,
    fragments::MergeRange,
};

pub mod line;

use line::Line;

/// Align two texts given as their lines without terminators.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare(
    lines1: &[&[char]],
    lines2: &[&[char]],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    ctx.check_cancelled()?;

    let lines1 = get_lines(lines1, policy);
    let lines2 = get_lines(lines2, policy);
    do_compare(&lines1, &lines2, policy, ctx)
}

/// Align three texts given as their lines: `lines1` is the left text,
/// `lines2` the base and `lines3` the right text.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn compare_three(
    lines1: &[&[char]],
    lines2: &[&[char]],
    lines3: &[&[char]],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<Vec<MergeRange>, DiffError> {
    ctx.check_cancelled()?;

    let left = get_lines(lines1, policy);
    let base = get_lines(lines2, policy);
    let right = get_lines(lines3, policy);

    let changes1 = do_compare(&base, &left, policy, ctx)?;
    let changes2 = do_compare(&base, &right, policy, ctx)?;

    merge::build_fair(&changes1, &changes2, ctx)
}

fn get_lines<'a>(lines: &[&'a [char]], policy: ComparisonPolicy) -> Vec<Line<'a>> {
    lines.iter().map(|line| Line::new(line, policy)).collect()
}

/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn do_compare(
    lines1: &[Line<'_>],
    lines2: &[Line<'_>],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    if policy == ComparisonPolicy::IgnoreWhitespaces {
        let changes = compare_smart(lines1, lines2, ctx)?;
        let changes = optimize_line_chunks(lines1, lines2, &changes, ctx)?;
        return Ok(expand_ranges(lines1, lines2, &changes));
    }

    let iw_lines1: Vec<Line<'_>> = lines1
        .iter()
        .map(|line| line.with_policy(ComparisonPolicy::IgnoreWhitespaces))
        .collect();
    let iw_lines2: Vec<Line<'_>> = lines2
        .iter()
        .map(|line| line.with_policy(ComparisonPolicy::IgnoreWhitespaces))
        .collect();

    let iw_changes = compare_smart(&iw_lines1, &iw_lines2, ctx)?;
    let iw_changes = optimize_line_chunks(lines1, lines2, &iw_changes, ctx)?;
    Ok(correct_changes_second_step(lines1, lines2, &iw_changes))
}

/// Align the lines with more than `unimportant_line_char_count`
/// non-whitespace characters, then fit the remaining lines into the gaps.
fn compare_smart(
    lines1: &[Line<'_>],
    lines2: &[Line<'_>],
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    let threshold = ctx.config.unimportant_line_char_count;
    if threshold == 0 {
        return ctx.diff(lines1, lines2);
    }

    let (big_lines1, indexes1) = get_big_lines(lines1, threshold);
    let (big_lines2, indexes2) = get_big_lines(lines2, threshold);
    trace!(
        "Aligning {} of {} and {} of {} lines first",
        big_lines1.len(),
        lines1.len(),
        big_lines2.len(),
        lines2.len()
    );

    let changes = ctx.diff(&big_lines1, &big_lines2)?;

    let corrector = SmartLineChangeCorrector::new(&indexes1, &indexes2, lines1, lines2, ctx);
    change_corrector::correct(&corrector, &changes, lines1.len(), lines2.len(), ctx)
}

fn get_big_lines<'a>(lines: &[Line<'a>], threshold: usize) -> (Vec<Line<'a>>, Vec<usize>) {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.non_space_chars() > threshold)
        .map(|(index, line)| (*line, index))
        .unzip()
}

fn optimize_line_chunks(
    lines1: &[Line<'_>],
    lines2: &[Line<'_>],
    iterable: &FairDiffIterable,
    ctx: ComparisonContext<'_>,
) -> Result<FairDiffIterable, DiffError> {
    let strategy = LineShift::new(lines1, lines2, ctx.config.unimportant_line_char_count);
    chunk_optimizer::optimize(lines1, lines2, iterable, &strategy, ctx)
}

/// Shrink every change by its equal leading and trailing lines.
fn expand_ranges(
    lines1: &[Line<'_>],
    lines2: &[Line<'_>],
    iterable: &FairDiffIterable,
) -> FairDiffIterable {
    let changes = iterable
        .changes()
        .map(|ch| expand(lines1, lines2, ch.start1, ch.start2, ch.end1, ch.end2))
        .filter(|ch| !ch.is_empty())
        .collect();

    FairDiffIterable::fair(DiffIterable::new(changes, lines1.len(), lines2.len()))
}

/// Turn an alignment of lines equal ignoring whitespace into one of lines
/// equal under their own policy.
///
/// Runs of matched pairs that are equal ignoring whitespace but differ
/// otherwise are collected under a sample line. Once the run ends, every
/// line between the surrounding exact matches that is equal to the sample
/// ignoring whitespace is a candidate and the candidates are matched exactly.
fn correct_changes_second_step(
    lines1: &[Line<'_>],
    lines2: &[Line<'_>],
    iterable: &FairDiffIterable,
) -> FairDiffIterable {
    let mut correction = SecondStepCorrection {
        lines1,
        lines2,
        builder: ExpandChangeBuilder::new(lines1, lines2),
        sample: None,
        last1: 0,
        last2: 0,
    };

    for range in iterable.unchanged() {
        for i in 0..range.len1() {
            let index1 = range.start1 + i;
            let index2 = range.start2 + i;
            let line1 = &lines1[index1];
            let line2 = &lines2[index2];

            if correction.matches_sample(line1) {
                continue;
            }

            correction.flush(index1, index2);
            if line1 == line2 {
                correction.builder.mark_equal(index1, index2);
            } else {
                correction.sample = Some(line1.content());
            }
        }
    }
    correction.flush(lines1.len(), lines2.len());

    FairDiffIterable::fair(correction.builder.finish())
}

struct SecondStepCorrection<'a, 'b> {
    lines1: &'a [Line<'b>],
    lines2: &'a [Line<'b>],
    builder: ExpandChangeBuilder<'a, Line<'b>>,
    sample: Option<&'b [char]>,
    last1: usize,
    last2: usize,
}

impl SecondStepCorrection<'_, '_> {
    fn matches_sample(&self, line: &Line<'_>) -> bool {
        self.sample
            .is_some_and(|sample| equals_ignore_whitespaces(sample, line.content()))
    }

    fn flush(&mut self, line1: usize, line2: usize) {
        let Some(sample) = self.sample.take() else {
            return;
        };

        let start1 = self.last1.max(self.builder.index1());
        let start2 = self.last2.max(self.builder.index2());

        let candidates1: Vec<usize> = (start1..line1)
            .filter(|i| equals_ignore_whitespaces(sample, self.lines1[*i].content()))
            .collect();
        let candidates2: Vec<usize> = (start2..line2)
            .filter(|i| equals_ignore_whitespaces(sample, self.lines2[*i].content()))
            .collect();
        debug_assert!(!candidates1.is_empty() && !candidates2.is_empty());

        if let Some(last) = candidates1.last() {
            self.last1 = last + 1;
        }
        if let Some(last) = candidates2.last() {
            self.last2 = last + 1;
        }

        self.align_exact_matching(&candidates1, &candidates2);
    }

    fn align_exact_matching(&mut self, candidates1: &[usize], candidates2: &[usize]) {
        let lines1 = self.lines1;
        let lines2 = self.lines2;

        let count = candidates1.len().max(candidates2.len());
        let pairs: Vec<(usize, usize)> =
            if count > MAX_BRUTE_FORCE_ALIGNMENT_SIZE || candidates1.len() == candidates2.len() {
                candidates1.iter().copied().zip(candidates2.iter().copied()).collect()
            } else if candidates1.len() < candidates2.len() {
                best_matching_alignment(candidates1.len(), candidates2.len(), |i, j| {
                    lines1[candidates1[i]] == lines2[candidates2[j]]
                })
                .into_iter()
                .enumerate()
                .map(|(i, j)| (candidates1[i], candidates2[j]))
                .collect()
            } else {
                best_matching_alignment(candidates2.len(), candidates1.len(), |i, j| {
                    lines1[candidates1[j]] == lines2[candidates2[i]]
                })
                .into_iter()
                .enumerate()
                .map(|(i, j)| (candidates1[j], candidates2[i]))
                .collect()
            };

        for (index1, index2) in pairs {
            if lines1[index1] == lines2[index2] {
                self.builder.mark_equal(index1, index2);
            }
        }
    }
}

/// The increasing assignment of `count_small` elements to `count_big`
/// elements with the most equal pairs. The first best one wins.
fn best_matching_alignment(
    count_small: usize,
    count_big: usize,
    equals: impl Fn(usize, usize) -> bool,
) -> Vec<usize> {
    debug_assert!(count_small < count_big);

    let mut best: Vec<usize> = (0..count_small).collect();
    let mut best_weight = 0;
    let mut combination = vec![0; count_small];

    visit_combinations(0, 0, count_big, &mut combination, &mut |combination| {
        let weight = combination
            .iter()
            .enumerate()
            .filter(|(i, j)| equals(*i, **j))
            .count();

        if weight > best_weight {
            best_weight = weight;
            best.copy_from_slice(combination);
        }
    });

    best
}

fn visit_combinations(
    depth: usize,
    start: usize,
    count: usize,
    combination: &mut [usize],
    visit: &mut impl FnMut(&[usize]),
) {
    if depth == combination.len() {
        visit(combination);
        return;
    }

    for i in start..count {
        combination[depth] = i;
        visit_combinations(depth + 1, i + 1, count, combination, visit);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        comparison::test_utils::{chars, context},
        diff_iterable::Range,
    };

    fn compare_texts(
        lines1: &[&str],
        lines2: &[&str],
        policy: ComparisonPolicy,
    ) -> Vec<Range> {
        let texts1: Vec<Vec<char>> = lines1.iter().map(|line| chars(line)).collect();
        let texts2: Vec<Vec<char>> = lines2.iter().map(|line| chars(line)).collect();
        let refs1: Vec<&[char]> = texts1.iter().map(Vec::as_slice).collect();
        let refs2: Vec<&[char]> = texts2.iter().map(Vec::as_slice).collect();

        compare(&refs1, &refs2, policy, context())
            .unwrap()
            .changes()
            .collect()
    }

    #[test]
    fn test_ignore_whitespace_lines() {
        assert_eq!(
            compare_texts(&["a", "b"], &["a", " b ", "c"], ComparisonPolicy::IgnoreWhitespaces),
            vec![Range::new(2, 2, 2, 3)]
        );
    }

    #[test]
    fn test_whitespace_change_is_a_change() {
        assert_eq!(
            compare_texts(&["x", " y"], &["x", "y"], ComparisonPolicy::Default),
            vec![Range::new(1, 2, 1, 2)]
        );
        assert_eq!(
            compare_texts(&["x", " y"], &["x", "y"], ComparisonPolicy::IgnoreWhitespaces),
            vec![]
        );
    }

    #[test]
    fn test_exact_line_wins_among_candidates() {
        assert_eq!(
            compare_texts(&["x", "a"], &["x", " a", "a"], ComparisonPolicy::Default),
            vec![Range::new(1, 1, 1, 2)]
        );
    }

    #[test]
    fn test_best_matching_alignment() {
        let small = ["b", "d"];
        let big = ["a", "b", "c", "d"];

        assert_eq!(
            best_matching_alignment(small.len(), big.len(), |i, j| small[i] == big[j]),
            vec![1, 3]
        );
        assert_eq!(best_matching_alignment(1, 3, |_, _| false), vec![0]);
    }

    #[test]
    fn test_compare_three() {
        let texts: Vec<Vec<char>> = ["a", "B", "c", "a", "b", "c", "a", "b", "C"]
            .iter()
            .map(|line| chars(line))
            .collect();
        let lines: Vec<&[char]> = texts.iter().map(Vec::as_slice).collect();

        assert_eq!(
            compare_three(
                &lines[0..3],
                &lines[3..6],
                &lines[6..9],
                ComparisonPolicy::Default,
                context()
            )
            .unwrap(),
            vec![MergeRange::new(1, 3, 1, 3, 1, 3)]
        );
    }
}
