//! Post-processing of character offset alignments according to the
//! whitespace policy of the comparison.

use super::{
    policy::ComparisonPolicy,
    trim::{
        expand_whitespaces, expand_whitespaces_backward, expand_whitespaces_forward,
        is_equals_ignore_whitespaces, is_whitespace, trim, trim_end, trim_start,
    },
};
use crate::diff_iterable::{DiffIterable, Range};

#[must_use]
pub fn correct(
    iterable: &DiffIterable,
    text1: &[char],
    text2: &[char],
    policy: ComparisonPolicy,
) -> DiffIterable {
    match policy {
        ComparisonPolicy::Default => default_spaces(iterable, text1, text2),
        ComparisonPolicy::TrimWhitespaces => trim_spaces(iterable, text1, text2),
        ComparisonPolicy::IgnoreWhitespaces => ignore_spaces(iterable, text1, text2),
    }
}

/// Shrink every change by the whitespace it shares with the other side at
/// its edges.
#[must_use]
pub fn default_spaces(iterable: &DiffIterable, text1: &[char], text2: &[char]) -> DiffIterable {
    let changes = iterable
        .changes()
        .map(|ch| {
            let end_cut =
                expand_whitespaces_backward(text1, text2, ch.start1, ch.start2, ch.end1, ch.end2);
            let start_cut = expand_whitespaces_forward(
                text1,
                text2,
                ch.start1,
                ch.start2,
                ch.end1 - end_cut,
                ch.end2 - end_cut,
            );

            Range::new(
                ch.start1 + start_cut,
                ch.end1 - end_cut,
                ch.start2 + start_cut,
                ch.end2 - end_cut,
            )
        })
        .collect();

    DiffIterable::new(changes, iterable.length1(), iterable.length2())
}

/// Remove leading and trailing whitespace of lines from every change.
#[must_use]
pub fn trim_spaces(iterable: &DiffIterable, text1: &[char], text2: &[char]) -> DiffIterable {
    let trim_side = |text: &[char], mut start: usize, mut end: usize| {
        if is_leading_trailing_space(text, start) {
            start = trim_start(text, start, end);
        }
        if end > 0 && is_leading_trailing_space(text, end - 1) {
            end = trim_end(text, start, end);
        }
        (start, end)
    };

    let changes = iterable
        .changes()
        .map(|ch| {
            let (start1, end1) = trim_side(text1, ch.start1, ch.end1);
            let (start2, end2) = trim_side(text2, ch.start2, ch.end2);
            Range::new(start1, end1, start2, end2)
        })
        .collect();

    DiffIterable::new(changes, iterable.length1(), iterable.length2())
}

/// Drop every change that only consists of whitespace.
#[must_use]
pub fn ignore_spaces(iterable: &DiffIterable, text1: &[char], text2: &[char]) -> DiffIterable {
    let changes = iterable
        .changes()
        .map(|ch| trim(text1, text2, expand_whitespaces(text1, text2, ch)))
        .filter(|ch| !ch.is_empty() && !is_equals_ignore_whitespaces(text1, text2, *ch))
        .collect();

    DiffIterable::new(changes, iterable.length1(), iterable.length2())
}

fn is_leading_trailing_space(text: &[char], offset: usize) -> bool {
    is_leading_space(text, offset) || is_trailing_space(text, offset)
}

/// Whitespace with only whitespace between it and the start of its line.
fn is_leading_space(text: &[char], offset: usize) -> bool {
    if offset >= text.len() || !is_whitespace(text[offset]) {
        return false;
    }

    text[..offset]
        .iter()
        .rev()
        .find(|c| **c == '\n' || !is_whitespace(**c))
        .is_none_or(|c| *c == '\n')
}

/// Whitespace with only whitespace between it and the end of its line.
fn is_trailing_space(text: &[char], offset: usize) -> bool {
    if offset >= text.len() || !is_whitespace(text[offset]) {
        return false;
    }

    text[offset..]
        .iter()
        .find(|c| **c == '\n' || !is_whitespace(**c))
        .is_none_or(|c| *c == '\n')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::comparison::test_utils::chars;

    fn changes(iterable: &DiffIterable) -> Vec<Range> { iterable.changes().collect() }

    #[test]
    fn test_default_cuts_shared_whitespace() {
        let text1 = chars("a x b");
        let text2 = chars("a y b");
        let iterable = DiffIterable::new(vec![Range::new(1, 4, 1, 4)], 5, 5);

        assert_eq!(
            changes(&default_spaces(&iterable, &text1, &text2)),
            vec![Range::new(2, 3, 2, 3)]
        );
    }

    #[test]
    fn test_trim_drops_indentation() {
        let text1 = chars("a\n  b");
        let text2 = chars("a\nb");
        let iterable = DiffIterable::new(vec![Range::new(2, 4, 2, 2)], 5, 3);

        assert_eq!(changes(&trim_spaces(&iterable, &text1, &text2)), vec![]);
    }

    #[test]
    fn test_trim_keeps_inner_whitespace() {
        let text1 = chars("a  b");
        let text2 = chars("a b");
        let iterable = DiffIterable::new(vec![Range::new(2, 3, 2, 2)], 4, 3);

        assert_eq!(
            changes(&trim_spaces(&iterable, &text1, &text2)),
            vec![Range::new(2, 3, 2, 2)]
        );
    }

    #[test]
    fn test_ignore_drops_whitespace_changes() {
        let text1 = chars("a  b c");
        let text2 = chars("a b d");
        let iterable = DiffIterable::new(
            vec![Range::new(2, 3, 2, 2), Range::new(5, 6, 4, 5)],
            6,
            5,
        );

        assert_eq!(
            changes(&ignore_spaces(&iterable, &text1, &text2)),
            vec![Range::new(5, 6, 4, 5)]
        );
    }

    #[test]
    fn test_leading_and_trailing_space() {
        let text = chars(" a \n b");

        assert!(is_leading_space(&text, 0));
        assert!(!is_leading_space(&text, 2));
        assert!(is_trailing_space(&text, 2));
        assert!(is_leading_space(&text, 4));
        assert!(!is_trailing_space(&text, 1));
    }
}
