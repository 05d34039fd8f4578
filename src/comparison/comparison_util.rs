//! Text equality under a [`ComparisonPolicy`].

use super::{
    policy::ComparisonPolicy,
    trim::{is_equals_ignore_whitespaces, is_whitespace, trim_range},
};
use crate::diff_iterable::Range;

#[must_use]
pub fn is_equals(text1: &[char], text2: &[char], policy: ComparisonPolicy) -> bool {
    match policy {
        ComparisonPolicy::Default => text1 == text2,
        ComparisonPolicy::TrimWhitespaces => equals_trim_whitespaces(text1, text2),
        ComparisonPolicy::IgnoreWhitespaces => equals_ignore_whitespaces(text1, text2),
    }
}

#[must_use]
pub fn equals_ignore_whitespaces(text1: &[char], text2: &[char]) -> bool {
    is_equals_ignore_whitespaces(text1, text2, Range::new(0, text1.len(), 0, text2.len()))
}

/// Line by line equality ignoring the leading and trailing whitespace of
/// every line. Both texts must have the same number of lines.
#[must_use]
pub fn equals_trim_whitespaces(text1: &[char], text2: &[char]) -> bool {
    let mut lines1 = text1.split(|c| *c == '\n');
    let mut lines2 = text2.split(|c| *c == '\n');

    loop {
        match (lines1.next(), lines2.next()) {
            (None, None) => return true,
            (Some(line1), Some(line2)) if trimmed(line1) == trimmed(line2) => {}
            _ => return false,
        }
    }
}

fn trimmed(line: &[char]) -> &[char] {
    let (start, end) = trim_range(line, 0, line.len());
    &line[start..end]
}

/// Number of characters that are not whitespace.
#[must_use]
pub fn count_non_whitespace(text: &[char]) -> usize {
    text.iter().filter(|c| !is_whitespace(**c)).count()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::comparison::test_utils::chars;

    #[test_case("\nXY\n", "\n XY \n", true ; "whitespace around words")]
    #[test_case("\nXY\n", "\nX Y\n", false ; "whitespace inside words")]
    #[test_case("a\n", "a", false ; "different line count")]
    #[test_case("", "  ", true ; "blank")]
    fn test_equals_trim_whitespaces(text1: &str, text2: &str, expected: bool) {
        assert_eq!(equals_trim_whitespaces(&chars(text1), &chars(text2)), expected);
    }

    #[test_case(ComparisonPolicy::Default, false)]
    #[test_case(ComparisonPolicy::TrimWhitespaces, false)]
    #[test_case(ComparisonPolicy::IgnoreWhitespaces, true)]
    fn test_is_equals(policy: ComparisonPolicy, expected: bool) {
        assert_eq!(is_equals(&chars("a b\n c"), &chars("ab\nc "), policy), expected);
    }

    #[test]
    fn test_count_non_whitespace() {
        assert_eq!(count_non_whitespace(&chars(" a\tb \n")), 2);
    }
}
