use std::hash::{Hash, Hasher};

use crate::comparison::{
    comparison_util::{count_non_whitespace, is_equals},
    policy::ComparisonPolicy,
    trim::{is_whitespace, trim_range},
};

/// A line without its terminator, compared and hashed according to a
/// whitespace policy.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    content: &'a [char],
    policy: ComparisonPolicy,
    non_space_chars: usize,
}

impl<'a> Line<'a> {
    #[must_use]
    pub fn new(content: &'a [char], policy: ComparisonPolicy) -> Self {
        Self {
            content,
            policy,
            non_space_chars: count_non_whitespace(content),
        }
    }

    #[must_use]
    pub fn content(&self) -> &'a [char] { self.content }

    #[must_use]
    pub fn policy(&self) -> ComparisonPolicy { self.policy }

    #[must_use]
    pub fn non_space_chars(&self) -> usize { self.non_space_chars }

    /// Same content, compared under another policy.
    #[must_use]
    pub fn with_policy(&self, policy: ComparisonPolicy) -> Self {
        Self { policy, ..*self }
    }
}

impl PartialEq for Line<'_> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert_eq!(self.policy, other.policy, "Lines of different policies compared");

        self.non_space_chars == other.non_space_chars
            && is_equals(self.content, other.content, self.policy)
    }
}

impl Eq for Line<'_> {}

impl Hash for Line<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.policy {
            ComparisonPolicy::Default => self.content.hash(state),
            ComparisonPolicy::TrimWhitespaces => {
                let (start, end) = trim_range(self.content, 0, self.content.len());
                self.content[start..end].hash(state);
            }
            ComparisonPolicy::IgnoreWhitespaces => {
                for c in self.content.iter().filter(|c| !is_whitespace(**c)) {
                    c.hash(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::comparison::test_utils::chars;

    fn hash_of(line: &Line<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        line.hash(&mut hasher);
        hasher.finish()
    }

    #[test_case(ComparisonPolicy::Default, "a b", "a b", true)]
    #[test_case(ComparisonPolicy::Default, " a b", "a b", false)]
    #[test_case(ComparisonPolicy::TrimWhitespaces, "  a b\t", "a b", true)]
    #[test_case(ComparisonPolicy::TrimWhitespaces, "a  b", "a b", false)]
    #[test_case(ComparisonPolicy::IgnoreWhitespaces, " a  b ", "ab", true)]
    #[test_case(ComparisonPolicy::IgnoreWhitespaces, "a b", "a c", false)]
    fn test_policy_equality(policy: ComparisonPolicy, text1: &str, text2: &str, expected: bool) {
        let content1 = chars(text1);
        let content2 = chars(text2);
        let line1 = Line::new(&content1, policy);
        let line2 = Line::new(&content2, policy);

        assert_eq!(line1 == line2, expected);
        if expected {
            assert_eq!(hash_of(&line1), hash_of(&line2));
        }
    }

    #[test]
    fn test_non_space_chars() {
        let content = chars(" \tab c ");

        assert_eq!(Line::new(&content, ComparisonPolicy::Default).non_space_chars(), 3);
    }
}
