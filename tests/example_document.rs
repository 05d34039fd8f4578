use diff_comparison::{ComparisonPolicy, LineFragment};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// A pair of texts and the changes expected between them.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleDocument {
    name: String,
    text1: String,
    text2: String,

    #[serde(default)]
    policy: Policy,

    /// Changed line ranges as `[start1, end1, start2, end2]`
    lines: Vec<[usize; 4]>,

    /// Changed text pairs of the word level refinement
    #[serde(default)]
    words: Option<Vec<[String; 2]>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Policy {
    #[default]
    Default,
    TrimWhitespaces,
    IgnoreWhitespaces,
}

impl ExampleDocument {
    pub fn name(&self) -> &str { &self.name }

    pub fn text1(&self) -> &str { &self.text1 }

    pub fn text2(&self) -> &str { &self.text2 }

    pub fn policy(&self) -> ComparisonPolicy {
        match self.policy {
            Policy::Default => ComparisonPolicy::Default,
            Policy::TrimWhitespaces => ComparisonPolicy::TrimWhitespaces,
            Policy::IgnoreWhitespaces => ComparisonPolicy::IgnoreWhitespaces,
        }
    }

    pub fn assert_lines_eq(&self, fragments: &[LineFragment]) {
        let actual: Vec<[usize; 4]> = fragments
            .iter()
            .map(|fragment| {
                [
                    fragment.start_line1,
                    fragment.end_line1,
                    fragment.start_line2,
                    fragment.end_line2,
                ]
            })
            .collect();

        assert_eq!(actual, self.lines, "Changed lines of '{}'", self.name);
    }

    pub fn assert_swapped_lines_eq(&self, fragments: &[LineFragment]) {
        let swapped: Vec<[usize; 4]> = self
            .lines
            .iter()
            .map(|[start1, end1, start2, end2]| [*start2, *end2, *start1, *end1])
            .collect();
        let actual: Vec<[usize; 4]> = fragments
            .iter()
            .map(|fragment| {
                [
                    fragment.start_line1,
                    fragment.end_line1,
                    fragment.start_line2,
                    fragment.end_line2,
                ]
            })
            .collect();

        assert_eq!(actual, swapped, "Changed lines of swapped '{}'", self.name);
    }

    /// Compare the changed texts of every inner fragment, or of the whole
    /// block if it has none, against the expected word changes.
    pub fn assert_words_eq(&self, fragments: &[LineFragment]) {
        let Some(expected) = &self.words else {
            return;
        };

        let text1: Vec<char> = self.text1.chars().collect();
        let text2: Vec<char> = self.text2.chars().collect();
        let slice = |text: &[char], start: usize, end: usize| -> String {
            text[start..end].iter().collect()
        };

        let mut actual = Vec::new();
        for fragment in fragments {
            match &fragment.inner_fragments {
                Some(inner) => {
                    for part in inner {
                        actual.push([
                            slice(
                                &text1,
                                fragment.start_offset1 + part.start_offset1,
                                fragment.start_offset1 + part.end_offset1,
                            ),
                            slice(
                                &text2,
                                fragment.start_offset2 + part.start_offset2,
                                fragment.start_offset2 + part.end_offset2,
                            ),
                        ]);
                    }
                }
                None => actual.push([
                    slice(&text1, fragment.start_offset1, fragment.end_offset1),
                    slice(&text2, fragment.start_offset2, fragment.end_offset2),
                ]),
            }
        }

        assert_eq!(&actual, expected, "Changed words of '{}'", self.name);
    }
}
