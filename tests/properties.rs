//! Invariants of every comparator on small random texts.

use diff_comparison::{
    ComparisonManager, ComparisonPolicy, DiffFragment, InnerFragmentsPolicy, LineFragment,
    NeverCancelled,
};
use proptest::prelude::*;

const POLICIES: [ComparisonPolicy; 3] = [
    ComparisonPolicy::Default,
    ComparisonPolicy::TrimWhitespaces,
    ComparisonPolicy::IgnoreWhitespaces,
];

fn text() -> impl Strategy<Value = String> { "[ab. \n]{0,24}" }

fn char_count(text: &str) -> usize { text.chars().count() }

/// Fragments are non-empty, sorted, disjoint and inside both texts.
fn assert_ordered(fragments: &[DiffFragment], length1: usize, length2: usize) {
    let mut position = (0, 0);
    for fragment in fragments {
        assert!(
            fragment.start_offset1 < fragment.end_offset1
                || fragment.start_offset2 < fragment.end_offset2,
            "Empty fragment {fragment:?}"
        );
        assert!(position.0 <= fragment.start_offset1 && position.1 <= fragment.start_offset2);
        position = (fragment.end_offset1, fragment.end_offset2);
    }
    assert!(position.0 <= length1 && position.1 <= length2);
}

/// The text outside of the fragments is the same on both sides.
fn assert_unchanged_text_equal(text1: &str, text2: &str, fragments: &[DiffFragment]) {
    let chars1: Vec<char> = text1.chars().collect();
    let chars2: Vec<char> = text2.chars().collect();

    let mut position = (0, 0);
    for fragment in fragments {
        assert_eq!(
            chars1[position.0..fragment.start_offset1],
            chars2[position.1..fragment.start_offset2]
        );
        position = (fragment.end_offset1, fragment.end_offset2);
    }
    assert_eq!(chars1[position.0..], chars2[position.1..]);
}

/// Line blocks are sorted and the lines between them are equal under the
/// policy.
fn assert_lines_aligned(
    text1: &str,
    text2: &str,
    fragments: &[LineFragment],
    policy: ComparisonPolicy,
) {
    let lines1: Vec<&str> = text1.split('\n').collect();
    let lines2: Vec<&str> = text2.split('\n').collect();

    let assert_equal_lines = |start1: usize, end1: usize, start2: usize, end2: usize| {
        assert_eq!(end1 - start1, end2 - start2, "Unchanged lines of different length");
        for (line1, line2) in lines1[start1..end1].iter().zip(&lines2[start2..end2]) {
            assert!(
                ComparisonManager::is_equals(line1, line2, policy),
                "{line1:?} and {line2:?} are not equal under {policy:?}"
            );
        }
    };

    let mut position = (0, 0);
    for fragment in fragments {
        assert!(
            fragment.start_line1 < fragment.end_line1 || fragment.start_line2 < fragment.end_line2,
            "Empty line fragment {fragment:?}"
        );
        assert_equal_lines(position.0, fragment.start_line1, position.1, fragment.start_line2);
        position = (fragment.end_line1, fragment.end_line2);

        if let Some(inner) = &fragment.inner_fragments {
            assert_ordered(
                inner,
                fragment.end_offset1 - fragment.start_offset1,
                fragment.end_offset2 - fragment.start_offset2,
            );
        }
    }
    assert_equal_lines(position.0, lines1.len(), position.1, lines2.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chars_and_words_are_ordered(text1 in text(), text2 in text()) {
        let manager = ComparisonManager::default();

        for policy in POLICIES {
            let chars = manager
                .compare_chars(&text1, &text2, policy, &NeverCancelled)
                .expect("Failed to compare chars");
            let words = manager
                .compare_words(&text1, &text2, policy, &NeverCancelled)
                .expect("Failed to compare words");

            for fragments in [chars, words] {
                assert_ordered(&fragments, char_count(&text1), char_count(&text2));
                if policy == ComparisonPolicy::Default {
                    assert_unchanged_text_equal(&text1, &text2, &fragments);
                }
            }
        }
    }

    #[test]
    fn lines_are_aligned(text1 in text(), text2 in text()) {
        let manager = ComparisonManager::default();

        for policy in POLICIES {
            for inner_policy in [InnerFragmentsPolicy::Words, InnerFragmentsPolicy::Chars] {
                let fragments = manager
                    .compare_lines_inner(&text1, &text2, policy, inner_policy, &NeverCancelled)
                    .expect("Failed to compare lines");

                assert_lines_aligned(&text1, &text2, &fragments, policy);
            }
        }
    }

    #[test]
    fn merge_ranges_are_changed(left in text(), base in text(), right in text()) {
        let manager = ComparisonManager::default();

        for policy in POLICIES {
            let fragments = manager
                .compare_lines_three(&left, &base, &right, policy, &NeverCancelled)
                .expect("Failed to compare three texts");
            let types = manager
                .get_line_merge_types(&fragments, &left, &base, &right, policy, &NeverCancelled)
                .expect("Failed to classify merge ranges");

            prop_assert_eq!(types.len(), fragments.len());
            for merge_type in types {
                prop_assert!(merge_type.left_change || merge_type.right_change);
            }
        }
    }
}
