#![cfg(feature = "wasm")]

use diff_comparison::wasm::*;
use wasm_bindgen_test::*;

#[wasm_bindgen_test(unsupported = test)]
fn test_compare_lines() {
    let fragments = compare_lines(
        "a\nfoo bar\nc",
        "a\nfoo baz\nc",
        JsComparisonPolicy::Default,
        JsInnerFragmentsPolicy::Words,
    )
    .unwrap();

    assert_eq!(fragments.len(), 1);
    assert_eq!((fragments[0].start_line1(), fragments[0].end_line1()), (1, 2));

    let inner = fragments[0].inner_fragments().unwrap();
    assert_eq!(inner.len(), 1);
    assert_eq!((inner[0].start_offset1(), inner[0].end_offset1()), (4, 7));
}

#[wasm_bindgen_test(unsupported = test)]
fn test_compare_words() {
    let fragments = compare_words("foo bar", "foo baz", JsComparisonPolicy::Default).unwrap();

    assert_eq!(fragments.len(), 1);
    assert_eq!((fragments[0].start_offset2(), fragments[0].end_offset2()), (4, 7));
}

#[wasm_bindgen_test(unsupported = test)]
fn test_compare_chars() {
    assert!(compare_chars("a b", "ab", JsComparisonPolicy::IgnoreWhitespaces)
        .unwrap()
        .is_empty());
    assert_eq!(compare_chars("a b", "ab", JsComparisonPolicy::Default).unwrap().len(), 1);
}

#[wasm_bindgen_test(unsupported = test)]
fn test_is_equals() {
    assert!(is_equals("\nXY\n", "\n XY \n", JsComparisonPolicy::TrimWhitespaces));
    assert!(!is_equals("\nXY\n", "\nX Y\n", JsComparisonPolicy::TrimWhitespaces));
}
