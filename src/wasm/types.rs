use wasm_bindgen::prelude::*;

use crate::{ComparisonPolicy, DiffFragment, InnerFragmentsPolicy, LineFragment};

/// Wrapper type to expose `ComparisonPolicy` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsComparisonPolicy {
    Default = "default",
    TrimWhitespaces = "trimWhitespaces",
    IgnoreWhitespaces = "ignoreWhitespaces",
}

impl From<JsComparisonPolicy> for ComparisonPolicy {
    fn from(policy: JsComparisonPolicy) -> Self {
        match policy {
            JsComparisonPolicy::TrimWhitespaces => ComparisonPolicy::TrimWhitespaces,
            JsComparisonPolicy::IgnoreWhitespaces => ComparisonPolicy::IgnoreWhitespaces,
            // unknown strings coming from JS
            _ => ComparisonPolicy::Default,
        }
    }
}

/// Wrapper type to expose `InnerFragmentsPolicy` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsInnerFragmentsPolicy {
    None = "none",
    Words = "words",
    Chars = "chars",
}

impl From<JsInnerFragmentsPolicy> for InnerFragmentsPolicy {
    fn from(policy: JsInnerFragmentsPolicy) -> Self {
        match policy {
            JsInnerFragmentsPolicy::Words => InnerFragmentsPolicy::Words,
            JsInnerFragmentsPolicy::Chars => InnerFragmentsPolicy::Chars,
            _ => InnerFragmentsPolicy::None,
        }
    }
}

/// Wrapper type to expose `DiffFragment` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsDiffFragment {
    fragment: DiffFragment,
}

#[wasm_bindgen]
impl JsDiffFragment {
    #[wasm_bindgen(js_name = startOffset1)]
    #[must_use]
    pub fn start_offset1(&self) -> usize { self.fragment.start_offset1 }

    #[wasm_bindgen(js_name = endOffset1)]
    #[must_use]
    pub fn end_offset1(&self) -> usize { self.fragment.end_offset1 }

    #[wasm_bindgen(js_name = startOffset2)]
    #[must_use]
    pub fn start_offset2(&self) -> usize { self.fragment.start_offset2 }

    #[wasm_bindgen(js_name = endOffset2)]
    #[must_use]
    pub fn end_offset2(&self) -> usize { self.fragment.end_offset2 }
}

impl From<DiffFragment> for JsDiffFragment {
    fn from(fragment: DiffFragment) -> Self { JsDiffFragment { fragment } }
}

/// Wrapper type to expose `LineFragment` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsLineFragment {
    fragment: LineFragment,
}

#[wasm_bindgen]
impl JsLineFragment {
    #[wasm_bindgen(js_name = startLine1)]
    #[must_use]
    pub fn start_line1(&self) -> usize { self.fragment.start_line1 }

    #[wasm_bindgen(js_name = endLine1)]
    #[must_use]
    pub fn end_line1(&self) -> usize { self.fragment.end_line1 }

    #[wasm_bindgen(js_name = startLine2)]
    #[must_use]
    pub fn start_line2(&self) -> usize { self.fragment.start_line2 }

    #[wasm_bindgen(js_name = endLine2)]
    #[must_use]
    pub fn end_line2(&self) -> usize { self.fragment.end_line2 }

    #[wasm_bindgen(js_name = startOffset1)]
    #[must_use]
    pub fn start_offset1(&self) -> usize { self.fragment.start_offset1 }

    #[wasm_bindgen(js_name = endOffset1)]
    #[must_use]
    pub fn end_offset1(&self) -> usize { self.fragment.end_offset1 }

    #[wasm_bindgen(js_name = startOffset2)]
    #[must_use]
    pub fn start_offset2(&self) -> usize { self.fragment.start_offset2 }

    #[wasm_bindgen(js_name = endOffset2)]
    #[must_use]
    pub fn end_offset2(&self) -> usize { self.fragment.end_offset2 }

    /// Changes inside the block relative to its start offsets, or nothing
    /// if the block is changed as a whole.
    #[wasm_bindgen(js_name = innerFragments)]
    #[must_use]
    pub fn inner_fragments(&self) -> Option<Vec<JsDiffFragment>> {
        self.fragment
            .inner_fragments
            .as_ref()
            .map(|inner| inner.iter().copied().map(JsDiffFragment::from).collect())
    }
}

impl From<LineFragment> for JsLineFragment {
    fn from(fragment: LineFragment) -> Self { JsLineFragment { fragment } }
}
