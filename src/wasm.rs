//! Expose the comparison functionality to WebAssembly.
use wasm_bindgen::prelude::*;

use crate::{ComparisonManager, NeverCancelled};

mod types;

pub use types::{JsComparisonPolicy, JsDiffFragment, JsInnerFragmentsPolicy, JsLineFragment};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around `ComparisonManager::compare_lines_inner` with the
/// default configuration.
///
/// # Errors
///
/// If the texts are too different to be compared line by line.
#[wasm_bindgen(js_name = compareLines)]
pub fn compare_lines(
    text1: &str,
    text2: &str,
    policy: JsComparisonPolicy,
    inner_policy: JsInnerFragmentsPolicy,
) -> Result<Vec<JsLineFragment>, JsError> {
    set_panic_hook();

    let fragments = ComparisonManager::default().compare_lines_inner(
        text1,
        text2,
        policy.into(),
        inner_policy.into(),
        &NeverCancelled,
    )?;

    Ok(fragments.into_iter().map(JsLineFragment::from).collect())
}

/// WASM wrapper around `ComparisonManager::compare_words`.
///
/// # Errors
///
/// If the texts are too different to be compared word by word.
#[wasm_bindgen(js_name = compareWords)]
pub fn compare_words(
    text1: &str,
    text2: &str,
    policy: JsComparisonPolicy,
) -> Result<Vec<JsDiffFragment>, JsError> {
    set_panic_hook();

    let fragments =
        ComparisonManager::default().compare_words(text1, text2, policy.into(), &NeverCancelled)?;

    Ok(fragments.into_iter().map(JsDiffFragment::from).collect())
}

/// WASM wrapper around `ComparisonManager::compare_chars`.
///
/// # Errors
///
/// If the texts are too different to be compared char by char.
#[wasm_bindgen(js_name = compareChars)]
pub fn compare_chars(
    text1: &str,
    text2: &str,
    policy: JsComparisonPolicy,
) -> Result<Vec<JsDiffFragment>, JsError> {
    set_panic_hook();

    let fragments =
        ComparisonManager::default().compare_chars(text1, text2, policy.into(), &NeverCancelled)?;

    Ok(fragments.into_iter().map(JsDiffFragment::from).collect())
}

#[wasm_bindgen(js_name = isEquals)]
#[must_use]
pub fn is_equals(text1: &str, text2: &str, policy: JsComparisonPolicy) -> bool {
    set_panic_hook();

    ComparisonManager::is_equals(text1, text2, policy.into())
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
