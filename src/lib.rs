mod cancellation;
pub mod comparison;
mod config;
mod consts;
mod diff_iterable;
mod errors;
mod fragments;
mod line_offsets;
mod utils;

pub use cancellation::{CancellationChecker, NeverCancelled};
pub use comparison::{
    ComparisonManager, ComparisonPolicy, InnerFragmentsPolicy,
    merge_range_util::{MergeConflictType, TextDiffType},
};
pub use config::ComparisonConfig;
pub use diff_iterable::{DiffIterable, FairDiffIterable, Range};
pub use errors::DiffError;
pub use fragments::{DiffFragment, LineFragment, MergeLineFragment, MergeRange};
pub use line_offsets::LineOffsets;
pub use utils::side::{Side, ThreeSide};

#[cfg(feature = "wasm")]
pub mod wasm;
