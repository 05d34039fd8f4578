//! Results of a comparison expressed as character offsets into the compared
//! texts, and the three-way ranges produced by the merge.

pub mod diff_fragment;
pub mod line_fragment;
pub mod merge_range;

pub use diff_fragment::DiffFragment;
pub use line_fragment::LineFragment;
pub use merge_range::{MergeLineFragment, MergeRange};
