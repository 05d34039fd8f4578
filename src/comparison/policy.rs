#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How whitespace differences are treated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonPolicy {
    /// Every character matters
    #[default]
    Default,

    /// Leading and trailing whitespace of every line is ignored
    TrimWhitespaces,

    /// All whitespace is ignored
    IgnoreWhitespaces,
}

/// Granularity of the changes reported inside changed line blocks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InnerFragmentsPolicy {
    #[default]
    None,
    Words,
    Chars,
}
