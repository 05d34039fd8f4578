use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DELTA_THRESHOLD_SIZE, DEFAULT_MAX_BAD_CHUNKS, DEFAULT_UNIMPORTANT_LINE_CHAR_COUNT,
};

/// Tunables of a comparison. They only affect how readable or how expensive
/// a result is, never whether it is a valid alignment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Lines with at most this many non-whitespace characters are considered
    /// unimportant. Zero disables the two-step line alignment.
    #[cfg_attr(feature = "serde", serde(default = "default_unimportant_line_char_count"))]
    pub unimportant_line_char_count: usize,

    /// Number of too-big inner comparisons tolerated per request before the
    /// remaining changed blocks are returned without inner fragments.
    #[cfg_attr(feature = "serde", serde(default = "default_max_bad_chunks"))]
    pub max_bad_chunks: usize,

    /// Base edit distance budget of the aligner. The effective budget grows
    /// with the square root of the input size.
    #[cfg_attr(feature = "serde", serde(default = "default_delta_threshold_size"))]
    pub delta_threshold_size: usize,
}

fn default_unimportant_line_char_count() -> usize {
    debug!("Using default unimportant line char count: {DEFAULT_UNIMPORTANT_LINE_CHAR_COUNT}");
    DEFAULT_UNIMPORTANT_LINE_CHAR_COUNT
}

fn default_max_bad_chunks() -> usize {
    debug!("Using default max bad chunks: {DEFAULT_MAX_BAD_CHUNKS}");
    DEFAULT_MAX_BAD_CHUNKS
}

fn default_delta_threshold_size() -> usize {
    debug!("Using default delta threshold size: {DEFAULT_DELTA_THRESHOLD_SIZE}");
    DEFAULT_DELTA_THRESHOLD_SIZE
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            unimportant_line_char_count: default_unimportant_line_char_count(),
            max_bad_chunks: default_max_bad_chunks(),
            delta_threshold_size: default_delta_threshold_size(),
        }
    }
}

impl ComparisonConfig {
    /// Maximum edit distance the aligner explores for inputs of the given
    /// lengths before giving up with `DiffError::TooBig`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn edit_distance_threshold(&self, length1: usize, length2: usize) -> usize {
        let scaled = 10.0 * ((length1 + length2) as f64).sqrt();
        self.delta_threshold_size + scaled as usize
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComparisonConfig::default();

        assert_eq!(config.unimportant_line_char_count, 3);
        assert_eq!(config.max_bad_chunks, 3);
        assert_eq!(config.delta_threshold_size, 20_000);
    }

    #[test]
    fn test_threshold_grows_with_input() {
        let config = ComparisonConfig {
            delta_threshold_size: 0,
            ..ComparisonConfig::default()
        };

        assert_eq!(config.edit_distance_threshold(0, 0), 0);
        assert_eq!(config.edit_distance_threshold(50, 50), 100);
        assert_eq!(config.edit_distance_threshold(2000, 2000), 632);
    }
}
