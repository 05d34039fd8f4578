//! The comparison pipeline, from the trim and expand primitives up to the
//! [`ComparisonManager`] entry points and the three-way merge.

use std::{fmt, hash::Hash};

pub mod by_char;
pub mod by_line;
pub mod by_word;
pub mod change_corrector;
pub mod chunk_optimizer;
pub mod comparison_manager;
pub mod comparison_util;
pub mod line_fragment_splitter;
pub mod merge;
pub mod merge_range_util;
pub mod policy;
pub mod trim;
pub mod whitespace_corrector;

pub use comparison_manager::ComparisonManager;
pub use policy::{ComparisonPolicy, InnerFragmentsPolicy};

use crate::{
    cancellation::CancellationChecker, config::ComparisonConfig, diff_iterable::FairDiffIterable,
    errors::DiffError, utils::myers_diff,
};

/// Everything a single comparison request needs besides its inputs.
#[derive(Clone, Copy)]
pub struct ComparisonContext<'a> {
    pub config: &'a ComparisonConfig,
    pub cancellation: &'a dyn CancellationChecker,
}

impl<'a> ComparisonContext<'a> {
    #[must_use]
    pub fn new(config: &'a ComparisonConfig, cancellation: &'a dyn CancellationChecker) -> Self {
        Self {
            config,
            cancellation,
        }
    }

    /// # Errors
    ///
    /// `DiffError::Cancelled` if the request got cancelled.
    pub fn check_cancelled(&self) -> Result<(), DiffError> { self.cancellation.check_cancelled() }

    /// Minimal alignment of two sequences, see [`myers_diff::diff`].
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` or `DiffError::TooBig`.
    pub fn diff<T>(&self, data1: &[T], data2: &[T]) -> Result<FairDiffIterable, DiffError>
    where
        T: Eq + Hash,
    {
        myers_diff::diff(data1, data2, self.config, self.cancellation)
    }
}

impl fmt::Debug for ComparisonContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::ComparisonContext;
    use crate::{cancellation::NeverCancelled, config::ComparisonConfig};

    pub const CONFIG: ComparisonConfig = ComparisonConfig {
        unimportant_line_char_count: 3,
        max_bad_chunks: 3,
        delta_threshold_size: 20_000,
    };

    pub fn context() -> ComparisonContext<'static> {
        ComparisonContext::new(&CONFIG, &NeverCancelled)
    }

    pub fn chars(text: &str) -> Vec<char> { text.chars().collect() }
}
