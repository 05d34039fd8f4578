use thiserror::Error;

/// Error type for comparisons that could not produce a result.
///
/// Neither variant describes bad data: a comparison either got cancelled by
/// its caller or was judged too expensive to compute exactly. The caller may
/// retry with a coarser policy or a smaller scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The cancellation hook fired during the comparison
    #[error("Comparison cancelled")]
    Cancelled,

    /// The edit distance between the inputs exceeded the alignment budget
    #[error(
        "Inputs are too big to compare: aligning {length1} with {length2} elements needs more \
         than {threshold} edits"
    )]
    TooBig {
        /// Number of elements on the first side
        length1: usize,
        /// Number of elements on the second side
        length2: usize,
        /// The edit distance budget that got exceeded
        threshold: usize,
    },
}

impl DiffError {
    #[must_use]
    pub fn is_too_big(&self) -> bool { matches!(self, DiffError::TooBig { .. }) }
}
