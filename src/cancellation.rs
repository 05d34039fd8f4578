use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::DiffError;

/// Cooperative cancellation hook consulted between the phases of a
/// comparison.
///
/// Any closure returning `bool` works as a checker:
///
/// ```
/// use diff_comparison::{CancellationChecker, DiffError};
///
/// let never = || false;
/// assert_eq!(never.check_cancelled(), Ok(()));
///
/// let always = || true;
/// assert_eq!(always.check_cancelled(), Err(DiffError::Cancelled));
/// ```
pub trait CancellationChecker {
    fn is_cancelled(&self) -> bool;

    /// Returns `DiffError::Cancelled` once the hook fires.
    ///
    /// # Errors
    ///
    /// `DiffError::Cancelled` if `is_cancelled` returns true.
    fn check_cancelled(&self) -> Result<(), DiffError> {
        if self.is_cancelled() {
            Err(DiffError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl<F> CancellationChecker for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool { self() }
}

impl CancellationChecker for AtomicBool {
    fn is_cancelled(&self) -> bool { self.load(Ordering::Relaxed) }
}

/// Checker for callers that never cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationChecker for NeverCancelled {
    fn is_cancelled(&self) -> bool { false }
}
