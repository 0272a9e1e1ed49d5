//! Crate-wide error types.

use thiserror::Error;

/// Result type for strong-motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors that can occur while processing ground-motion records.
///
/// Every operation in this crate is a deterministic pure function, so a
/// failed call never indicates a transient condition: it is either bad
/// caller input, a configuration whose math is undefined, a broken internal
/// invariant, or an explicit cancellation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Malformed or out-of-range caller input.
    #[error("invalid input for {arg}: {reason}")]
    InvalidInput {
        /// Name of the offending argument.
        arg: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A configuration whose math is undefined (zero bandwidth, damping
    /// outside the open unit interval, and similar). Caught by validation
    /// before any recursion runs, so NaN or infinity never reaches a result.
    #[error("numerically degenerate configuration: {0}")]
    NumericDegeneracy(String),

    /// An internal invariant was broken. This indicates a bug in the crate
    /// or in code constructing intermediate representations by hand, not
    /// bad user input.
    #[error("internal contract violated: {0}")]
    ContractViolation(String),

    /// The caller cancelled a period sweep between periods.
    #[error("computation cancelled")]
    Cancelled,
}

impl MotionError {
    /// Shorthand for an [`MotionError::InvalidInput`] value.
    pub(crate) fn invalid(arg: &'static str, reason: &'static str) -> Self {
        MotionError::InvalidInput { arg, reason }
    }

    /// Check whether this error signals a programming error rather than a
    /// recoverable input problem. Callers may choose to abort on fatal
    /// errors in development builds.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MotionError::ContractViolation(_))
    }
}
