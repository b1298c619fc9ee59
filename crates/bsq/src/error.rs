//! Failure outcomes of a verification attempt.

use thiserror::Error;

/// Why a verification attempt did not produce a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// A construction-time assumption on the parameters does not hold.
    #[error("parameter assumption violated: {reason}")]
    ParameterDomain {
        /// Which assumption failed, with the offending values.
        reason: String,
    },

    /// A bound was requested outside the mode range it is valid for.
    ///
    /// Signals a contract violation by the caller, not a numeric condition.
    #[error("mode {k} is outside the valid range {min}..={max}")]
    OutOfRange {
        /// The requested mode index.
        k: usize,
        /// Smallest valid index.
        min: usize,
        /// Largest valid index (`usize::MAX` for unbounded ranges).
        max: usize,
    },

    /// The refinement budget ran out before isolation held.
    #[error(
        "isolation not reached within {rounds} refinement rounds \
         (smoothness reached s = {smoothness}, required rounds >= {required})"
    )]
    ConvergenceFailure {
        /// Refinement rounds performed.
        rounds: usize,
        /// Minimum round index at which success would have counted.
        required: usize,
        /// Tail-law exponent reached when the budget ran out.
        smoothness: u32,
    },
}

impl BoundsError {
    pub(crate) fn parameter(reason: impl Into<String>) -> Self {
        Self::ParameterDomain {
            reason: reason.into(),
        }
    }

    /// Short machine-friendly tag for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParameterDomain { .. } => "parameter-domain",
            Self::OutOfRange { .. } => "out-of-range",
            Self::ConvergenceFailure { .. } => "convergence-failure",
        }
    }
}
