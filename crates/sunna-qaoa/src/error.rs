//! Error types for the QAOA core.

use sunna_hal::HalError;
use sunna_ir::IrError;
use thiserror::Error;

/// Errors that can occur while building, executing, or scoring circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaoaError {
    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Backend execution failed.
    #[error(transparent)]
    Hal(#[from] HalError),

    /// An expectation was requested over an empty histogram.
    #[error("Cannot evaluate expectation over an empty histogram")]
    EmptyHistogram,

    /// A histogram key does not match the measured register width.
    #[error("Bitstring width mismatch: expected {expected} bits, got {got}")]
    BitstringWidth {
        /// Expected number of measured bits.
        expected: usize,
        /// Observed key length.
        got: usize,
    },

    /// A histogram key contains a non-binary character.
    #[error("Invalid bitstring '{0}': keys must be over {{0, 1}}")]
    InvalidBitstring(String),

    /// The flat parameter vector cannot be split into (β, γ) halves.
    #[error("Parameter vector length {0} is not an even, non-zero count")]
    ParameterCount(usize),
}

/// Result type for QAOA operations.
pub type QaoaResult<T> = Result<T, QaoaError>;
