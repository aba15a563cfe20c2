//! Error types for the IBM adapter.

use sunna_hal::HalError;
use thiserror::Error;

/// Errors from the IBM Quantum API client and backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IbmError {
    /// No API token available.
    #[error("Missing IBM Quantum token: set IBM_QUANTUM_TOKEN or provide a config token")]
    MissingToken,

    /// Token could not be used in a request header.
    #[error("Invalid IBM Quantum token")]
    InvalidToken,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API returned an error payload.
    #[error("IBM API error{}: {message}", format_code(.code))]
    ApiError {
        /// Error code, if provided.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Job not found on the service.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Target backend is unavailable.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Circuit could not be serialized for submission.
    #[error("Circuit error: {0}")]
    CircuitError(String),

    /// Job step timestamps never became available.
    #[error("Timestamps unavailable for job {0} after bounded retries")]
    TimestampsUnavailable(String),
}

#[allow(clippy::ref_option)]
fn format_code(code: &Option<String>) -> String {
    match code {
        Some(c) => format!(" ({c})"),
        None => String::new(),
    }
}

impl From<IbmError> for HalError {
    fn from(err: IbmError) -> Self {
        match err {
            IbmError::MissingToken | IbmError::InvalidToken => {
                HalError::AuthenticationFailed(err.to_string())
            }
            IbmError::Http(e) => HalError::Network(e),
            IbmError::Parse(e) => HalError::Serialization(e),
            IbmError::JobNotFound(id) => HalError::JobNotFound(id),
            IbmError::BackendUnavailable(name) => HalError::BackendUnavailable(name),
            IbmError::CircuitError(msg) => HalError::InvalidCircuit(msg),
            IbmError::TimestampsUnavailable(id) => HalError::Timeout(id),
            IbmError::ApiError { .. } => HalError::Backend(err.to_string()),
        }
    }
}

/// Result type for IBM adapter operations.
pub type IbmResult<T> = Result<T, IbmError>;
