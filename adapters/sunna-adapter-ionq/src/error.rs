//! Error types for the IonQ adapter.

use sunna_hal::HalError;
use thiserror::Error;

/// Errors from the IonQ API client and backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IonqError {
    /// No API key available.
    #[error("Missing IonQ API key: set IONQ_API_KEY or provide a config token")]
    MissingApiKey,

    /// API key could not be used in a request header.
    #[error("Invalid IonQ API key")]
    InvalidApiKey,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API returned an error payload.
    #[error("IonQ API error: {0}")]
    ApiError(String),

    /// Job not found on the service.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The job listing carried no execution time.
    #[error("No execution time available for job {0}")]
    NoExecutionTime(String),
}

impl From<IonqError> for HalError {
    fn from(err: IonqError) -> Self {
        match err {
            IonqError::MissingApiKey | IonqError::InvalidApiKey => {
                HalError::AuthenticationFailed(err.to_string())
            }
            IonqError::Http(e) => HalError::Network(e),
            IonqError::Parse(e) => HalError::Serialization(e),
            IonqError::JobNotFound(id) => HalError::JobNotFound(id),
            IonqError::NoExecutionTime(id) => HalError::Timeout(id),
            IonqError::ApiError(_) => HalError::Backend(err.to_string()),
        }
    }
}

/// Result type for IonQ adapter operations.
pub type IonqResult<T> = Result<T, IonqError>;
