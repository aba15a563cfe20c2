//! IBM Quantum REST API client.
//!
//! Covers the slice of the API the benchmark needs: sampler job
//! submission, status polling with per-step timestamps, result retrieval,
//! and cancellation.

use reqwest::{Client, header};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-computing.ibm.com";

/// User-Agent sent with requests.
const USER_AGENT: &str = "sunna/0.4 (qaoa-benchmarks)";

/// IBM Quantum API client.
pub struct IbmClient {
    /// HTTP client with auth headers installed.
    client: Client,
    /// API endpoint URL.
    endpoint: String,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl IbmClient {
    /// Create a new client with a bearer token.
    pub fn new(endpoint: impl Into<String>, token: &str) -> IbmResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| IbmError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Submit a sampler job carrying serialized kernel sources.
    ///
    /// The service compiles the kernels and applies its own qubit
    /// placement before execution (the provider-side mapping step).
    pub async fn submit_sampler_job(
        &self,
        backend: &str,
        kernels: Vec<String>,
        shots: u32,
    ) -> IbmResult<SubmitResponse> {
        let url = format!("{}/v1/jobs", self.endpoint);

        let body = serde_json::json!({
            "program_id": "sampler",
            "backend": backend,
            "params": {
                "circuits": kernels,
                "shots": shots,
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IbmError::ApiError {
                code: None,
                message: format!("job submission failed: {body}"),
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Get job status, including per-step timestamps.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{}", self.endpoint, job_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::ApiError {
                code: error.code,
                message: error.message,
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Get job results.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{}/results", self.endpoint, job_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::ApiError {
                code: error.code,
                message: error.message,
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Cancel a job.
    pub async fn cancel_job(&self, job_id: &str) -> IbmResult<()> {
        let url = format!("{}/v1/jobs/{}/cancel", self.endpoint, job_id);

        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::ApiError {
                code: error.code,
                message: error.message,
            });
        }

        Ok(())
    }
}

// ============================================================================
// Response types
// ============================================================================

/// API error response.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    /// Error code.
    #[serde(default)]
    code: Option<String>,
    /// Error message.
    #[serde(default)]
    message: String,
}

/// Job submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Job ID.
    pub id: String,
    /// Job status.
    #[serde(default)]
    pub status: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Job status (may be mixed case).
    pub status: String,
    /// Per-step timestamps (RFC 3339).
    #[serde(default)]
    pub timestamps: Option<JobTimestamps>,
    /// Error information if failed.
    #[serde(default)]
    pub error: Option<JobError>,
}

/// Per-step timestamps of a job.
///
/// The `completed` field occasionally lags the terminal status on the
/// service side; callers that need the RUNNING → COMPLETED delta must
/// refetch until both fields are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTimestamps {
    /// Time the job was created.
    #[serde(default)]
    pub created: Option<String>,
    /// Time the job started running.
    #[serde(default)]
    pub running: Option<String>,
    /// Time the job completed.
    #[serde(default)]
    pub completed: Option<String>,
}

/// Job error information.
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Error message.
    pub message: String,
}

impl JobStatusResponse {
    /// Normalized uppercase status for comparison.
    fn normalized_status(&self) -> String {
        self.status.to_uppercase()
    }

    /// Check if job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.normalized_status().as_str(),
            "COMPLETED" | "FAILED" | "CANCELLED" | "ERROR"
        )
    }

    /// Check if job completed successfully.
    pub fn is_completed(&self) -> bool {
        self.normalized_status() == "COMPLETED"
    }

    /// Check if job failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized_status().as_str(), "FAILED" | "ERROR")
    }

    /// Check if job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized_status() == "CANCELLED"
    }

    /// Get the failure reason, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.message.clone())
    }
}

/// Job result response.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// Results from the sampler, one per submitted circuit.
    pub results: Vec<SamplerResult>,
}

/// Sampler result for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// Measurement counts, hex bitstring → count.
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        let status: JobStatusResponse = serde_json::from_str(
            r#"{"id": "j1", "status": "COMPLETED"}"#,
        )
        .unwrap();
        assert!(status.is_terminal());
        assert!(status.is_completed());
        assert!(!status.is_failed());
    }

    #[test]
    fn test_job_status_mixed_case() {
        let status: JobStatusResponse = serde_json::from_str(
            r#"{"id": "j1", "status": "Failed", "error": {"message": "circuit too deep"}}"#,
        )
        .unwrap();
        assert!(status.is_terminal());
        assert!(status.is_failed());
        assert_eq!(status.error_message().unwrap(), "circuit too deep");
    }

    #[test]
    fn test_timestamps_tolerate_missing_fields() {
        let status: JobStatusResponse = serde_json::from_str(
            r#"{
                "id": "j1",
                "status": "COMPLETED",
                "timestamps": {"created": "2024-03-01T10:00:00Z", "running": "2024-03-01T10:00:05Z"}
            }"#,
        )
        .unwrap();
        let ts = status.timestamps.unwrap();
        assert!(ts.running.is_some());
        assert!(ts.completed.is_none());
    }

    #[test]
    fn test_result_counts_deserialization() {
        let result: JobResultResponse = serde_json::from_str(
            r#"{"results": [{"counts": {"0x0": 512, "0x3": 488}}]}"#,
        )
        .unwrap();
        let counts = result.results[0].counts.as_ref().unwrap();
        assert_eq!(counts["0x0"], 512);
        assert_eq!(counts["0x3"], 488);
    }

    #[test]
    fn test_client_debug_redacts_token() {
        let client = IbmClient::new("https://example.com", "super-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
