//! IonQ v0.1 REST API client.

use reqwest::{Client, header};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::error::{IonqError, IonqResult};

/// Default IonQ API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.ionq.co/v0.1";

/// User-Agent sent with requests.
const USER_AGENT: &str = "sunna/0.4 (qaoa-benchmarks)";

/// IonQ API client.
pub struct IonqClient {
    /// HTTP client with the `apiKey` authorization header installed.
    client: Client,
    /// API endpoint URL.
    endpoint: String,
}

impl fmt::Debug for IonqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IonqClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl IonqClient {
    /// Create a new client with an API key.
    pub fn new(endpoint: impl Into<String>, api_key: &str) -> IonqResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("apiKey {api_key}"))
                .map_err(|_| IonqError::InvalidApiKey)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
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

    /// Submit a job in the IonQ circuit JSON format.
    pub async fn submit_job(
        &self,
        target: &str,
        qubits: usize,
        circuit: Vec<serde_json::Value>,
        shots: u32,
    ) -> IonqResult<IonqJob> {
        let url = format!("{}/jobs", self.endpoint);

        let body = serde_json::json!({
            "target": target,
            "shots": shots,
            "body": {
                "format": "ionq.circuit.v0",
                "qubits": qubits,
                "circuit": circuit,
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IonqError::ApiError(format!("job submission failed: {body}")));
        }

        response.json().await.map_err(IonqError::from)
    }

    /// Fetch a job by id.
    pub async fn get_job(&self, job_id: &str) -> IonqResult<IonqJob> {
        let url = format!("{}/jobs/{}", self.endpoint, job_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IonqError::JobNotFound(job_id.to_string()));
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IonqError::ApiError(body));
        }

        response.json().await.map_err(IonqError::from)
    }

    /// Execution time of the most recently executed job, in milliseconds.
    ///
    /// Queries the job listing with `limit=1`.
    pub async fn latest_execution_time(&self) -> IonqResult<f64> {
        let url = format!("{}/jobs", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IonqError::ApiError(body));
        }

        let listing: JobListing = response.json().await?;
        listing
            .jobs
            .first()
            .and_then(|job| job.execution_time)
            .ok_or_else(|| IonqError::NoExecutionTime("latest".into()))
    }

    /// Cancel a job.
    pub async fn cancel_job(&self, job_id: &str) -> IonqResult<()> {
        let url = format!("{}/jobs/{}/status/cancel", self.endpoint, job_id);

        let response = self.client.put(&url).send().await?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IonqError::ApiError(body));
        }

        Ok(())
    }
}

// ============================================================================
// Response types
// ============================================================================

/// An IonQ job record.
#[derive(Debug, Clone, Deserialize)]
pub struct IonqJob {
    /// Job ID.
    pub id: String,
    /// Job status: `ready`, `submitted`, `running`, `completed`,
    /// `canceled`, `failed`.
    #[serde(default)]
    pub status: String,
    /// Execution time in milliseconds, present once executed.
    #[serde(default)]
    pub execution_time: Option<f64>,
    /// Result data.
    #[serde(default)]
    pub data: Option<IonqJobData>,
    /// Failure information.
    #[serde(default)]
    pub failure: Option<IonqFailure>,
}

/// Result payload of a completed job.
#[derive(Debug, Clone, Deserialize)]
pub struct IonqJobData {
    /// Outcome histogram: decimal basis index → probability.
    #[serde(default)]
    pub histogram: HashMap<String, f64>,
}

/// Failure information.
#[derive(Debug, Clone, Deserialize)]
pub struct IonqFailure {
    /// Error class.
    #[serde(default)]
    pub code: Option<String>,
    /// Error message.
    #[serde(default)]
    pub error: String,
}

/// Job listing response.
#[derive(Debug, Deserialize)]
struct JobListing {
    #[serde(default)]
    jobs: Vec<IonqJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserialization() {
        let job: IonqJob = serde_json::from_str(
            r#"{
                "id": "j-1",
                "status": "completed",
                "execution_time": 41.5,
                "data": {"histogram": {"0": 0.5, "3": 0.5}}
            }"#,
        )
        .unwrap();
        assert_eq!(job.execution_time, Some(41.5));
        let histogram = &job.data.unwrap().histogram;
        assert_eq!(histogram["0"], 0.5);
        assert_eq!(histogram["3"], 0.5);
    }

    #[test]
    fn test_listing_deserialization() {
        let listing: JobListing = serde_json::from_str(
            r#"{"jobs": [{"id": "j-9", "status": "completed", "execution_time": 12.0}]}"#,
        )
        .unwrap();
        assert_eq!(listing.jobs.len(), 1);
        assert_eq!(listing.jobs[0].execution_time, Some(12.0));
    }

    #[test]
    fn test_failure_deserialization() {
        let job: IonqJob = serde_json::from_str(
            r#"{"id": "j-2", "status": "failed", "failure": {"error": "decoherence"}}"#,
        )
        .unwrap();
        assert_eq!(job.failure.unwrap().error, "decoherence");
    }

    #[test]
    fn test_client_debug_redacts_key() {
        let client = IonqClient::new(DEFAULT_ENDPOINT, "super-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
