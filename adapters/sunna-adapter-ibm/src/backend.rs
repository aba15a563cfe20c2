//! IBM Quantum backend implementation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use sunna_hal::{
    Backend, BackendAvailability, BackendConfig, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, JobId, JobStatus, ValidationResult,
};
use sunna_ir::Circuit;

use crate::api::{DEFAULT_ENDPOINT, IbmClient, JobTimestamps};
use crate::error::{IbmError, IbmResult};

/// Default target device.
const DEFAULT_BACKEND: &str = "ibmq_qasm_simulator";

/// Retry budget for the timestamp fetch.
const TIMESTAMP_ATTEMPTS: u32 = 8;

/// Base delay of the timestamp retry backoff; doubles per attempt.
const TIMESTAMP_BACKOFF: Duration = Duration::from_millis(500);

/// IBM Quantum backend adapter.
pub struct IbmBackend {
    /// API client.
    client: Arc<IbmClient>,
    /// Target device name.
    target: String,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Measured-register width per submitted job, needed to size the
    /// bitstrings when converting hex counts.
    widths: Mutex<FxHashMap<String, usize>>,
}

impl IbmBackend {
    /// Create a backend targeting a specific device.
    ///
    /// Reads the API token from the `IBM_QUANTUM_TOKEN` environment
    /// variable.
    pub fn with_target(target: impl Into<String>) -> IbmResult<Self> {
        let token = std::env::var("IBM_QUANTUM_TOKEN").map_err(|_| IbmError::MissingToken)?;
        let client = IbmClient::new(DEFAULT_ENDPOINT, &token)?;
        let target = target.into();

        Ok(Self {
            client: Arc::new(client),
            capabilities: Capabilities::ibm(&target, 127),
            target,
            widths: Mutex::new(FxHashMap::default()),
        })
    }

    /// Create a backend targeting the default device.
    pub fn new() -> IbmResult<Self> {
        Self::with_target(DEFAULT_BACKEND)
    }

    /// Create a backend with explicit configuration.
    pub fn with_config(config: BackendConfig) -> IbmResult<Self> {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let token = config.token.as_ref().ok_or(IbmError::MissingToken)?;
        let target = config
            .extra
            .get("backend")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_BACKEND)
            .to_string();

        let client = IbmClient::new(endpoint, token)?;

        Ok(Self {
            client: Arc::new(client),
            capabilities: Capabilities::ibm(&target, 127),
            target,
            widths: Mutex::new(FxHashMap::default()),
        })
    }

    /// Get the target device name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// RUNNING → COMPLETED delta in milliseconds.
    ///
    /// The completion timestamp occasionally lags the terminal status, so
    /// the status is refetched with exponential backoff until both
    /// timestamps parse, up to a fixed attempt budget.
    async fn job_runtime_ms(&self, job_id: &str) -> IbmResult<f64> {
        let mut backoff = TIMESTAMP_BACKOFF;

        for attempt in 1..=TIMESTAMP_ATTEMPTS {
            let status = self.client.get_job_status(job_id).await?;

            if let Some(delta) = status.timestamps.as_ref().and_then(runtime_from_timestamps) {
                return Ok(delta);
            }

            debug!(job_id, attempt, "job timestamps incomplete, refetching");
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }

        Err(IbmError::TimestampsUnavailable(job_id.to_string()))
    }
}

/// Parse the RUNNING → COMPLETED delta from a timestamp set.
fn runtime_from_timestamps(ts: &JobTimestamps) -> Option<f64> {
    let running: DateTime<Utc> = ts.running.as_deref()?.parse().ok()?;
    let completed: DateTime<Utc> = ts.completed.as_deref()?.parse().ok()?;
    let delta = completed - running;
    Some(delta.num_microseconds()? as f64 / 1e3)
}

/// Convert a hex bitstring key (`"0x1a"`) into our bit order: character i
/// is classical bit i, leftmost first.
fn hex_to_bits(key: &str, width: usize) -> String {
    let hex = key.strip_prefix("0x").unwrap_or(key);
    let value = u64::from_str_radix(hex, 16).unwrap_or(0);
    (0..width)
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = vec![];
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but {} exposes {}",
                circuit.num_qubits(),
                self.target,
                self.capabilities.num_qubits
            ));
        }
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let kernel = sunna_xasm::emit(circuit);

        let response = self
            .client
            .submit_sampler_job(&self.target, vec![kernel], shots)
            .await
            .map_err(HalError::from)?;

        debug!(job = %response.id, target = %self.target, "submitted job");

        self.widths
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(response.id.clone(), circuit.num_clbits());

        Ok(JobId::new(response.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let status = self
            .client
            .get_job_status(&job_id.0)
            .await
            .map_err(HalError::from)?;

        Ok(if status.is_completed() {
            JobStatus::Completed
        } else if status.is_failed() {
            JobStatus::Failed(
                status
                    .error_message()
                    .unwrap_or_else(|| "unknown failure".into()),
            )
        } else if status.is_cancelled() {
            JobStatus::Cancelled
        } else if status.status.eq_ignore_ascii_case("running") {
            JobStatus::Running
        } else {
            JobStatus::Queued
        })
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let results = self
            .client
            .get_job_results(&job_id.0)
            .await
            .map_err(HalError::from)?;

        let width = self
            .widths
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&job_id.0)
            .copied()
            .unwrap_or(0);

        let mut counts = Counts::new();
        let mut shots = 0u64;
        if let Some(raw) = results.results.first().and_then(|r| r.counts.as_ref()) {
            for (key, &count) in raw {
                counts.insert(hex_to_bits(key, width), count);
                shots += count;
            }
        } else {
            warn!(job = %job_id, "result carried no counts");
        }

        let runtime = self
            .job_runtime_ms(&job_id.0)
            .await
            .map_err(HalError::from)?;

        Ok(
            ExecutionResult::new(counts, u32::try_from(shots).unwrap_or(u32::MAX))
                .with_execution_time(runtime),
        )
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_job(&job_id.0)
            .await
            .map_err(IbmError::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_bits_orders_bit_zero_first() {
        // 0x5 = 0b0101: bits 0 and 2 set
        assert_eq!(hex_to_bits("0x5", 4), "1010");
        assert_eq!(hex_to_bits("0x0", 3), "000");
        assert_eq!(hex_to_bits("0x7", 3), "111");
    }

    #[test]
    fn test_hex_to_bits_pads_to_width() {
        assert_eq!(hex_to_bits("0x1", 5), "10000");
    }

    #[test]
    fn test_runtime_from_timestamps() {
        let ts = JobTimestamps {
            created: Some("2024-03-01T10:00:00Z".into()),
            running: Some("2024-03-01T10:00:05Z".into()),
            completed: Some("2024-03-01T10:00:07.250Z".into()),
        };
        let ms = runtime_from_timestamps(&ts).unwrap();
        assert!((ms - 2250.0).abs() < 1e-6);
    }

    #[test]
    fn test_runtime_requires_both_timestamps() {
        let ts = JobTimestamps {
            created: Some("2024-03-01T10:00:00Z".into()),
            running: Some("2024-03-01T10:00:05Z".into()),
            completed: None,
        };
        assert!(runtime_from_timestamps(&ts).is_none());
    }
}
