//! IonQ backend implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::debug;

use sunna_hal::{
    Backend, BackendAvailability, BackendConfig, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, JobId, JobStatus, ValidationResult,
};
use sunna_ir::{Circuit, Gate, InstructionKind};

use crate::api::{DEFAULT_ENDPOINT, IonqClient, IonqJob};
use crate::error::{IonqError, IonqResult};

/// Default target: the IonQ cloud simulator.
const DEFAULT_TARGET: &str = "simulator";

/// IonQ backend adapter.
pub struct IonqBackend {
    /// API client.
    client: Arc<IonqClient>,
    /// Target machine (`simulator` or `qpu.*`).
    target: String,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Per-job submission record: measured-register map (clbit → qubit)
    /// and requested shot count, used to rebuild counts from the
    /// probability histogram.
    submissions: Mutex<FxHashMap<String, (Vec<usize>, u32)>>,
}

impl IonqBackend {
    /// Create a backend targeting a specific IonQ machine.
    ///
    /// Reads the API key from the `IONQ_API_KEY` environment variable.
    pub fn with_target(target: impl Into<String>) -> IonqResult<Self> {
        let api_key = std::env::var("IONQ_API_KEY").map_err(|_| IonqError::MissingApiKey)?;
        let client = IonqClient::new(DEFAULT_ENDPOINT, &api_key)?;
        let target = target.into();

        Ok(Self {
            client: Arc::new(client),
            capabilities: Capabilities::ionq(&target, 11),
            target,
            submissions: Mutex::new(FxHashMap::default()),
        })
    }

    /// Create a backend targeting the IonQ cloud simulator.
    pub fn new() -> IonqResult<Self> {
        Self::with_target(DEFAULT_TARGET)
    }

    /// Create a backend with explicit configuration.
    pub fn with_config(config: BackendConfig) -> IonqResult<Self> {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let api_key = config.token.as_ref().ok_or(IonqError::MissingApiKey)?;
        let target = config
            .extra
            .get("target")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_TARGET)
            .to_string();

        let client = IonqClient::new(endpoint, api_key)?;

        Ok(Self {
            client: Arc::new(client),
            capabilities: Capabilities::ionq(&target, 11),
            target,
            submissions: Mutex::new(FxHashMap::default()),
        })
    }

    /// Get the target machine name.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Convert a circuit to the IonQ JSON gate list.
///
/// Measurements are implicit on IonQ — every qubit is read out — so
/// measurement instructions are skipped here and the measured-register
/// projection happens on the histogram instead.
fn circuit_to_ionq(circuit: &Circuit) -> Vec<serde_json::Value> {
    let mut gates = vec![];

    for inst in circuit.instructions() {
        let gate = match &inst.kind {
            InstructionKind::Measure => continue,
            InstructionKind::Gate(g) => g,
        };
        let q = |i: usize| inst.qubits[i].0;

        let value = match gate {
            Gate::I => continue,
            Gate::X => serde_json::json!({"gate": "x", "target": q(0)}),
            Gate::Y => serde_json::json!({"gate": "y", "target": q(0)}),
            Gate::Z => serde_json::json!({"gate": "z", "target": q(0)}),
            Gate::H => serde_json::json!({"gate": "h", "target": q(0)}),
            Gate::S => serde_json::json!({"gate": "s", "target": q(0)}),
            Gate::Sdg => serde_json::json!({"gate": "si", "target": q(0)}),
            Gate::Rx(theta) => {
                serde_json::json!({"gate": "rx", "target": q(0), "rotation": theta})
            }
            Gate::Ry(theta) => {
                serde_json::json!({"gate": "ry", "target": q(0), "rotation": theta})
            }
            Gate::Rz(theta) => {
                serde_json::json!({"gate": "rz", "target": q(0), "rotation": theta})
            }
            Gate::CX => serde_json::json!({"gate": "cnot", "control": q(0), "target": q(1)}),
            Gate::CZ => serde_json::json!({"gate": "z", "control": q(0), "target": q(1)}),
            Gate::CRz(theta) => {
                serde_json::json!({"gate": "rz", "control": q(0), "target": q(1), "rotation": theta})
            }
            Gate::Swap => serde_json::json!({"gate": "swap", "targets": [q(0), q(1)]}),
        };
        gates.push(value);
    }

    gates
}

/// Measured-register map: clbit index → qubit index.
fn measured_bits(circuit: &Circuit) -> Vec<usize> {
    let mut map: Vec<Option<usize>> = vec![None; circuit.num_clbits()];
    for inst in circuit.instructions() {
        if inst.is_measure() {
            for (q, c) in inst.qubits.iter().zip(inst.clbits.iter()) {
                map[c.0 as usize] = Some(q.0 as usize);
            }
        }
    }
    if map.iter().all(Option::is_none) {
        return (0..circuit.num_qubits()).collect();
    }
    map.into_iter().map(|q| q.unwrap_or(0)).collect()
}

/// Convert the IonQ probability histogram into shot counts over the
/// measured register, character i of each key being classical bit i.
fn histogram_to_counts(
    histogram: &std::collections::HashMap<String, f64>,
    measure_map: &[usize],
    shots: u32,
) -> Counts {
    let mut counts = Counts::new();
    for (key, &probability) in histogram {
        let Ok(outcome) = key.parse::<usize>() else {
            continue;
        };
        let bits: String = measure_map
            .iter()
            .map(|&q| if (outcome >> q) & 1 == 1 { '1' } else { '0' })
            .collect();
        let count = (probability * f64::from(shots)).round() as u64;
        if count > 0 {
            counts.insert(bits, count);
        }
    }
    counts
}

fn job_status(job: &IonqJob) -> JobStatus {
    match job.status.as_str() {
        "completed" => JobStatus::Completed,
        "failed" => JobStatus::Failed(
            job.failure
                .as_ref()
                .map(|f| f.error.clone())
                .unwrap_or_else(|| "unknown failure".into()),
        ),
        "canceled" => JobStatus::Cancelled,
        "running" => JobStatus::Running,
        _ => JobStatus::Queued,
    }
}

#[async_trait]
impl Backend for IonqBackend {
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
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "circuit has {} qubits but {} exposes {}",
                    circuit.num_qubits(),
                    self.target,
                    self.capabilities.num_qubits
                )],
            });
        }
        Ok(ValidationResult::Valid)
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let gates = circuit_to_ionq(circuit);

        let job = self
            .client
            .submit_job(&self.target, circuit.num_qubits(), gates, shots)
            .await
            .map_err(HalError::from)?;

        debug!(job = %job.id, target = %self.target, "submitted job");

        self.submissions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(job.id.clone(), (measured_bits(circuit), shots));

        Ok(JobId::new(job.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let job = self
            .client
            .get_job(&job_id.0)
            .await
            .map_err(HalError::from)?;
        Ok(job_status(&job))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let job = self
            .client
            .get_job(&job_id.0)
            .await
            .map_err(HalError::from)?;

        let (measure_map, shots) = self
            .submissions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&job_id.0)
            .cloned()
            .unwrap_or_default();

        // The job record echoes probabilities, not samples; rebuild counts
        // at the granularity the requested shot count allows.
        let counts = job
            .data
            .as_ref()
            .map(|data| histogram_to_counts(&data.histogram, &measure_map, shots))
            .unwrap_or_default();

        // The job record carries the execution time once executed; the
        // listing query is the fallback path.
        let runtime = match job.execution_time {
            Some(ms) => ms,
            None => self
                .client
                .latest_execution_time()
                .await
                .map_err(HalError::from)?,
        };

        Ok(ExecutionResult::new(counts, shots).with_execution_time(runtime))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_job(&job_id.0)
            .await
            .map_err(IonqError::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunna_ir::{ClbitId, QubitId};

    #[test]
    fn test_circuit_to_ionq_gates() {
        let mut circuit = Circuit::with_size("t", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.rx(0.5, QubitId(1)).unwrap();
        circuit.crz(-0.25, QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();

        let gates = circuit_to_ionq(&circuit);
        // measurements are implicit
        assert_eq!(gates.len(), 4);
        assert_eq!(gates[0]["gate"], "h");
        assert_eq!(gates[1]["gate"], "cnot");
        assert_eq!(gates[2]["rotation"], 0.5);
        assert_eq!(gates[3]["control"], 0);
    }

    #[test]
    fn test_histogram_projection() {
        // 3-qubit circuit, only qubits 0 and 2 measured
        let histogram: std::collections::HashMap<String, f64> =
            [("5".to_string(), 0.75), ("0".to_string(), 0.25)]
                .into_iter()
                .collect();

        // clbit 0 ← qubit 0, clbit 1 ← qubit 2
        let counts = histogram_to_counts(&histogram, &[0, 2], 100);

        // outcome 5 = 0b101: qubit 0 = 1, qubit 2 = 1 → key "11"
        assert_eq!(counts.get("11"), 75);
        assert_eq!(counts.get("00"), 25);
    }

    #[test]
    fn test_job_status_mapping() {
        let job: IonqJob =
            serde_json::from_str(r#"{"id": "j", "status": "running"}"#).unwrap();
        assert_eq!(job_status(&job), JobStatus::Running);

        let job: IonqJob = serde_json::from_str(
            r#"{"id": "j", "status": "failed", "failure": {"error": "boom"}}"#,
        )
        .unwrap();
        assert_eq!(job_status(&job), JobStatus::Failed("boom".into()));
    }
}
