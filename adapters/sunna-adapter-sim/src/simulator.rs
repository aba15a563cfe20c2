//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use sunna_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus, ValidationResult,
};
use sunna_ir::Circuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Evolves the statevector once per job and samples the requested number
/// of shots from the final distribution — every circuit in this suite
/// measures only at the end.
pub struct SimulatorBackend {
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Completed jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with the default qubit cap.
    pub fn new() -> Self {
        Self::with_max_qubits(25)
    }

    /// Create a simulator with a custom qubit cap.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Run a circuit and sample its measured register.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!(num_qubits, shots, "starting simulation");

        let mut sv = Statevector::new(num_qubits);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        // Measured register: clbit index → qubit index. Circuits without
        // explicit measurements sample every qubit in place.
        let measure_map = measured_bits(circuit);

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = sv.sample();
            counts.insert(outcome_to_key(outcome, &measure_map), 1);
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "simulation completed");

        ExecutionResult::new(counts, shots)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map classical bit positions to the qubits measured into them.
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
        // No measurements: identity map over all qubits.
        return (0..circuit.num_qubits()).collect();
    }

    map.into_iter().map(|q| q.unwrap_or(0)).collect()
}

/// Render a sampled basis index as a measured-register key.
///
/// Character i of the key is classical bit i (leftmost first).
fn outcome_to_key(outcome: usize, measure_map: &[usize]) -> String {
    measure_map
        .iter()
        .map(|&q| if (outcome >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[async_trait]
impl Backend for SimulatorBackend {
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
                    "circuit has {} qubits but simulator supports {}",
                    circuit.num_qubits(),
                    self.capabilities.num_qubits
                )],
            });
        }
        Ok(ValidationResult::Valid)
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if shots == 0 {
            return Err(HalError::InvalidShots("shot count must be positive".into()));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend("simulator");

        debug!(job = %job_id, "submitted job");

        // Local execution completes inline.
        let result = self.run_simulation(circuit, shots);

        let sim_job = SimJob {
            job: job.with_status(JobStatus::Completed),
            result: Some(result),
        };

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), sim_job);
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}
