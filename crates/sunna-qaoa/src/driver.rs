//! The classical-quantum optimization driver.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use sunna_hal::Backend;

use crate::error::QaoaResult;
use crate::optimizer::{Cobyla, Optimizer};
use crate::params::QaoaParams;
use crate::problems::Problem;

/// Number of top bitstrings reported from the final histogram.
const TOP_RESULTS: usize = 8;

/// Outcome of a full QAOA run on one backend.
#[derive(Debug, Clone)]
pub struct QaoaRun {
    /// The most frequent bitstrings of the final histogram, best first
    /// (at most eight).
    pub best_bitstrings: Vec<String>,
    /// Per-evaluation runtimes in milliseconds, in evaluation order.
    pub runtimes_ms: Vec<f64>,
    /// Optimal parameters found.
    pub optimal_params: Vec<f64>,
    /// Expectation value at the optimum.
    pub expectation: f64,
    /// Optimizer iterations (improving steps).
    pub iterations: usize,
    /// Total circuit evaluations during optimization.
    pub evaluations: usize,
    /// Whether the optimizer reported convergence.
    pub converged: bool,
}

/// Drives the variational loop for one problem instance on one backend.
///
/// Each optimizer evaluation builds a fresh circuit at the proposed
/// parameters, executes it, records the evaluation runtime, and scores the
/// histogram. The sequence is strictly serial — one in-flight job at a
/// time, as the backends meter usage per job.
pub struct QaoaDriver<O = Cobyla> {
    backend: Arc<dyn Backend>,
    problem: Problem,
    layers: usize,
    shots: u32,
    optimizer: O,
    runtimes: RefCell<Vec<f64>>,
}

impl QaoaDriver<Cobyla> {
    /// Create a driver with the default COBYLA optimizer.
    pub fn new(backend: Arc<dyn Backend>, problem: Problem) -> Self {
        Self::with_optimizer(backend, problem, Cobyla::new())
    }
}

impl<O: Optimizer> QaoaDriver<O> {
    /// Create a driver with an explicit optimizer.
    pub fn with_optimizer(backend: Arc<dyn Backend>, problem: Problem, optimizer: O) -> Self {
        Self {
            backend,
            problem,
            layers: 1,
            shots: 2048,
            optimizer,
            runtimes: RefCell::new(vec![]),
        }
    }

    /// Set the number of QAOA layers.
    pub fn with_layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// Set the number of shots per evaluation.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// One optimizer evaluation: build, execute, record runtime, score.
    async fn execute_circ(&self, flat: Vec<f64>) -> QaoaResult<f64> {
        let params = QaoaParams::from_flat(&flat)?;
        let circuit = self.problem.build_circuit(&params)?;

        let started = Instant::now();
        let job_id = self.backend.submit(&circuit, self.shots).await?;
        let result = self.backend.wait(&job_id).await?;
        let wall_ms = started.elapsed().as_secs_f64() * 1e3;

        // Prefer the backend's own execution time (remote queues dominate
        // wall clock there); local backends report nothing and get the
        // measured delta.
        let runtime = result.execution_time_ms.unwrap_or(wall_ms);
        self.runtimes.borrow_mut().push(runtime);

        let expectation = self.problem.expectation(&result.counts)?;
        debug!(
            job = %job_id,
            runtime_ms = runtime,
            expectation,
            "evaluation complete"
        );
        Ok(expectation)
    }

    /// Run the full optimization and report the best sampled solutions.
    pub async fn run(&self) -> QaoaResult<QaoaRun> {
        info!(
            problem = self.problem.name(),
            backend = self.backend.name(),
            nodes = self.problem.n_nodes(),
            qubits = self.problem.num_qubits(),
            measured = self.problem.num_measured(),
            layers = self.layers,
            shots = self.shots,
            "starting QAOA run"
        );

        self.runtimes.borrow_mut().clear();

        let initial = QaoaParams::uniform_start(self.layers);
        let opt = self
            .optimizer
            .minimize(|flat| self.execute_circ(flat), initial)
            .await?;

        // Sample once more at the optimized parameters. This readout run is
        // not part of the optimization, so its runtime is not recorded.
        let params = QaoaParams::from_flat(&opt.optimal_params)?;
        let circuit = self.problem.build_circuit(&params)?;
        let job_id = self.backend.submit(&circuit, self.shots).await?;
        let result = self.backend.wait(&job_id).await?;

        let best_bitstrings: Vec<String> = result
            .counts
            .sorted_by_count()
            .into_iter()
            .take(TOP_RESULTS)
            .map(|(bits, _)| bits)
            .collect();

        info!(
            evaluations = opt.num_evaluations,
            expectation = opt.optimal_value,
            converged = opt.converged,
            "QAOA run finished"
        );

        Ok(QaoaRun {
            best_bitstrings,
            runtimes_ms: self.runtimes.borrow().clone(),
            optimal_params: opt.optimal_params,
            expectation: opt.optimal_value,
            iterations: opt.num_iterations,
            evaluations: opt.num_evaluations,
            converged: opt.converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sunna_hal::{
        BackendAvailability, Capabilities, Counts, ExecutionResult, HalResult, JobId, JobStatus,
        ValidationResult,
    };
    use sunna_ir::Circuit;

    use crate::problems::Graph;

    /// Backend that always reports the alternating ring assignment.
    struct FixedBackend {
        caps: Capabilities,
        key: String,
        reported_ms: Option<f64>,
    }

    impl FixedBackend {
        fn new(key: &str, reported_ms: Option<f64>) -> Self {
            Self {
                caps: Capabilities::simulator(16),
                key: key.to_string(),
                reported_ms,
            }
        }
    }

    #[async_trait]
    impl Backend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn availability(&self) -> HalResult<BackendAvailability> {
            Ok(BackendAvailability::always_available())
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::new("fixed-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            Ok(JobStatus::Completed)
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let mut counts = Counts::new();
            counts.insert(self.key.clone(), 2048);
            let mut result = ExecutionResult::new(counts, 2048);
            if let Some(ms) = self.reported_ms {
                result = result.with_execution_time(ms);
            }
            Ok(result)
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_records_runtime_per_evaluation() {
        let backend = Arc::new(FixedBackend::new("0101", Some(3.5)));
        let driver = QaoaDriver::with_optimizer(
            backend,
            Problem::MaxCut(Graph::ring(4)),
            Cobyla::new().with_maxiter(5),
        );

        let run = driver.run().await.unwrap();

        // one runtime per optimizer evaluation, none for the final readout
        assert_eq!(run.runtimes_ms.len(), run.evaluations);
        assert!(run.runtimes_ms.iter().all(|&ms| ms == 3.5));
        assert_eq!(run.best_bitstrings, vec!["0101".to_string()]);
        // the fixed histogram always cuts all four edges
        assert_eq!(run.expectation, -4.0);
    }

    #[tokio::test]
    async fn test_run_falls_back_to_wall_clock() {
        let backend = Arc::new(FixedBackend::new("0101", None));
        let driver = QaoaDriver::with_optimizer(
            backend,
            Problem::MaxCut(Graph::ring(4)),
            Cobyla::new().with_maxiter(3),
        );

        let run = driver.run().await.unwrap();
        assert!(run.runtimes_ms.iter().all(|&ms| ms >= 0.0));
    }
}
