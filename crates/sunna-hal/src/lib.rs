//! Sunna Hardware Abstraction Layer
//!
//! A unified interface for the quantum backends the benchmark suite runs
//! against: the local statevector simulator and the remote IBM and IonQ
//! services.
//!
//! # Overview
//!
//! - A common [`Backend`] trait covering the job lifecycle: introspection,
//!   validation, submission, status polling, result retrieval, cancellation
//! - [`Capabilities`] describing qubit counts, gate sets, and shot limits
//! - [`Counts`] / [`ExecutionResult`] for measurement histograms, including
//!   the backend-reported execution time the benchmark driver records
//! - [`BackendConfig`] as the explicit credential/configuration object —
//!   adapters take their endpoint and token here (or from an environment
//!   variable); there is no process-wide provider state
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use sunna_hal::Backend;
//! use sunna_adapter_sim::SimulatorBackend;
//! use sunna_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let mut circuit = Circuit::with_size("bell", 2, 2);
//!     // … build …
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Bitstring convention
//!
//! Histogram keys are strings over the *measured classical bits*:
//! character `i` of a key is classical bit `i`, leftmost first. Every
//! adapter normalizes to this convention so evaluators never reorder keys.

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, ValidationResult};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
