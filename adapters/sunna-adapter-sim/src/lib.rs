//! Sunna Local Statevector Simulator
//!
//! A local quantum simulator backend for testing, development, and the
//! local legs of the benchmark matrix. Uses dense statevector simulation:
//! exact evolution, then `shots` samples from the final distribution.
//!
//! # Features
//!
//! - **Exact evolution**: full statevector representation
//! - **All native gates**: everything `sunna-ir` can express
//! - **Measured-register histograms**: keys cover the measured classical
//!   bits only, so circuits with ancillas produce evaluator-width keys
//!
//! # Limits
//!
//! Memory doubles per qubit: ~16 MB at 20 qubits, ~512 MB at 25. The
//! backend refuses circuits beyond its configured qubit cap.
//!
//! # Example
//!
//! ```ignore
//! use sunna_adapter_sim::SimulatorBackend;
//! use sunna_hal::Backend;
//!
//! let backend = SimulatorBackend::new();
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("{:?}", result.counts);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
