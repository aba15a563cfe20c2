//! QAOA core: problems, circuit builders, expectation evaluators, and the
//! classical optimization driver.
//!
//! The flow per benchmark point:
//!
//! ```text
//!   Problem ──→ QaoaDriver ──→ [ build circuit → execute on Backend →
//!                                evaluate expectation ] × optimizer steps
//!           ──→ best bitstrings + per-evaluation runtimes
//! ```
//!
//! Three problems are supported:
//!
//! - **Max-Cut** — one qubit per node, CX–Ry(γ)–CX cost terms per edge,
//!   Rx(β) mixer.
//! - **TSP** — one-hot permutation-matrix encoding (n² qubits), Dicke
//!   initial rows, distance-weighted Rz cost plus RZZ exclusivity
//!   penalties, RXX/RYY constraint-preserving mixer.
//! - **DSP** — vertex qubits plus OR ancillas and one control qubit,
//!   phase kicks per dominated neighborhood.
//!
//! Expectation values are negated so a minimizer ([`optimizer::Cobyla`])
//! maximizes the underlying objective. Brute-force reference solvers for
//! all three problems live in [`exact`].

pub mod circuits;
pub mod driver;
pub mod error;
pub mod exact;
pub mod expectation;
pub mod optimizer;
pub mod params;
pub mod problems;

pub use driver::{QaoaDriver, QaoaRun};
pub use error::{QaoaError, QaoaResult};
pub use optimizer::{Cobyla, OptimizationResult, Optimizer, Spsa};
pub use params::QaoaParams;
pub use problems::{Graph, Problem, TspInstance};
