//! Sunna Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Sunna. Circuits are ordered instruction lists built through
//! the high-level [`Circuit`] API and serialized to the target kernel
//! grammar only at the boundary with the external compiler (`sunna-xasm`).
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`Gate`] for the native gate set (H, X, CX, Rx, Ry, Rz, …)
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Decompositions**: [`decompose`] — composite operations (RXX, RZZ,
//!   Toffoli, Dicke-state preparation, reversible OR) expressed as native
//!   gate sequences
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use sunna_ir::{Circuit, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```

pub mod circuit;
pub mod decompose;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
