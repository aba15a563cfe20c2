//! XASM kernel serializer.
//!
//! Serializes a [`sunna_ir::Circuit`] into the textual kernel grammar the
//! external compiler consumes. The format is a wire format: downstream
//! services compile the text as-is, so the emitter reproduces it exactly —
//! statement syntax, the `; \n` terminators, the kernel wrapper
//! `__qpu__ void name(qbit q){  \n` … `}` — and nothing in this workspace
//! ever parses it back.
//!
//! ```rust
//! use sunna_ir::{Circuit, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! let kernel = sunna_xasm::emit(&circuit);
//! assert!(kernel.starts_with("__qpu__ void bell(qbit q){  \n"));
//! assert!(kernel.ends_with("}"));
//! ```

mod emitter;

pub use emitter::emit;
