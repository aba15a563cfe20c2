//! Native gate set.

use serde::{Deserialize, Serialize};

/// A gate from the native set.
///
/// This is deliberately the minimal vocabulary the external compiler
/// accepts. Composite operations (RXX, RZZ, Toffoli, controlled-Ry, …)
/// live in [`crate::decompose`] and expand into these gates. Rotation
/// angles are concrete: circuits are rebuilt with fresh parameters on
/// every optimizer evaluation, so there is nothing to bind late.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// Rotation around the X axis.
    Rx(f64),
    /// Rotation around the Y axis.
    Ry(f64),
    /// Rotation around the Z axis.
    Rz(f64),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled rotation around the Z axis.
    CRz(f64),
    /// SWAP gate.
    Swap,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "i",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::CX => "cx",
            Gate::CZ => "cz",
            Gate::CRz(_) => "crz",
            Gate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::I
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::Sdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_) => 1,
            Gate::CX | Gate::CZ | Gate::CRz(_) | Gate::Swap => 2,
        }
    }

    /// Get the rotation angle, if this is a rotation gate.
    #[inline]
    pub fn angle(&self) -> Option<f64> {
        match self {
            Gate::Rx(theta) | Gate::Ry(theta) | Gate::Rz(theta) | Gate::CRz(theta) => Some(*theta),
            _ => None,
        }
    }
}
