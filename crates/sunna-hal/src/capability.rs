//! Backend capability introspection.
//!
//! Describes what a backend can do: qubit count, supported gates, shot
//! limits. Adapters cache one of these at construction; `validate()` and
//! the benchmark's backend routing read it.

use serde::{Deserialize, Serialize};

/// Hardware capabilities of a quantum backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate names, in the target's own spelling.
    pub basis_gates: Vec<String>,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Create capabilities for the local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            basis_gates: native_gate_names(),
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    /// Create capabilities for an IBM device.
    ///
    /// Placeholder until the adapter has fetched the device configuration;
    /// the qubit count is the caller's best knowledge of the target.
    pub fn ibm(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            basis_gates: native_gate_names(),
            max_shots: 100_000,
            is_simulator: false,
        }
    }

    /// Create capabilities for an IonQ device.
    pub fn ionq(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            basis_gates: native_gate_names(),
            max_shots: 10_000,
            is_simulator: false,
        }
    }

    /// Check whether a gate name is in the basis set.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.basis_gates.iter().any(|g| g == name)
    }
}

/// The native gate vocabulary every backend in this suite accepts.
fn native_gate_names() -> Vec<String> {
    ["I", "X", "Y", "Z", "H", "S", "Sdg", "Rx", "Ry", "Rz", "CX", "CZ", "CRZ", "Swap"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(25);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 25);
        assert!(caps.supports_gate("CRZ"));
        assert!(!caps.supports_gate("Toffoli"));
    }

    #[test]
    fn test_hardware_capabilities() {
        let caps = Capabilities::ionq("ionq", 11);
        assert!(!caps.is_simulator);
        assert_eq!(caps.max_shots, 10_000);
    }
}
