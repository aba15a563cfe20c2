//! Max-Cut QAOA circuit.

use sunna_ir::{Circuit, IrResult, QubitId};

use crate::params::QaoaParams;
use crate::problems::Graph;

/// Build the Max-Cut QAOA circuit.
///
/// One qubit per node. Uniform superposition, then per layer: a
/// CX–Ry(γ)–CX phase block per edge followed by an Rx(β) mixer on every
/// qubit. Every qubit is measured, one statement each.
pub fn maxcut_circuit(graph: &Graph, params: &QaoaParams) -> IrResult<Circuit> {
    let v = graph.n_nodes;
    let mut circuit = Circuit::with_size("qaoa_maxcut", v as u32, v as u32);

    // Initial state: |+⟩^v
    for n in 0..v {
        circuit.h(QubitId::from(n))?;
    }

    for layer in 0..params.layers() {
        let gamma = params.gamma[layer];
        let beta = params.beta[layer];

        // Cost blocks, one per edge
        for &(a, b) in &graph.edges {
            let (qa, qb) = (QubitId::from(a), QubitId::from(b));
            circuit.cx(qa, qb)?;
            circuit.ry(gamma, qb)?;
            circuit.cx(qa, qb)?;
        }

        // Mixer on every qubit
        for n in 0..v {
            circuit.rx(beta, QubitId::from(n))?;
        }
    }

    for n in 0..v {
        circuit.measure(QubitId::from(n), sunna_ir::ClbitId::from(n))?;
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(p: usize) -> QaoaParams {
        QaoaParams::from_flat(&QaoaParams::uniform_start(p)).unwrap()
    }

    #[test]
    fn test_gate_and_measure_counts() {
        let graph = Graph::ring(5);
        for p in 1..=3 {
            let circuit = maxcut_circuit(&graph, &params(p)).unwrap();
            let v = graph.n_nodes;
            let e = graph.num_edges();
            assert_eq!(circuit.num_gates(), v + p * (3 * e + v));
            assert_eq!(circuit.num_measurements(), v);
        }
    }

    #[test]
    fn test_qubit_count_is_node_count() {
        let graph = Graph::circulant(7, &[1, 2]);
        let circuit = maxcut_circuit(&graph, &params(1)).unwrap();
        assert_eq!(circuit.num_qubits(), 7);
        assert_eq!(circuit.num_clbits(), 7);
    }

    #[test]
    fn test_kernel_name() {
        let circuit = maxcut_circuit(&Graph::ring(4), &params(1)).unwrap();
        assert_eq!(circuit.name(), "qaoa_maxcut");
    }
}
