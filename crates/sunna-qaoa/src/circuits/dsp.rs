//! Dominating Set QAOA circuit.

use sunna_ir::{Circuit, ClbitId, IrResult, QubitId, decompose};

use crate::params::QaoaParams;
use crate::problems::Graph;

/// Build the Dominating Set QAOA circuit.
///
/// Register layout: `v` vertex qubits, then OR ancillas, with the final
/// qubit doubling as the phase-kick control. Each vertex starts in |+⟩ and
/// is entangled with the control through an inverted controlled-Rz. Per
/// layer, every closed neighborhood gets an `or_nrz` phase kick (a vertex
/// is "dominated" when any qubit of its neighborhood is set), then an
/// Rx mixer acts on the vertex qubits only. Only vertex qubits are
/// measured.
pub fn dsp_circuit(graph: &Graph, params: &QaoaParams) -> IrResult<Circuit> {
    let v = graph.n_nodes;
    let connections = graph.neighborhoods();
    let ancillas = graph.max_neighborhood();
    let n = v + ancillas;
    let control = QubitId::from(n - 1);

    let mut circuit = Circuit::with_size("qaoa_dsp", n as u32, v as u32);

    let gamma0 = params.gamma[0];
    for vertex in 0..v {
        let q = QubitId::from(vertex);
        circuit.h(q)?;
        // inverted controlled-Rz against the control qubit
        circuit.x(q)?;
        circuit.crz(-gamma0, q, control)?;
        circuit.x(q)?;
    }

    // Every layer is driven by the final angle pair.
    let gamma = *params.gamma.last().expect("non-empty parameters");
    let beta = *params.beta.last().expect("non-empty parameters");

    for _layer in 0..params.layers() {
        for con in &connections {
            let c_len = con.len();
            let mut or_range: Vec<QubitId> = con.iter().map(|&q| QubitId::from(q)).collect();
            for k in 0..c_len.saturating_sub(1) {
                or_range.push(QubitId::from(v + k));
            }
            or_range.push(control);

            decompose::or_nrz(&mut circuit, c_len, gamma, &or_range)?;
        }

        for vertex in 0..v {
            circuit.rx(-2.0 * beta, QubitId::from(vertex))?;
        }
    }

    for vertex in 0..v {
        circuit.measure(QubitId::from(vertex), ClbitId::from(vertex))?;
    }

    Ok(circuit)
}
