//! Traveling Salesman QAOA circuit.

use std::f64::consts::PI;

use sunna_ir::{Circuit, ClbitId, IrResult, QubitId, decompose};

use crate::params::QaoaParams;
use crate::problems::TspInstance;

/// Penalty weight of the row/column exclusivity RZZ terms, scaled by γ.
/// A fixed constraint-penalty strength, not derived from the angle.
const EXCLUSIVITY_WEIGHT: f64 = 20.0;

/// Build the TSP QAOA circuit in the one-hot permutation encoding.
///
/// Qubit `i·n + j` means "city i visited at step j". Each row block is
/// prepared as a single-excitation Dicke state so rows start as valid
/// one-hot vectors. The cost layer applies distance-weighted Rz per qubit
/// and RZZ exclusivity penalties on transposed index pairs; the mixer
/// applies RXX/RYY on adjacent columns within each row, which approximately
/// preserves the one-hot constraint.
pub fn tsp_circuit(tsp: &TspInstance, params: &QaoaParams) -> IrResult<Circuit> {
    let v = tsp.n_nodes;
    let num_qubits = v * v;
    let mut circuit = Circuit::with_size("qaoa_tsp", num_qubits as u32, num_qubits as u32);

    // Initial state: one excitation per row block
    for row in 0..v {
        let block: Vec<QubitId> = (row * v..(row + 1) * v).map(QubitId::from).collect();
        decompose::dicke_init(&mut circuit, v, 1, &block)?;
    }

    for layer in 0..params.layers() {
        let gamma = params.gamma[layer];
        let beta = params.beta[layer];

        // Cost: distance-weighted phases
        for i in 0..num_qubits {
            circuit.rz(gamma * tsp.distance[i] / (2.0 * PI), QubitId::from(i))?;
        }

        // Cost: exclusivity penalties on (i at step j) vs (j at step i)
        for i in 0..v {
            for j in 0..i {
                decompose::rzz(
                    &mut circuit,
                    EXCLUSIVITY_WEIGHT * gamma / PI,
                    QubitId::from(j + i * v),
                    QubitId::from(i + j * v),
                )?;
            }
        }

        // Mixer: adjacent-column XX+YY exchange within each row
        for row in 0..v {
            for col in 0..v - 1 {
                decompose::rxx(
                    &mut circuit,
                    -beta,
                    QubitId::from(row * v + col),
                    QubitId::from(row * v + col + 1),
                )?;
            }
            for col in 0..v - 1 {
                decompose::ryy(
                    &mut circuit,
                    -beta,
                    QubitId::from(row * v + col),
                    QubitId::from(row * v + col + 1),
                )?;
            }
        }
    }

    for n in 0..num_qubits {
        circuit.measure(QubitId::from(n), ClbitId::from(n))?;
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::Graph;

    fn params(p: usize) -> QaoaParams {
        QaoaParams::from_flat(&QaoaParams::uniform_start(p)).unwrap()
    }

    #[test]
    fn test_qubit_count_is_squared() {
        let tsp = TspInstance::from_graph(&Graph::ring(3), 1);
        let circuit = tsp_circuit(&tsp, &params(1)).unwrap();
        assert_eq!(circuit.num_qubits(), 9);
        assert_eq!(circuit.num_measurements(), 9);
    }

    #[test]
    fn test_layer_gate_counts() {
        let tsp = TspInstance::from_graph(&Graph::ring(3), 1);
        let c1 = tsp_circuit(&tsp, &params(1)).unwrap();
        let c2 = tsp_circuit(&tsp, &params(2)).unwrap();

        // init: 3 row blocks × 11 Dicke gates
        // per layer: 9 Rz + 3 rzz blocks × 3 + 3 rows × (2 rxx + 2 ryy) × 7
        let init = 3 * 11;
        let per_layer = 9 + 9 + 84;
        assert_eq!(c1.num_gates(), init + per_layer);
        assert_eq!(c2.num_gates(), init + 2 * per_layer);
    }

    #[test]
    fn test_four_city_instance_builds() {
        let tsp = TspInstance::from_graph(&Graph::ring(4), 1);
        let circuit = tsp_circuit(&tsp, &params(1)).unwrap();
        assert_eq!(circuit.num_qubits(), 16);
    }
}
