//! Behavioral checks of the gate-library decompositions against exact
//! statevector evolution, plus end-to-end QAOA runs on the simulator.

use std::f64::consts::PI;
use std::sync::Arc;

use num_complex::Complex64;

use sunna_adapter_sim::{SimulatorBackend, Statevector};
use sunna_ir::{Circuit, QubitId, decompose};
use sunna_qaoa::{Cobyla, Graph, Problem, QaoaDriver, TspInstance};

fn evolve(circuit: &Circuit) -> Statevector {
    let mut sv = Statevector::new(circuit.num_qubits());
    for inst in circuit.instructions() {
        sv.apply(inst);
    }
    sv
}

fn approx(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < 1e-9
}

#[test]
fn rzz_equals_zz_rotation() {
    // On |++⟩ the ZZ rotation phases even-parity states by e^{−iθ/2} and
    // odd-parity states by e^{+iθ/2}.
    let theta = 0.731;
    let mut circuit = Circuit::with_size("rzz", 2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    decompose::rzz(&mut circuit, theta, QubitId(0), QubitId(1)).unwrap();

    let sv = evolve(&circuit);
    let even = Complex64::from_polar(0.5, -theta / 2.0);
    let odd = Complex64::from_polar(0.5, theta / 2.0);

    assert!(approx(sv.amplitudes()[0b00], even));
    assert!(approx(sv.amplitudes()[0b11], even));
    assert!(approx(sv.amplitudes()[0b01], odd));
    assert!(approx(sv.amplitudes()[0b10], odd));
}

#[test]
fn rxx_matches_basis_changed_rzz() {
    // RXX(θ) on |00⟩: cos(θ/2)|00⟩ − i·sin(θ/2)|11⟩.
    let theta = 1.234;
    let mut circuit = Circuit::with_size("rxx", 2, 0);
    decompose::rxx(&mut circuit, theta, QubitId(0), QubitId(1)).unwrap();

    let sv = evolve(&circuit);
    assert!(approx(
        sv.amplitudes()[0b00],
        Complex64::new((theta / 2.0).cos(), 0.0)
    ));
    assert!(approx(
        sv.amplitudes()[0b11],
        Complex64::new(0.0, -(theta / 2.0).sin())
    ));
    assert!(sv.amplitudes()[0b01].norm() < 1e-9);
    assert!(sv.amplitudes()[0b10].norm() < 1e-9);
}

#[test]
fn toffoli_decomposition_flips_on_both_controls() {
    for (a, b) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        let mut circuit = Circuit::with_size("ccx", 3, 0);
        if a == 1 {
            circuit.x(QubitId(0)).unwrap();
        }
        if b == 1 {
            circuit.x(QubitId(1)).unwrap();
        }
        decompose::toffoli(&mut circuit, QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let sv = evolve(&circuit);
        let target = if a == 1 && b == 1 { 1 } else { 0 };
        let expected = a | (b << 1) | (target << 2);
        assert!(
            sv.probabilities()[expected] > 1.0 - 1e-9,
            "controls ({a},{b})"
        );
    }
}

#[test]
fn dicke_init_prepares_uniform_single_excitation() {
    let n = 4;
    let mut circuit = Circuit::with_size("dicke", n as u32, 0);
    let qubits: Vec<QubitId> = (0..n).map(QubitId::from).collect();
    decompose::dicke_init(&mut circuit, n, 1, &qubits).unwrap();

    let sv = evolve(&circuit);
    let probs = sv.probabilities();

    for (index, p) in probs.iter().enumerate() {
        if index.count_ones() == 1 {
            assert!((p - 1.0 / n as f64).abs() < 1e-9, "index {index}: {p}");
        } else {
            assert!(*p < 1e-9, "index {index}: {p}");
        }
    }
}

#[test]
fn or_nrz_restores_ancillas_and_kicks_on_or() {
    // Two inputs, one ancilla, one control. The control is prepared in
    // |+⟩ and read out in the X basis: a γ = π kick flips it to |1⟩
    // exactly when the OR of the inputs is true.
    for (a, b) in [(0u32, 0u32), (0, 1), (1, 0), (1, 1)] {
        let mut circuit = Circuit::with_size("or", 4, 0);
        if a == 1 {
            circuit.x(QubitId(0)).unwrap();
        }
        if b == 1 {
            circuit.x(QubitId(1)).unwrap();
        }
        circuit.h(QubitId(3)).unwrap();

        let qubits: Vec<QubitId> = (0u32..4).map(QubitId::from).collect();
        decompose::or_nrz(&mut circuit, 2, PI, &qubits).unwrap();

        circuit.h(QubitId(3)).unwrap();

        let sv = evolve(&circuit);
        let or = u32::from(a == 1 || b == 1);
        // inputs unchanged, ancilla (bit 2) restored to 0, control = OR
        let expected = (a | (b << 1) | (or << 3)) as usize;
        assert!(
            sv.probabilities()[expected] > 1.0 - 1e-9,
            "inputs ({a},{b})"
        );
    }
}

#[test]
fn or_nrz_three_inputs_cascade() {
    // Three inputs need two ancillas; register: 3 inputs + 2 ancillas + control.
    for input in 0usize..8 {
        let mut circuit = Circuit::with_size("or3", 6, 0);
        for bit in 0..3 {
            if (input >> bit) & 1 == 1 {
                circuit.x(QubitId(bit as u32)).unwrap();
            }
        }
        circuit.h(QubitId(5)).unwrap();

        let qubits: Vec<QubitId> = (0u32..6).map(QubitId::from).collect();
        decompose::or_nrz(&mut circuit, 3, PI, &qubits).unwrap();

        circuit.h(QubitId(5)).unwrap();

        let sv = evolve(&circuit);
        let or = usize::from(input != 0);
        let expected = input | (or << 5);
        assert!(
            sv.probabilities()[expected] > 1.0 - 1e-9,
            "input {input:03b}"
        );
    }
}

#[tokio::test]
async fn maxcut_qaoa_on_simulator() {
    let backend = Arc::new(SimulatorBackend::new());
    let driver = QaoaDriver::with_optimizer(
        backend,
        Problem::MaxCut(Graph::ring(4)),
        Cobyla::new().with_maxiter(10),
    )
    .with_shots(512);

    let run = driver.run().await.unwrap();

    assert_eq!(run.runtimes_ms.len(), run.evaluations);
    assert!(!run.best_bitstrings.is_empty());
    assert!(run.best_bitstrings.len() <= 8);
    assert!(run.expectation <= 0.0);
    assert!(run.expectation >= -4.0);
    for key in &run.best_bitstrings {
        assert_eq!(key.len(), 4);
    }
}

#[tokio::test]
async fn dsp_qaoa_on_simulator() {
    let backend = Arc::new(SimulatorBackend::new());
    let driver = QaoaDriver::with_optimizer(
        backend,
        Problem::Dsp(Graph::ring(4)),
        Cobyla::new().with_maxiter(4),
    )
    .with_shots(256);

    let run = driver.run().await.unwrap();

    // keys cover the vertex qubits only, not the ancillas
    for key in &run.best_bitstrings {
        assert_eq!(key.len(), 4);
    }
    assert!(run.expectation.is_finite());
}

#[tokio::test]
async fn tsp_qaoa_on_simulator() {
    let tsp = TspInstance::from_graph(&Graph::ring(3), 11);
    let backend = Arc::new(SimulatorBackend::new());
    let driver = QaoaDriver::with_optimizer(
        backend,
        Problem::Tsp(tsp),
        Cobyla::new().with_maxiter(2),
    )
    .with_shots(128);

    let run = driver.run().await.unwrap();

    for key in &run.best_bitstrings {
        assert_eq!(key.len(), 9);
    }
    assert!(run.expectation.is_finite());
}
