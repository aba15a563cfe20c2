//! Composite operations expressed as native gate sequences.
//!
//! The external compiler accepts only the native set (H, X, CX, Rx, Ry,
//! Rz, CRz, Measure). Everything richer a circuit builder needs — two-qubit
//! rotations, Toffoli, controlled-Ry, Dicke-state preparation, reversible
//! OR with phase kickback — is appended here as a fixed native sequence.
//!
//! Angle sign conventions are the caller's; these routines apply exactly
//! the angles they are given.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Controlled-Rz as a native sequence: Rz(θ/2) · CX · Rz(−θ/2) · CX.
pub fn crz(c: &mut Circuit, theta: f64, q0: QubitId, q1: QubitId) -> IrResult<()> {
    c.rz(theta / 2.0, q1)?;
    c.cx(q0, q1)?;
    c.rz(-theta / 2.0, q1)?;
    c.cx(q0, q1)?;
    Ok(())
}

/// XX rotation: Hadamard basis change around the ZZ core.
///
/// Equals exp(−iθ/2 X⊗X) up to global phase.
pub fn rxx(c: &mut Circuit, theta: f64, q0: QubitId, q1: QubitId) -> IrResult<()> {
    c.h(q0)?;
    c.h(q1)?;
    c.cx(q0, q1)?;
    c.rz(theta, q1)?;
    c.cx(q0, q1)?;
    c.h(q0)?;
    c.h(q1)?;
    Ok(())
}

/// YY rotation: Rx(±π/2) basis change around the ZZ core.
pub fn ryy(c: &mut Circuit, theta: f64, q0: QubitId, q1: QubitId) -> IrResult<()> {
    c.rx(FRAC_PI_2, q0)?;
    c.rx(FRAC_PI_2, q1)?;
    c.cx(q0, q1)?;
    c.rz(theta, q1)?;
    c.cx(q0, q1)?;
    c.rx(-FRAC_PI_2, q0)?;
    c.rx(-FRAC_PI_2, q1)?;
    Ok(())
}

/// ZZ rotation: CX · Rz(θ) · CX. Equals exp(−iθ/2 Z⊗Z).
pub fn rzz(c: &mut Circuit, theta: f64, q0: QubitId, q1: QubitId) -> IrResult<()> {
    c.cx(q0, q1)?;
    c.rz(theta, q1)?;
    c.cx(q0, q1)?;
    Ok(())
}

/// Toffoli (CCX) as the fixed 15-gate native sequence.
///
/// The phase gates are written as Rz(±π/4); the composite equals the
/// doubly-controlled NOT up to global phase.
pub fn toffoli(c: &mut Circuit, q0: QubitId, q1: QubitId, q2: QubitId) -> IrResult<()> {
    c.h(q2)?;
    c.cx(q1, q2)?;
    c.rz(-FRAC_PI_4, q2)?;
    c.cx(q0, q2)?;
    c.rz(FRAC_PI_4, q2)?;
    c.cx(q1, q2)?;
    c.rz(-FRAC_PI_4, q2)?;
    c.cx(q0, q2)?;
    c.rz(FRAC_PI_4, q1)?;
    c.rz(FRAC_PI_4, q2)?;
    c.cx(q0, q1)?;
    c.h(q2)?;
    c.rz(FRAC_PI_4, q0)?;
    c.rz(-FRAC_PI_4, q1)?;
    c.cx(q0, q1)?;
    Ok(())
}

/// Controlled-Ry: Ry(π/2−θ/2) on the target, CX from the control, inverse Ry.
pub fn cry(c: &mut Circuit, theta: f64, target: QubitId, control: QubitId) -> IrResult<()> {
    let half = FRAC_PI_2 - theta / 2.0;
    c.ry(half, target)?;
    c.cx(control, target)?;
    c.ry(-half, target)?;
    Ok(())
}

/// Doubly-controlled Ry via a Toffoli sandwich.
pub fn ccry(
    c: &mut Circuit,
    theta: f64,
    c0: QubitId,
    c1: QubitId,
    target: QubitId,
) -> IrResult<()> {
    toffoli(c, c0, c1, target)?;
    c.ry(-theta / 2.0, target)?;
    toffoli(c, c0, c1, target)?;
    c.ry(theta / 2.0, target)?;
    Ok(())
}

/// Split-and-cyclic-shift block of the Bärtschi–Eidenbenz Dicke cascade.
///
/// Acts on the first `n` entries of `qubits`; angles come from binomial
/// ratios: 2·acos(√(1/n)) for the head, 2·acos(√((n−m)/n)) per step.
pub fn scs(c: &mut Circuit, n: usize, k: usize, qubits: &[QubitId]) -> IrResult<()> {
    if n < 2 || k == 0 || k > n - 1 {
        return Err(IrError::InvalidDecomposition {
            name: "scs",
            reason: format!("n = {n}, k = {k}"),
        });
    }
    if qubits.len() < n {
        return Err(IrError::InvalidDecomposition {
            name: "scs",
            reason: format!("{} qubits for n = {n}", qubits.len()),
        });
    }

    c.cx(qubits[n - 2], qubits[n - 1])?;
    let theta = 2.0 * (1.0 / n as f64).sqrt().acos();
    cry(c, theta, qubits[n - 2], qubits[n - 1])?;
    c.cx(qubits[n - 2], qubits[n - 1])?;

    for m in 0..k - 1 {
        let control = n - 2 - m;
        c.cx(qubits[control - 1], qubits[n - 1])?;
        let theta = 2.0 * (((n - control) as f64) / n as f64).sqrt().acos();
        ccry(c, theta, qubits[n - 1], qubits[control], qubits[control - 1])?;
        c.cx(qubits[control - 1], qubits[n - 1])?;
    }

    Ok(())
}

/// Deterministic Dicke state preparation (Bärtschi & Eidenbenz, 2019).
///
/// Initializes the `k` trailing qubits to |1⟩, then applies the
/// split-and-cyclic-shift cascade, leaving the first `n` qubits in the
/// uniform superposition over all n-bit strings with exactly `k` ones.
/// Unoptimized version.
pub fn dicke_init(c: &mut Circuit, n: usize, k: usize, qubits: &[QubitId]) -> IrResult<()> {
    if k == 0 || k >= n || qubits.len() < n {
        return Err(IrError::InvalidDecomposition {
            name: "dicke_init",
            reason: format!("n = {n}, k = {k}, {} qubits", qubits.len()),
        });
    }

    for x in n - k..n {
        c.x(qubits[x])?;
    }

    for i in (k + 1..=n).rev() {
        scs(c, i, k, &qubits[..i])?;
    }
    for i in (2..=k).rev() {
        scs(c, i, i - 1, &qubits[..i])?;
    }

    Ok(())
}

/// Reversible OR of two qubits into `out`: X-conjugated Toffoli.
///
/// Flips `out` iff q0 ∨ q1. Self-inverse, so the mirror pass of
/// [`or_nrz`] restores every ancilla exactly.
pub fn or_2q(c: &mut Circuit, q0: QubitId, q1: QubitId, out: QubitId) -> IrResult<()> {
    c.x(q0)?;
    c.x(q1)?;
    toffoli(c, q0, q1, out)?;
    c.x(out)?;
    c.x(q0)?;
    c.x(q1)?;
    Ok(())
}

/// OR of `n` inputs with a controlled-Rz phase kick, then uncompute.
///
/// `qubits` holds `n` inputs, `n − 1` ancillas, and one final control
/// qubit, in that order (2n entries). The cascade ORs the inputs into the
/// ancillas, applies `crz(gamma)` from the last ancilla onto the control
/// qubit, and uncomputes with the mirror-image cascade.
pub fn or_nrz(c: &mut Circuit, n: usize, gamma: f64, qubits: &[QubitId]) -> IrResult<()> {
    if n == 0 || qubits.len() < 2 * n {
        return Err(IrError::InvalidDecomposition {
            name: "or_nrz",
            reason: format!("n = {n}, {} qubits", qubits.len()),
        });
    }

    // Single input: the OR is the input itself.
    if n == 1 {
        return crz(c, gamma, qubits[0], qubits[1]);
    }

    or_2q(c, qubits[0], qubits[1], qubits[n])?;
    for i in 2..n {
        or_2q(c, qubits[i], qubits[n + i - 2], qubits[n + i - 1])?;
    }

    crz(c, gamma, qubits[2 * n - 2], qubits[2 * n - 1])?;

    for i in (2..n).rev() {
        or_2q(c, qubits[i], qubits[n + i - 2], qubits[n + i - 1])?;
    }
    or_2q(c, qubits[0], qubits[1], qubits[n])?;

    Ok(())
}
