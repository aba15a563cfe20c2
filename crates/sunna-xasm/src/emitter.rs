//! XASM emitter for serializing circuits.

use sunna_ir::{Circuit, Gate, Instruction, InstructionKind, QubitId};

/// Emit a circuit as XASM kernel source.
///
/// The circuit name becomes the kernel name. Every gate in the IR's native
/// set has an XASM spelling, so emission cannot fail.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit)
}

/// XASM emitter.
struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> String {
        // Kernel header. The two spaces before the newline are part of the
        // format consumed downstream; do not normalize.
        self.output
            .push_str(&format!("__qpu__ void {}(qbit q){{  \n", circuit.name()));

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }

        self.output.push('}');
        self.output.clone()
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate_name(gate);
                let qubits = self.emit_qubits(&instruction.qubits);
                match gate.angle() {
                    Some(theta) => {
                        self.statement(&format!("{name}({qubits}, {theta:.6})"));
                    }
                    None => {
                        self.statement(&format!("{name}({qubits})"));
                    }
                }
            }
            InstructionKind::Measure => {
                for q in &instruction.qubits {
                    self.statement(&format!("Measure(q[{}])", q.0));
                }
            }
        }
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|q| format!("q[{}]", q.0))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn statement(&mut self, body: &str) {
        self.output.push_str(body);
        self.output.push_str("; \n");
    }
}

/// XASM spelling for each native gate.
fn gate_name(gate: &Gate) -> &'static str {
    match gate {
        Gate::I => "I",
        Gate::X => "X",
        Gate::Y => "Y",
        Gate::Z => "Z",
        Gate::H => "H",
        Gate::S => "S",
        Gate::Sdg => "Sdg",
        Gate::Rx(_) => "Rx",
        Gate::Ry(_) => "Ry",
        Gate::Rz(_) => "Rz",
        Gate::CX => "CX",
        Gate::CZ => "CZ",
        Gate::CRz(_) => "CRZ",
        Gate::Swap => "Swap",
    }
}
