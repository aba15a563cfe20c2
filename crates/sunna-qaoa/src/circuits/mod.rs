//! Problem-specific QAOA circuit builders.

mod dsp;
mod maxcut;
mod tsp;

pub use dsp::dsp_circuit;
pub use maxcut::maxcut_circuit;
pub use tsp::tsp_circuit;
