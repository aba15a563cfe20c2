//! Problem definitions binding instances to builders and evaluators.

pub mod graph;
pub mod tsp;

pub use graph::Graph;
pub use tsp::TspInstance;

use sunna_hal::Counts;
use sunna_ir::{Circuit, IrResult};

use crate::circuits;
use crate::error::QaoaResult;
use crate::expectation;
use crate::params::QaoaParams;

/// A benchmark problem instance.
///
/// Binds a problem kind to its graph data, circuit builder, and
/// expectation evaluator, so the optimization driver is generic over all
/// three.
#[derive(Debug, Clone)]
pub enum Problem {
    /// Max-Cut over an undirected graph.
    MaxCut(Graph),
    /// Traveling Salesman in the one-hot permutation encoding.
    Tsp(TspInstance),
    /// Dominating Set over an undirected graph.
    Dsp(Graph),
}

impl Problem {
    /// Short problem name, as used in persisted run ids.
    pub fn name(&self) -> &'static str {
        match self {
            Problem::MaxCut(_) => "maxcut",
            Problem::Tsp(_) => "tsp",
            Problem::Dsp(_) => "dsp",
        }
    }

    /// Number of nodes in the underlying instance.
    pub fn n_nodes(&self) -> usize {
        match self {
            Problem::MaxCut(g) | Problem::Dsp(g) => g.n_nodes,
            Problem::Tsp(t) => t.n_nodes,
        }
    }

    /// Total qubits the circuit will use.
    pub fn num_qubits(&self) -> usize {
        match self {
            Problem::MaxCut(g) => g.n_nodes,
            Problem::Tsp(t) => t.num_qubits(),
            // vertex qubits + OR ancillas, the last of which is the control
            Problem::Dsp(g) => g.n_nodes + g.max_neighborhood(),
        }
    }

    /// Number of measured bits (histogram key width).
    pub fn num_measured(&self) -> usize {
        match self {
            Problem::MaxCut(g) | Problem::Dsp(g) => g.n_nodes,
            Problem::Tsp(t) => t.num_qubits(),
        }
    }

    /// Build the QAOA circuit for this instance at the given parameters.
    pub fn build_circuit(&self, params: &QaoaParams) -> IrResult<Circuit> {
        match self {
            Problem::MaxCut(g) => circuits::maxcut_circuit(g, params),
            Problem::Tsp(t) => circuits::tsp_circuit(t, params),
            Problem::Dsp(g) => circuits::dsp_circuit(g, params),
        }
    }

    /// Evaluate the (negated) expectation over a measurement histogram.
    pub fn expectation(&self, counts: &Counts) -> QaoaResult<f64> {
        match self {
            Problem::MaxCut(g) => expectation::maxcut_expectation(counts, g),
            Problem::Tsp(t) => expectation::tsp_expectation(counts, t),
            Problem::Dsp(g) => expectation::dsp_expectation(counts, g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_sizes() {
        let ring = Graph::ring(4);
        assert_eq!(Problem::MaxCut(ring.clone()).num_qubits(), 4);
        assert_eq!(Problem::MaxCut(ring.clone()).num_measured(), 4);

        let tsp = TspInstance::from_graph(&Graph::ring(3), 1);
        assert_eq!(Problem::Tsp(tsp).num_qubits(), 9);

        // ring: every closed neighborhood has 3 vertices
        assert_eq!(Problem::Dsp(ring).num_qubits(), 4 + 3);
    }

    #[test]
    fn test_problem_names() {
        assert_eq!(Problem::MaxCut(Graph::ring(4)).name(), "maxcut");
        assert_eq!(Problem::Dsp(Graph::ring(4)).name(), "dsp");
    }
}
