//! Undirected graph instances for Max-Cut and Dominating Set.

use serde::{Deserialize, Serialize};

/// An undirected, unweighted graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Number of nodes.
    pub n_nodes: usize,
    /// Edges as (`node_a`, `node_b`) index pairs, `node_a` < `node_b`.
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create a new graph from an edge list.
    pub fn new(n_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { n_nodes, edges }
    }

    /// Create an n-node ring.
    pub fn ring(n: usize) -> Self {
        Self::new(n, (0..n).map(|i| (i, (i + 1) % n)).collect())
    }

    /// Create an n-node complete graph.
    pub fn complete(n: usize) -> Self {
        let mut edges = vec![];
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        Self::new(n, edges)
    }

    /// Create a circulant graph: node i links to i ± o for each offset o.
    ///
    /// With offsets `[1, 2]` this is the 4-regular benchmark family,
    /// defined for every n ≥ 5 including odd sizes.
    pub fn circulant(n: usize, offsets: &[usize]) -> Self {
        let mut edges = std::collections::BTreeSet::new();
        for i in 0..n {
            for &o in offsets {
                let j = (i + o) % n;
                if i != j {
                    edges.insert((i.min(j), i.max(j)));
                }
            }
        }
        Self::new(n, edges.into_iter().collect())
    }

    /// Create a random graph with given edge probability.
    ///
    /// Uses a simple LCG so instances are reproducible from the seed.
    pub fn random(n_nodes: usize, edge_probability: f64, seed: u64) -> Self {
        let mut state = seed;
        let mut rand = || {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            ((state >> 16) & 0x7fff) as f64 / 32768.0
        };

        let mut edges = vec![];
        for i in 0..n_nodes {
            for j in (i + 1)..n_nodes {
                if rand() < edge_probability {
                    edges.push((i, j));
                }
            }
        }

        Self::new(n_nodes, edges)
    }

    /// Get the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Calculate the cut value for a given node assignment.
    ///
    /// `assignment[i] = true` means node i is in set S.
    pub fn cut_value(&self, assignment: &[bool]) -> usize {
        self.edges
            .iter()
            .filter(|(a, b)| assignment[*a] != assignment[*b])
            .count()
    }

    /// Calculate the cut value from a bitstring index (bit i = node i).
    pub fn cut_value_from_index(&self, bitstring: usize) -> usize {
        let assignment: Vec<bool> = (0..self.n_nodes)
            .map(|i| (bitstring >> i) & 1 == 1)
            .collect();
        self.cut_value(&assignment)
    }

    /// Closed neighborhood of every vertex: the vertex itself followed by
    /// its adjacent vertices. This is the "connection" list the Dominating
    /// Set circuit and evaluator share.
    pub fn neighborhoods(&self) -> Vec<Vec<usize>> {
        let mut connections: Vec<Vec<usize>> = (0..self.n_nodes).map(|i| vec![i]).collect();
        for &(a, b) in &self.edges {
            connections[a].push(b);
            connections[b].push(a);
        }
        connections
    }

    /// Size of the largest closed neighborhood.
    pub fn max_neighborhood(&self) -> usize {
        self.neighborhoods()
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges):",
            self.n_nodes,
            self.edges.len()
        )?;
        for (a, b) in &self.edges {
            writeln!(f, "  {a} -- {b}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_graph() {
        let g = Graph::ring(4);
        assert_eq!(g.n_nodes, 4);
        assert_eq!(g.num_edges(), 4);
    }

    #[test]
    fn test_cut_value() {
        let g = Graph::ring(4);

        // All in same set: cut = 0
        assert_eq!(g.cut_value(&[true, true, true, true]), 0);

        // Alternating: cut = 4 (all edges cut)
        assert_eq!(g.cut_value(&[true, false, true, false]), 4);

        // Half-half: cut = 2
        assert_eq!(g.cut_value(&[true, true, false, false]), 2);
    }

    #[test]
    fn test_circulant_is_regular() {
        let g = Graph::circulant(7, &[1, 2]);
        let mut degree = vec![0usize; 7];
        for (a, b) in &g.edges {
            degree[*a] += 1;
            degree[*b] += 1;
        }
        assert!(degree.iter().all(|&d| d == 4));
    }

    #[test]
    fn test_neighborhoods() {
        let g = Graph::ring(4);
        let cons = g.neighborhoods();
        assert_eq!(cons.len(), 4);
        assert_eq!(cons[0], vec![0, 1, 3]);
        assert_eq!(g.max_neighborhood(), 3);
    }

    #[test]
    fn test_random_graph_reproducible() {
        let a = Graph::random(8, 0.5, 42);
        let b = Graph::random(8, 0.5, 42);
        assert_eq!(a, b);
    }
}
