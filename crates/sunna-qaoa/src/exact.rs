//! Brute-force reference solvers.
//!
//! Enumeration over bitstrings (and permutation matrices for TSP), used to
//! score QAOA output quality. Feasible for the benchmark sizes only — the
//! quantum side exists precisely because these blow up.

use crate::problems::{Graph, TspInstance};

/// Encode an integer as a fixed-width bit vector, bit i of the result
/// being node i (index 0 first).
pub fn index_to_bits(n: usize, width: usize) -> Vec<u8> {
    (0..width).map(|i| ((n >> (width - 1 - i)) & 1) as u8).collect()
}

/// Decode a bit vector produced by [`index_to_bits`].
pub fn bits_to_index(bits: &[u8]) -> usize {
    bits.iter().fold(0, |acc, &b| (acc << 1) | b as usize)
}

/// All optimal Max-Cut assignments and the optimal cut value.
///
/// Character i of each returned bitstring is node i.
pub fn max_cut_solutions(graph: &Graph) -> (Vec<String>, f64) {
    assert!(graph.n_nodes <= 24, "brute force limited to 24 nodes");

    let mut best = 0.0f64;
    let mut solutions: Vec<String> = vec![];

    for n in 0..(1usize << graph.n_nodes) {
        let bits = index_to_bits(n, graph.n_nodes);
        let spins: Vec<f64> = bits
            .iter()
            .map(|&b| if b == 0 { -1.0 } else { 1.0 })
            .collect();

        let mut c = 0.0;
        for &(a, b) in &graph.edges {
            c += 0.5 * (1.0 - spins[a] * spins[b]);
        }

        if c >= best {
            if c > best {
                solutions.clear();
            }
            solutions.push(bits.iter().map(|b| char::from(b'0' + b)).collect());
            best = c;
        }
    }

    (solutions, best)
}

/// Dominating Set score of one assignment:
/// dominated neighborhoods + unselected vertices.
pub fn dsp_assignment_score(graph: &Graph, bits: &[u8]) -> usize {
    let t = graph
        .neighborhoods()
        .iter()
        .filter(|con| con.iter().any(|&k| bits[k] == 1))
        .count();
    let d = bits.iter().filter(|&&b| b == 0).count();
    t + d
}

/// Optimal Dominating Set score: max over assignments of
/// (dominated neighborhoods + unselected vertices).
pub fn dsp_solve(graph: &Graph) -> usize {
    assert!(graph.n_nodes <= 24, "brute force limited to 24 nodes");

    let mut best = 0;
    for n in 0..(1usize << graph.n_nodes) {
        let bits = index_to_bits(n, graph.n_nodes);
        best = best.max(dsp_assignment_score(graph, &bits));
    }

    best
}

/// All n×n one-hot permutation matrices (n! of them).
pub fn tsp_arrays(n: usize) -> Vec<Vec<Vec<u8>>> {
    permutations(n)
        .into_iter()
        .map(|perm| {
            let mut matrix = vec![vec![0u8; n]; n];
            for (row, &col) in perm.iter().enumerate() {
                matrix[row][col] = 1;
            }
            matrix
        })
        .collect()
}

/// Optimal TSP cost over all permutation matrices, with the flattened
/// bitstrings achieving it.
pub fn tsp_solve(tsp: &TspInstance) -> (f64, Vec<String>) {
    let v = tsp.n_nodes;

    let mut coupling = vec![];
    for i in 0..v {
        for j in 0..i {
            coupling.push((j, i));
        }
    }

    let mut best = f64::INFINITY;
    let mut solutions: Vec<String> = vec![];

    for matrix in tsp_arrays(v) {
        let mut cost = 0.0;
        for i in 0..v {
            for j in 0..v {
                cost += 0.5 * tsp.distance[i * v + j] * f64::from(matrix[i][j]);
            }
        }
        for &(j, i) in &coupling {
            cost += -5.0
                * (1.0 - 2.0 * f64::from(matrix[j][i]))
                * (1.0 - 2.0 * f64::from(matrix[i][j]));
        }

        if cost < best {
            solutions.clear();
        }
        if cost <= best {
            let flat: String = matrix
                .iter()
                .flatten()
                .map(|&b| char::from(b'0' + b))
                .collect();
            solutions.push(flat);
            best = cost;
        }
    }

    (best, solutions)
}

/// All permutations of `0..n` in lexicographic order.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut out = vec![];
    let mut current = vec![];
    let mut used = vec![false; n];
    permute_into(n, &mut current, &mut used, &mut out);
    out
}

fn permute_into(
    n: usize,
    current: &mut Vec<usize>,
    used: &mut Vec<bool>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == n {
        out.push(current.clone());
        return;
    }
    for i in 0..n {
        if !used[i] {
            used[i] = true;
            current.push(i);
            permute_into(n, current, used, out);
            current.pop();
            used[i] = false;
        }
    }
}
