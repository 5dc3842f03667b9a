//! Max-Cut problem definition.
//!
//! Given a weighted graph G = (V, E), partition the vertices into two sets so
//! that the total weight of edges crossing the partition is maximal.
//!
//! Cut values are reported negated, `cut_value(b) = -Σ w(u,v)` over the edges
//! whose endpoints disagree in `b`, so every solver in this crate minimizes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bitstring::Bitstring;

/// Errors from graph construction and cut evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge names a node outside `0..n_nodes`.
    #[error("Edge ({u}, {v}) references a node outside 0..{n_nodes}")]
    EndpointOutOfRange {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Number of nodes in the graph.
        n_nodes: usize,
    },

    /// Self-loops never cross a cut.
    #[error("Self-loop on node {node}")]
    SelfLoop {
        /// The node.
        node: usize,
    },

    /// Weight is NaN or infinite.
    #[error("Edge ({u}, {v}) has non-finite weight {weight}")]
    NonFiniteWeight {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// The weight.
        weight: f64,
    },

    /// The same undirected edge was given twice.
    #[error("Duplicate edge ({u}, {v})")]
    DuplicateEdge {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },

    /// A bitstring does not have one digit per node.
    #[error("Bitstring has {got} digits but the graph has {expected} nodes")]
    BitstringLength {
        /// Number of nodes.
        expected: usize,
        /// Length of the bitstring.
        got: usize,
    },
}

/// Serialized shape of a graph: `{"n_nodes": 3, "edges": [[0, 1, 1.0]]}`.
#[derive(Deserialize)]
struct RawGraph {
    n_nodes: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        Graph::weighted(raw.n_nodes, raw.edges)
    }
}

/// A weighted undirected graph for the Max-Cut problem.
///
/// Nodes are `0..n_nodes` and map one-to-one onto qubits. Edges are stored
/// as `(u, v, weight)` with `u < v`, sorted by `(u, v)`; that sorted order is
/// the order in which the QAOA cost layer applies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    n_nodes: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl Graph {
    /// Create a graph with unit edge weights.
    pub fn new(
        n_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        Self::weighted(n_nodes, edges.into_iter().map(|(u, v)| (u, v, 1.0)))
    }

    /// Create a weighted graph.
    pub fn weighted(
        n_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, GraphError> {
        let mut canonical: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (a, b, weight) in edges {
            if a >= n_nodes || b >= n_nodes {
                return Err(GraphError::EndpointOutOfRange {
                    u: a,
                    v: b,
                    n_nodes,
                });
            }
            if a == b {
                return Err(GraphError::SelfLoop { node: a });
            }
            if !weight.is_finite() {
                return Err(GraphError::NonFiniteWeight { u: a, v: b, weight });
            }
            let key = (a.min(b), a.max(b));
            if canonical.insert(key, weight).is_some() {
                return Err(GraphError::DuplicateEdge { u: key.0, v: key.1 });
            }
        }

        Ok(Self {
            n_nodes,
            edges: canonical.into_iter().map(|((u, v), w)| (u, v, w)).collect(),
        })
    }

    /// A graph with nodes but no edges.
    pub fn empty(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            edges: vec![],
        }
    }

    /// Trusted edges, already canonical and duplicate-free once sorted.
    fn from_trusted(n_nodes: usize, edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let canonical: BTreeMap<(usize, usize), f64> = edges
            .into_iter()
            .map(|(a, b, w)| ((a.min(b), a.max(b)), w))
            .collect();
        Self {
            n_nodes,
            edges: canonical.into_iter().map(|((u, v), w)| (u, v, w)).collect(),
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    /// Two nodes joined by one unit edge.
    pub fn single_edge() -> Self {
        Self::from_trusted(2, [(0, 1, 1.0)])
    }

    /// Three nodes, every pair joined with weight `w`.
    pub fn triangle(w: f64) -> Self {
        Self::from_trusted(3, [(0, 1, w), (1, 2, w), (0, 2, w)])
    }

    /// Create a 4-node square graph.
    ///
    /// ```text
    /// 0 --- 1
    /// |     |
    /// 3 --- 2
    /// ```
    pub fn square_4() -> Self {
        Self::from_trusted(4, [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)])
    }

    /// Create a 4-node complete graph K4.
    pub fn complete_4() -> Self {
        Self::from_trusted(
            4,
            [
                (0, 1, 1.0),
                (0, 2, 1.0),
                (0, 3, 1.0),
                (1, 2, 1.0),
                (1, 3, 1.0),
                (2, 3, 1.0),
            ],
        )
    }

    /// Cycle over `n` nodes with unit weights.
    pub fn ring(n: usize) -> Self {
        if n < 2 {
            return Self::empty(n);
        }
        Self::from_trusted(n, (0..n).map(|i| (i, (i + 1) % n, 1.0)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edges as `(u, v, weight)` with `u < v`, sorted by `(u, v)`.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_, _, w)| w).sum()
    }

    // =========================================================================
    // Cut evaluation
    // =========================================================================

    /// Negated weighted cut of `assignment`.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is shorter than the node count. Use
    /// [`Graph::try_cut_value`] for unchecked input.
    pub fn cut_value(&self, assignment: &Bitstring) -> f64 {
        -self
            .edges
            .iter()
            .filter(|(u, v, _)| assignment[*u] != assignment[*v])
            .map(|(_, _, w)| w)
            .sum::<f64>()
    }

    /// [`Graph::cut_value`] after checking the bitstring width.
    pub fn try_cut_value(&self, assignment: &Bitstring) -> Result<f64, GraphError> {
        if assignment.len() != self.n_nodes {
            return Err(GraphError::BitstringLength {
                expected: self.n_nodes,
                got: assignment.len(),
            });
        }
        Ok(self.cut_value(assignment))
    }

    /// Every assignment of width `n`, in numeric order (`"00…0"` first).
    ///
    /// Each call starts a fresh enumeration. There are 2^n items, so this is
    /// only practical for small graphs.
    ///
    /// # Panics
    ///
    /// Panics if the graph has 64 or more nodes.
    pub fn all_bitstrings(&self) -> impl Iterator<Item = Bitstring> + Clone + use<> {
        let n = self.n_nodes;
        assert!(n < 64, "cannot enumerate assignments of {n} nodes");
        (0..(1u64 << n)).map(move |i| Bitstring::from_index(i, n))
    }

    /// The first assignment in enumeration order with minimal cut value.
    ///
    /// Exhaustive: O(2^n · |E|).
    pub fn brute_force_optimum(&self) -> Bitstring {
        let mut best: Option<(Bitstring, f64)> = None;
        for candidate in self.all_bitstrings() {
            let value = self.cut_value(&candidate);
            if best.as_ref().is_none_or(|(_, v)| value < *v) {
                best = Some((candidate, value));
            }
        }
        best.map_or_else(|| Bitstring::zeros(self.n_nodes), |(b, _)| b)
    }

    /// Weight of the maximum cut (a non-negative number for positive weights).
    pub fn max_cut_value(&self) -> f64 {
        -self.cut_value(&self.brute_force_optimum())
    }

    /// Achieved cut weight divided by the optimum; 1.0 when the optimum is 0.
    pub fn approximation_ratio(&self, assignment: &Bitstring) -> f64 {
        let optimum = self.max_cut_value();
        if optimum.abs() < f64::EPSILON {
            1.0
        } else {
            -self.cut_value(assignment) / optimum
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges, total weight {:.2}):",
            self.n_nodes,
            self.edges.len(),
            self.total_weight()
        )?;
        for (a, b, w) in &self.edges {
            if (*w - 1.0).abs() < 1e-10 {
                writeln!(f, "  {a} -- {b}")?;
            } else {
                writeln!(f, "  {a} -- {b} (weight: {w:.2})")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(s: &str) -> Bitstring {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_graph() {
        let g = Graph::square_4();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 4);
        assert_eq!(
            g.edges(),
            &[(0, 1, 1.0), (0, 3, 1.0), (1, 2, 1.0), (2, 3, 1.0)]
        );
    }

    #[test]
    fn test_cut_value() {
        let g = Graph::square_4();

        // All in same set: nothing cut
        assert_eq!(g.cut_value(&bs("1111")), 0.0);

        // Alternating: every edge cut
        assert_eq!(g.cut_value(&bs("1010")), -4.0);

        // Half-half: two edges cut
        assert_eq!(g.cut_value(&bs("1100")), -2.0);
    }

    #[test]
    fn test_zero_edge_graph() {
        let g = Graph::empty(3);
        for b in g.all_bitstrings() {
            assert_eq!(g.cut_value(&b), 0.0);
        }
    }

    #[test]
    fn test_all_bitstrings_order() {
        let g = Graph::empty(3);
        let all: Vec<String> = g.all_bitstrings().map(|b| b.to_string()).collect();
        assert_eq!(
            all,
            vec!["000", "001", "010", "011", "100", "101", "110", "111"]
        );

        // Restartable
        assert_eq!(g.all_bitstrings().count(), 8);
    }

    #[test]
    fn test_triangle_optimum() {
        let w = 2.5;
        let g = Graph::triangle(w);
        let best = g.brute_force_optimum();
        let (zeros, ones) = best.partition();
        assert_eq!(zeros.len().min(ones.len()), 1);
        assert_eq!(g.cut_value(&best), -2.0 * w);
    }

    #[test]
    fn test_brute_force_first_minimizer() {
        // Both "01" and "10" cut the edge; "01" comes first.
        assert_eq!(Graph::single_edge().brute_force_optimum(), bs("01"));
        assert_eq!(Graph::square_4().brute_force_optimum(), bs("0101"));
    }

    #[test]
    fn test_max_cut_and_ratio() {
        let g = Graph::square_4();
        assert_eq!(g.max_cut_value(), 4.0);
        assert_eq!(g.approximation_ratio(&bs("1100")), 0.5);
        assert_eq!(Graph::empty(2).approximation_ratio(&bs("01")), 1.0);
    }

    #[test]
    fn test_try_cut_value_checks_width() {
        let g = Graph::single_edge();
        assert_eq!(
            g.try_cut_value(&bs("011")),
            Err(GraphError::BitstringLength {
                expected: 2,
                got: 3
            })
        );
        assert_eq!(g.try_cut_value(&bs("10")), Ok(-1.0));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Graph::new(2, [(0, 2)]),
            Err(GraphError::EndpointOutOfRange { .. })
        ));
        assert!(matches!(
            Graph::new(2, [(1, 1)]),
            Err(GraphError::SelfLoop { node: 1 })
        ));
        assert!(matches!(
            Graph::weighted(2, [(0, 1, f64::NAN)]),
            Err(GraphError::NonFiniteWeight { .. })
        ));
        assert!(matches!(
            Graph::new(3, [(0, 1), (1, 0)]),
            Err(GraphError::DuplicateEdge { u: 0, v: 1 })
        ));
    }

    #[test]
    fn test_edges_canonical_and_sorted() {
        let g = Graph::weighted(4, [(3, 2, 0.5), (1, 0, 2.0), (2, 0, 1.0)]).unwrap();
        assert_eq!(g.edges(), &[(0, 1, 2.0), (0, 2, 1.0), (2, 3, 0.5)]);
    }

    #[test]
    fn test_json_shape() {
        let g: Graph =
            serde_json::from_str(r#"{"n_nodes": 3, "edges": [[2, 0, 1.5], [0, 1, 1.0]]}"#)
                .unwrap();
        assert_eq!(g.edges(), &[(0, 1, 1.0), (0, 2, 1.5)]);

        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"n_nodes":3,"edges":[[0,1,1.0],[0,2,1.5]]}"#);

        assert!(serde_json::from_str::<Graph>(r#"{"n_nodes": 1, "edges": [[0, 1, 1.0]]}"#).is_err());
    }

    #[test]
    fn test_display_lists_edges_and_total_weight() {
        let g = Graph::weighted(3, [(0, 1, 1.0), (1, 2, 2.5)]).unwrap();
        assert_eq!(g.total_weight(), 3.5);
        assert_eq!(
            g.to_string(),
            "Graph (3 nodes, 2 edges, total weight 3.50):\n  0 -- 1\n  1 -- 2 (weight: 2.50)\n"
        );
    }

    #[test]
    fn test_ring() {
        assert_eq!(Graph::ring(6).num_edges(), 6);
        assert_eq!(Graph::ring(2).num_edges(), 1);
        assert_eq!(Graph::ring(1).num_edges(), 0);
    }
}
