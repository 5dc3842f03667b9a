//! qcut Max-Cut solvers
//!
//! Three ways to partition the nodes of a weighted undirected graph so that
//! the total weight of edges crossing the partition is maximal:
//!
//! - **Exhaustive search** over all `2^n` assignments ([`Graph::brute_force_optimum`])
//! - **QUBO** formulation sampled by an annealer ([`solve_maxcut_qubo`])
//! - **QAOA**, a variational circuit tuned by a derivative-free optimizer
//!   against an injected execution [`Backend`](qcut_hal::Backend) ([`solve_maxcut`])
//!
//! Cut values follow the minimization convention: an assignment that cuts
//! edges of total weight `W` scores `-W`.
//!
//! # Bit order
//!
//! Character `i` of a [`Bitstring`] is the side of node `i`. Backends report
//! outcomes with the highest classical bit first; [`expectation::to_node_order`]
//! is the single conversion point.
//!
//! # Example
//!
//! ```rust
//! use qcut_adapter_sim::SimulatorBackend;
//! use qcut_core::{Graph, solve_maxcut};
//!
//! let graph = Graph::single_edge();
//! let backend = SimulatorBackend::new().with_seed(7);
//!
//! let solution = solve_maxcut(&graph, 1, &backend).unwrap();
//! assert_eq!(solution.len(), 2);
//!
//! // Exact answer for comparison
//! assert_eq!(graph.cut_value(&graph.brute_force_optimum()), -1.0);
//! ```

pub mod circuits;
pub mod config;
pub mod error;
pub mod expectation;
pub mod optimizers;
pub mod problems;
pub mod qubo;
pub mod runners;

use qcut_hal::Backend;

pub use circuits::{QaoaParameters, build_circuit};
pub use config::{ConfigError, QcutConfig};
pub use error::{QcutError, QcutResult};
pub use expectation::{NodeDistribution, expected_cut, most_frequent};
pub use optimizers::{Cobyla, OptimizationResult, Optimizer, OptimizerKind, Spsa};
pub use problems::{Bitstring, Graph, GraphError};
pub use qubo::{Qubo, QuboSampler, SimulatedAnnealer, solve_maxcut_qubo};
pub use runners::{QaoaResult, QaoaRunner};

/// Run QAOA at `depth` on `backend` and return the most frequent assignment.
pub fn solve_maxcut(graph: &Graph, depth: usize, backend: &dyn Backend) -> QcutResult<Bitstring> {
    QaoaRunner::new(backend)
        .optimize(graph, depth)
        .map(|result| result.solution)
}
