//! End-to-end tests: graph → circuit → simulator → optimizer → solution.

use std::collections::BTreeMap;

use proptest::prelude::*;
use qcut_adapter_sim::SimulatorBackend;
use qcut_core::expectation::{expected_cut, to_node_order};
use qcut_core::{
    Bitstring, Graph, OptimizerKind, Qubo, QaoaRunner, SimulatedAnnealer, build_circuit,
    solve_maxcut, solve_maxcut_qubo,
};
use qcut_hal::Backend;

fn is_single_edge_optimum(b: &Bitstring) -> bool {
    let s = b.to_string();
    s == "01" || s == "10"
}

// ============================================================================
// QAOA on the single-edge graph
// ============================================================================

#[test]
fn test_single_edge_solution_is_a_cut_for_most_seeds() {
    let graph = Graph::single_edge();
    let runs = 20;

    let hits = (0..runs)
        .filter(|&seed| {
            let backend = SimulatorBackend::new().with_seed(seed);
            let result = QaoaRunner::new(&backend)
                .with_shots(256)
                .with_seed(seed)
                .optimize(&graph, 1)
                .unwrap();
            is_single_edge_optimum(&result.solution)
        })
        .count();

    assert!(hits * 2 > runs as usize, "only {hits}/{runs} runs found the cut");
}

#[test]
fn test_single_edge_with_spsa() {
    let graph = Graph::single_edge();
    let backend = SimulatorBackend::new().with_seed(4);
    let result = QaoaRunner::new(&backend)
        .with_optimizer(OptimizerKind::Spsa)
        .with_seed(4)
        .optimize(&graph, 1)
        .unwrap();

    assert_eq!(result.solution.len(), 2);
    assert!(result.expected_cut >= -1.0 && result.expected_cut <= 0.0);
}

#[test]
fn test_solve_maxcut_entry_point() {
    let graph = Graph::triangle(1.0);
    let backend = SimulatorBackend::new().with_seed(12);
    let solution = solve_maxcut(&graph, 2, &backend).unwrap();
    assert_eq!(solution.len(), 3);
    assert!(graph.cut_value(&solution) >= -2.0);
}

// ============================================================================
// Simulator statistics agree with the circuit semantics
// ============================================================================

#[test]
fn test_zero_angles_give_uniform_expected_cut() {
    // γ = β = 0 leaves the uniform superposition; every edge is cut half the time.
    let graph = Graph::square_4();
    let backend = SimulatorBackend::new().with_seed(8);
    let circuit = build_circuit(&graph, &[0.0, 0.0]).unwrap();
    let result = backend.run(&circuit, 20_000).unwrap();
    let distribution = to_node_order(&result.counts, graph.num_nodes()).unwrap();

    let value = expected_cut(&graph, &distribution).unwrap();
    assert!((value + 2.0).abs() < 0.1, "expected about -2, got {value}");
}

#[test]
fn test_qaoa_beats_random_guessing_on_square() {
    let graph = Graph::square_4();
    let backend = SimulatorBackend::new().with_seed(21);
    let result = QaoaRunner::new(&backend)
        .with_shots(1024)
        .with_seed(21)
        .optimize(&graph, 1)
        .unwrap();

    // Uniform sampling averages -2; p = 1 reaches -3 in theory.
    assert!(result.expected_cut < -2.2, "got {}", result.expected_cut);
}

// ============================================================================
// QUBO path
// ============================================================================

#[test]
fn test_annealer_matches_brute_force_on_fixtures() {
    let annealer = SimulatedAnnealer::new().with_seed(1);
    for graph in [
        Graph::square_4(),
        Graph::complete_4(),
        Graph::triangle(2.0),
        Graph::ring(6),
    ] {
        let solution = solve_maxcut_qubo(&graph, &annealer, 10).unwrap();
        assert_eq!(-graph.cut_value(&solution), graph.max_cut_value(), "{graph}");
    }
}

// ============================================================================
// Properties
// ============================================================================

fn arb_graph() -> impl Strategy<Value = Graph> {
    (2_usize..=6).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, -3.0_f64..3.0), 0..=12).prop_map(move |raw| {
            let mut edges = BTreeMap::new();
            for (u, v, w) in raw {
                if u != v {
                    edges.entry((u.min(v), u.max(v))).or_insert(w);
                }
            }
            Graph::weighted(n, edges.into_iter().map(|((u, v), w)| (u, v, w)))
                .expect("generated edges are valid")
        })
    })
}

proptest! {
    /// QUBO energy equals the cut value for every assignment.
    #[test]
    fn test_qubo_energy_equals_cut_value(graph in arb_graph()) {
        let qubo = Qubo::from_graph(&graph);
        for x in graph.all_bitstrings() {
            prop_assert!((qubo.energy(&x) - graph.cut_value(&x)).abs() < 1e-9);
        }
    }

    /// Flipping every bit describes the same partition.
    #[test]
    fn test_cut_complement_symmetry(graph in arb_graph(), seed in any::<u64>()) {
        let n = graph.num_nodes();
        let x = Bitstring::from_index(seed % (1_u64 << n), n);
        prop_assert_eq!(graph.cut_value(&x), graph.cut_value(&x.complement()));
    }

    /// No assignment beats the exhaustive optimum.
    #[test]
    fn test_brute_force_is_minimal(graph in arb_graph()) {
        let best = graph.cut_value(&graph.brute_force_optimum());
        prop_assert!(graph.all_bitstrings().all(|x| graph.cut_value(&x) >= best));
    }

    /// Graphs without edges score zero everywhere.
    #[test]
    fn test_edgeless_graph_scores_zero(n in 0_usize..=8) {
        let graph = Graph::empty(n);
        prop_assert!(graph.all_bitstrings().all(|x| graph.cut_value(&x) == 0.0));
    }
}
