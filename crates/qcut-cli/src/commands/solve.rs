//! Solve command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qcut_core::{
    Bitstring, Graph, QaoaResult, QaoaRunner, QcutConfig, SimulatedAnnealer, solve_maxcut_qubo,
};

use super::common::{
    MAX_BRUTE_FORCE_NODES, Method, create_simulator, create_spinner, format_partition,
    load_config, load_graph, print_distribution, print_result, print_section,
};

/// Exhaustive search, refused for graphs too large to enumerate.
pub fn solve_classical(graph: &Graph) -> Result<Bitstring> {
    if graph.num_nodes() > MAX_BRUTE_FORCE_NODES {
        anyhow::bail!(
            "Exhaustive search is limited to {MAX_BRUTE_FORCE_NODES} nodes (graph has {})",
            graph.num_nodes()
        );
    }
    Ok(graph.brute_force_optimum())
}

/// Simulated annealing on the QUBO formulation.
pub fn solve_qubo(graph: &Graph, config: &QcutConfig) -> Result<Bitstring> {
    let annealer = SimulatedAnnealer::from_config(&config.annealer);
    solve_maxcut_qubo(graph, &annealer, config.annealer.num_reads).context("QUBO sampling failed")
}

/// QAOA on the statevector simulator.
pub fn solve_qaoa(graph: &Graph, config: &QcutConfig) -> Result<QaoaResult> {
    let backend = create_simulator(config);
    let runner = QaoaRunner::from_config(&backend, config);

    let spinner = create_spinner(&format!(
        "Optimizing p={} with {} ({} shots/evaluation)",
        config.qaoa.depth, config.qaoa.optimizer, config.qaoa.shots
    ));
    let result = runner.optimize(graph, config.qaoa.depth);
    spinner.finish_and_clear();

    result.context("QAOA optimization failed")
}

/// Print solution, partition, cut value and approximation ratio.
pub fn print_solution(graph: &Graph, solution: &Bitstring) {
    let cut = graph.cut_value(solution);
    print_result("Solution", style(solution).cyan().bold());
    print_result("Partition", format_partition(solution));
    print_result("Cut value", format!("{cut:.4} (cut weight {:.4})", -cut));
    if graph.num_nodes() <= MAX_BRUTE_FORCE_NODES {
        print_result(
            "Approximation ratio",
            style(format!("{:.4}", graph.approximation_ratio(solution))).yellow(),
        );
    }
}

/// Execute the solve command.
pub fn execute(
    graph_arg: &str,
    method: Method,
    depth: Option<usize>,
    shots: Option<u32>,
    seed: Option<u64>,
    config_path: Option<&Path>,
) -> Result<()> {
    let graph = load_graph(graph_arg)?;
    let config = load_config(config_path, depth, shots, seed)?;

    println!(
        "{} Solving Max-Cut on {} with {}",
        style("→").cyan().bold(),
        style(graph_arg).green(),
        style(method).yellow()
    );
    print!("{graph}");
    info!(method = %method, nodes = graph.num_nodes(), "Solving");

    let solution = match method {
        Method::Classical => solve_classical(&graph)?,
        Method::Qubo => solve_qubo(&graph, &config)?,
        Method::Qaoa => {
            let result = solve_qaoa(&graph, &config)?;

            print_section("Optimization");
            print_result("Evaluations", result.num_evaluations);
            print_result("Iterations", result.num_iterations);
            print_result(
                "Converged",
                if result.converged {
                    style("yes").green()
                } else {
                    style("no").yellow()
                },
            );
            print_result("Gammas", format!("{:.4?}", result.optimal_params.gammas));
            print_result("Betas", format!("{:.4?}", result.optimal_params.betas));
            print_result("Expected cut", format!("{:.4}", result.expected_cut));
            print_result("Backend time", format!("{} ms", result.backend_time_ms));

            print_section("Final distribution (node order)");
            print_distribution(&result.distribution);

            result.solution
        }
    };

    print_section("Result");
    print_solution(&graph, &solution);
    Ok(())
}
