//! Compare command implementation.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use console::style;

use qcut_core::{Bitstring, Graph};

use super::common::{Method, load_config, load_graph, print_header};
use super::solve::{solve_classical, solve_qaoa, solve_qubo};

/// One row of the comparison table.
struct Row {
    method: Method,
    solution: Bitstring,
    elapsed_ms: u128,
}

/// Execute the compare command.
pub fn execute(
    graph_arg: &str,
    depth: Option<usize>,
    shots: Option<u32>,
    seed: Option<u64>,
    config_path: Option<&Path>,
) -> Result<()> {
    let graph = load_graph(graph_arg)?;
    let config = load_config(config_path, depth, shots, seed)?;

    print_header(&format!(
        "Max-Cut on {graph_arg}: {} nodes, {} edges",
        graph.num_nodes(),
        graph.num_edges()
    ));

    let mut rows = Vec::with_capacity(3);
    for method in [Method::Classical, Method::Qubo, Method::Qaoa] {
        let start = Instant::now();
        let solution = match method {
            Method::Classical => solve_classical(&graph)?,
            Method::Qubo => solve_qubo(&graph, &config)?,
            Method::Qaoa => solve_qaoa(&graph, &config)?.solution,
        };
        rows.push(Row {
            method,
            solution,
            elapsed_ms: start.elapsed().as_millis(),
        });
    }

    print_table(&graph, &rows);
    Ok(())
}

fn print_table(graph: &Graph, rows: &[Row]) {
    println!(
        "  {:<10} {:<16} {:>10} {:>8} {:>10}",
        style("Method").bold(),
        style("Solution").bold(),
        style("Cut").bold(),
        style("Ratio").bold(),
        style("Time (ms)").bold()
    );
    println!("  {}", style("─".repeat(58)).dim());

    for row in rows {
        let ratio = graph.approximation_ratio(&row.solution);
        let ratio_text = format!("{ratio:.4}");
        let ratio_styled = if ratio >= 1.0 - 1e-9 {
            style(ratio_text).green()
        } else {
            style(ratio_text).yellow()
        };
        println!(
            "  {:<10} {:<16} {:>10.4} {:>8} {:>10}",
            row.method.to_string(),
            style(row.solution.to_string()).cyan(),
            -graph.cut_value(&row.solution),
            ratio_styled,
            row.elapsed_ms
        );
    }
}
