//! Shared helpers for CLI commands.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qcut_adapter_sim::SimulatorBackend;
use qcut_core::{Bitstring, Graph, NodeDistribution, QcutConfig};

/// Largest graph the exhaustive search is run on.
pub const MAX_BRUTE_FORCE_NODES: usize = 24;

/// Max-Cut solution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Exhaustive search over all assignments
    Classical,
    /// QAOA on the statevector simulator
    Qaoa,
    /// QUBO formulation sampled by simulated annealing
    Qubo,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Classical => write!(f, "classical"),
            Method::Qaoa => write!(f, "qaoa"),
            Method::Qubo => write!(f, "qubo"),
        }
    }
}

/// Resolve a built-in graph name.
pub fn builtin_graph(name: &str) -> Option<Graph> {
    match name.to_lowercase().as_str() {
        "edge" => Some(Graph::single_edge()),
        "triangle" => Some(Graph::triangle(1.0)),
        "square4" | "square" => Some(Graph::square_4()),
        "complete4" | "k4" => Some(Graph::complete_4()),
        "ring6" => Some(Graph::ring(6)),
        _ => None,
    }
}

/// Load a graph from a built-in name or a JSON file
/// (`{"n_nodes": 3, "edges": [[0, 1, 1.0], ...]}`).
pub fn load_graph(graph_arg: &str) -> Result<Graph> {
    if let Some(graph) = builtin_graph(graph_arg) {
        return Ok(graph);
    }

    let path = Path::new(graph_arg);
    if !path.exists() {
        anyhow::bail!(
            "Unknown graph: '{graph_arg}'. Use a JSON file or one of: edge, triangle, square4, complete4, ring6"
        );
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {graph_arg}"))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid graph file: {graph_arg}"))
}

/// Load configuration and apply command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    depth: Option<usize>,
    shots: Option<u32>,
    seed: Option<u64>,
) -> Result<QcutConfig> {
    let mut config = QcutConfig::load(path).context("Failed to load configuration")?;

    if let Some(depth) = depth {
        config.qaoa.depth = depth;
    }
    if let Some(shots) = shots {
        config.qaoa.shots = shots;
    }
    if let Some(seed) = seed {
        config.qaoa.seed = Some(seed);
        config.annealer.seed = Some(seed);
        config.simulator.seed = Some(seed);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build the simulator described by the `simulator` config section.
pub fn create_simulator(config: &QcutConfig) -> SimulatorBackend {
    let backend = SimulatorBackend::with_max_qubits(config.simulator.max_qubits)
        .with_max_shots(config.simulator.max_shots);
    match config.simulator.seed {
        Some(seed) => backend.with_seed(seed),
        None => backend,
    }
}

/// Spinner shown while the optimizer runs.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// `{0, 2} | {1, 3}` style rendering of an assignment.
pub fn format_partition(solution: &Bitstring) -> String {
    let side = |nodes: Vec<usize>| {
        let items: Vec<String> = nodes.iter().map(ToString::to_string).collect();
        format!("{{{}}}", items.join(", "))
    };
    let (zeros, ones) = solution.partition();
    format!("{} | {}", side(zeros), side(ones))
}

/// Print a header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a section title.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a node-order distribution, most frequent first.
#[allow(clippy::cast_precision_loss)]
pub fn print_distribution(distribution: &NodeDistribution) {
    let mut sorted: Vec<(&Bitstring, &u64)> = distribution.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let total: u64 = distribution.values().sum();
    if total == 0 {
        return;
    }

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total as f64 * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
