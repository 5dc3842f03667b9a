//! qcut Command-Line Interface
//!
//! Solve Max-Cut on small graphs by exhaustive search, QUBO annealing or
//! QAOA on the local statevector simulator.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::Method;
use commands::{bitstrings, compare, solve, version};

/// qcut - Max-Cut by brute force, QUBO annealing and QAOA
#[derive(Parser)]
#[command(name = "qcut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve Max-Cut with one method
    Solve {
        /// Graph JSON file or built-in name (edge, triangle, square4, complete4, ring6)
        #[arg(short, long)]
        graph: String,

        /// Solution method
        #[arg(short, long, value_enum, default_value_t = Method::Qaoa)]
        method: Method,

        /// QAOA depth (overrides config)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Shots per circuit execution (overrides config)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Seed for every randomized component (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// YAML configuration file
        #[arg(short, long, env = "QCUT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Run every method on the same graph and tabulate the results
    Compare {
        /// Graph JSON file or built-in name
        #[arg(short, long)]
        graph: String,

        /// QAOA depth (overrides config)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Shots per circuit execution (overrides config)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Seed for every randomized component (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// YAML configuration file
        #[arg(short, long, env = "QCUT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List every assignment of n nodes in enumeration order
    Bitstrings {
        /// Number of nodes
        #[arg(short, long)]
        nodes: usize,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Solve {
            graph,
            method,
            depth,
            shots,
            seed,
            config,
        } => solve::execute(&graph, method, depth, shots, seed, config.as_deref()),

        Commands::Compare {
            graph,
            depth,
            shots,
            seed,
            config,
        } => compare::execute(&graph, depth, shots, seed, config.as_deref()),

        Commands::Bitstrings { nodes } => bitstrings::execute(nodes),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
