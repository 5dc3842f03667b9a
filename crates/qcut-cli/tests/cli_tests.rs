//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`) and the graph
//! and configuration loading done by `commands::common`.

// The CLI is a binary crate, so the helpers are exercised through the
// library calls they wrap, and clap parsing through a mirror of the structs.

// ============================================================================
// commands::common tests
// ============================================================================

mod graph_loading {
    use std::io::Write;

    use qcut_core::Graph;

    /// Equivalent to commands::common::builtin_graph
    fn builtin_graph(name: &str) -> Option<Graph> {
        match name.to_lowercase().as_str() {
            "edge" => Some(Graph::single_edge()),
            "triangle" => Some(Graph::triangle(1.0)),
            "square4" | "square" => Some(Graph::square_4()),
            "complete4" | "k4" => Some(Graph::complete_4()),
            "ring6" => Some(Graph::ring(6)),
            _ => None,
        }
    }

    /// Equivalent to commands::common::load_graph
    fn load_graph(graph_arg: &str) -> anyhow::Result<Graph> {
        if let Some(graph) = builtin_graph(graph_arg) {
            return Ok(graph);
        }
        let path = std::path::Path::new(graph_arg);
        if !path.exists() {
            anyhow::bail!("Unknown graph: '{graph_arg}'");
        }
        let source = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }

    #[test]
    fn test_builtin_square() {
        let graph = load_graph("square4").unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.max_cut_value(), 4.0);
    }

    #[test]
    fn test_builtin_names_case_insensitive() {
        assert_eq!(load_graph("K4").unwrap().num_edges(), 6);
        assert_eq!(load_graph("Ring6").unwrap().num_nodes(), 6);
        assert_eq!(load_graph("triangle").unwrap().max_cut_value(), 2.0);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"n_nodes": 3, "edges": [[0, 1, 1.0], [2, 1, 2.5]]}}"#).unwrap();

        let graph = load_graph(file.path().to_str().unwrap()).unwrap();
        assert_eq!(graph.num_nodes(), 3);
        // Endpoints are canonicalized to u < v
        assert_eq!(graph.edges(), &[(0, 1, 1.0), (1, 2, 2.5)]);
    }

    #[test]
    fn test_json_file_invalid_edge() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"n_nodes": 2, "edges": [[0, 5, 1.0]]}}"#).unwrap();
        assert!(load_graph(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unknown_graph() {
        let err = load_graph("petersen").unwrap_err();
        assert!(err.to_string().contains("Unknown graph"));
    }
}

mod config_loading {
    use std::io::Write;

    use qcut_core::{OptimizerKind, QcutConfig};

    #[test]
    fn test_config_file_with_overrides() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "qaoa:\n  depth: 2\n  optimizer: spsa\n").unwrap();

        let mut config = QcutConfig::from_file(file.path()).unwrap();
        assert_eq!(config.qaoa.depth, 2);
        assert_eq!(config.qaoa.optimizer, OptimizerKind::Spsa);

        // Command-line flags are applied on top, then revalidated
        config.qaoa.shots = 0;
        assert!(config.validate().is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum Method {
        Classical,
        Qaoa,
        Qubo,
    }

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qcut")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Solve {
            #[arg(short, long)]
            graph: String,
            #[arg(short, long, value_enum, default_value_t = Method::Qaoa)]
            method: Method,
            #[arg(short, long)]
            depth: Option<usize>,
            #[arg(short, long)]
            shots: Option<u32>,
            #[arg(long)]
            seed: Option<u64>,
            #[arg(short, long)]
            config: Option<PathBuf>,
        },
        Compare {
            #[arg(short, long)]
            graph: String,
            #[arg(short, long)]
            depth: Option<usize>,
            #[arg(short, long)]
            shots: Option<u32>,
            #[arg(long)]
            seed: Option<u64>,
            #[arg(short, long)]
            config: Option<PathBuf>,
        },
        Bitstrings {
            #[arg(short, long)]
            nodes: usize,
        },
        Version,
    }

    #[test]
    fn test_solve_defaults() {
        let cli = TestCli::try_parse_from(["qcut", "solve", "-g", "square4"]).unwrap();
        match cli.command {
            TestCommands::Solve {
                graph,
                method,
                depth,
                shots,
                seed,
                config,
            } => {
                assert_eq!(graph, "square4");
                assert_eq!(method, Method::Qaoa);
                assert!(depth.is_none());
                assert!(shots.is_none());
                assert!(seed.is_none());
                assert!(config.is_none());
            }
            _ => panic!("Expected Solve command"),
        }
    }

    #[test]
    fn test_solve_all_options() {
        let cli = TestCli::try_parse_from([
            "qcut",
            "solve",
            "--graph",
            "graph.json",
            "--method",
            "qubo",
            "--depth",
            "3",
            "--shots",
            "2048",
            "--seed",
            "7",
            "--config",
            "qcut.yaml",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Solve {
                graph,
                method,
                depth,
                shots,
                seed,
                config,
            } => {
                assert_eq!(graph, "graph.json");
                assert_eq!(method, Method::Qubo);
                assert_eq!(depth, Some(3));
                assert_eq!(shots, Some(2048));
                assert_eq!(seed, Some(7));
                assert_eq!(config, Some(PathBuf::from("qcut.yaml")));
            }
            _ => panic!("Expected Solve command"),
        }
    }

    #[test]
    fn test_solve_unknown_method_rejected() {
        let result = TestCli::try_parse_from(["qcut", "solve", "-g", "edge", "-m", "annealing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_solve_requires_graph() {
        assert!(TestCli::try_parse_from(["qcut", "solve"]).is_err());
    }

    #[test]
    fn test_compare() {
        let cli =
            TestCli::try_parse_from(["qcut", "compare", "-g", "ring6", "-d", "2"]).unwrap();
        match cli.command {
            TestCommands::Compare { graph, depth, .. } => {
                assert_eq!(graph, "ring6");
                assert_eq!(depth, Some(2));
            }
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_bitstrings() {
        let cli = TestCli::try_parse_from(["qcut", "bitstrings", "--nodes", "3"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Bitstrings { nodes: 3 }));
    }

    #[test]
    fn test_bitstrings_rejects_non_numeric() {
        assert!(TestCli::try_parse_from(["qcut", "bitstrings", "-n", "three"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = TestCli::try_parse_from(["qcut", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_verbose_after_subcommand() {
        let cli = TestCli::try_parse_from(["qcut", "bitstrings", "-n", "2", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
