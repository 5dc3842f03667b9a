//! `qcut version`: build and default-solver information.

use console::style;
use qcut_core::QcutConfig;

const COMPONENTS: &[(&str, &str)] = &[
    ("qcut-ir", "circuit builder and wire DAG"),
    ("qcut-hal", "execution backend contract"),
    ("qcut-adapter-sim", "statevector simulator"),
    ("qcut-core", "graphs, QAOA loop, QUBO annealer, optimizers"),
    ("qcut-cli", "this binary"),
];

pub fn execute() {
    println!(
        "{} {}",
        style("qcut").cyan().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).yellow()
    );
    println!();
    for (name, role) in COMPONENTS {
        println!("  {:<18} {}", style(name).green(), role);
    }

    let defaults = QcutConfig::default();
    println!();
    println!(
        "Defaults:   p={}, {} shots, {} (maxiter {}), annealer {}x{} sweeps",
        defaults.qaoa.depth,
        defaults.qaoa.shots,
        defaults.qaoa.optimizer,
        defaults.qaoa.maxiter,
        defaults.annealer.num_reads,
        defaults.annealer.sweeps
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
