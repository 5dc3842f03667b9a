//! Bitstrings command implementation.

use anyhow::Result;
use console::style;

use qcut_core::Graph;

/// Enumeration is printed in full, so keep it short.
const MAX_NODES: usize = 12;

/// Execute the bitstrings command.
pub fn execute(nodes: usize) -> Result<()> {
    if nodes > MAX_NODES {
        anyhow::bail!("Refusing to list 2^{nodes} assignments; use at most {MAX_NODES} nodes");
    }

    println!(
        "{} {} assignments of {} nodes (character i is node i):",
        style("→").cyan().bold(),
        1_u64 << nodes,
        nodes
    );
    for (index, bitstring) in Graph::empty(nodes).all_bitstrings().enumerate() {
        println!("  {:>5}  {}", style(index).dim(), style(bitstring).cyan());
    }
    Ok(())
}
