//! Turning measurement statistics into the scalar the optimizer minimizes.
//!
//! Backends report outcome keys in register order, highest classical bit
//! first. Everything in this crate indexes bitstrings by node, so
//! [`register_to_node_order`] is the one place where the two meet.

use std::collections::BTreeMap;

use qcut_hal::Counts;

use crate::error::{QcutError, QcutResult};
use crate::problems::{Bitstring, Graph};

/// Outcome frequencies keyed by node-order bitstrings.
pub type NodeDistribution = BTreeMap<Bitstring, u64>;

/// Convert one register-order key (clbit n-1 leftmost) to node order.
pub fn register_to_node_order(key: &str) -> QcutResult<Bitstring> {
    let bits: Bitstring = key.parse().map_err(|e| QcutError::MalformedOutcome {
        key: key.to_string(),
        reason: format!("{e}"),
    })?;
    Ok(bits.reversed())
}

/// Convert backend counts for an `n_nodes`-qubit circuit to node order.
pub fn to_node_order(counts: &Counts, n_nodes: usize) -> QcutResult<NodeDistribution> {
    let mut distribution = NodeDistribution::new();
    for (key, freq) in counts.iter() {
        let bits = register_to_node_order(key)?;
        if bits.len() != n_nodes {
            return Err(QcutError::MalformedOutcome {
                key: key.to_string(),
                reason: format!("expected {n_nodes} digits, got {}", bits.len()),
            });
        }
        *distribution.entry(bits).or_insert(0) += freq;
    }
    Ok(distribution)
}

/// Frequency-weighted mean cut value: `Σ f·cut(b) / Σ f`.
///
/// Fails with [`QcutError::EmptyDistribution`] when the total frequency is
/// zero.
#[allow(clippy::cast_precision_loss)]
pub fn expected_cut(graph: &Graph, distribution: &NodeDistribution) -> QcutResult<f64> {
    let mut weighted = 0.0;
    let mut total: u64 = 0;
    for (bits, &freq) in distribution {
        if freq == 0 {
            continue;
        }
        weighted += freq as f64 * graph.try_cut_value(bits)?;
        total += freq;
    }
    if total == 0 {
        return Err(QcutError::EmptyDistribution);
    }
    Ok(weighted / total as f64)
}

/// The most frequent outcome; ties go to the smallest bitstring.
pub fn most_frequent(distribution: &NodeDistribution) -> Option<Bitstring> {
    let mut best: Option<(&Bitstring, u64)> = None;
    // Ascending key order, so only a strictly larger count replaces the best.
    for (bits, &freq) in distribution {
        if best.is_none_or(|(_, f)| freq > f) {
            best = Some((bits, freq));
        }
    }
    best.map(|(bits, _)| bits.clone())
}
