//! QAOA (Quantum Approximate Optimization Algorithm) circuits for Max-Cut.
//!
//! A depth-p circuit prepares |+⟩^n and then applies p alternating layers:
//!
//! - Cost layer with angle γ_i: for every edge (u, v, w), the ZZ phase
//!   `CX(u, v) · RZ(2γw)[v] · CX(u, v)`.
//! - Mixer layer with angle β_i: `RX(2β)` on every qubit.
//!
//! Every qubit `q` is then measured into classical bit `q`. Qubit `q` is
//! node `q`.
//!
//! Cost gates on overlapping qubits do not commute in general, so the edge
//! order matters for reproducibility. The cost layer follows
//! [`Graph::edges`], which is sorted by `(u, v)`.

use qcut_ir::{Circuit, IrResult, QubitId};
use serde::{Deserialize, Serialize};

use crate::error::{QcutError, QcutResult};
use crate::problems::Graph;

/// Variational angles of a depth-p circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaParameters {
    /// Cost angles, one per layer.
    pub gammas: Vec<f64>,
    /// Mixer angles, one per layer.
    pub betas: Vec<f64>,
}

impl QaoaParameters {
    /// Split `[γ_0 .. γ_{p-1}, β_0 .. β_{p-1}]`.
    pub fn from_flat(params: &[f64]) -> QcutResult<Self> {
        if params.len() % 2 != 0 {
            return Err(QcutError::InvalidParameterLength { len: params.len() });
        }
        let (gammas, betas) = params.split_at(params.len() / 2);
        Ok(Self {
            gammas: gammas.to_vec(),
            betas: betas.to_vec(),
        })
    }

    /// Flatten back to `[gammas.., betas..]`.
    pub fn to_flat(&self) -> Vec<f64> {
        self.gammas.iter().chain(&self.betas).copied().collect()
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.gammas.len()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn qubit(node: usize) -> QubitId {
    QubitId(node as u32)
}

#[allow(clippy::cast_possible_truncation)]
fn width(graph: &Graph) -> u32 {
    graph.num_nodes() as u32
}

/// Cost layer fragment: one ZZ phase of angle `2γw` per edge, in edge order.
pub fn build_cost_layer(graph: &Graph, gamma: f64) -> IrResult<Circuit> {
    let mut layer = Circuit::with_size("cost_layer", width(graph), 0);
    for &(u, v, weight) in graph.edges() {
        let angle = 2.0 * gamma * weight;
        layer
            .cx(qubit(u), qubit(v))?
            .rz(angle, qubit(v))?
            .cx(qubit(u), qubit(v))?;
    }
    Ok(layer)
}

/// Mixer layer fragment: `RX(2β)` on every qubit.
pub fn build_mixer_layer(graph: &Graph, beta: f64) -> IrResult<Circuit> {
    let mut layer = Circuit::with_size("mixer_layer", width(graph), 0);
    let angle = 2.0 * beta;
    for node in 0..graph.num_nodes() {
        layer.rx(angle, qubit(node))?;
    }
    Ok(layer)
}

/// Full measured QAOA circuit for `params = [γ.., β..]`.
///
/// Fails with [`QcutError::InvalidParameterLength`] for odd-length input.
pub fn build_circuit(graph: &Graph, params: &[f64]) -> QcutResult<Circuit> {
    let params = QaoaParameters::from_flat(params)?;
    let n = width(graph);
    let mut circuit = Circuit::with_size(format!("qaoa_p{}", params.depth()), n, n);

    for node in 0..graph.num_nodes() {
        circuit.h(qubit(node))?;
    }

    for (&gamma, &beta) in params.gammas.iter().zip(&params.betas) {
        circuit.compose(&build_cost_layer(graph, gamma)?)?;
        circuit.compose(&build_mixer_layer(graph, beta)?)?;
    }

    circuit.measure_all()?;
    Ok(circuit)
}

/// Number of variational parameters for depth `p`.
pub fn num_parameters(p: usize) -> usize {
    2 * p
}
