//! What a backend accepts.
//!
//! The QAOA runner checks one template circuit against [`Capabilities`] once,
//! before the optimizer starts, so a too-wide graph or an unsupported gate
//! fails fast instead of on the first objective evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Limits and gate support of an execution backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub name: String,
    /// Widest circuit the backend will run.
    pub num_qubits: u32,
    pub gate_set: GateSet,
    /// Upper bound for the `shots` argument of a single run.
    pub max_shots: u32,
    pub is_simulator: bool,
}

impl Capabilities {
    /// Statevector simulator of the given width, 100 000 shots per run.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::ansatz(),
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }
}

/// Gate mnemonics a backend executes, in OpenQASM lowercase naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateSet(BTreeSet<String>);

impl GateSet {
    /// Every gate the circuit IR can express.
    pub fn ansatz() -> Self {
        Self::from_names(["h", "x", "rx", "rz", "cx"])
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(str::to_owned).collect())
    }

    pub fn contains(&self, gate: &str) -> bool {
        self.0.contains(gate)
    }
}
