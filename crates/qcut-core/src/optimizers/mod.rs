//! Derivative-free optimizers for variational circuits.
//!
//! Objectives are fallible: an `Err` from the objective aborts the run and is
//! returned unchanged. Running out of iterations is not an error; the result
//! carries the best point seen and `converged: false`.

pub mod cobyla;
pub mod spsa;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cobyla::Cobyla;
pub use spsa::Spsa;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each improvement.
    pub history: Vec<f64>,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// A derivative-free minimizer.
pub trait Optimizer {
    /// Minimize `objective` starting from `initial_params`.
    fn minimize<F, E>(&self, objective: F, initial_params: Vec<f64>) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>;
}

/// Which optimizer drives the QAOA loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Trust-region simplex ([`Cobyla`]).
    #[default]
    Cobyla,
    /// Simultaneous perturbation ([`Spsa`]).
    Spsa,
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerKind::Cobyla => write!(f, "cobyla"),
            OptimizerKind::Spsa => write!(f, "spsa"),
        }
    }
}

impl FromStr for OptimizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cobyla" => Ok(OptimizerKind::Cobyla),
            "spsa" => Ok(OptimizerKind::Spsa),
            other => Err(format!("unknown optimizer '{other}' (expected cobyla or spsa)")),
        }
    }
}
