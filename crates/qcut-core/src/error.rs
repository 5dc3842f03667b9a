//! Error types for the Max-Cut solvers.

use thiserror::Error;

use qcut_hal::HalError;
use qcut_ir::IrError;

use crate::config::ConfigError;
use crate::problems::GraphError;

/// Errors raised while building, executing or scoring Max-Cut circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QcutError {
    /// A flat parameter vector must hold `p` gammas followed by `p` betas.
    #[error("Parameter vector has odd length {len}; expected 2p values (p gammas, p betas)")]
    InvalidParameterLength {
        /// Length of the rejected vector.
        len: usize,
    },

    /// QAOA needs at least one cost/mixer layer.
    #[error("QAOA depth must be at least 1")]
    InvalidDepth,

    /// The outcome distribution had zero total frequency.
    #[error("Outcome distribution is empty (zero total frequency)")]
    EmptyDistribution,

    /// The execution service failed.
    #[error("Circuit execution failed: {0}")]
    ExecutionFailed(#[from] HalError),

    /// An outcome key could not be mapped onto the graph's nodes.
    #[error("Malformed outcome '{key}': {reason}")]
    MalformedOutcome {
        /// The key as reported by the backend.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid graph or bitstring.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Circuit construction failed.
    #[error("Circuit construction failed: {0}")]
    Circuit(#[from] IrError),

    /// The QUBO sampler failed.
    #[error("Sampler failed: {0}")]
    SamplerFailed(String),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for Max-Cut operations.
pub type QcutResult<T> = Result<T, QcutError>;
