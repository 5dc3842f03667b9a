//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised by an execution backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The circuit is wider than the backend.
    #[error("Circuit needs {qubits} qubits but {backend} supports at most {max}")]
    CircuitTooLarge {
        /// Backend name.
        backend: String,
        /// Qubits used by the circuit.
        qubits: usize,
        /// Backend limit.
        max: u32,
    },

    /// Shot count outside `1..=max`.
    #[error("Shot count {shots} outside 1..={max}")]
    InvalidShots {
        /// Requested shots.
        shots: u32,
        /// Backend limit.
        max: u32,
    },

    /// The backend cannot run this circuit as built.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// The circuit uses something this backend does not implement.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Backend-specific failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
