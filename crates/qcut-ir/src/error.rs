//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Ways an instruction can fail to fit a circuit.
///
/// `op` is the instruction mnemonic (`"cx"`, `"measure"`, ...).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("'{op}' addresses {qubit}, which is not in the circuit")]
    QubitNotFound { qubit: QubitId, op: &'static str },

    #[error("'{op}' addresses {clbit}, which is not in the circuit")]
    ClbitNotFound { clbit: ClbitId, op: &'static str },

    #[error("'{op}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch {
        op: &'static str,
        expected: u32,
        got: usize,
    },

    #[error("'{op}' lists {qubit} more than once")]
    DuplicateQubit { qubit: QubitId, op: &'static str },

    /// Measurement operands do not pair up.
    #[error("Measurement maps {qubits} qubits onto {clbits} classical bits")]
    MeasureArity { qubits: usize, clbits: usize },

    /// `compose` was given a circuit wider than the receiver.
    #[error("Cannot compose '{other}' ({other_qubits} qubits) onto a {qubits}-qubit circuit")]
    ComposeMismatch {
        other: String,
        other_qubits: usize,
        qubits: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operation() {
        let err = IrError::QubitNotFound {
            qubit: QubitId(4),
            op: "rz",
        };
        assert_eq!(err.to_string(), "'rz' addresses q4, which is not in the circuit");

        let err = IrError::QubitCountMismatch {
            op: "cx",
            expected: 2,
            got: 1,
        };
        assert_eq!(err.to_string(), "'cx' acts on 2 qubits, got 1");
    }
}
