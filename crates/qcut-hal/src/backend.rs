//! Backend trait and circuit validation.
//!
//! The [`Backend`] trait is the contract between the QAOA optimization loop
//! and whatever executes circuits:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (&ref)             (pure)        (blocking)
//! ```
//!
//! Execution is blocking. The optimizer evaluates one parameter vector at a
//! time and needs the measurement counts before it can choose the next.

use qcut_ir::Circuit;
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for circuit execution backends.
///
/// # Contract
///
/// - `capabilities()` is infallible; implementations cache it at
///   construction time.
/// - `run()` returns counts whose keys have one character per classical bit,
///   highest classical bit first, and whose total equals `shots`.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    ///
    /// The default implementation checks qubit count and gate support.
    fn validate(&self, circuit: &Circuit) -> ValidationResult {
        let caps = self.capabilities();
        let mut reasons = Vec::new();

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }

        for inst in circuit.instructions() {
            if inst.is_gate() && !caps.gate_set.contains(inst.name()) {
                reasons.push(format!("Unsupported gate '{}'", inst.name()));
            }
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            reasons.sort();
            reasons.dedup();
            debug!(backend = self.name(), ?reasons, "circuit rejected");
            ValidationResult::Invalid { reasons }
        }
    }

    /// Execute `circuit` for `shots` repetitions and return the counts.
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Check `shots` against the backend limit.
pub fn check_shots(caps: &Capabilities, shots: u32) -> HalResult<()> {
    if shots == 0 || shots > caps.max_shots {
        return Err(HalError::InvalidShots {
            shots,
            max: caps.max_shots,
        });
    }
    Ok(())
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be executed as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Convert an `Invalid` result into the matching error.
    pub fn into_result(self) -> HalResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                Err(HalError::InvalidCircuit(reasons.join("; ")))
            }
        }
    }
}
