//! Gate vocabulary of the variational circuits.

use serde::{Deserialize, Serialize};

/// Gates understood by the circuit builder and the simulator.
///
/// This is the minimal set the QAOA ansatz needs: `h` to prepare the uniform
/// superposition, `cx`/`rz`/`cx` for each ZZ cost term, `rx` for the mixer.
/// `x` prepares basis states in tests and benchmarks.
///
/// Rotation angles are concrete radians; the ansatz is rebuilt for every
/// trial point instead of binding symbolic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGate {
    H,
    X,
    Rx(f64),
    Rz(f64),
    CX,
}

impl StandardGate {
    /// OpenQASM-style lowercase mnemonic.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::H => "h",
            Self::X => "x",
            Self::Rx(_) => "rx",
            Self::Rz(_) => "rz",
            Self::CX => "cx",
        }
    }

    /// Operand count.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        if matches!(self, Self::CX) { 2 } else { 1 }
    }

    /// Rotation angle, for `rx` and `rz`.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Self::Rx(theta) | Self::Rz(theta) => Some(theta),
            _ => None,
        }
    }
}

impl std::fmt::Display for StandardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())?;
        if let Some(theta) = self.angle() {
            write!(f, "({theta:.4})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_counts() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Rz(0.3).num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
    }

    #[test]
    fn test_only_rotations_carry_angles() {
        assert_eq!(StandardGate::Rx(1.5).angle(), Some(1.5));
        assert_eq!(StandardGate::X.angle(), None);
        assert_eq!(StandardGate::CX.angle(), None);
    }

    #[test]
    fn test_display_includes_angle() {
        assert_eq!(StandardGate::Rz(0.5).to_string(), "rz(0.5000)");
        assert_eq!(StandardGate::CX.to_string(), "cx");
    }
}
