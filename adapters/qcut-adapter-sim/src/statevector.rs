//! Statevector simulation engine.
//!
//! Qubit `q` is bit `q` of the amplitude index, so `|q1 q0⟩ = |10⟩` lives
//! at index 2.

use num_complex::Complex64;
use rand::Rng;

use qcut_ir::{Instruction, InstructionKind, StandardGate};

/// Dense `2^n` amplitude vector.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

/// Row-major 2x2 unitary.
type Matrix2 = [[Complex64; 2]; 2];

impl Statevector {
    /// `|0...0⟩` on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply a gate instruction.
    ///
    /// Measurements leave the state untouched; the caller samples the final
    /// state instead.
    pub fn apply(&mut self, instruction: &Instruction) {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let q = |k: usize| instruction.qubits[k].index();
        match *gate {
            StandardGate::X => self.apply_x(q(0)),
            StandardGate::H => self.apply_h(q(0)),
            StandardGate::Rx(theta) => self.apply_rx(q(0), theta),
            StandardGate::Rz(theta) => self.apply_rz(q(0), theta),
            StandardGate::CX => self.apply_cx(q(0), q(1)),
        }
    }

    /// Apply `m` to every amplitude pair that differs only in bit `qubit`.
    fn apply_single(&mut self, qubit: usize, m: Matrix2) {
        let mask = 1 << qubit;
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let j = i | mask;
            let (a, b) = (self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            self.amplitudes.swap(i, i | mask);
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let r = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        self.apply_single(qubit, [[r, r], [r, -r]]);
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let (sin, cos) = (theta / 2.0).sin_cos();
        let c = Complex64::new(cos, 0.0);
        let s = Complex64::new(0.0, -sin);
        self.apply_single(qubit, [[c, s], [s, c]]);
    }

    /// Diagonal, so a phase per amplitude instead of a pair update.
    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let low = Complex64::from_polar(1.0, -theta / 2.0);
        let high = low.conj();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { low } else { high };
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let (ctrl, tgt) = (1 << control, 1 << target);
        for i in (0..self.amplitudes.len()).filter(|i| i & ctrl != 0 && i & tgt == 0) {
            self.amplitudes.swap(i, i | tgt);
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

/// Draws basis-state indices from a fixed probability vector.
pub struct Sampler {
    cumulative: Vec<f64>,
}

impl Sampler {
    /// Build the cumulative distribution once for many draws.
    pub fn new(probabilities: &[f64]) -> Self {
        let mut acc = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect();
        Self { cumulative }
    }

    /// Draw one basis-state index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let r: f64 = rng.r#gen::<f64>() * total;
        // Rounding can leave `total` a hair under `r`; clamp to the last state.
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_cx_correlates_qubits() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!(probs[1].abs() < 1e-10);
        assert!(probs[2].abs() < 1e-10);
        assert!((probs[3] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_rx_pi_flips() {
        let mut sv = Statevector::new(1);
        sv.apply_rx(0, PI);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_zz_phase_decomposition_is_diagonal() {
        // CX · RZ · CX leaves basis-state populations unchanged.
        let mut sv = Statevector::new(2);
        sv.apply_x(1);
        sv.apply_cx(0, 1);
        sv.apply_rz(1, 0.7);
        sv.apply_cx(0, 1);
        let probs = sv.probabilities();
        assert!((probs[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sampler_deterministic_state() {
        let mut sv = Statevector::new(2);
        sv.apply_x(1);
        let sampler = Sampler::new(&sv.probabilities());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng), 2);
        }
    }
}
