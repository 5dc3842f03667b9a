//! Simultaneous Perturbation Stochastic Approximation.
//!
//! Two objective evaluations per iteration regardless of dimension, which
//! suits shot-noisy expectation values. The decaying gain schedule is the
//! stopping rule: every run performs `maxiter` iterations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{OptimizationResult, Optimizer};

/// SPSA optimizer configuration.
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Learning rate scale.
    pub a: f64,
    /// Perturbation scale.
    pub c: f64,
    /// Learning rate decay exponent.
    pub alpha: f64,
    /// Perturbation decay exponent.
    pub gamma: f64,
    /// Seed for the perturbation directions; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            maxiter: 100,
            a: 0.1,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            seed: None,
        }
    }
}

impl Spsa {
    /// Create a new SPSA optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set the perturbation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Optimizer for Spsa {
    #[allow(clippy::cast_precision_loss)]
    fn minimize<F, E>(&self, mut objective: F, initial_params: Vec<f64>) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut x = initial_params;

        let mut best_value = objective(&x)?;
        let mut best_params = x.clone();
        let mut history = vec![best_value];
        let mut num_evaluations = 1;

        for k in 0..self.maxiter {
            let a_k = self.a / ((k + 1) as f64).powf(self.alpha);
            let c_k = self.c / ((k + 1) as f64).powf(self.gamma);

            // Random ±1 perturbation
            let delta: Vec<f64> = (0..x.len())
                .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
                .collect();

            let x_plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi + c_k * di).collect();
            let x_minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi - c_k * di).collect();

            let f_plus = objective(&x_plus)?;
            let f_minus = objective(&x_minus)?;
            num_evaluations += 2;

            // Gradient estimate and update
            for (xi, di) in x.iter_mut().zip(&delta) {
                *xi -= a_k * (f_plus - f_minus) / (2.0 * c_k * di);
            }

            let f = objective(&x)?;
            num_evaluations += 1;
            if f < best_value {
                best_value = f;
                best_params.clone_from(&x);
                history.push(f);
            }
        }

        Ok(OptimizationResult {
            optimal_params: best_params,
            optimal_value: best_value,
            num_evaluations,
            num_iterations: self.maxiter,
            history,
            converged: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_spsa_simple() {
        let spsa = Spsa::new().with_maxiter(100).with_seed(42);

        let result = spsa
            .minimize(
                |p: &[f64]| Ok::<_, Infallible>(p[0].powi(2) + p[1].powi(2)),
                vec![1.0, 1.0],
            )
            .unwrap();

        assert!(result.optimal_value < 0.5);
        assert_eq!(result.num_evaluations, 1 + 3 * result.num_iterations);
    }

    #[test]
    fn test_spsa_is_deterministic_for_seed() {
        let run = |seed| {
            Spsa::new()
                .with_maxiter(20)
                .with_seed(seed)
                .minimize(
                    |p: &[f64]| Ok::<_, Infallible>((p[0] - 0.3).powi(2) + p[1].sin()),
                    vec![1.0, 1.0],
                )
                .unwrap()
        };
        let (a, b) = (run(7), run(7));
        assert_eq!(a.optimal_params, b.optimal_params);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_spsa_unseeded_by_default() {
        assert_eq!(Spsa::default().seed, None);
        assert_eq!(Spsa::new().with_seed(3).seed, Some(3));

        // Entropy-seeded runs still do the full schedule.
        let result = Spsa::new()
            .with_maxiter(5)
            .minimize(|p: &[f64]| Ok::<_, Infallible>(p[0].powi(2)), vec![0.4])
            .unwrap();
        assert_eq!(result.num_evaluations, 16);
        assert!(result.optimal_value <= 0.16);
    }

    #[test]
    fn test_spsa_flat_objective_keeps_start() {
        let result = Spsa::new()
            .with_maxiter(10)
            .minimize(|_: &[f64]| Ok::<_, Infallible>(1.0), vec![0.5, 0.5])
            .unwrap();
        assert_eq!(result.num_iterations, 10);
        assert_eq!(result.num_evaluations, 31);
        assert_eq!(result.optimal_params, vec![0.5, 0.5]);
        assert_eq!(result.history, vec![1.0]);
    }

    #[test]
    fn test_spsa_propagates_objective_error() {
        let result = Spsa::new().minimize(|_: &[f64]| Err::<f64, _>("no shots"), vec![0.0]);
        assert_eq!(result.unwrap_err(), "no shots");
    }
}
