//! COBYLA-style trust-region simplex optimizer.
//!
//! A Nelder-Mead simplex whose steps are clipped to a trust radius `rho`.
//! When the simplex collapses (value spread below `tol`), the radius halves
//! and the simplex is rebuilt around the best vertex, down to `rhoend`.

use super::{OptimizationResult, Optimizer};

/// COBYLA optimizer configuration.
#[derive(Debug, Clone)]
pub struct Cobyla {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance.
    pub tol: f64,
    /// Initial trust region radius.
    pub rhobeg: f64,
    /// Final trust region radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Create a new COBYLA optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set trust region parameters.
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

/// Simplex vertices with their objective values.
struct Simplex {
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    /// Axis-aligned simplex of edge `rho` around `origin`.
    fn around<F, E>(
        origin: &[f64],
        f_origin: f64,
        rho: f64,
        objective: &mut F,
        evaluations: &mut usize,
    ) -> Result<Self, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let mut points = vec![origin.to_vec()];
        let mut values = vec![f_origin];
        for i in 0..origin.len() {
            let mut point = origin.to_vec();
            point[i] += rho;
            values.push(objective(&point)?);
            *evaluations += 1;
            points.push(point);
        }
        Ok(Self { points, values })
    }

    /// Vertex indices ordered from best to worst.
    fn ranking(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.values.len()).collect();
        indices.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        indices
    }

    fn best(&self) -> usize {
        self.ranking()[0]
    }

    fn replace(&mut self, idx: usize, point: Vec<f64>, value: f64) {
        self.points[idx] = point;
        self.values[idx] = value;
    }

    /// Mean of the selected vertices.
    #[allow(clippy::cast_precision_loss)]
    fn centroid(&self, vertices: &[usize]) -> Vec<f64> {
        let mut centroid = vec![0.0; self.points[0].len()];
        for &idx in vertices {
            for (c, x) in centroid.iter_mut().zip(&self.points[idx]) {
                *c += x;
            }
        }
        let count = vertices.len() as f64;
        centroid.iter_mut().for_each(|c| *c /= count);
        centroid
    }
}

/// `from + t * (to - from)`.
fn along(from: &[f64], to: &[f64], t: f64) -> Vec<f64> {
    from.iter().zip(to).map(|(a, b)| a + t * (b - a)).collect()
}

impl Optimizer for Cobyla {
    fn minimize<F, E>(&self, mut objective: F, initial_params: Vec<f64>) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let n = initial_params.len();
        let mut f_best = objective(&initial_params)?;
        let mut history = vec![f_best];
        let mut num_evaluations = 1;
        if n == 0 {
            return Ok(OptimizationResult {
                optimal_params: initial_params,
                optimal_value: f_best,
                num_evaluations,
                num_iterations: 0,
                history,
                converged: true,
            });
        }

        let mut simplex = Simplex::around(
            &initial_params,
            f_best,
            self.rhobeg,
            &mut objective,
            &mut num_evaluations,
        )?;

        let mut rho = self.rhobeg;
        let mut converged = false;
        let mut num_iterations = 0;

        for _ in 0..self.maxiter {
            num_iterations += 1;
            let indices = simplex.ranking();
            let best_idx = indices[0];
            let worst_idx = indices[n];

            let spread = simplex.values[worst_idx] - simplex.values[best_idx];
            if spread < self.tol && rho <= self.rhoend {
                converged = true;
                break;
            }

            // Collapsed simplex: shrink the trust region and restart around the best point.
            if spread < self.tol {
                rho = (rho * 0.5).max(self.rhoend);
                let best = simplex.points[best_idx].clone();
                let f = simplex.values[best_idx];
                simplex = Simplex::around(&best, f, rho, &mut objective, &mut num_evaluations)?;
                continue;
            }

            let centroid = simplex.centroid(&indices[..n]);
            let worst = &simplex.points[worst_idx];

            // Reflect the worst vertex, bounding each coordinate step by rho.
            let reflected: Vec<f64> = centroid
                .iter()
                .zip(worst)
                .map(|(c, w)| c + (c - w).clamp(-rho, rho))
                .collect();
            let f_reflected = objective(&reflected)?;
            num_evaluations += 1;

            if f_reflected < simplex.values[best_idx] {
                let expanded = along(&centroid, &reflected, 2.0);
                let f_expanded = objective(&expanded)?;
                num_evaluations += 1;
                if f_expanded < f_reflected {
                    simplex.replace(worst_idx, expanded, f_expanded);
                } else {
                    simplex.replace(worst_idx, reflected, f_reflected);
                }
            } else if f_reflected < simplex.values[indices[n - 1]] {
                simplex.replace(worst_idx, reflected, f_reflected);
            } else {
                let contracted = along(&centroid, worst, 0.5);
                let f_contracted = objective(&contracted)?;
                num_evaluations += 1;
                if f_contracted < simplex.values[worst_idx] {
                    simplex.replace(worst_idx, contracted, f_contracted);
                } else {
                    let best = simplex.points[best_idx].clone();
                    for i in indices[1..].iter().copied() {
                        let point = along(&best, &simplex.points[i], 0.5);
                        let value = objective(&point)?;
                        num_evaluations += 1;
                        simplex.replace(i, point, value);
                    }
                }
            }

            let min_value = simplex.values[simplex.best()];
            if min_value < f_best {
                f_best = min_value;
                history.push(f_best);
            }
        }

        let best_idx = simplex.best();
        Ok(OptimizationResult {
            optimal_params: simplex.points[best_idx].clone(),
            optimal_value: simplex.values[best_idx],
            num_evaluations,
            num_iterations,
            history,
            converged,
        })
    }
}
