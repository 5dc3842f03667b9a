//! QUBO formulation of Max-Cut and a local annealing sampler.
//!
//! For an edge `(u, v, w)` the cut indicator `x_u + x_v - 2 x_u x_v` is
//! folded into the upper-triangular matrix as `Q[u,u] -= w`, `Q[v,v] -= w`,
//! `Q[u,v] += 2w`, so that `energy(x) == graph.cut_value(x)` for every `x`.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::AnnealerConfig;
use crate::error::{QcutError, QcutResult};
use crate::problems::{Bitstring, Graph};

/// Sparse upper-triangular QUBO matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qubo {
    num_variables: usize,
    terms: BTreeMap<(usize, usize), f64>,
}

impl Qubo {
    /// An empty problem over `num_variables` binaries.
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            terms: BTreeMap::new(),
        }
    }

    /// Max-Cut formulation of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut qubo = Self::new(graph.num_nodes());
        for &(u, v, w) in graph.edges() {
            qubo.add(u, u, -w);
            qubo.add(v, v, -w);
            qubo.add(u, v, 2.0 * w);
        }
        qubo
    }

    /// Accumulate `value` into the entry for `(i, j)`, in either order.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        *self.terms.entry((i.min(j), i.max(j))).or_insert(0.0) += value;
    }

    /// Coefficient for `(i, j)`, in either order.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.terms
            .get(&(i.min(j), i.max(j)))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// `Σ Q[i,j] x_i x_j`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is shorter than the number of variables.
    pub fn energy(&self, x: &Bitstring) -> f64 {
        self.terms
            .iter()
            .filter(|&(&(i, j), _)| x[i] && x[j])
            .map(|(_, &q)| q)
            .sum()
    }

    /// Per-variable coupling lists, used for O(degree) flip deltas.
    fn neighbours(&self) -> (Vec<f64>, Vec<Vec<(usize, f64)>>) {
        let mut linear = vec![0.0; self.num_variables];
        let mut couplings = vec![Vec::new(); self.num_variables];
        for (&(i, j), &q) in &self.terms {
            if i == j {
                linear[i] += q;
            } else {
                couplings[i].push((j, q));
                couplings[j].push((i, q));
            }
        }
        (linear, couplings)
    }
}

/// A service that returns a low-energy assignment for a QUBO.
pub trait QuboSampler {
    /// Best assignment found over `num_reads` independent reads.
    fn sample(&self, qubo: &Qubo, num_reads: usize) -> QcutResult<Bitstring>;
}

/// Single-spin-flip Metropolis annealer with a geometric temperature schedule.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealer {
    /// Sweeps over all variables per read.
    pub sweeps: usize,
    /// Starting temperature.
    pub t_start: f64,
    /// Final temperature.
    pub t_end: f64,
    /// RNG seed; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SimulatedAnnealer {
    fn default() -> Self {
        Self::from_config(&AnnealerConfig::default())
    }
}

impl SimulatedAnnealer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnnealerConfig) -> Self {
        Self {
            sweeps: config.sweeps,
            t_start: config.t_start,
            t_end: config.t_end,
            seed: config.seed,
        }
    }

    pub fn with_sweeps(mut self, sweeps: usize) -> Self {
        self.sweeps = sweeps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn temperature(&self, sweep: usize) -> f64 {
        if self.sweeps <= 1 {
            return self.t_end;
        }
        let progress = sweep as f64 / (self.sweeps - 1) as f64;
        self.t_start * (self.t_end / self.t_start).powf(progress)
    }

    fn anneal(
        &self,
        linear: &[f64],
        couplings: &[Vec<(usize, f64)>],
        rng: &mut StdRng,
    ) -> (Vec<bool>, f64) {
        let n = linear.len();
        let mut x: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.5)).collect();

        // Local field h_i = Q_ii + Σ_j Q_ij x_j
        let local_field = |x: &[bool], i: usize| -> f64 {
            linear[i]
                + couplings[i]
                    .iter()
                    .filter(|&&(j, _)| x[j])
                    .map(|&(_, q)| q)
                    .sum::<f64>()
        };

        let mut energy: f64 = (0..n)
            .filter(|&i| x[i])
            .map(|i| {
                linear[i]
                    + couplings[i]
                        .iter()
                        .filter(|&&(j, _)| j > i && x[j])
                        .map(|&(_, q)| q)
                        .sum::<f64>()
            })
            .sum();
        let mut best = (x.clone(), energy);

        for sweep in 0..self.sweeps {
            let t = self.temperature(sweep);
            for i in 0..n {
                let sign = if x[i] { -1.0 } else { 1.0 };
                let delta = sign * local_field(&x, i);
                if delta <= 0.0 || rng.r#gen::<f64>() < (-delta / t).exp() {
                    x[i] = !x[i];
                    energy += delta;
                    if energy < best.1 {
                        best = (x.clone(), energy);
                    }
                }
            }
        }

        best
    }
}

impl QuboSampler for SimulatedAnnealer {
    #[instrument(skip(self, qubo), fields(num_variables = qubo.num_variables()))]
    fn sample(&self, qubo: &Qubo, num_reads: usize) -> QcutResult<Bitstring> {
        if num_reads == 0 {
            return Err(QcutError::SamplerFailed(
                "num_reads must be at least 1".to_string(),
            ));
        }
        if !(self.t_end > 0.0 && self.t_start >= self.t_end) {
            return Err(QcutError::SamplerFailed(format!(
                "invalid temperature schedule {} -> {}",
                self.t_start, self.t_end
            )));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (linear, couplings) = qubo.neighbours();

        let mut best: Option<(Vec<bool>, f64)> = None;
        for read in 0..num_reads {
            let (x, energy) = self.anneal(&linear, &couplings, &mut rng);
            debug!(read, energy, "Annealing read finished");
            if best.as_ref().is_none_or(|(_, e)| energy < *e) {
                best = Some((x, energy));
            }
        }

        best.map(|(x, _)| Bitstring::new(x))
            .ok_or_else(|| QcutError::SamplerFailed("no samples produced".to_string()))
    }
}

/// Solve Max-Cut by sampling its QUBO formulation.
pub fn solve_maxcut_qubo(
    graph: &Graph,
    sampler: &dyn QuboSampler,
    num_reads: usize,
) -> QcutResult<Bitstring> {
    let qubo = Qubo::from_graph(graph);
    let solution = sampler.sample(&qubo, num_reads)?;
    if solution.len() != graph.num_nodes() {
        return Err(QcutError::SamplerFailed(format!(
            "sampler returned {} variables for a {}-node graph",
            solution.len(),
            graph.num_nodes()
        )));
    }
    Ok(solution)
}
