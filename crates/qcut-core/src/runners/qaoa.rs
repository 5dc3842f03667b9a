//! QAOA (Quantum Approximate Optimization Algorithm) runner.
//!
//! Each objective evaluation builds a fresh circuit for the trial
//! parameters, executes it on the injected backend and scores the sampled
//! distribution with [`expected_cut`]. Any failure aborts the loop.

use std::f64::consts::PI;

use qcut_hal::Backend;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::circuits::qaoa::{QaoaParameters, build_circuit, num_parameters};
use crate::config::QcutConfig;
use crate::error::{QcutError, QcutResult};
use crate::expectation::{NodeDistribution, expected_cut, most_frequent, to_node_order};
use crate::optimizers::{Cobyla, OptimizationResult, Optimizer, OptimizerKind, Spsa};
use crate::problems::{Bitstring, Graph};

/// Result of a QAOA run.
#[derive(Debug, Clone)]
pub struct QaoaResult {
    /// Most frequent bitstring of the final distribution (node order).
    pub solution: Bitstring,
    /// Cut value of `solution`.
    pub cut_value: f64,
    /// Best parameters found by the optimizer.
    pub optimal_params: QaoaParameters,
    /// Expected cut of the final distribution.
    pub expected_cut: f64,
    /// Number of circuit evaluations during optimization.
    pub num_evaluations: usize,
    /// Number of optimizer iterations.
    pub num_iterations: usize,
    /// Whether the optimizer reported convergence.
    pub converged: bool,
    /// Best expected cut after each improvement.
    pub history: Vec<f64>,
    /// Final sampled distribution in node order.
    pub distribution: NodeDistribution,
    /// Execution time reported by the backend, summed over every run.
    pub backend_time_ms: u64,
}

/// QAOA runner configuration.
pub struct QaoaRunner<'a> {
    backend: &'a dyn Backend,
    /// Number of measurement shots per evaluation.
    pub shots: u32,
    /// Which optimizer drives the loop.
    pub optimizer: OptimizerKind,
    /// COBYLA settings, used when `optimizer` is `Cobyla`.
    pub cobyla: Cobyla,
    /// SPSA settings, used when `optimizer` is `Spsa`.
    pub spsa: Spsa,
    /// Seed for the initial parameters; entropy when `None`.
    pub seed: Option<u64>,
}

impl<'a> QaoaRunner<'a> {
    /// Create a runner with default settings on `backend`.
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            shots: 1024,
            optimizer: OptimizerKind::Cobyla,
            cobyla: Cobyla::new().with_tol(1e-4),
            spsa: Spsa::new(),
            seed: None,
        }
    }

    /// Create a runner from the `qaoa` section of a configuration.
    pub fn from_config(backend: &'a dyn Backend, config: &QcutConfig) -> Self {
        let qaoa = &config.qaoa;
        let mut runner = Self::new(backend)
            .with_shots(qaoa.shots)
            .with_optimizer(qaoa.optimizer)
            .with_maxiter(qaoa.maxiter);
        runner.cobyla = runner
            .cobyla
            .with_tol(qaoa.tol)
            .with_trust_region(qaoa.rhobeg, qaoa.rhoend);
        if let Some(seed) = qaoa.seed {
            runner = runner.with_seed(seed);
        }
        runner
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set maximum iterations for either optimizer.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.cobyla.maxiter = maxiter;
        self.spsa.maxiter = maxiter;
        self
    }

    /// Select the optimizer.
    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Seed the initial parameters and the SPSA perturbations.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.spsa.seed = Some(seed);
        self
    }

    /// Uniform initial parameters in `[0, π)`.
    fn initial_parameters(&self, depth: usize) -> Vec<f64> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..num_parameters(depth))
            .map(|_| rng.gen_range(0.0..PI))
            .collect()
    }

    /// Execute the circuit for `params`; returns the node-order distribution
    /// and the backend's reported run time (0 if it reports none).
    fn sample(&self, graph: &Graph, params: &[f64]) -> QcutResult<(NodeDistribution, u64)> {
        let circuit = build_circuit(graph, params)?;
        let result = self.backend.run(&circuit, self.shots)?;
        let distribution = to_node_order(&result.counts, graph.num_nodes())?;
        Ok((distribution, result.execution_time_ms.unwrap_or(0)))
    }

    /// Optimize a depth-`depth` QAOA circuit for `graph`.
    #[instrument(skip(self, graph), fields(nodes = graph.num_nodes(), edges = graph.num_edges(), backend = self.backend.name()))]
    pub fn optimize(&self, graph: &Graph, depth: usize) -> QcutResult<QaoaResult> {
        if depth == 0 {
            return Err(QcutError::InvalidDepth);
        }

        let initial_params = self.initial_parameters(depth);

        // The circuit shape does not depend on the angles, so one check covers every trial.
        let template = build_circuit(graph, &initial_params)?;
        self.backend.validate(&template).into_result()?;

        let mut backend_time_ms = 0u64;
        let objective = |params: &[f64]| -> QcutResult<f64> {
            let (distribution, ms) = self.sample(graph, params)?;
            backend_time_ms += ms;
            let value = expected_cut(graph, &distribution)?;
            debug!(?params, value, "Objective evaluated");
            Ok(value)
        };

        let outcome: OptimizationResult = match self.optimizer {
            OptimizerKind::Cobyla => self.cobyla.minimize(objective, initial_params)?,
            OptimizerKind::Spsa => self.spsa.minimize(objective, initial_params)?,
        };

        info!(
            optimizer = %self.optimizer,
            evaluations = outcome.num_evaluations,
            converged = outcome.converged,
            best = outcome.optimal_value,
            backend_time_ms,
            "Optimization finished"
        );

        let optimal_params = QaoaParameters::from_flat(&outcome.optimal_params)?;
        let (distribution, ms) = self.sample(graph, &outcome.optimal_params)?;
        backend_time_ms += ms;
        let solution = most_frequent(&distribution).ok_or(QcutError::EmptyDistribution)?;
        let final_expected = expected_cut(graph, &distribution)?;
        let cut_value = graph.try_cut_value(&solution)?;

        Ok(QaoaResult {
            solution,
            cut_value,
            optimal_params,
            expected_cut: final_expected,
            num_evaluations: outcome.num_evaluations,
            num_iterations: outcome.num_iterations,
            converged: outcome.converged,
            history: outcome.history,
            distribution,
            backend_time_ms,
        })
    }
}
