//! Solver configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QCUT_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::optimizers::OptimizerKind;

/// Complete solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcutConfig {
    /// QAOA loop settings
    #[serde(default)]
    pub qaoa: QaoaConfig,

    /// Simulated annealer settings
    #[serde(default)]
    pub annealer: AnnealerConfig,

    /// Statevector simulator limits
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// QAOA loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaConfig {
    /// Number of cost/mixer layers (p)
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Shots per circuit execution
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Optimizer: "cobyla" or "spsa"
    #[serde(default)]
    pub optimizer: OptimizerKind,

    /// Maximum optimizer iterations
    #[serde(default = "default_maxiter")]
    pub maxiter: usize,

    /// Convergence tolerance
    #[serde(default = "default_tol")]
    pub tol: f64,

    /// Initial trust region radius (COBYLA)
    #[serde(default = "default_rhobeg")]
    pub rhobeg: f64,

    /// Final trust region radius (COBYLA)
    #[serde(default = "default_rhoend")]
    pub rhoend: f64,

    /// Seed for the initial parameters; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Simulated annealer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealerConfig {
    /// Independent annealing runs; the best sample wins
    #[serde(default = "default_num_reads")]
    pub num_reads: usize,

    /// Full sweeps over all variables per run
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,

    /// Starting temperature
    #[serde(default = "default_t_start")]
    pub t_start: f64,

    /// Final temperature
    #[serde(default = "default_t_end")]
    pub t_end: f64,

    /// RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Statevector simulator limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Largest circuit the simulator accepts
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Largest shot count per execution
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Sampling seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_depth() -> usize {
    1
}

fn default_shots() -> u32 {
    1024
}

fn default_maxiter() -> usize {
    100
}

fn default_tol() -> f64 {
    1e-4
}

fn default_rhobeg() -> f64 {
    0.5
}

fn default_rhoend() -> f64 {
    1e-4
}

fn default_num_reads() -> usize {
    10
}

fn default_sweeps() -> usize {
    1000
}

fn default_t_start() -> f64 {
    5.0
}

fn default_t_end() -> f64 {
    0.05
}

fn default_max_qubits() -> u32 {
    20
}

fn default_max_shots() -> u32 {
    100_000
}

impl Default for QaoaConfig {
    fn default() -> Self {
        QaoaConfig {
            depth: default_depth(),
            shots: default_shots(),
            optimizer: OptimizerKind::default(),
            maxiter: default_maxiter(),
            tol: default_tol(),
            rhobeg: default_rhobeg(),
            rhoend: default_rhoend(),
            seed: None,
        }
    }
}

impl Default for AnnealerConfig {
    fn default() -> Self {
        AnnealerConfig {
            num_reads: default_num_reads(),
            sweeps: default_sweeps(),
            t_start: default_t_start(),
            t_end: default_t_end(),
            seed: None,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_qubits: default_max_qubits(),
            max_shots: default_max_shots(),
            seed: None,
        }
    }
}

impl QcutConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: QcutConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            QcutConfig::default()
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `QCUT_*` environment variables into this configuration.
    ///
    /// Only variables that are set override the current values. Values that
    /// fail to parse are logged and ignored.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable source.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        override_parsed(&lookup, "QCUT_DEPTH", &mut self.qaoa.depth);
        override_parsed(&lookup, "QCUT_SHOTS", &mut self.qaoa.shots);
        override_parsed(&lookup, "QCUT_OPTIMIZER", &mut self.qaoa.optimizer);
        override_parsed(&lookup, "QCUT_MAXITER", &mut self.qaoa.maxiter);

        if let Some(v) = lookup("QCUT_SEED") {
            match v.parse::<u64>() {
                // One seed drives every randomized component
                Ok(seed) => {
                    self.qaoa.seed = Some(seed);
                    self.annealer.seed = Some(seed);
                    self.simulator.seed = Some(seed);
                }
                Err(e) => warn!("Ignoring QCUT_SEED={v}: {e}"),
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let qaoa = &self.qaoa;
        if qaoa.depth == 0 {
            return Err(ConfigError::ValidationError(
                "qaoa.depth must be at least 1".to_string(),
            ));
        }
        if qaoa.shots == 0 || qaoa.shots > self.simulator.max_shots {
            return Err(ConfigError::ValidationError(format!(
                "qaoa.shots must be in 1..={}, got {}",
                self.simulator.max_shots, qaoa.shots
            )));
        }
        if qaoa.maxiter == 0 {
            return Err(ConfigError::ValidationError(
                "qaoa.maxiter must be greater than 0".to_string(),
            ));
        }
        if !qaoa.tol.is_finite() || qaoa.tol <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "qaoa.tol must be positive, got {}",
                qaoa.tol
            )));
        }
        if qaoa.rhoend.is_nan() || qaoa.rhoend <= 0.0 || qaoa.rhobeg < qaoa.rhoend {
            return Err(ConfigError::ValidationError(format!(
                "qaoa trust region must satisfy rhobeg >= rhoend > 0, got {} / {}",
                qaoa.rhobeg, qaoa.rhoend
            )));
        }

        let annealer = &self.annealer;
        if annealer.num_reads == 0 || annealer.sweeps == 0 {
            return Err(ConfigError::ValidationError(
                "annealer.num_reads and annealer.sweeps must be greater than 0".to_string(),
            ));
        }
        if annealer.t_end.is_nan() || annealer.t_end <= 0.0 || annealer.t_start < annealer.t_end {
            return Err(ConfigError::ValidationError(format!(
                "annealer temperatures must satisfy t_start >= t_end > 0, got {} / {}",
                annealer.t_start, annealer.t_end
            )));
        }

        match self.simulator.max_qubits {
            1..=30 => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "simulator.max_qubits must be in 1..=30, got {other}"
                )));
            }
        }

        Ok(())
    }
}

fn override_parsed<T, F>(lookup: &F, key: &str, slot: &mut T)
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(key) {
        match v.parse() {
            Ok(val) => *slot = val,
            Err(e) => warn!("Ignoring {key}={v}: {e}"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = QcutConfig::default();
        assert_eq!(config.qaoa.depth, 1);
        assert_eq!(config.qaoa.shots, 1024);
        assert_eq!(config.qaoa.maxiter, 100);
        assert_eq!(config.qaoa.optimizer, OptimizerKind::Cobyla);
        assert_eq!(config.annealer.num_reads, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "qaoa:\n  depth: 3\n  optimizer: spsa\n  seed: 11\nannealer:\n  sweeps: 200\n"
        )
        .unwrap();

        let config = QcutConfig::from_file(file.path()).unwrap();
        assert_eq!(config.qaoa.depth, 3);
        assert_eq!(config.qaoa.optimizer, OptimizerKind::Spsa);
        assert_eq!(config.qaoa.seed, Some(11));
        assert_eq!(config.qaoa.shots, 1024);
        assert_eq!(config.annealer.sweeps, 200);
        assert_eq!(config.simulator, SimulatorConfig::default());
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            QcutConfig::from_file("/nonexistent/qcut.yaml"),
            Err(ConfigError::IoError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "qaoa:\n  optimizer: adam\n").unwrap();
        assert!(matches!(
            QcutConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "qaoa:\n  depth: 0\n").unwrap();
        assert!(matches!(
            QcutConfig::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = QcutConfig::default().merge_vars(vars(&[
            ("QCUT_DEPTH", "2"),
            ("QCUT_SHOTS", "512"),
            ("QCUT_OPTIMIZER", "SPSA"),
            ("QCUT_SEED", "99"),
        ]));
        assert_eq!(config.qaoa.depth, 2);
        assert_eq!(config.qaoa.shots, 512);
        assert_eq!(config.qaoa.optimizer, OptimizerKind::Spsa);
        assert_eq!(config.qaoa.seed, Some(99));
        assert_eq!(config.annealer.seed, Some(99));
        assert_eq!(config.simulator.seed, Some(99));
        assert_eq!(config.qaoa.maxiter, 100);
    }

    #[test]
    fn test_env_unparseable_values_ignored() {
        let config = QcutConfig::default()
            .merge_vars(vars(&[("QCUT_DEPTH", "deep"), ("QCUT_SEED", "-1")]));
        assert_eq!(config, QcutConfig::default());
    }

    #[test]
    fn test_validate_invalid_values() {
        let mut config = QcutConfig::default();
        config.qaoa.shots = 0;
        assert!(config.validate().is_err());

        let mut config = QcutConfig::default();
        config.qaoa.shots = config.simulator.max_shots + 1;
        assert!(config.validate().is_err());

        let mut config = QcutConfig::default();
        config.qaoa.rhobeg = 1e-6;
        assert!(config.validate().is_err());

        let mut config = QcutConfig::default();
        config.annealer.t_end = 0.0;
        assert!(config.validate().is_err());

        let mut config = QcutConfig::default();
        config.simulator.max_qubits = 64;
        assert!(config.validate().is_err());
    }
}
