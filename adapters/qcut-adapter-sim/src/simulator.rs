//! Simulator backend implementation.

use std::sync::Mutex;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use qcut_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, check_shots,
};
use qcut_ir::{Circuit, ClbitId, QubitId};

use crate::statevector::{Sampler, Statevector};

/// Local simulator backend.
///
/// Prepares the statevector once per [`Backend::run`] call and draws every
/// shot from the final probabilities. Measurements are treated as terminal:
/// a gate acting on a qubit after it was measured is rejected.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings (20 qubits,
    /// 100 000 shots, entropy-seeded).
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Override the per-run shot limit.
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.capabilities = self.capabilities.with_max_shots(max_shots);
        self
    }

    /// Make sampling reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Collect the qubit → clbit map, rejecting gates after measurement.
    fn measurement_map(circuit: &Circuit) -> HalResult<FxHashMap<ClbitId, QubitId>> {
        let mut map = FxHashMap::default();
        let mut measured: Vec<bool> = vec![false; circuit.num_qubits()];

        for inst in circuit.instructions() {
            if inst.is_measure() {
                for (qubit, clbit) in inst.measured_pairs() {
                    measured[qubit.index()] = true;
                    map.insert(clbit, qubit);
                }
            } else if inst.is_gate() {
                if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                    return Err(HalError::Unsupported(format!(
                        "gate '{}' on {} after measurement",
                        inst.name(),
                        q
                    )));
                }
            }
        }

        Ok(map)
    }

    /// Format a basis state as a register-order key.
    fn outcome_key(
        outcome: usize,
        num_clbits: usize,
        map: &FxHashMap<ClbitId, QubitId>,
    ) -> String {
        (0..num_clbits)
            .rev()
            .map(|c| {
                #[allow(clippy::cast_possible_truncation)]
                let clbit = ClbitId(c as u32);
                match map.get(&clbit) {
                    Some(q) if outcome & (1 << q.index()) != 0 => '1',
                    _ => '0',
                }
            })
            .collect()
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                backend: self.capabilities.name.clone(),
                qubits: circuit.num_qubits(),
                max: self.capabilities.num_qubits,
            });
        }
        check_shots(&self.capabilities, shots)?;

        let start = Instant::now();
        let map = Self::measurement_map(circuit)?;

        let mut sv = Statevector::new(circuit.num_qubits());
        let mut applied = 0usize;
        for inst in circuit.instructions() {
            sv.apply(inst);
            applied += 1;
        }
        debug!(
            "Prepared {}-qubit state with {} instructions",
            sv.num_qubits(),
            applied
        );

        let sampler = Sampler::new(&sv.probabilities());
        let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
        {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for _ in 0..shots {
                *outcomes.entry(sampler.sample(&mut *rng)).or_insert(0) += 1;
            }
        }

        let num_clbits = circuit.num_clbits();
        let mut counts = Counts::new();
        for (outcome, freq) in outcomes {
            counts.insert(Self::outcome_key(outcome, num_clbits, &map), freq);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        #[allow(clippy::cast_possible_truncation)]
        let ms = elapsed.as_millis() as u64;
        Ok(ExecutionResult::new(counts, shots).with_execution_time(ms))
    }
}
