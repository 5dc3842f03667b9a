//! Fluent circuit builder over [`CircuitDag`].

use rustc_hash::FxHashMap;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A named circuit whose qubits and classical bits are numbered `0..n`.
///
/// Every builder method validates its operands against the registers and
/// returns `&mut Self`, so ansatz layers chain with `?`:
///
/// ```
/// use qcut_ir::{Circuit, QubitId};
///
/// let (a, b) = (QubitId(0), QubitId(1));
/// let mut zz = Circuit::with_size("zz", 2, 0);
/// zz.cx(a, b)?.rz(0.4, b)?.cx(a, b)?;
/// assert_eq!(zz.depth(), 3);
/// # Ok::<(), qcut_ir::IrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    dag: CircuitDag,
}

impl Circuit {
    /// An empty circuit with no registers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dag: CircuitDag::new(),
        }
    }

    /// A circuit with `num_qubits` qubits and `num_clbits` classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        (0..num_qubits).for_each(|_| {
            circuit.add_qubit();
        });
        (0..num_clbits).for_each(|_| {
            circuit.add_clbit();
        });
        circuit
    }

    /// Append a qubit and return its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits() as u32);
        self.dag.add_qubit(id);
        id
    }

    /// Append a classical bit and return its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits() as u32);
        self.dag.add_clbit(id);
        id
    }

    fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    /// Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Bit flip.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// `exp(-i θ X / 2)`; the QAOA mixer uses `θ = 2β`.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// `exp(-i θ Z / 2)`.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Controlled NOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Measure `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure qubit `i` into classical bit `i` for every qubit, growing the
    /// classical register if it is short.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits() < self.num_qubits() {
            self.add_clbit();
        }
        let n = self.num_qubits() as u32;
        let inst = Instruction::measure_all((0..n).map(QubitId), (0..n).map(ClbitId))?;
        self.push(inst)
    }

    /// Append every instruction of `other` onto the same wire indices.
    ///
    /// `other` must fit inside this circuit's registers.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits() > self.num_qubits() || other.num_clbits() > self.num_clbits() {
            return Err(IrError::ComposeMismatch {
                other: other.name.clone(),
                other_qubits: other.num_qubits(),
                qubits: self.num_qubits(),
            });
        }
        for inst in other.instructions() {
            self.dag.apply(inst.clone())?;
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.dag.num_qubits()
    }

    pub fn num_clbits(&self) -> usize {
        self.dag.num_clbits()
    }

    /// Longest chain of operations on any wire.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Instructions in the order they were appended.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.ops().map(|(_, inst)| inst)
    }

    /// Number of instructions per mnemonic (`"h"`, `"cx"`, `"measure"`, ...).
    pub fn gate_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for inst in self.instructions() {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }
}
