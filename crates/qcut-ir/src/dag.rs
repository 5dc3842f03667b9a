//! Wire-dependency graph behind [`Circuit`](crate::Circuit).
//!
//! Nodes are instructions; an edge `a -> b` labelled with a wire means `b` is
//! the next instruction on that wire after `a`. Nodes are only appended, so
//! node index order is insertion order and already topological.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A quantum or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    Qubit(QubitId),
    Clbit(ClbitId),
}

#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
    wires: FxHashSet<WireId>,
    /// Last instruction on each wire that has one.
    frontier: FxHashMap<WireId, NodeIndex>,
    num_qubits: usize,
    num_clbits: usize,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a qubit wire. Registering it twice is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.wires.insert(WireId::Qubit(qubit)) {
            self.num_qubits += 1;
        }
    }

    /// Register a classical wire. Registering it twice is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.wires.insert(WireId::Clbit(clbit)) {
            self.num_clbits += 1;
        }
    }

    /// Append `instruction` after the current last operation on each of its
    /// wires.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let op = instruction.name();

        if let Some(gate) = instruction.as_gate() {
            let expected = gate.num_qubits();
            if instruction.qubits.len() != expected as usize {
                return Err(IrError::QubitCountMismatch {
                    op,
                    expected,
                    got: instruction.qubits.len(),
                });
            }
        }

        let mut operands = Vec::with_capacity(instruction.qubits.len() + instruction.clbits.len());
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            let wire = WireId::Qubit(qubit);
            if !self.wires.contains(&wire) {
                return Err(IrError::QubitNotFound { qubit, op });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, op });
            }
            operands.push(wire);
        }
        for &clbit in &instruction.clbits {
            let wire = WireId::Clbit(clbit);
            if !self.wires.contains(&wire) {
                return Err(IrError::ClbitNotFound { clbit, op });
            }
            operands.push(wire);
        }

        let node = self.graph.add_node(instruction);
        for wire in operands {
            if let Some(prev) = self.frontier.insert(wire, node) {
                self.graph.add_edge(prev, node, wire);
            }
        }
        Ok(node)
    }

    /// Operations in insertion order.
    pub fn ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.graph
            .node_indices()
            .map(|idx| (idx, &self.graph[idx]))
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    #[inline]
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Length of the longest dependency chain.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            layer[node.index()] = 1 + self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|prev| layer[prev.index()])
                .max()
                .unwrap_or(0);
        }
        layer.into_iter().max().unwrap_or(0)
    }
}
