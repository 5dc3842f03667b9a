//! qcut Circuit Intermediate Representation
//!
//! Core data structures for the variational circuits built by `qcut-core`
//! and executed by `qcut-hal` backends.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (petgraph) of wire segments and operation
//! nodes. The high-level [`Circuit`] API is a fluent builder on top of it.
//!
//! # Example: one cost term of a QAOA layer
//!
//! ```rust
//! use qcut_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("edge", 2, 2);
//! circuit.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.rz(0.7, QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 5);
//! ```
//!
//! # Gates
//!
//! | Gate | Qubits | Used for |
//! |------|--------|----------|
//! | `H` | 1 | uniform superposition |
//! | `X` | 1 | basis-state preparation |
//! | `Rx` | 1 | mixer layer |
//! | `Rz` | 1 | ZZ phase between the two `CX` |
//! | `CX` | 2 | ZZ decomposition |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
