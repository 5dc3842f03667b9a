//! qcut Local Statevector Simulator
//!
//! The default execution service for QAOA runs. Exact statevector
//! simulation followed by shot sampling, limited to ~20 qubits by memory.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```
//! use qcut_adapter_sim::SimulatorBackend;
//! use qcut_hal::Backend;
//! use qcut_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("flip", 2, 2);
//! circuit.x(QubitId(0)).unwrap().measure_all().unwrap();
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let result = backend.run(&circuit, 1000).unwrap();
//! // Register order: clbit 0 is the rightmost character.
//! assert_eq!(result.counts.get("01"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
