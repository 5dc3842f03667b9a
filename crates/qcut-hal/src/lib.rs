//! qcut Hardware Abstraction Layer
//!
//! The contract between the Max-Cut solvers in `qcut-core` and the services
//! that execute circuits.
//!
//! - [`Backend`] executes a [`qcut_ir::Circuit`] for a number of shots.
//! - [`Capabilities`] describes what a backend accepts.
//! - [`Counts`] and [`ExecutionResult`] carry measurement statistics back.
//!
//! # Bit order
//!
//! Every backend reports outcome keys in register order: the leftmost
//! character is the highest classical bit. Consumers that index by qubit
//! must reverse the key.
//!
//! # Example
//!
//! ```ignore
//! use qcut_hal::Backend;
//!
//! fn print_counts(backend: &dyn Backend, circuit: &qcut_ir::Circuit) -> qcut_hal::HalResult<()> {
//!     backend.validate(circuit).into_result()?;
//!     let result = backend.run(circuit, 1000)?;
//!     for (bitstring, count) in result.counts.iter() {
//!         println!("{bitstring}: {count} / {}", result.counts.total_shots());
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, ValidationResult, check_shots};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
