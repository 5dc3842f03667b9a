//! Problem definitions.

pub mod bitstring;
pub mod maxcut;

pub use bitstring::{Bitstring, ParseBitstringError};
pub use maxcut::{Graph, GraphError};
