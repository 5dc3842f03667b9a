//! CLI command implementations.

pub mod bitstrings;
pub mod common;
pub mod compare;
pub mod solve;
pub mod version;
