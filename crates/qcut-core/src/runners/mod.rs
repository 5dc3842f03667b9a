//! Hybrid classical-quantum loops.

pub mod qaoa;

pub use qaoa::{QaoaResult, QaoaRunner};
