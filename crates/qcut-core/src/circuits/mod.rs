//! Variational circuit builders.

pub mod qaoa;

pub use qaoa::{
    QaoaParameters, build_circuit, build_cost_layer, build_mixer_layer, num_parameters,
};
