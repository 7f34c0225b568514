//! Demo runners built on the algorithm drivers.

pub mod scaling;

pub use scaling::{Algorithm, ScalingReport, ScalingSample, max_inputs, measure_scaling};
