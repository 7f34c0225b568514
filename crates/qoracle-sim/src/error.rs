//! Error types for the simulator crate.

use thiserror::Error;

/// Errors produced while executing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A gate references a qubit outside the statevector.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit statevector")]
    InvalidOperand {
        /// The offending qubit index.
        qubit: u32,
        /// Width of the statevector.
        num_qubits: usize,
    },

    /// Controls and target of a gate overlap.
    #[error("Qubit {qubit} appears more than once in '{gate_name}'")]
    OverlappingOperands {
        /// The repeated qubit index.
        qubit: u32,
        /// Name of the gate.
        gate_name: String,
    },

    /// Circuit is wider than the simulator allows.
    #[error("Circuit has {requested} qubits but simulator only supports {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        requested: usize,
        /// Configured maximum.
        max: u32,
    },

    /// Total probability drifted away from 1. Indicates an engine bug.
    #[error("State is not normalized after execution: total probability {norm}")]
    UnnormalizedState {
        /// Observed Σ|a|².
        norm: f64,
    },

    /// Circuit or noise model rejected by the IR layer.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qoracle_ir::IrError),
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
