//! Error types for the algorithm drivers.

use thiserror::Error;

/// Errors raised while building or running an oracle algorithm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Input register must hold at least one qubit.
    #[error("Invalid qubit count {0}: need at least one input qubit")]
    InvalidQubitCount(usize),

    /// Oracle width does not match the n+1 register.
    #[error("Oracle acts on {got} qubits, expected {expected}")]
    ArityMismatch {
        /// n + 1.
        expected: usize,
        /// Oracle width.
        got: usize,
    },

    /// Marked pattern has the wrong length or non-binary characters.
    #[error("Invalid marked state '{pattern}' for {num_qubits} input qubits")]
    InvalidMarkedState {
        /// The rejected pattern.
        pattern: String,
        /// Expected length.
        num_qubits: usize,
    },

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] qoracle_ir::IrError),

    /// Simulation failed.
    #[error("Simulation error: {0}")]
    Sim(#[from] qoracle_sim::SimError),
}

/// Result type for algorithm drivers.
pub type AlgoResult<T> = Result<T, AlgoError>;
