//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while constructing or composing circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand references a qubit outside the circuit.
    #[error(
        "Qubit {qubit} is out of range for a {num_qubits}-qubit circuit{}",
        format_gate_context(.gate_name)
    )]
    InvalidOperand {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in one instruction (e.g. control == target).
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Classical bit outside the classical register.
    #[error("Classical bit {clbit} is out of range for {num_clbits} classical bits")]
    ClbitNotFound {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Width of the classical register.
        num_clbits: u32,
    },

    /// A classical bit already receives a measurement.
    #[error("Classical bit {0} is already mapped to a measurement")]
    DuplicateClassicalBit(ClbitId),

    /// Composing circuits of different widths without a qubit map.
    #[error("Cannot compose a {right}-qubit circuit onto a {left}-qubit circuit")]
    DimensionMismatch {
        /// Width of the receiving circuit.
        left: u32,
        /// Width of the appended circuit (or length of the qubit map).
        right: u32,
    },

    /// A qubit map for composition is malformed.
    #[error("Invalid qubit map: {0}")]
    InvalidQubitMap(String),

    /// A noise probability is outside [0, 1].
    #[error("Noise probability '{name}' must lie in [0, 1], got {value}")]
    InvalidNoiseProbability {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
