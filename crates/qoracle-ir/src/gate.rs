//! Gate vocabulary.
//!
//! Only the gates needed by Deutsch–Jozsa and Grover are modelled. Each
//! variant has a fixed unitary action; the operands live on the
//! [`Instruction`](crate::Instruction) that carries the gate.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate. Operands: `[control, target]`.
    CX,
    /// Multi-controlled X gate. Operands: `[controls..., target]`.
    MCX {
        /// Number of control qubits preceding the target.
        num_controls: u32,
    },
    /// Global phase e^{iθ}. Takes no operands.
    GlobalPhase(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::CX => "cx",
            StandardGate::MCX { .. } => "mcx",
            StandardGate::GlobalPhase(_) => "global_phase",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::GlobalPhase(_) => 0,
            StandardGate::H | StandardGate::X | StandardGate::Z => 1,
            StandardGate::CX => 2,
            StandardGate::MCX { num_controls } => num_controls + 1,
        }
    }

    /// Number of leading operands that act as controls.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CX => 1,
            StandardGate::MCX { num_controls } => *num_controls,
            _ => 0,
        }
    }

    /// Get the phase angle, if this gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::GlobalPhase(theta) => Some(*theta),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::MCX { num_controls: 3 }.num_qubits(), 4);
        assert_eq!(StandardGate::GlobalPhase(PI).num_qubits(), 0);

        assert_eq!(StandardGate::CX.num_controls(), 1);
        assert_eq!(StandardGate::MCX { num_controls: 2 }.num_controls(), 2);
        assert_eq!(StandardGate::Z.num_controls(), 0);
    }

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::MCX { num_controls: 2 }.name(), "mcx");
        assert_eq!(StandardGate::GlobalPhase(0.5).name(), "global_phase");
    }

    #[test]
    fn test_angle() {
        assert_eq!(StandardGate::GlobalPhase(PI).angle(), Some(PI));
        assert_eq!(StandardGate::X.angle(), None);
    }
}
