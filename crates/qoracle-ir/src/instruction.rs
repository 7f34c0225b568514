//! Circuit instructions combining gates with operands.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(StandardGate),
    /// Reset qubit to |0⟩. Only meaningful before entangling gates.
    Reset,
    /// Barrier (ordering marker, no computational effect).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on. Controls come before the target.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a CX instruction.
    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::gate(StandardGate::CX, [control, target])
    }

    /// Create a multi-controlled X instruction.
    pub fn mcx(controls: impl IntoIterator<Item = QubitId>, target: QubitId) -> Self {
        let mut qubits: Vec<_> = controls.into_iter().collect();
        let num_controls = qubits.len() as u32;
        qubits.push(target);
        Self {
            kind: InstructionKind::Gate(StandardGate::MCX { num_controls }),
            qubits,
        }
    }

    /// Create a global phase instruction.
    pub fn global_phase(theta: f64) -> Self {
        Self::gate(StandardGate::GlobalPhase(theta), [])
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Control operands (empty for uncontrolled instructions).
    pub fn controls(&self) -> &[QubitId] {
        let n = self.as_gate().map_or(0, |g| g.num_controls() as usize);
        &self.qubits[..n.min(self.qubits.len())]
    }

    /// Target operand of a gate, i.e. its last qubit.
    pub fn target(&self) -> Option<QubitId> {
        self.as_gate().and(self.qubits.last().copied())
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Check operands against a circuit of `num_qubits` qubits.
    ///
    /// Every operand must be in range and appear at most once, and gates
    /// must carry exactly as many operands as they act on.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        if let InstructionKind::Gate(gate) = &self.kind {
            let expected = gate.num_qubits();
            if expected != self.qubits.len() as u32 {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got: self.qubits.len() as u32,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &self.qubits {
            if qubit.0 >= num_qubits {
                return Err(IrError::InvalidOperand {
                    qubit,
                    num_qubits,
                    gate_name: Some(self.name().to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(self.name().to_string()),
                });
            }
        }
        Ok(())
    }

    /// Return a copy with every operand passed through `map`.
    pub(crate) fn remapped(&self, map: &[QubitId]) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|q| map[q.index()]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.target(), Some(QubitId(0)));
        assert!(inst.controls().is_empty());
    }

    #[test]
    fn test_mcx_operands() {
        let inst = Instruction::mcx([QubitId(0), QubitId(1)], QubitId(3));
        assert_eq!(inst.as_gate(), Some(&StandardGate::MCX { num_controls: 2 }));
        assert_eq!(inst.controls(), &[QubitId(0), QubitId(1)]);
        assert_eq!(inst.target(), Some(QubitId(3)));
        assert!(inst.validate(4).is_ok());
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.qubits.len(), 3);
        assert_eq!(inst.target(), None);
    }

    #[test]
    fn test_validate_out_of_range() {
        let inst = Instruction::cx(QubitId(0), QubitId(5));
        assert!(matches!(
            inst.validate(3),
            Err(IrError::InvalidOperand {
                qubit: QubitId(5),
                num_qubits: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_overlap() {
        let inst = Instruction::mcx([QubitId(0), QubitId(1)], QubitId(1));
        assert!(matches!(
            inst.validate(3),
            Err(IrError::DuplicateQubit {
                qubit: QubitId(1),
                ..
            })
        ));
    }

    #[test]
    fn test_validate_arity() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            inst.validate(2),
            Err(IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_global_phase_has_no_operands() {
        let inst = Instruction::global_phase(1.0);
        assert!(inst.qubits.is_empty());
        assert!(inst.validate(1).is_ok());
        assert_eq!(inst.target(), None);
    }
}
