//! High-level circuit builder API.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A terminal measurement of one qubit into one classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Measurement {
    /// Measured qubit.
    pub qubit: QubitId,
    /// Classical bit receiving the outcome.
    pub clbit: ClbitId,
}

/// A quantum circuit.
///
/// An ordered list of [`Instruction`]s over a fixed number of qubits, plus
/// the mapping from measured qubits to classical bits. Measurements are
/// always read at the end of the circuit. Builder methods validate every
/// operand, so a `Circuit` handed to a simulator is always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
    /// Measurement map in insertion order.
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` qubits and no classical bits.
    pub fn new(num_qubits: u32) -> Self {
        Self::with_size("circuit", num_qubits, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
            measurements: vec![],
        }
    }

    /// Append an instruction after validating its operands.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.num_qubits)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::cx(control, target))
    }

    /// Apply a multi-controlled X gate.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::mcx(controls, target))
    }

    /// Multiply the whole state by e^{iθ}.
    pub fn global_phase(&mut self, theta: f64) -> IrResult<&mut Self> {
        self.append(Instruction::global_phase(theta))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        self.barrier(qubits)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::InvalidOperand {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some("measure".into()),
            });
        }
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitNotFound {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        if self.measurements.iter().any(|m| m.clbit == clbit) {
            return Err(IrError::DuplicateClassicalBit(clbit));
        }
        self.measurements.push(Measurement { qubit, clbit });
        Ok(self)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append all of `other`'s instructions and measurements to a copy of `self`.
    ///
    /// Both circuits must have the same number of qubits. The classical
    /// register of the result is as wide as the wider of the two.
    pub fn compose(&self, other: &Circuit) -> IrResult<Circuit> {
        let mut composed = self.clone();
        composed.extend_from(other)?;
        Ok(composed)
    }

    /// Like [`Circuit::compose`], placing `other`'s qubit `i` on `qubit_map[i]`.
    pub fn compose_mapped(&self, other: &Circuit, qubit_map: &[QubitId]) -> IrResult<Circuit> {
        let mut composed = self.clone();
        composed.extend_mapped(other, qubit_map)?;
        Ok(composed)
    }

    /// Append `other` to this circuit in place.
    ///
    /// Same rules as [`Circuit::compose`]. On error `self` is unchanged.
    pub fn extend_from(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if self.num_qubits != other.num_qubits {
            return Err(IrError::DimensionMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        let identity: Vec<_> = (0..other.num_qubits).map(QubitId).collect();
        self.extend_mapped(other, &identity)
    }

    /// Append `other` in place with its qubit `i` on `qubit_map[i]`.
    pub fn extend_mapped(
        &mut self,
        other: &Circuit,
        qubit_map: &[QubitId],
    ) -> IrResult<&mut Self> {
        if qubit_map.len() != other.num_qubits as usize {
            return Err(IrError::DimensionMismatch {
                left: other.num_qubits,
                right: qubit_map.len() as u32,
            });
        }
        // Reuse operand validation: the map must be in range and injective.
        Instruction::barrier(qubit_map.iter().copied())
            .validate(self.num_qubits)
            .map_err(|e| IrError::InvalidQubitMap(e.to_string()))?;
        if let Some(m) = other
            .measurements
            .iter()
            .find(|m| self.measurements.iter().any(|own| own.clbit == m.clbit))
        {
            return Err(IrError::DuplicateClassicalBit(m.clbit));
        }

        self.num_clbits = self.num_clbits.max(other.num_clbits);
        self.instructions
            .extend(other.instructions.iter().map(|i| i.remapped(qubit_map)));
        self.measurements.extend(other.measurements.iter().map(|m| Measurement {
            qubit: qubit_map[m.qubit.index()],
            clbit: m.clbit,
        }));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in program order, barriers included.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Measurement map in the order it was declared.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Number of operations, not counting barriers.
    pub fn num_ops(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_barrier()).count()
    }

    /// Operation counts keyed by instruction name.
    pub fn count_ops(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        if !self.measurements.is_empty() {
            counts.insert("measure", self.measurements.len());
        }
        counts
    }

    /// Circuit depth: the longest chain of operations on any qubit.
    ///
    /// Barriers and global phases do not add depth; terminal measurements
    /// add one layer on the qubits they read.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits()];
        for inst in &self.instructions {
            if inst.is_barrier() || inst.qubits.is_empty() {
                continue;
            }
            let level = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.index()] = level;
            }
        }
        for m in &self.measurements {
            levels[m.qubit.index()] += 1;
        }
        levels.into_iter().max().unwrap_or(0)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit '{}' ({} qubits, {} clbits)",
            self.name, self.num_qubits, self.num_clbits
        )?;
        for inst in &self.instructions {
            let operands: Vec<_> = inst.qubits.iter().map(ToString::to_string).collect();
            match &inst.kind {
                InstructionKind::Gate(StandardGate::GlobalPhase(theta)) => {
                    writeln!(f, "  global_phase({theta:.4})")?;
                }
                _ => writeln!(f, "  {} {}", inst.name(), operands.join(", "))?,
            }
        }
        for m in &self.measurements {
            writeln!(f, "  measure {} -> {}", m.qubit, m.clbit)?;
        }
        Ok(())
    }
}
