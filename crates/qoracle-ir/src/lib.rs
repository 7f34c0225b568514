//! qoracle circuit representation
//!
//! This crate provides the data structures shared by the simulator and the
//! algorithm drivers: qubit/classical-bit identifiers, the gate vocabulary,
//! instructions, the [`Circuit`] builder and the [`NoiseModel`] parameter
//! object.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qoracle_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-NOT |
//! | `MCX` | k+1 | Multi-controlled X |
//! | `GlobalPhase` | 0 | Multiply the state by e^{iθ} |
//!
//! plus `reset` (state preparation only) and `barrier` (ordering marker).

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::{Circuit, Measurement};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::NoiseModel;
pub use qubit::{ClbitId, QubitId};
