//! Stochastic Pauli error injection for trajectory simulation.

use rand::Rng;

use qoracle_ir::{Instruction, NoiseModel};

use crate::statevector::Statevector;

/// Inject bit/phase-flip errors on a single qubit.
///
/// The three channels fire independently: X with `bit_flip`, Z with
/// `phase_flip`, and X followed by Z with `bit_phase_flip`. Returns the
/// number of channels that fired.
pub fn apply_noise<R: Rng>(
    state: &mut Statevector,
    qubit: usize,
    model: &NoiseModel,
    rng: &mut R,
) -> u32 {
    let mut fired = 0;

    if model.bit_flip > 0.0 && rng.gen_bool(model.bit_flip) {
        state.apply_x(qubit);
        fired += 1;
    }
    if model.phase_flip > 0.0 && rng.gen_bool(model.phase_flip) {
        state.apply_z(qubit);
        fired += 1;
    }
    if model.bit_phase_flip > 0.0 && rng.gen_bool(model.bit_phase_flip) {
        state.apply_x(qubit);
        state.apply_z(qubit);
        fired += 1;
    }

    fired
}

/// Inject noise on every qubit touched by a gate instruction.
///
/// Resets, barriers and global phases are not noisy.
pub fn apply_instruction_noise<R: Rng>(
    state: &mut Statevector,
    instruction: &Instruction,
    model: &NoiseModel,
    rng: &mut R,
) -> u32 {
    match instruction.as_gate() {
        Some(gate) if gate.angle().is_none() => instruction
            .qubits
            .iter()
            .map(|q| apply_noise(state, q.index(), model, rng))
            .sum(),
        _ => 0,
    }
}
