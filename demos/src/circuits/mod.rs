//! Oracle algorithm circuits and drivers.

pub mod deutsch_jozsa;
pub mod grover;

use qoracle_ir::{Circuit, ClbitId, NoiseModel, QubitId};
use serde::{Deserialize, Serialize};

use crate::error::{AlgoError, AlgoResult};

/// Shots and noise for one driver run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of shots.
    pub shots: u32,
    /// Noise applied after every gate, if any.
    pub noise: Option<NoiseModel>,
}

impl RunConfig {
    /// One noiseless shot, reporting the most likely outcome.
    pub fn noiseless() -> Self {
        Self {
            shots: 1,
            noise: None,
        }
    }

    /// `shots` noisy trajectories under `model`.
    pub fn noisy(model: NoiseModel, shots: u32) -> Self {
        Self {
            shots,
            noise: Some(model),
        }
    }

    /// 10% bit, phase and bit-phase flip over 1000 shots.
    pub fn default_noisy() -> Self {
        Self::noisy(
            NoiseModel {
                bit_flip: 0.1,
                phase_flip: 0.1,
                bit_phase_flip: 0.1,
            },
            1000,
        )
    }

    /// True if a noise model is attached.
    pub fn is_noisy(&self) -> bool {
        self.noise.is_some_and(|m| !m.is_noiseless())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::noiseless()
    }
}

/// Check an algorithm's input size and oracle width.
pub(crate) fn check_oracle(n: usize, oracle: &Circuit) -> AlgoResult<()> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    if oracle.num_qubits() != n + 1 {
        return Err(AlgoError::ArityMismatch {
            expected: n + 1,
            got: oracle.num_qubits(),
        });
    }
    Ok(())
}

/// Input qubits 0..n.
pub(crate) fn inputs(n: usize) -> impl Iterator<Item = QubitId> + Clone {
    (0..n as u32).map(QubitId)
}

/// Measure input qubit i into classical bit n-1-i, so qubit 0 reads leftmost.
pub(crate) fn measure_inputs_reversed(circuit: &mut Circuit, n: usize) -> AlgoResult<()> {
    for q in inputs(n) {
        circuit.measure(q, ClbitId(n as u32 - 1 - q.0))?;
    }
    Ok(())
}
