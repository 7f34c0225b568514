//! Deutsch–Jozsa algorithm.
//!
//! Decides with a single oracle query whether a boolean function on n bits
//! is constant or balanced. The oracle acts on n input qubits plus a helper
//! qubit at index n; the helper is prepared in |−⟩ so the oracle kicks its
//! answer back as a phase on the inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use qoracle_ir::{Circuit, QubitId};
use qoracle_sim::{Counts, Simulator};

use super::{RunConfig, check_oracle, inputs, measure_inputs_reversed};
use crate::error::{AlgoError, AlgoResult};

/// Verdict drawn from a Deutsch–Jozsa histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// f returns the same value on every input.
    Constant,
    /// f returns 0 on exactly half of the inputs.
    Balanced,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Constant => f.write_str("constant"),
            FunctionKind::Balanced => f.write_str("balanced"),
        }
    }
}

/// Build the Deutsch–Jozsa circuit around `oracle`.
///
/// The result has n+1 qubits and n classical bits; input qubit i is
/// measured into classical bit n-1-i.
pub fn deutsch_jozsa_circuit(n: usize, oracle: &Circuit) -> AlgoResult<Circuit> {
    check_oracle(n, oracle)?;
    let helper = QubitId(n as u32);

    let mut prep = Circuit::with_size("deutsch_jozsa", n as u32 + 1, n as u32);
    for q in inputs(n) {
        prep.reset(q)?;
    }
    prep.barrier_all()?;
    for q in inputs(n) {
        prep.h(q)?;
    }
    prep.x(helper)?.h(helper)?;
    prep.barrier_all()?;

    let mut circuit = prep.compose(oracle)?;
    circuit.barrier_all()?;
    for q in inputs(n) {
        circuit.h(q)?;
    }
    circuit.barrier_all()?;
    measure_inputs_reversed(&mut circuit, n)?;

    debug!(
        "Built Deutsch-Jozsa circuit: {} qubits, {} ops, depth {}",
        circuit.num_qubits(),
        circuit.num_ops(),
        circuit.depth()
    );
    Ok(circuit.with_name("deutsch_jozsa"))
}

/// Build and run Deutsch–Jozsa, returning the circuit and its histogram.
pub fn run_deutsch_jozsa(
    n: usize,
    oracle: &Circuit,
    simulator: &Simulator,
    config: &RunConfig,
) -> AlgoResult<(Circuit, Counts)> {
    let circuit = deutsch_jozsa_circuit(n, oracle)?;
    info!(
        "Running Deutsch-Jozsa with n = {}, {} shots{}",
        n,
        config.shots,
        if config.is_noisy() { ", noisy" } else { "" }
    );
    let counts = simulator.run(&circuit, config.shots, config.noise.as_ref())?;
    Ok((circuit, counts))
}

/// Balanced oracle: f(x) = x₀, encoded as CX(0, n).
pub fn balanced_function(n: usize) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    let mut f = Circuit::with_size("balanced", n as u32 + 1, 0);
    f.cx(QubitId(0), QubitId(n as u32))?;
    Ok(f)
}

/// Constant oracle: f(x) = 1, encoded as X on the helper.
pub fn constant_function(n: usize) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    let mut f = Circuit::with_size("constant", n as u32 + 1, 0);
    f.x(QubitId(n as u32))?;
    Ok(f)
}

/// Read the verdict off a histogram: all-zeros most frequent means constant.
pub fn classify(counts: &Counts) -> FunctionKind {
    match counts.most_frequent() {
        Some((bits, _)) if bits.chars().all(|c| c == '0') => FunctionKind::Constant,
        _ => FunctionKind::Balanced,
    }
}
