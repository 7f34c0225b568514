//! Grover's search algorithm.
//!
//! Amplifies the amplitude of the input pattern an oracle marks, finding it
//! with O(√N) oracle queries. Oracles act on n input qubits plus a helper
//! qubit at index n and mark their pattern by flipping its phase.

use std::f64::consts::PI;
use tracing::{debug, info};

use qoracle_ir::{Circuit, QubitId};
use qoracle_sim::{Counts, Simulator};

use super::{RunConfig, check_oracle, inputs, measure_inputs_reversed};
use crate::error::{AlgoError, AlgoResult};

/// Number of Grover iterations for one marked item among 2^n.
///
/// `round(π·√(2ⁿ)/4 − 1/2)` with ties going to the even integer.
pub fn grover_iterations(n: usize) -> usize {
    let k = PI * 2f64.powi(n as i32).sqrt() / 4.0 - 0.5;
    k.round_ties_even().max(0.0) as usize
}

/// Phase flip on the all-zeros input state, the reflection at the core of
/// the diffusion operator.
pub fn z0(n: usize) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    let helper = QubitId(n as u32);
    let mut z0 = Circuit::with_size("z0", n as u32 + 1, 0);
    for q in inputs(n) {
        z0.x(q)?;
    }
    z0.mcx(inputs(n), helper)?.z(helper)?.mcx(inputs(n), helper)?;
    for q in inputs(n) {
        z0.x(q)?;
    }
    Ok(z0)
}

/// Build the Grover circuit around `oracle` with [`grover_iterations`] rounds.
///
/// Input qubit i is measured into classical bit n-1-i.
pub fn grover_circuit(n: usize, oracle: &Circuit) -> AlgoResult<Circuit> {
    check_oracle(n, oracle)?;
    let helper = QubitId(n as u32);
    let reflect = z0(n)?;
    let k = grover_iterations(n);

    let mut circuit = Circuit::with_size("grover", n as u32 + 1, n as u32);
    for q in inputs(n) {
        circuit.reset(q)?;
    }
    circuit.barrier_all()?;
    for q in inputs(n) {
        circuit.h(q)?;
    }

    for _ in 0..k {
        circuit.barrier_all()?;
        circuit.extend_from(oracle)?;
        for q in inputs(n) {
            circuit.h(q)?;
        }
        circuit.extend_from(&reflect)?;
        for q in inputs(n) {
            circuit.h(q)?;
        }
        // -1 on the whole register while the helper is |0⟩
        circuit.x(helper)?.z(helper)?.x(helper)?;
    }

    circuit.barrier_all()?;
    measure_inputs_reversed(&mut circuit, n)?;

    debug!(
        "Built Grover circuit: {} qubits, {} iterations, {} ops",
        circuit.num_qubits(),
        k,
        circuit.num_ops()
    );
    Ok(circuit)
}

/// Build and run Grover search, returning the circuit and its histogram.
pub fn run_grover(
    n: usize,
    oracle: &Circuit,
    simulator: &Simulator,
    config: &RunConfig,
) -> AlgoResult<(Circuit, Counts)> {
    let circuit = grover_circuit(n, oracle)?;
    info!(
        "Running Grover with n = {}, {} shots{}",
        n,
        config.shots,
        if config.is_noisy() { ", noisy" } else { "" }
    );
    let counts = simulator.run(&circuit, config.shots, config.noise.as_ref())?;
    Ok((circuit, counts))
}

/// Oracle marking the all-ones input: f(11…1) = 1, f = 0 elsewhere.
pub fn all_one_f(n: usize) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    let helper = QubitId(n as u32);
    let mut f = Circuit::with_size("all_ones", n as u32 + 1, 0);
    f.mcx(inputs(n), helper)?.z(helper)?.mcx(inputs(n), helper)?;
    Ok(f)
}

/// Oracle marking one input pattern.
///
/// `pattern` is written the way results are reported: character i is the
/// value of input qubit i. Inputs that must read `0` are flipped around an
/// all-ones test, and the helper is flipped too, so the phase lands on every
/// other pattern; the resulting -1 is global and Grover behaves the same.
pub fn marked_state_oracle(n: usize, pattern: &str) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    if pattern.len() != n || !pattern.chars().all(|c| c == '0' || c == '1') {
        return Err(AlgoError::InvalidMarkedState {
            pattern: pattern.to_string(),
            num_qubits: n,
        });
    }

    let helper = QubitId(n as u32);
    let flips: Vec<QubitId> = pattern
        .chars()
        .zip(inputs(n))
        .filter(|(c, _)| *c == '0')
        .map(|(_, q)| q)
        .chain(std::iter::once(helper))
        .collect();

    let mut f = Circuit::with_size(format!("marked_{pattern}"), n as u32 + 1, 0);
    for &q in &flips {
        f.x(q)?;
    }
    f.mcx(inputs(n), helper)?.z(helper)?.mcx(inputs(n), helper)?;
    for &q in &flips {
        f.x(q)?;
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_counts() {
        assert_eq!(grover_iterations(1), 1);
        assert_eq!(grover_iterations(2), 1);
        assert_eq!(grover_iterations(3), 2);
        assert_eq!(grover_iterations(4), 3);
        assert_eq!(grover_iterations(6), 6);
        assert_eq!(grover_iterations(10), 25);
    }

    #[test]
    fn test_z0_structure() {
        let z = z0(3).unwrap();
        let ops = z.count_ops();
        assert_eq!(ops["x"], 6);
        assert_eq!(ops["mcx"], 2);
        assert_eq!(ops["z"], 1);
        assert!(matches!(z0(0), Err(AlgoError::InvalidQubitCount(0))));
    }

    #[test]
    fn test_circuit_shape() {
        let circuit = grover_circuit(3, &all_one_f(3).unwrap()).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 3);
        // two rounds: 2 oracle MCX + 2 z0 MCX each
        assert_eq!(circuit.count_ops()["mcx"], 8);
        assert_eq!(circuit.count_ops()["barrier"], 4);
    }

    #[test]
    fn test_rejects_wrong_oracle_width() {
        let oracle = all_one_f(3).unwrap();
        assert!(matches!(
            grover_circuit(2, &oracle),
            Err(AlgoError::ArityMismatch {
                expected: 3,
                got: 4
            })
        ));
    }

    #[test]
    fn test_marked_oracle_matches_hand_written() {
        // X(0) X(2) MCX([0,1],2) Z(2) MCX([0,1],2) X(0) X(2)
        let mut hand = Circuit::with_size("hand", 3, 0);
        hand.x(QubitId(0))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .mcx([QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .z(QubitId(2))
            .unwrap()
            .mcx([QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .x(QubitId(2))
            .unwrap();

        let generated = marked_state_oracle(2, "01").unwrap();
        assert_eq!(generated.instructions(), hand.instructions());
    }

    #[test]
    fn test_marked_oracle_rejects_bad_patterns() {
        for bad in ["0", "012", "0a"] {
            assert!(matches!(
                marked_state_oracle(2, bad),
                Err(AlgoError::InvalidMarkedState { .. })
            ));
        }
    }

    #[test]
    fn test_all_ones_search() {
        // n = 1 ends on a 50/50 split, so start at 2
        let sim = Simulator::new();
        for n in 2..=5 {
            let (_, counts) =
                run_grover(n, &all_one_f(n).unwrap(), &sim, &RunConfig::noiseless()).unwrap();
            assert_eq!(counts.get(&"1".repeat(n)), 1, "n = {n}");
        }
    }
}
