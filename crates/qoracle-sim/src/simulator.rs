//! Circuit executor.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

use qoracle_ir::{Circuit, NoiseModel};

use crate::counts::{Counts, ExecutionResult, SamplingMode};
use crate::error::{SimError, SimResult};
use crate::noise::apply_instruction_noise;
use crate::statevector::Statevector;

/// Allowed drift of Σ|a|² from 1 after an evolution.
const NORM_TOLERANCE: f64 = 1e-6;

/// Default width limit of the dense engine.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator.
///
/// Circuits are borrowed immutably. Every run owns its statevector and RNG,
/// so a `Simulator` can be shared freely.
#[derive(Debug, Clone)]
pub struct Simulator {
    max_qubits: u32,
    seed: Option<u64>,
    deterministic_single_shot: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a simulator with the default qubit limit and entropy seeding.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            deterministic_single_shot: true,
        }
    }

    /// Set the maximum circuit width.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Seed every run for reproducible counts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the most-likely shortcut for single noiseless shots.
    pub fn with_deterministic_single_shot(mut self, enabled: bool) -> Self {
        self.deterministic_single_shot = enabled;
        self
    }

    /// Maximum circuit width.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run `shots` shots and return the histogram.
    pub fn run(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: Option<&NoiseModel>,
    ) -> SimResult<Counts> {
        let mut rng = self.make_rng();
        self.run_with_rng(circuit, shots, noise, &mut rng)
    }

    /// Like [`Simulator::run`] but drawing from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: Option<&NoiseModel>,
        rng: &mut R,
    ) -> SimResult<Counts> {
        self.execute_with_rng(circuit, shots, noise, rng)
            .map(|result| result.counts)
    }

    /// Run and report counts together with mode and timing.
    pub fn execute(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: Option<&NoiseModel>,
    ) -> SimResult<ExecutionResult> {
        let mut rng = self.make_rng();
        self.execute_with_rng(circuit, shots, noise, &mut rng)
    }

    /// Like [`Simulator::execute`] but drawing from a caller-supplied generator.
    #[instrument(skip_all, fields(circuit = circuit.name(), qubits = circuit.num_qubits(), shots = shots))]
    pub fn execute_with_rng<R: Rng>(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: Option<&NoiseModel>,
        rng: &mut R,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();
        self.check_width(circuit)?;
        if let Some(model) = noise {
            model.validate()?;
        }
        let noise = noise.filter(|m| !m.is_noiseless());
        let mode = self.mode_for(shots, noise);

        debug!(
            "Starting simulation: {} qubits, {} shots, mode {}",
            circuit.num_qubits(),
            shots,
            mode
        );

        let mut counts = Counts::new();
        if shots > 0 {
            match (mode, noise) {
                (SamplingMode::Trajectories, Some(model)) => {
                    self.run_trajectories(circuit, shots, model, rng, &mut counts)?;
                }
                (SamplingMode::MostLikely, _) => {
                    let sv = self.statevector(circuit)?;
                    let bits =
                        sv.most_likely_outcome(circuit.measurements(), circuit.num_clbits());
                    counts.insert(bits, 1);
                }
                _ => {
                    let sv = self.statevector(circuit)?;
                    let dist = sv.distribution();
                    for _ in 0..shots {
                        counts.insert(self.bitstring(circuit, &sv, dist.sample(rng)), 1);
                    }
                }
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots, mode)
            .with_execution_time(elapsed.as_millis() as u64))
    }

    /// Sampling strategy for a run. A noiseless model counts as no model.
    pub fn mode_for(&self, shots: u32, noise: Option<&NoiseModel>) -> SamplingMode {
        match noise {
            Some(model) if !model.is_noiseless() => SamplingMode::Trajectories,
            _ if shots == 1 && self.deterministic_single_shot => SamplingMode::MostLikely,
            _ => SamplingMode::Sampled,
        }
    }

    /// Evolve the circuit once without noise and return the final state.
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.check_width(circuit)?;
        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst)?;
        }
        check_norm(&sv)?;
        Ok(sv)
    }

    fn run_trajectories<R: Rng>(
        &self,
        circuit: &Circuit,
        shots: u32,
        model: &NoiseModel,
        rng: &mut R,
        counts: &mut Counts,
    ) -> SimResult<()> {
        let mut injected = 0u64;
        for shot in 0..shots {
            let mut sv = Statevector::new(circuit.num_qubits());
            for inst in circuit.instructions() {
                sv.apply(inst)?;
                injected += u64::from(apply_instruction_noise(&mut sv, inst, model, rng));
            }
            check_norm(&sv)?;

            let outcome = sv.sample(rng);
            counts.insert(self.bitstring(circuit, &sv, outcome), 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }
        trace!("Injected {} Pauli errors over {} shots", injected, shots);
        Ok(())
    }

    fn bitstring(&self, circuit: &Circuit, sv: &Statevector, outcome: usize) -> String {
        sv.bitstring(outcome, circuit.measurements(), circuit.num_clbits())
    }

    fn check_width(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::TooManyQubits {
                requested: circuit.num_qubits(),
                max: self.max_qubits,
            });
        }
        Ok(())
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn check_norm(sv: &Statevector) -> SimResult<()> {
    let norm = sv.norm_sqr();
    if (norm - 1.0).abs() > NORM_TOLERANCE {
        return Err(SimError::UnnormalizedState { norm });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qoracle_ir::{ClbitId, QubitId};

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        circuit
    }

    #[test]
    fn test_simulator_bell_state() {
        let sim = Simulator::new().with_seed(42);
        let result = sim.execute(&bell(), 1000, None).unwrap();
        assert_eq!(result.shots, 1000);
        assert_eq!(result.mode, SamplingMode::Sampled);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 400 && counts.get("11") > 400);
    }

    #[test]
    fn test_zero_shots() {
        let counts = Simulator::new().run(&bell(), 0, None).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_single_shot_most_likely() {
        let sim = Simulator::new();
        let result = sim.execute(&bell(), 1, None).unwrap();
        assert_eq!(result.mode, SamplingMode::MostLikely);
        assert_eq!(result.counts.get("00"), 1);
    }

    #[test]
    fn test_single_shot_shortcut_disabled() {
        let sim = Simulator::new().with_deterministic_single_shot(false);
        assert_eq!(sim.mode_for(1, None), SamplingMode::Sampled);
        assert_eq!(sim.run(&bell(), 1, None).unwrap().total_shots(), 1);
    }

    #[test]
    fn test_noiseless_model_is_treated_as_none() {
        let sim = Simulator::new();
        let model = NoiseModel::noiseless();
        assert_eq!(sim.mode_for(10, Some(&model)), SamplingMode::Sampled);
        let noisy = NoiseModel::new(0.1, 0.0, 0.0).unwrap();
        assert_eq!(sim.mode_for(1, Some(&noisy)), SamplingMode::Trajectories);
    }

    #[test]
    fn test_too_many_qubits() {
        let sim = Simulator::new().with_max_qubits(5);
        let circuit = Circuit::with_size("test", 10, 0);
        let result = sim.run(&circuit, 100, None);
        assert!(matches!(
            result,
            Err(SimError::TooManyQubits {
                requested: 10,
                max: 5
            })
        ));
    }

    #[test]
    fn test_invalid_noise_rejected() {
        let model = NoiseModel {
            bit_flip: 1.5,
            phase_flip: 0.0,
            bit_phase_flip: 0.0,
        };
        let result = Simulator::new().run(&bell(), 10, Some(&model));
        assert!(matches!(result, Err(SimError::Ir(_))));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let sim = Simulator::new().with_seed(7);
        let model = NoiseModel::new(0.1, 0.1, 0.1).unwrap();
        let a = sim.run(&bell(), 200, Some(&model)).unwrap();
        let b = sim.run(&bell(), 200, Some(&model)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_shots(), 200);
    }

    #[test]
    fn test_certain_bit_flip_noise() {
        // X then a guaranteed extra X leaves the qubit at 0
        let mut circuit = Circuit::with_size("flip", 1, 1);
        circuit
            .x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        let model = NoiseModel::new(1.0, 0.0, 0.0).unwrap();
        let counts = Simulator::new()
            .with_seed(3)
            .run(&circuit, 50, Some(&model))
            .unwrap();
        assert_eq!(counts.get("0"), 50);
    }

    #[test]
    fn test_unmeasured_circuit_reports_all_qubits() {
        let mut circuit = Circuit::new(3);
        circuit.x(QubitId(2)).unwrap();
        let counts = Simulator::new().run(&circuit, 1, None).unwrap();
        assert_eq!(counts.get("100"), 1);
    }

    #[test]
    fn test_single_shot_marginalizes_unmeasured_qubits() {
        // q0 is flipped back only when q1 = q2 = 0, so P(q0 = 1) = 0.75
        // while |000⟩ is the lowest-index basis state
        let mut circuit = Circuit::with_size("partial", 3, 1);
        circuit
            .x(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .h(QubitId(2))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .mcx([QubitId(1), QubitId(2)], QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();

        let sim = Simulator::new();
        assert_eq!(sim.statevector(&circuit).unwrap().most_likely(), 0);
        let counts = sim.run(&circuit, 1, None).unwrap();
        assert_eq!(counts.get("1"), 1);
        assert_eq!(counts.total_shots(), 1);
    }

    #[test]
    fn test_check_norm() {
        let mut sv = Statevector::new(2);
        assert!(check_norm(&sv).is_ok());

        // Within tolerance
        sv.amplitudes[0] = Complex64::new((1.0 + 5e-7f64).sqrt(), 0.0);
        assert!(check_norm(&sv).is_ok());

        sv.amplitudes[0] = Complex64::new(1.1, 0.0);
        match check_norm(&sv) {
            Err(SimError::UnnormalizedState { norm }) => assert!((norm - 1.21).abs() < 1e-9),
            other => panic!("expected UnnormalizedState, got {other:?}"),
        }

        sv.amplitudes[0] = Complex64::new(0.0, 0.0);
        assert!(matches!(
            check_norm(&sv),
            Err(SimError::UnnormalizedState { .. })
        ));
    }

    #[test]
    fn test_statevector_inspection() {
        let sv = Simulator::new().statevector(&bell()).unwrap();
        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[3] - 0.5).abs() < 1e-12);
    }
}
