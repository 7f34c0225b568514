//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;

use qoracle_ir::{Instruction, InstructionKind, IrError, Measurement, StandardGate};

use crate::counts::format_outcome;
use crate::error::{SimError, SimResult};

/// Below this weight a reset treats the qubit as certainly |1⟩.
const RESET_EPSILON: f64 = 1e-12;

/// Outcome probabilities closer than this are a tie.
const TIE_EPSILON: f64 = 1e-12;

/// A statevector representing a quantum state.
///
/// Basis index `i` encodes qubit `q` in bit `q` of `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    pub(crate) amplitudes: Vec<Complex64>,
    /// Number of qubits.
    pub(crate) num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// All amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Total probability Σ|a|².
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction to the statevector.
    ///
    /// Operands are checked first; a malformed instruction leaves the state
    /// untouched.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        self.check_operands(instruction)?;
        let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
        match &instruction.kind {
            InstructionKind::Gate(gate) => self.apply_standard_gate(gate, &qubits),
            InstructionKind::Reset => qubits.iter().for_each(|&q| self.reset(q)),
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    fn check_operands(&self, instruction: &Instruction) -> SimResult<()> {
        instruction
            .validate(self.num_qubits as u32)
            .map_err(|e| match e {
                IrError::InvalidOperand { qubit, .. } => SimError::InvalidOperand {
                    qubit: qubit.0,
                    num_qubits: self.num_qubits,
                },
                IrError::DuplicateQubit { qubit, .. } => SimError::OverlappingOperands {
                    qubit: qubit.0,
                    gate_name: instruction.name().to_string(),
                },
                other => SimError::Ir(other),
            })
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::MCX { .. } => {
                let (target, controls) = qubits.split_last().map_or((0, &[][..]), |(t, c)| (*t, c));
                self.apply_mcx(controls, target);
            }
            StandardGate::GlobalPhase(theta) => self.apply_global_phase(*theta),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    pub(crate) fn apply_x(&mut self, qubit: usize) {
        self.apply_controlled_x(0, qubit);
    }

    pub(crate) fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_global_phase(&mut self, theta: f64) {
        let phase = Complex64::from_polar(1.0, theta);
        for amp in &mut self.amplitudes {
            *amp *= phase;
        }
    }

    // =========================================================================
    // Controlled gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        self.apply_controlled_x(1 << control, target);
    }

    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let ctrl_mask = controls.iter().fold(0, |mask, &c| mask | (1 << c));
        self.apply_controlled_x(ctrl_mask, target);
    }

    /// Swap amplitude pairs differing in `target`, restricted to basis states
    /// where every bit of `ctrl_mask` is set. An empty mask is a plain X.
    fn apply_controlled_x(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Project `qubit` onto |0⟩ and renormalize.
    ///
    /// If the qubit is certainly |1⟩ the projection is empty; the qubit is
    /// flipped instead, which is what a physical reset does in that case.
    fn reset(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let weight_zero: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask == 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        if weight_zero < RESET_EPSILON {
            self.apply_x(qubit);
            return;
        }

        let scale = 1.0 / weight_zero.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = Complex64::new(0.0, 0.0);
            } else {
                *amp *= scale;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample a measurement outcome over all qubits.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the total a hair below r.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(0)
    }

    /// The most probable basis state. Ties go to the lowest index.
    pub fn most_likely(&self) -> usize {
        let mut best = 0;
        let mut best_p = f64::NEG_INFINITY;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > best_p {
                best = i;
                best_p = p;
            }
        }
        best
    }

    /// The most probable measured bitstring.
    ///
    /// Basis states that read the same bitstring are summed first, so
    /// unmeasured qubits are traced out. Ties go to the lowest bitstring.
    pub fn most_likely_outcome(&self, measurements: &[Measurement], num_clbits: usize) -> String {
        // Two basis states read the same bits iff they agree on the measured qubits.
        let mask = if measurements.is_empty() {
            self.dim() - 1
        } else {
            measurements
                .iter()
                .fold(0, |mask, m| mask | (1 << m.qubit.index()))
        };

        let mut marginal: FxHashMap<usize, f64> = FxHashMap::default();
        for (i, amp) in self.amplitudes.iter().enumerate() {
            *marginal.entry(i & mask).or_default() += amp.norm_sqr();
        }

        let mut best: Option<(String, f64)> = None;
        for (key, p) in marginal {
            let bits = self.bitstring(key, measurements, num_clbits);
            let better = match &best {
                None => true,
                Some((best_bits, best_p)) => {
                    p > best_p + TIE_EPSILON
                        || ((p - best_p).abs() <= TIE_EPSILON && bits < *best_bits)
                }
            };
            if better {
                best = Some((bits, p));
            }
        }
        best.map_or_else(|| self.bitstring(0, measurements, num_clbits), |(bits, _)| bits)
    }

    /// Convert a sampled outcome to its classical bitstring.
    pub fn bitstring(
        &self,
        outcome: usize,
        measurements: &[Measurement],
        num_clbits: usize,
    ) -> String {
        format_outcome(outcome, measurements, num_clbits, self.num_qubits)
    }

    /// Cumulative distribution for repeated sampling from a fixed state.
    pub fn distribution(&self) -> CumulativeDistribution {
        let mut total = 0.0;
        let cdf = self
            .amplitudes
            .iter()
            .map(|a| {
                total += a.norm_sqr();
                total
            })
            .collect();
        CumulativeDistribution { cdf, total }
    }
}

/// Precomputed cumulative probabilities of a statevector.
///
/// Sampling is a binary search, so drawing many shots from one noiseless
/// evolution costs O(shots · n) instead of O(shots · 2^n).
#[derive(Debug, Clone)]
pub struct CumulativeDistribution {
    cdf: Vec<f64>,
    total: f64,
}

impl CumulativeDistribution {
    /// Draw one basis index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r = rng.r#gen::<f64>() * self.total;
        self.cdf
            .partition_point(|&c| c <= r)
            .min(self.cdf.len() - 1)
    }
}
