//! Measurement results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use qoracle_ir::Measurement;

/// Histogram of measured bitstrings.
///
/// Keys follow the usual convention: one character per classical bit,
/// highest classical index leftmost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Outcomes ordered by descending count, then by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome. Ties go to the lexicographically smallest.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Render a basis-state index as a classical bitstring.
///
/// With a measurement map, each mapped classical bit takes the value of its
/// qubit and unmapped bits read `0`. Without one, the full basis state is
/// reported over all `num_qubits`, highest qubit leftmost.
pub fn format_outcome(
    outcome: usize,
    measurements: &[Measurement],
    num_clbits: usize,
    num_qubits: usize,
) -> String {
    if measurements.is_empty() {
        return (0..num_qubits)
            .rev()
            .map(|q| if (outcome >> q) & 1 == 1 { '1' } else { '0' })
            .collect();
    }

    let mut bits = vec!['0'; num_clbits];
    for m in measurements {
        if (outcome >> m.qubit.index()) & 1 == 1 {
            bits[num_clbits - 1 - m.clbit.index()] = '1';
        }
    }
    bits.into_iter().collect()
}

/// How the simulator turned amplitudes into counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Single noiseless shot reporting the most probable basis state.
    MostLikely,
    /// One noiseless evolution, repeated Born-rule draws.
    Sampled,
    /// One noisy evolution per shot.
    Trajectories,
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingMode::MostLikely => "most-likely",
            SamplingMode::Sampled => "sampled",
            SamplingMode::Trajectories => "trajectories",
        };
        f.write_str(name)
    }
}

/// Counts plus execution metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measured histogram.
    pub counts: Counts,
    /// Requested shots.
    pub shots: u32,
    /// Sampling strategy that produced `counts`.
    pub mode: SamplingMode,
    /// Wall-clock time of the run, in milliseconds.
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Wrap a histogram.
    pub fn new(counts: Counts, shots: u32, mode: SamplingMode) -> Self {
        Self {
            counts,
            shots,
            mode,
            execution_time_ms: None,
        }
    }

    /// Attach the measured execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
