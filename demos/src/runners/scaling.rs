//! Execution time versus register width.
//!
//! Sweeps the input size of an algorithm with its default oracle and times
//! circuit construction plus simulation for each size. The report is plain
//! data so an external plotter can consume the JSON export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use qoracle_sim::Simulator;

use crate::circuits::RunConfig;
use crate::circuits::deutsch_jozsa::{balanced_function, run_deutsch_jozsa};
use crate::circuits::grover::{all_one_f, run_grover};
use crate::error::AlgoResult;

/// Algorithm to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Deutsch–Jozsa with the balanced CX(0, n) oracle.
    DeutschJozsa,
    /// Grover search with the all-ones oracle.
    Grover,
}

impl Algorithm {
    /// Build the default oracle and run once.
    fn run_once(&self, n: usize, simulator: &Simulator, config: &RunConfig) -> AlgoResult<()> {
        match self {
            Algorithm::DeutschJozsa => {
                let oracle = balanced_function(n)?;
                run_deutsch_jozsa(n, &oracle, simulator, config)?;
            }
            Algorithm::Grover => {
                let oracle = all_one_f(n)?;
                run_grover(n, &oracle, simulator, config)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::DeutschJozsa => f.write_str("Deutsch-Jozsa"),
            Algorithm::Grover => f.write_str("Grover"),
        }
    }
}

/// Widest input register `simulator` accepts, leaving room for the helper.
pub fn max_inputs(simulator: &Simulator) -> usize {
    (simulator.max_qubits() as usize).saturating_sub(1)
}

/// Timing for one register width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingSample {
    /// Input qubits n (the circuit has n + 1).
    pub num_qubits: usize,
    /// Wall-clock seconds for build and run.
    pub seconds: f64,
}

impl ScalingSample {
    /// Duration view of `seconds`.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds)
    }
}

/// Result of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingReport {
    /// Swept algorithm.
    pub algorithm: Algorithm,
    /// One sample per width, ascending.
    pub samples: Vec<ScalingSample>,
}

impl ScalingReport {
    /// Sum of all sample times.
    pub fn total_seconds(&self) -> f64 {
        self.samples.iter().map(|s| s.seconds).sum()
    }

    /// The slowest sample.
    pub fn slowest(&self) -> Option<&ScalingSample> {
        self.samples
            .iter()
            .max_by(|a, b| a.seconds.total_cmp(&b.seconds))
    }

    /// Text table, one line per width.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{} scaling:", self.algorithm));
        lines.push("-".repeat(40));
        for sample in &self.samples {
            lines.push(format!(
                "n = {:>3}: {:>10.3} ms",
                sample.num_qubits,
                sample.seconds * 1e3
            ));
        }
        lines.push(format!("total: {:.3}s", self.total_seconds()));
        lines.join("\n")
    }
}

/// Time `algorithm` for every input size in `qubits`.
///
/// `on_sample` is called after each width, for progress reporting. The
/// first failure aborts the sweep; widths past the simulator limit fail
/// with a `TooManyQubits` error.
pub fn measure_scaling(
    algorithm: Algorithm,
    qubits: RangeInclusive<usize>,
    simulator: &Simulator,
    config: &RunConfig,
    mut on_sample: impl FnMut(&ScalingSample),
) -> AlgoResult<ScalingReport> {
    info!(
        "Measuring {} scaling over n = {}..={}",
        algorithm,
        qubits.start(),
        qubits.end()
    );

    let mut samples = Vec::new();
    for n in qubits {
        let start = Instant::now();
        algorithm.run_once(n, simulator, config)?;
        let sample = ScalingSample {
            num_qubits: n,
            seconds: start.elapsed().as_secs_f64(),
        };
        debug!("n = {}: {:.3} ms", n, sample.seconds * 1e3);
        on_sample(&sample);
        samples.push(sample);
    }

    Ok(ScalingReport { algorithm, samples })
}
