//! `qoracle-sim` — dense statevector simulator with Pauli noise.
//!
//! Executes [`qoracle_ir::Circuit`]s on a complex amplitude vector of
//! length 2^n and samples measurement outcomes by the Born rule.
//!
//! # Sampling
//!
//! | Mode | When | What happens |
//! |------|------|--------------|
//! | [`SamplingMode::MostLikely`] | noiseless, 1 shot | one evolution, report the most probable state |
//! | [`SamplingMode::Sampled`] | noiseless, many shots | one evolution, `shots` independent draws |
//! | [`SamplingMode::Trajectories`] | noisy | fresh evolution per shot, noise after every gate |
//!
//! # Example
//!
//! ```rust
//! use qoracle_ir::{Circuit, ClbitId, NoiseModel, QubitId};
//! use qoracle_sim::Simulator;
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//! circuit.measure(QubitId(0), ClbitId(0))?.measure(QubitId(1), ClbitId(1))?;
//!
//! let sim = Simulator::new().with_seed(42);
//! let counts = sim.run(&circuit, 1000, None)?;
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//!
//! let noise = NoiseModel::new(0.05, 0.05, 0.0)?;
//! let noisy = sim.run(&circuit, 1000, Some(&noise))?;
//! assert_eq!(noisy.total_shots(), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod counts;
pub mod error;
pub mod noise;
pub mod simulator;
pub mod statevector;

pub use counts::{Counts, ExecutionResult, SamplingMode, format_outcome};
pub use error::{SimError, SimResult};
pub use noise::{apply_instruction_noise, apply_noise};
pub use simulator::{DEFAULT_MAX_QUBITS, Simulator};
pub use statevector::{CumulativeDistribution, Statevector};
