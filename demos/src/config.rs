//! Configuration for the demo binaries.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config` or `QORACLE_CONFIG`)
//! 2. Environment variables (with `QORACLE_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags (applied by each binary)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use qoracle_ir::NoiseModel;
use qoracle_sim::{DEFAULT_MAX_QUBITS, Simulator};

use crate::circuits::RunConfig;

/// Widest register the demos will ever allocate (2^30 amplitudes = 16 GiB).
pub const QUBIT_CEILING: u32 = 30;

/// Complete demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Simulator settings
    #[serde(default)]
    pub simulator: SimulatorSettings,

    /// Noise settings for noisy runs
    #[serde(default)]
    pub noise: NoiseSettings,

    /// Qubit ranges for the scaling sweep
    #[serde(default)]
    pub scaling: ScalingSettings,
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Maximum circuit width, helper qubit included
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Seed for reproducible runs; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Noise settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    /// Run with noise at all
    #[serde(default)]
    pub enabled: bool,

    /// Probability of an X error after each gate
    #[serde(default = "default_flip")]
    pub bit_flip: f64,

    /// Probability of a Z error after each gate
    #[serde(default = "default_flip")]
    pub phase_flip: f64,

    /// Probability of an X·Z error after each gate
    #[serde(default = "default_flip")]
    pub bit_phase_flip: f64,

    /// Shots for noisy runs (noiseless runs use a single shot)
    #[serde(default = "default_shots")]
    pub shots: u32,
}

/// Scaling sweep bounds, in input qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingSettings {
    /// Largest n for Deutsch–Jozsa
    #[serde(default = "default_scaling_max")]
    pub deutsch_jozsa_max: usize,

    /// Largest n for Grover
    #[serde(default = "default_scaling_max")]
    pub grover_max: usize,
}

// Default value functions
fn default_max_qubits() -> u32 {
    DEFAULT_MAX_QUBITS
}

fn default_flip() -> f64 {
    0.1
}

fn default_shots() -> u32 {
    1000
}

fn default_scaling_max() -> usize {
    DEFAULT_MAX_QUBITS as usize - 1
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            seed: None,
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            bit_flip: default_flip(),
            phase_flip: default_flip(),
            bit_phase_flip: default_flip(),
            shots: default_shots(),
        }
    }
}

impl Default for ScalingSettings {
    fn default() -> Self {
        Self {
            deutsch_jozsa_max: default_scaling_max(),
            grover_max: default_scaling_max(),
        }
    }
}

impl NoiseSettings {
    /// The configured probabilities as a noise model.
    pub fn model(&self) -> NoiseModel {
        NoiseModel {
            bit_flip: self.bit_flip,
            phase_flip: self.phase_flip,
            bit_phase_flip: self.bit_phase_flip,
        }
    }
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;

        let config: DemoConfig =
            serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => DemoConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `QORACLE_*` process environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge overrides read through `lookup`.
    ///
    /// Only variables that are set override the file-loaded (or default)
    /// values. Unparsable values are logged and ignored.
    pub fn merge_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Simulator
        if let Some(v) = parsed(&lookup, "QORACLE_MAX_QUBITS") {
            self.simulator.max_qubits = v;
        }
        if let Some(v) = parsed(&lookup, "QORACLE_SEED") {
            self.simulator.seed = Some(v);
        }

        // Noise
        if let Some(v) = lookup("QORACLE_NOISE") {
            match parse_flag(&v) {
                Some(enabled) => self.noise.enabled = enabled,
                None => warn!("Ignoring QORACLE_NOISE={v}: expected true/false"),
            }
        }
        if let Some(v) = parsed(&lookup, "QORACLE_BIT_FLIP") {
            self.noise.bit_flip = v;
        }
        if let Some(v) = parsed(&lookup, "QORACLE_PHASE_FLIP") {
            self.noise.phase_flip = v;
        }
        if let Some(v) = parsed(&lookup, "QORACLE_BIT_PHASE_FLIP") {
            self.noise.bit_phase_flip = v;
        }
        if let Some(v) = parsed(&lookup, "QORACLE_SHOTS") {
            self.noise.shots = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulator.max_qubits == 0 || self.simulator.max_qubits > QUBIT_CEILING {
            return Err(ConfigError::Invalid(format!(
                "max_qubits must be between 1 and {QUBIT_CEILING}, got {}",
                self.simulator.max_qubits
            )));
        }

        self.noise
            .model()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.noise.shots == 0 {
            return Err(ConfigError::Invalid(
                "noise.shots must be greater than 0".to_string(),
            ));
        }

        if self.scaling.deutsch_jozsa_max == 0 || self.scaling.grover_max == 0 {
            return Err(ConfigError::Invalid(
                "scaling bounds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Simulator built from these settings.
    pub fn simulator(&self) -> Simulator {
        let sim = Simulator::new().with_max_qubits(self.simulator.max_qubits);
        match self.simulator.seed {
            Some(seed) => sim.with_seed(seed),
            None => sim,
        }
    }

    /// Shots and noise for a driver run.
    pub fn run_config(&self) -> RunConfig {
        if self.noise.enabled {
            RunConfig::noisy(self.noise.model(), self.noise.shots)
        } else {
            RunConfig::noiseless()
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {key}={raw}: not a valid value");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.simulator.max_qubits, 20);
        assert!(!config.noise.enabled);
        assert_eq!(config.noise.shots, 1000);
        assert_eq!(config.scaling.grover_max, 19);
        assert!(config.validate().is_ok());
        assert_eq!(config.run_config(), RunConfig::noiseless());
    }

    #[test]
    fn test_env_overrides() {
        let config = DemoConfig::default().merge_env_from(env(&[
            ("QORACLE_SEED", "42"),
            ("QORACLE_NOISE", "true"),
            ("QORACLE_BIT_FLIP", "0.25"),
            ("QORACLE_SHOTS", "500"),
        ]));
        assert_eq!(config.simulator.seed, Some(42));
        assert!(config.noise.enabled);
        assert_eq!(config.noise.bit_flip, 0.25);
        assert_eq!(config.noise.phase_flip, 0.1);

        let run = config.run_config();
        assert_eq!(run.shots, 500);
        assert_eq!(run.noise.map(|m| m.bit_flip), Some(0.25));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let config = DemoConfig::default().merge_env_from(env(&[
            ("QORACLE_MAX_QUBITS", "many"),
            ("QORACLE_NOISE", "sometimes"),
        ]));
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut config = DemoConfig::default();
        config.noise.phase_flip = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_qubit_limits() {
        let mut config = DemoConfig::default();
        config.simulator.max_qubits = 0;
        assert!(config.validate().is_err());
        config.simulator.max_qubits = QUBIT_CEILING + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: DemoConfig = serde_yaml_ng::from_str("noise:\n  enabled: true\n").unwrap();
        assert!(config.noise.enabled);
        assert_eq!(config.noise.bit_phase_flip, 0.1);
        assert_eq!(config.simulator.max_qubits, 20);
    }

    #[test]
    fn test_simulator_from_config() {
        let mut config = DemoConfig::default();
        config.simulator.max_qubits = 8;
        config.simulator.seed = Some(3);
        let sim = config.simulator();
        assert_eq!(sim.max_qubits(), 8);
        assert_eq!(sim.seed(), Some(3));
    }
}
