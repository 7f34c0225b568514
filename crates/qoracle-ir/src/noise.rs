//! Noise configuration.
//!
//! A [`NoiseModel`] is a plain parameter object: three independent per-gate
//! probabilities for a single-qubit Pauli error. It carries no state between
//! runs; the simulator decides when and where to apply it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Bit-flip / phase-flip / bit-phase-flip error probabilities.
///
/// After every unitary gate, each qubit the gate touched independently
/// suffers an X with probability `bit_flip`, a Z with probability
/// `phase_flip`, and an X followed by Z with probability `bit_phase_flip`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Probability of an X error.
    pub bit_flip: f64,
    /// Probability of a Z error.
    pub phase_flip: f64,
    /// Probability of a combined X·Z error.
    pub bit_phase_flip: f64,
}

impl NoiseModel {
    /// Create a validated noise model.
    pub fn new(bit_flip: f64, phase_flip: f64, bit_phase_flip: f64) -> IrResult<Self> {
        let model = Self {
            bit_flip,
            phase_flip,
            bit_phase_flip,
        };
        model.validate()?;
        Ok(model)
    }

    /// A model that never injects errors.
    pub fn noiseless() -> Self {
        Self {
            bit_flip: 0.0,
            phase_flip: 0.0,
            bit_phase_flip: 0.0,
        }
    }

    /// Check every probability lies in [0, 1].
    ///
    /// Needed after deserializing, since serde bypasses [`NoiseModel::new`].
    pub fn validate(&self) -> IrResult<()> {
        for (name, value) in [
            ("bit_flip", self.bit_flip),
            ("phase_flip", self.phase_flip),
            ("bit_phase_flip", self.bit_phase_flip),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(IrError::InvalidNoiseProbability { name, value });
            }
        }
        Ok(())
    }

    /// True when no error can ever be injected.
    pub fn is_noiseless(&self) -> bool {
        self.bit_flip == 0.0 && self.phase_flip == 0.0 && self.bit_phase_flip == 0.0
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::noiseless()
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bit_phase_flip(px={:.4}, pz={:.4}, pxz={:.4})",
            self.bit_flip, self.phase_flip, self.bit_phase_flip
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_probabilities() {
        let m = NoiseModel::new(0.1, 0.1, 0.1).unwrap();
        assert_eq!(m.bit_flip, 0.1);
        assert!(!m.is_noiseless());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            NoiseModel::new(1.5, 0.0, 0.0),
            Err(IrError::InvalidNoiseProbability {
                name: "bit_flip",
                ..
            })
        ));
        assert!(matches!(
            NoiseModel::new(0.0, -0.1, 0.0),
            Err(IrError::InvalidNoiseProbability {
                name: "phase_flip",
                ..
            })
        ));
        assert!(NoiseModel::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_noiseless_default() {
        assert!(NoiseModel::default().is_noiseless());
    }

    #[test]
    fn test_display() {
        let m = NoiseModel::new(0.1, 0.2, 0.05).unwrap();
        assert_eq!(
            format!("{m}"),
            "bit_phase_flip(px=0.1000, pz=0.2000, pxz=0.0500)"
        );
    }

    #[test]
    fn test_serialization_roundtrip_validates() {
        let json = r#"{"bit_flip":0.2,"phase_flip":0.0,"bit_phase_flip":2.0}"#;
        let m: NoiseModel = serde_json::from_str(json).unwrap();
        assert!(m.validate().is_err());
    }
}
