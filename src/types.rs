//! Core value types for the compatibility model.
//!
//! ## Vector Widths
//!
//! | Type            | Width | Meaning                                  |
//! |-----------------|-------|------------------------------------------|
//! | TraitVector     | 32    | Latent personality coordinates in [0,1]  |
//! | ResonanceVector | 7     | Observed interaction-quality channels    |
//! | OutcomeVector   | 6     | Named relationship outcome components    |
//!
//! Widths are invariants enforced at construction: a `TraitVector` that
//! exists always has exactly 32 entries, so downstream arithmetic never
//! re-checks dimensions. Serde goes through `Vec<f64>` with the same
//! validation, so malformed JSON fails at deserialization, not later.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of latent trait dimensions per person.
pub const TRAIT_DIM: usize = 32;

/// Number of resonance channels per pair.
pub const RESONANCE_DIM: usize = 7;

/// Fixed-width vector of latent personality traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct TraitVector(Vec<f64>);

impl TraitVector {
    /// Build from a dynamic vector, failing on wrong arity.
    pub fn new(values: Vec<f64>) -> Result<Self, Error> {
        if values.len() != TRAIT_DIM {
            return Err(Error::TraitArity { got: values.len() });
        }
        Ok(Self(values))
    }

    /// Build by evaluating `f` at each dimension index. Infallible.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self((0..TRAIT_DIM).map(f).collect())
    }

    /// All dimensions set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self(vec![value; TRAIT_DIM])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for TraitVector {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self, Error> {
        Self::new(values)
    }
}

impl From<TraitVector> for Vec<f64> {
    fn from(v: TraitVector) -> Self {
        v.0
    }
}

/// Fixed-width vector of pair resonance channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ResonanceVector(Vec<f64>);

impl ResonanceVector {
    /// Build from a dynamic vector, failing on wrong arity.
    pub fn new(values: Vec<f64>) -> Result<Self, Error> {
        if values.len() != RESONANCE_DIM {
            return Err(Error::ResonanceArity { got: values.len() });
        }
        Ok(Self(values))
    }

    /// Build by evaluating `f` at each channel index. Infallible.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self((0..RESONANCE_DIM).map(f).collect())
    }

    /// All channels set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self(vec![value; RESONANCE_DIM])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / RESONANCE_DIM as f64
    }

    /// Population variance across the channels.
    pub fn variance(&self) -> f64 {
        let m = self.mean();
        self.0.iter().map(|x| (x - m).powi(2)).sum::<f64>() / RESONANCE_DIM as f64
    }

    /// Stability = clamp(1 - variance, 0, 1). High when channels agree.
    pub fn stability(&self) -> f64 {
        (1.0 - self.variance()).clamp(0.0, 1.0)
    }
}

impl TryFrom<Vec<f64>> for ResonanceVector {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self, Error> {
        Self::new(values)
    }
}

impl From<ResonanceVector> for Vec<f64> {
    fn from(v: ResonanceVector) -> Self {
        v.0
    }
}

/// Named relationship outcome components for a pair.
///
/// All components are nonnegative in practice; `conflict_toxicity` is the
/// one that hurts, and the scoring weights apply it with a negative sign.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutcomeVector {
    pub longevity: f64,
    pub satisfaction: f64,
    pub growth: f64,
    pub conflict_toxicity: f64,
    pub repair_efficiency: f64,
    pub trajectory_alignment: f64,
}

/// Per-dimension weights for the trait distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct TraitWeights(Vec<f64>);

impl TraitWeights {
    pub fn new(values: Vec<f64>) -> Result<Self, Error> {
        if values.len() != TRAIT_DIM {
            return Err(Error::TraitArity { got: values.len() });
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self(vec![1.0; TRAIT_DIM])
    }
}

impl TryFrom<Vec<f64>> for TraitWeights {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self, Error> {
        Self::new(values)
    }
}

impl From<TraitWeights> for Vec<f64> {
    fn from(w: TraitWeights) -> Self {
        w.0
    }
}

/// Mixing weights for the resonance compatibility term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceWeights {
    /// Weight on the channel mean.
    pub beta_mean: f64,
    /// Weight on the stability term.
    pub beta_stability: f64,
}

impl Default for ResonanceWeights {
    fn default() -> Self {
        Self {
            beta_mean: 0.5,
            beta_stability: 0.5,
        }
    }
}

/// Blend weights between the trait and resonance compatibility terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub gamma_traits: f64,
    pub gamma_resonance: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            gamma_traits: 0.5,
            gamma_resonance: 0.5,
        }
    }
}

/// Weights for the soulmate score over outcome components.
///
/// All positive; `toxicity` is subtracted in the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeWeights {
    pub longevity: f64,
    pub satisfaction: f64,
    pub growth: f64,
    pub toxicity: f64,
    pub repair: f64,
    pub alignment: f64,
}

impl Default for OutcomeWeights {
    fn default() -> Self {
        Self {
            longevity: 1.0,
            satisfaction: 1.0,
            growth: 1.0,
            toxicity: 1.0,
            repair: 1.0,
            alignment: 1.0,
        }
    }
}
