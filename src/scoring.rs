//! The closed-form compatibility model.
//!
//! ## Score Pipeline
//!
//! ```text
//! traits a, traits b ──► weighted L2 distance ──► exp(-d)   = C_traits
//! resonance r        ──► β₁·mean + β₂·stability            = C_resonance
//!                        γ₁·C_traits + γ₂·C_resonance      = C_total
//!                        feasibility × C_total             = predicted score
//! ```
//!
//! Everything here is pure and deterministic. The scorer owns its weight
//! bundles; the defaults reproduce the reference parameterization
//! (β₁ = β₂ = γ₁ = γ₂ = 0.5, unit trait and outcome weights).

use serde::{Deserialize, Serialize};

use crate::types::{
    BlendWeights, OutcomeVector, OutcomeWeights, ResonanceVector, ResonanceWeights, TraitVector,
    TraitWeights,
};

/// Per-term decomposition of a pair's predicted compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub trait_compatibility: f64,
    pub resonance_compatibility: f64,
    /// Blend of the trait and resonance terms.
    pub total: f64,
    /// Feasibility after clamping to [0, 1].
    pub feasibility: f64,
    /// Final predicted score: feasibility × total.
    pub predicted: f64,
}

/// Deterministic pair compatibility scorer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompatibilityScorer {
    pub trait_weights: TraitWeights,
    pub resonance_weights: ResonanceWeights,
    pub blend_weights: BlendWeights,
    pub outcome_weights: OutcomeWeights,
}

impl CompatibilityScorer {
    /// Weighted Euclidean distance between two trait vectors.
    ///
    /// ```text
    /// d(a, b) = sqrt(Σₖ αₖ (aₖ - bₖ)²)
    /// ```
    pub fn trait_distance(&self, a: &TraitVector, b: &TraitVector) -> f64 {
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .zip(self.trait_weights.as_slice())
            .map(|((x, y), w)| w * (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Trait compatibility: exp(-distance), so identical vectors score 1.0.
    pub fn trait_compatibility(&self, a: &TraitVector, b: &TraitVector) -> f64 {
        (-self.trait_distance(a, b)).exp()
    }

    /// Resonance compatibility: β₁·mean + β₂·stability.
    pub fn resonance_compatibility(&self, resonance: &ResonanceVector) -> f64 {
        self.resonance_weights.beta_mean * resonance.mean()
            + self.resonance_weights.beta_stability * resonance.stability()
    }

    /// Full pipeline: blend the trait and resonance terms, then scale by
    /// the feasibility gate (clamped to [0, 1]).
    pub fn total_compatibility(
        &self,
        a: &TraitVector,
        b: &TraitVector,
        resonance: &ResonanceVector,
        feasibility: f64,
    ) -> ScoreBreakdown {
        let trait_compat = self.trait_compatibility(a, b);
        let resonance_compat = self.resonance_compatibility(resonance);
        let total = self.blend_weights.gamma_traits * trait_compat
            + self.blend_weights.gamma_resonance * resonance_compat;
        let feasibility = feasibility.clamp(0.0, 1.0);

        ScoreBreakdown {
            trait_compatibility: trait_compat,
            resonance_compatibility: resonance_compat,
            total,
            feasibility,
            predicted: feasibility * total,
        }
    }

    /// Soulmate score over observed outcomes. Toxicity is the only
    /// component applied with a negative sign.
    pub fn soulmate_score(&self, outcome: &OutcomeVector) -> f64 {
        let w = &self.outcome_weights;
        w.longevity * outcome.longevity
            + w.satisfaction * outcome.satisfaction
            + w.growth * outcome.growth
            - w.toxicity * outcome.conflict_toxicity
            + w.repair * outcome.repair_efficiency
            + w.alignment * outcome.trajectory_alignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_distance_identity() {
        let scorer = CompatibilityScorer::default();
        let v = TraitVector::uniform(0.3);
        assert!(scorer.trait_distance(&v, &v) < 1e-12, "Distance to self should be 0");
        assert!((scorer.trait_compatibility(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trait_distance_symmetry() {
        let scorer = CompatibilityScorer::default();
        let a = TraitVector::from_fn(|i| i as f64 / 32.0);
        let b = TraitVector::from_fn(|i| 1.0 - i as f64 / 32.0);

        let d_ab = scorer.trait_distance(&a, &b);
        let d_ba = scorer.trait_distance(&b, &a);
        assert!((d_ab - d_ba).abs() < 1e-12, "Distance should be symmetric");
        assert!(d_ab > 0.0);
    }

    #[test]
    fn test_trait_weights_scale_distance() {
        let mut scorer = CompatibilityScorer::default();
        scorer.trait_weights = TraitWeights::new(vec![4.0; 32]).unwrap();

        let a = TraitVector::uniform(0.0);
        let b = TraitVector::uniform(1.0);

        // 4x the weight doubles the distance
        let unweighted = CompatibilityScorer::default().trait_distance(&a, &b);
        let weighted = scorer.trait_distance(&a, &b);
        assert!((weighted - 2.0 * unweighted).abs() < 1e-9);
    }

    #[test]
    fn test_worked_example_all_half() {
        // Identical all-0.5 traits, all-0.5 resonance, feasibility 1.0:
        // trait compat 1.0, resonance compat 0.5*0.5 + 0.5*1.0 = 0.75,
        // total 0.5*1.0 + 0.5*0.75 = 0.875, predicted 0.875.
        let scorer = CompatibilityScorer::default();
        let v = TraitVector::uniform(0.5);
        let r = ResonanceVector::uniform(0.5);

        let breakdown = scorer.total_compatibility(&v, &v, &r, 1.0);
        assert!((breakdown.trait_compatibility - 1.0).abs() < 1e-12);
        assert!((breakdown.resonance_compatibility - 0.75).abs() < 1e-12);
        assert!((breakdown.total - 0.875).abs() < 1e-12);
        assert!((breakdown.predicted - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_feasibility_clamped() {
        let scorer = CompatibilityScorer::default();
        let v = TraitVector::uniform(0.5);
        let r = ResonanceVector::uniform(0.5);

        let high = scorer.total_compatibility(&v, &v, &r, 1.7);
        assert_eq!(high.feasibility, 1.0);
        assert!((high.predicted - high.total).abs() < 1e-12);

        let low = scorer.total_compatibility(&v, &v, &r, -0.2);
        assert_eq!(low.feasibility, 0.0);
        assert_eq!(low.predicted, 0.0);
    }

    #[test]
    fn test_soulmate_score_toxicity_negative() {
        let scorer = CompatibilityScorer::default();
        let clean = OutcomeVector {
            longevity: 0.8,
            satisfaction: 0.8,
            growth: 0.8,
            conflict_toxicity: 0.0,
            repair_efficiency: 0.8,
            trajectory_alignment: 0.8,
        };
        let toxic = OutcomeVector {
            conflict_toxicity: 0.5,
            ..clean
        };

        let s_clean = scorer.soulmate_score(&clean);
        let s_toxic = scorer.soulmate_score(&toxic);
        assert!((s_clean - 4.0).abs() < 1e-12);
        assert!((s_clean - s_toxic - 0.5).abs() < 1e-12, "Toxicity should subtract");
    }
}
