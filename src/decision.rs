//! KEEP/DISCARD decisions for theory variants.
//!
//! ## Decision Rule
//!
//! A variant is kept when it improves on its reference model:
//!
//! ```text
//! KEEP iff (ΔR² > 0 and ΔR² >= r2_min_delta_keep)
//!       or (ΔF1 > 0 and ΔF1 >= f1_min_delta_keep and classification ran)
//! ```
//!
//! Two refinements, both from the calibration sweeps:
//! - When the R² threshold is below 5e-4, a positive ΔR² of at least
//!   0.3 x the threshold also counts. Very low thresholds are meant to be
//!   permissive, and the strict comparison was rejecting genuine
//!   improvements at the noise floor.
//! - Numerology is additionally compared against the astrology variant
//!   when one exists, so a signal that only adds value on top of
//!   astrology is still caught. KEEP wins if either comparison passes.
//!
//! The policy is stateless; every call re-derives its answer from the
//! evaluation results alone.

use serde::{Deserialize, Serialize};

use crate::eval::EvaluationResult;

/// Threshold below which the lenient R² acceptance applies.
const LENIENT_R2_CUTOFF: f64 = 5e-4;

/// Fraction of the R² threshold accepted under the lenient rule.
const LENIENT_R2_FACTOR: f64 = 0.3;

/// Minimum improvement deltas for a KEEP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub r2_min_delta_keep: f64,
    pub f1_min_delta_keep: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            r2_min_delta_keep: 0.001,
            f1_min_delta_keep: 0.0,
        }
    }
}

/// Verdict for a single theory variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Keep,
    Discard,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "KEEP",
            Decision::Discard => "DISCARD",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdicts for all evaluated variants. `None` means the variant was not
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decisions {
    pub astrology: Option<Decision>,
    pub numerology: Option<Decision>,
    pub combined: Option<Decision>,
}

fn f1_of(result: &EvaluationResult) -> Option<f64> {
    result.classification.as_ref().map(|c| c.metrics.f1)
}

/// Does `candidate` improve enough on `reference` to keep?
fn improves(
    candidate: &EvaluationResult,
    reference: &EvaluationResult,
    thresholds: &DecisionThresholds,
) -> bool {
    let delta_r2 = candidate.r2 - reference.r2;
    let mut r2_meets = delta_r2 > 0.0 && delta_r2 >= thresholds.r2_min_delta_keep;

    if thresholds.r2_min_delta_keep < LENIENT_R2_CUTOFF {
        r2_meets =
            r2_meets || (delta_r2 > 0.0 && delta_r2 >= thresholds.r2_min_delta_keep * LENIENT_R2_FACTOR);
    }

    let f1_meets = match f1_of(candidate) {
        Some(candidate_f1) => {
            let delta_f1 = candidate_f1 - f1_of(reference).unwrap_or(0.0);
            delta_f1 > 0.0 && delta_f1 >= thresholds.f1_min_delta_keep
        }
        None => false,
    };

    r2_meets || f1_meets
}

fn verdict(keep: bool) -> Decision {
    if keep {
        Decision::Keep
    } else {
        Decision::Discard
    }
}

/// Derive KEEP/DISCARD verdicts from the per-variant evaluation results.
pub fn decide(
    baseline: &EvaluationResult,
    astrology: Option<&EvaluationResult>,
    numerology: Option<&EvaluationResult>,
    combined: Option<&EvaluationResult>,
    thresholds: &DecisionThresholds,
) -> Decisions {
    let astrology_decision = astrology.map(|a| verdict(improves(a, baseline, thresholds)));

    let numerology_decision = numerology.map(|n| {
        let vs_baseline = improves(n, baseline, thresholds);
        let vs_astrology = astrology.map_or(false, |a| improves(n, a, thresholds));
        verdict(vs_baseline || vs_astrology)
    });

    let combined_decision = combined.map(|c| verdict(improves(c, baseline, thresholds)));

    Decisions {
        astrology: astrology_decision,
        numerology: numerology_decision,
        combined: combined_decision,
    }
}

#[cfg(test)]
mod tests {
    use crate::eval::{ClassificationMetrics, ClassificationOutcome};

    use super::*;

    fn result(r2: f64, f1: Option<f64>) -> EvaluationResult {
        EvaluationResult {
            n_train: 80,
            n_test: 20,
            r2,
            mse: 0.0,
            mae: 0.0,
            predictions: Vec::new(),
            actuals: Vec::new(),
            classification: f1.map(|f1| ClassificationOutcome {
                metrics: ClassificationMetrics {
                    accuracy: 0.0,
                    precision: 0.0,
                    recall: 0.0,
                    f1,
                },
                predicted: Vec::new(),
                actual: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_keep_on_r2_improvement() {
        let baseline = result(0.50, None);
        let variant = result(0.52, None);
        let d = decide(&baseline, Some(&variant), None, None, &DecisionThresholds::default());
        assert_eq!(d.astrology, Some(Decision::Keep));
        assert_eq!(d.numerology, None);
    }

    #[test]
    fn test_discard_below_threshold() {
        let baseline = result(0.50, None);
        let variant = result(0.5005, None);
        let d = decide(&baseline, Some(&variant), None, None, &DecisionThresholds::default());
        assert_eq!(d.astrology, Some(Decision::Discard));
    }

    #[test]
    fn test_discard_on_degradation_even_with_zero_threshold() {
        let baseline = result(0.50, None);
        let variant = result(0.49, None);
        let thresholds = DecisionThresholds {
            r2_min_delta_keep: 0.0,
            f1_min_delta_keep: 0.0,
        };
        // Delta must be strictly positive regardless of the threshold
        let d = decide(&baseline, Some(&variant), None, None, &thresholds);
        assert_eq!(d.astrology, Some(Decision::Discard));
    }

    #[test]
    fn test_lenient_rule_below_cutoff() {
        let baseline = result(0.50, None);
        // Delta 0.00015 misses the 0.0004 threshold but clears 0.3x it
        let variant = result(0.50015, None);
        let thresholds = DecisionThresholds {
            r2_min_delta_keep: 0.0004,
            f1_min_delta_keep: 0.0,
        };
        let d = decide(&baseline, Some(&variant), None, None, &thresholds);
        assert_eq!(d.astrology, Some(Decision::Keep));
    }

    #[test]
    fn test_lenient_rule_not_applied_above_cutoff() {
        let baseline = result(0.50, None);
        let variant = result(0.5005, None);
        let thresholds = DecisionThresholds {
            r2_min_delta_keep: 0.001,
            f1_min_delta_keep: 0.0,
        };
        let d = decide(&baseline, Some(&variant), None, None, &thresholds);
        assert_eq!(d.astrology, Some(Decision::Discard));
    }

    #[test]
    fn test_f1_improvement_alone_keeps() {
        let baseline = result(0.50, Some(0.4));
        let variant = result(0.48, Some(0.6));
        let d = decide(&baseline, Some(&variant), None, None, &DecisionThresholds::default());
        assert_eq!(d.astrology, Some(Decision::Keep));
    }

    #[test]
    fn test_f1_rule_requires_classification() {
        let baseline = result(0.50, None);
        let variant = result(0.48, None);
        let thresholds = DecisionThresholds {
            r2_min_delta_keep: 0.001,
            f1_min_delta_keep: -1.0,
        };
        // Without classification there is no F1 path to a KEEP
        let d = decide(&baseline, Some(&variant), None, None, &thresholds);
        assert_eq!(d.astrology, Some(Decision::Discard));
    }

    #[test]
    fn test_numerology_compared_against_astrology() {
        let baseline = result(0.60, None);
        // Numerology loses to the baseline but beats the (weak) astrology variant
        let astrology = result(0.55, None);
        let numerology = result(0.58, None);
        let d = decide(
            &baseline,
            Some(&astrology),
            Some(&numerology),
            None,
            &DecisionThresholds::default(),
        );
        assert_eq!(d.astrology, Some(Decision::Discard));
        assert_eq!(d.numerology, Some(Decision::Keep));
    }
}
