//! The ablation study pipeline.
//!
//! ## Variants
//!
//! | Key          | Feature set                  |
//! |--------------|------------------------------|
//! | `baseline`   | traits + resonance only      |
//! | `astrology`  | baseline + astrology block   |
//! | `numerology` | baseline + numerology block  |
//! | `combined`   | baseline + both blocks       |
//!
//! Each variant is extracted, evaluated with the same split seed, and
//! compared against the baseline by the decision policy. A theory variant
//! only runs when its block actually widens the schema beyond the
//! baseline. The report keeps both the summarized deltas and the raw
//! evaluation results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::Dataset;
use crate::decision::{decide, Decision, DecisionThresholds};
use crate::error::Result;
use crate::eval::{evaluate, EvalConfig, EvaluationResult};
use crate::features::{FeatureExtractor, FeatureSet};

pub const BASELINE_KEY: &str = "baseline";
pub const ASTROLOGY_KEY: &str = "astrology";
pub const NUMEROLOGY_KEY: &str = "numerology";
pub const COMBINED_KEY: &str = "combined";

/// Configuration for one ablation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AblationConfig {
    pub test_fraction: f64,
    pub seed: u64,
    /// Ridge regularization strength.
    pub alpha: f64,
    /// Run the median-binarized classification pass against soulmate flags.
    pub include_classification: bool,
    pub thresholds: DecisionThresholds,
}

impl Default for AblationConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            alpha: 0.1,
            include_classification: true,
            thresholds: DecisionThresholds::default(),
        }
    }
}

impl AblationConfig {
    fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            test_fraction: self.test_fraction,
            seed: self.seed,
            alpha: self.alpha,
        }
    }
}

/// Regression summary for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionSummary {
    pub r2: f64,
    /// Improvement over the baseline variant (0.0 for the baseline itself).
    pub delta_r2: f64,
}

/// Classification summary for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub f1: f64,
    pub delta_f1: f64,
    pub accuracy: f64,
}

/// Summarized outcome for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantReport {
    pub regression: RegressionSummary,
    pub classification: Option<ClassificationSummary>,
    /// `None` for the baseline, which is not subject to a verdict.
    pub decision: Option<Decision>,
}

/// Structured ablation report keyed by variant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AblationReport {
    pub variants: BTreeMap<String, VariantReport>,
    /// Raw evaluation results, kept as an escape hatch for callers that
    /// need predictions or full metric vectors.
    pub raw: BTreeMap<String, EvaluationResult>,
}

impl AblationReport {
    pub fn variant(&self, key: &str) -> Option<&VariantReport> {
        self.variants.get(key)
    }

    pub fn decision(&self, key: &str) -> Option<Decision> {
        self.variants.get(key).and_then(|v| v.decision)
    }
}

/// Run the full ablation study over a dataset.
pub fn run_ablation_study(dataset: &Dataset, config: &AblationConfig) -> Result<AblationReport> {
    let extractor = FeatureExtractor::new(dataset);
    let eval_config = config.eval_config();

    let flags: Option<Vec<bool>> = config.include_classification.then(|| {
        dataset
            .pairs()
            .iter()
            .map(|p| p.soulmate_flag.unwrap_or(false))
            .collect()
    });
    let flags = flags.as_deref();

    let baseline_matrix = extractor.extract(FeatureSet::baseline())?;
    let baseline = evaluate(&baseline_matrix, flags, &eval_config);
    info!(r2 = baseline.r2, n_cols = baseline_matrix.n_cols(), "evaluated baseline");

    let mut raw = BTreeMap::new();
    for (key, set) in [
        (ASTROLOGY_KEY, FeatureSet::with_astrology()),
        (NUMEROLOGY_KEY, FeatureSet::with_numerology()),
        (COMBINED_KEY, FeatureSet::full()),
    ] {
        let matrix = extractor.extract(set)?;
        if matrix.n_cols() <= baseline_matrix.n_cols() {
            continue;
        }
        let result = evaluate(&matrix, flags, &eval_config);
        info!(variant = key, r2 = result.r2, delta_r2 = result.r2 - baseline.r2, "evaluated variant");
        raw.insert(key.to_string(), result);
    }

    let decisions = decide(
        &baseline,
        raw.get(ASTROLOGY_KEY),
        raw.get(NUMEROLOGY_KEY),
        raw.get(COMBINED_KEY),
        &config.thresholds,
    );

    let mut variants = BTreeMap::new();
    variants.insert(BASELINE_KEY.to_string(), summarize(&baseline, &baseline, None));
    for (key, decision) in [
        (ASTROLOGY_KEY, decisions.astrology),
        (NUMEROLOGY_KEY, decisions.numerology),
        (COMBINED_KEY, decisions.combined),
    ] {
        if let Some(result) = raw.get(key) {
            variants.insert(key.to_string(), summarize(result, &baseline, decision));
        }
    }

    raw.insert(BASELINE_KEY.to_string(), baseline);
    Ok(AblationReport { variants, raw })
}

fn summarize(
    result: &EvaluationResult,
    baseline: &EvaluationResult,
    decision: Option<Decision>,
) -> VariantReport {
    let baseline_f1 = baseline
        .classification
        .as_ref()
        .map_or(0.0, |c| c.metrics.f1);

    VariantReport {
        regression: RegressionSummary {
            r2: result.r2,
            delta_r2: result.r2 - baseline.r2,
        },
        classification: result.classification.as_ref().map(|c| ClassificationSummary {
            f1: c.metrics.f1,
            delta_f1: c.metrics.f1 - baseline_f1,
            accuracy: c.metrics.accuracy,
        }),
        decision,
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::LabelSource;
    use crate::sim::{generate_world, WorldConfig};

    use super::*;

    fn world_dataset(astro_effect: f64) -> Dataset {
        let config = WorldConfig {
            name: "ablation-test".into(),
            n_persons: 60,
            n_pairs: 240,
            astro_effect,
            noise_std: 0.02,
            seed: 11,
            ..WorldConfig::default()
        };
        generate_world(&config)
            .unwrap()
            .with_soulmate_labels(LabelSource::PreferTrue, 0.1)
    }

    #[test]
    fn test_report_contains_all_variants() {
        let report = run_ablation_study(&world_dataset(0.0), &AblationConfig::default()).unwrap();

        for key in [BASELINE_KEY, ASTROLOGY_KEY, NUMEROLOGY_KEY, COMBINED_KEY] {
            assert!(report.variants.contains_key(key), "Missing variant {}", key);
            assert!(report.raw.contains_key(key), "Missing raw result {}", key);
        }
        assert!(report.decision(BASELINE_KEY).is_none());
        assert!(report.decision(ASTROLOGY_KEY).is_some());
        assert!(report.decision(NUMEROLOGY_KEY).is_some());
    }

    #[test]
    fn test_baseline_deltas_are_zero() {
        let report = run_ablation_study(&world_dataset(0.3), &AblationConfig::default()).unwrap();
        let baseline = report.variant(BASELINE_KEY).unwrap();
        assert_eq!(baseline.regression.delta_r2, 0.0);
        if let Some(c) = baseline.classification {
            assert_eq!(c.delta_f1, 0.0);
        }
    }

    #[test]
    fn test_classification_disabled() {
        let config = AblationConfig {
            include_classification: false,
            ..AblationConfig::default()
        };
        let report = run_ablation_study(&world_dataset(0.0), &config).unwrap();
        assert!(report.variant(BASELINE_KEY).unwrap().classification.is_none());
    }

    #[test]
    fn test_strong_astro_signal_is_kept() {
        let config = AblationConfig {
            thresholds: DecisionThresholds {
                r2_min_delta_keep: 0.001,
                f1_min_delta_keep: 0.05,
            },
            ..AblationConfig::default()
        };
        let report = run_ablation_study(&world_dataset(0.5), &config).unwrap();

        let astro = report.variant(ASTROLOGY_KEY).unwrap();
        assert!(
            astro.regression.delta_r2 > 0.01,
            "Strong injected signal should lift R², got {}",
            astro.regression.delta_r2
        );
        assert_eq!(report.decision(ASTROLOGY_KEY), Some(Decision::Keep));
    }
}
