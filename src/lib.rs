//! pairmap - Theory ablation over pair compatibility models
//!
//! A framework for asking whether structured "theory" features
//! (astrology, numerology) add real predictive value to a baseline
//! compatibility model, and for calibrating the KEEP/DISCARD decision
//! thresholds against simulated worlds where the right answer is known.
//!
//! # Architecture
//!
//! ```text
//! Dataset → Feature Extraction → Ridge Evaluation → Decision Policy
//!    ↓            ↓                    ↓                  ↓
//!  persons    fixed-width         seeded split        ΔR² / ΔF1
//!  + pairs    column schema       + closed form       thresholds
//!                                   normal eqs
//!
//! WorldConfig → World Generation → Ablation Study → Threshold Sweep
//!                    ↓                   ↓                ↓
//!               injected A/N        per-variant      grid search,
//!               ground truth        verdicts         rayon cells
//! ```
//!
//! # Determinism
//!
//! Every stochastic path takes an explicit seed and threads a single
//! `StdRng` through generation, splitting, and evaluation. The same
//! inputs always reproduce the same world, split, fit, and verdicts.

pub mod ablation;
pub mod dataset;
pub mod decision;
pub mod error;
pub mod eval;
pub mod features;
pub mod scoring;
pub mod sim;
pub mod theory;
pub mod types;

// Re-export the core surface
pub use ablation::{run_ablation_study, AblationConfig, AblationReport, VariantReport};
pub use dataset::{Dataset, LabelSource, LifePathProfile, Pair, Person, ZodiacProfile};
pub use decision::{decide, Decision, DecisionThresholds, Decisions};
pub use error::{Error, Result};
pub use eval::{evaluate, EvalConfig, EvaluationResult};
pub use features::{FeatureExtractor, FeatureMatrix, FeatureSet};
pub use scoring::{CompatibilityScorer, ScoreBreakdown};
pub use sim::{
    evaluate_world, generate_sample_dataset, generate_world, sweep_thresholds, SweepOutcome,
    WorldConfig, WorldResult,
};
pub use theory::{Element, TheoryKind, ZodiacSign};
pub use types::{
    OutcomeVector, ResonanceVector, TraitVector, RESONANCE_DIM, TRAIT_DIM,
};
