//! Synthetic worlds with known ground truth, and the threshold sweep
//! that calibrates the decision policy against them.
//!
//! ```text
//! WorldConfig ──► generate_world ──► labeled Dataset
//!                      │
//!                 evaluate_world ──► ablation ──► per-signal verdicts
//!                      │                              vs ground truth
//!                 sweep_thresholds ──► best (R², F1) threshold pair
//! ```

mod sweep;
mod world;

pub use sweep::{sweep_thresholds, SweepCell, SweepOutcome};
pub use world::{
    evaluate_world, generate_sample_dataset, generate_world, SignalDecisions, WorldConfig,
    WorldResult,
};
