//! Threshold sweep over simulated worlds.
//!
//! For every (R² threshold, F1 threshold) pair in the cartesian grid,
//! every world is evaluated under `n_seeds` seeds. Each world-seed cell
//! contributes two gradeable verdicts (astrology and numerology), so a
//! threshold pair's accuracy is
//!
//! ```text
//! accuracy = correct verdicts / (worlds × seeds × 2)
//! ```
//!
//! Cells within a threshold pair run in parallel; the pair scan itself is
//! sequential and updates the best on `accuracy >= best`, so ties resolve
//! to the later-enumerated pair. A failing cell is logged and scored as
//! zero correct verdicts rather than aborting the sweep.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::decision::DecisionThresholds;

use super::{evaluate_world, WorldConfig};

/// Accuracy of one threshold pair across all worlds and seeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    pub r2_threshold: f64,
    pub f1_threshold: f64,
    /// Correct per-signal verdicts.
    pub correct: usize,
    /// Total gradeable verdicts: worlds × seeds × 2.
    pub total: usize,
    pub accuracy: f64,
}

/// Result of a full threshold sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub best_thresholds: DecisionThresholds,
    pub best_accuracy: f64,
    /// Every threshold pair's cell, in enumeration order.
    pub cells: Vec<SweepCell>,
}

/// Sweep the cartesian product of the two threshold grids.
pub fn sweep_thresholds(
    worlds: &[WorldConfig],
    r2_grid: &[f64],
    f1_grid: &[f64],
    n_seeds: usize,
) -> SweepOutcome {
    info!(
        n_worlds = worlds.len(),
        n_r2 = r2_grid.len(),
        n_f1 = f1_grid.len(),
        n_seeds,
        "starting threshold sweep"
    );

    let total = worlds.len() * n_seeds * 2;
    let mut best_thresholds = DecisionThresholds::default();
    let mut best_accuracy = f64::NEG_INFINITY;
    let mut cells = Vec::with_capacity(r2_grid.len() * f1_grid.len());

    for &r2_threshold in r2_grid {
        for &f1_threshold in f1_grid {
            let thresholds = DecisionThresholds {
                r2_min_delta_keep: r2_threshold,
                f1_min_delta_keep: f1_threshold,
            };

            let jobs: Vec<(&WorldConfig, u64)> = worlds
                .iter()
                .flat_map(|w| (0..n_seeds as u64).map(move |seed| (w, seed)))
                .collect();

            let correct: usize = jobs
                .par_iter()
                .map(|(world, seed)| match evaluate_world(world, &thresholds, *seed) {
                    Ok(result) => result.astro_correct as usize + result.num_correct as usize,
                    Err(err) => {
                        warn!(world = %world.name, seed, %err, "world evaluation failed, scoring zero");
                        0
                    }
                })
                .sum();

            let accuracy = if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            };
            cells.push(SweepCell {
                r2_threshold,
                f1_threshold,
                correct,
                total,
                accuracy,
            });

            // Later-enumerated pairs win ties
            if accuracy >= best_accuracy {
                best_accuracy = accuracy;
                best_thresholds = thresholds;
            }
        }
    }

    if best_accuracy == f64::NEG_INFINITY {
        best_accuracy = 0.0;
    }
    info!(
        r2 = best_thresholds.r2_min_delta_keep,
        f1 = best_thresholds.f1_min_delta_keep,
        accuracy = best_accuracy,
        "threshold sweep finished"
    );

    SweepOutcome {
        best_thresholds,
        best_accuracy,
        cells,
    }
}
