//! Feature extraction with an explicit, declared column schema.
//!
//! ## Column Blocks
//!
//! | Block      | Columns                                               | Width |
//! |------------|-------------------------------------------------------|-------|
//! | baseline   | v_i_0..31, v_j_0..31, r_0..6, feasibility             | 72    |
//! | numerology | life paths, 3 biases per person, diff/modulo/affinity | 11    |
//! | astrology  | 4 biases per person, match/element/affinity           | 11    |
//!
//! The schema is fixed up front by the requested `FeatureSet`, never
//! discovered from the first row. A person without the relevant profile
//! contributes 0.0 in that block's columns; pairwise columns are 0.0
//! unless both persons carry the profile. The zero-fill keeps rows
//! width-stable but silently flattens missing data, so callers that care
//! should validate profile coverage first.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, LifePathProfile, Pair, ZodiacProfile};
use crate::error::{Error, Result};
use crate::theory::{element_affinity, numerology_affinity};
use crate::types::{RESONANCE_DIM, TRAIT_DIM};

/// Which theory blocks to include beyond the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub numerology: bool,
    pub astrology: bool,
}

impl FeatureSet {
    pub fn baseline() -> Self {
        Self { numerology: false, astrology: false }
    }

    pub fn with_numerology() -> Self {
        Self { numerology: true, astrology: false }
    }

    pub fn with_astrology() -> Self {
        Self { numerology: false, astrology: true }
    }

    pub fn full() -> Self {
        Self { numerology: true, astrology: true }
    }

    /// Ordered column names for this feature set.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for k in 0..TRAIT_DIM {
            names.push(format!("v_i_{k}"));
        }
        for k in 0..TRAIT_DIM {
            names.push(format!("v_j_{k}"));
        }
        for k in 0..RESONANCE_DIM {
            names.push(format!("r_{k}"));
        }
        names.push("feasibility".into());

        if self.numerology {
            for suffix in ["i", "j"] {
                names.push(format!("life_path_{suffix}"));
                names.push(format!("life_path_autonomy_bias_{suffix}"));
                names.push(format!("life_path_novelty_bias_{suffix}"));
                names.push(format!("life_path_abstraction_bias_{suffix}"));
            }
            names.push("life_path_diff".into());
            names.push("life_path_modulo_match".into());
            names.push("numerology_affinity".into());
        }

        if self.astrology {
            for suffix in ["i", "j"] {
                names.push(format!("zodiac_novelty_bias_{suffix}"));
                names.push(format!("zodiac_stability_bias_{suffix}"));
                names.push(format!("zodiac_abstraction_bias_{suffix}"));
                names.push(format!("zodiac_emotional_sensitivity_{suffix}"));
            }
            names.push("zodiac_match".into());
            names.push("element_match".into());
            names.push("element_affinity".into());
        }

        names
    }
}

/// Row-major feature matrix with its target vector and column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    /// Regression target per row: ground truth when present, else the
    /// observed score.
    pub targets: Vec<f64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }
}

/// Turns a dataset's pairs into a `FeatureMatrix`.
pub struct FeatureExtractor<'a> {
    dataset: &'a Dataset,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Extract one row per pair under the given feature set.
    pub fn extract(&self, set: FeatureSet) -> Result<FeatureMatrix> {
        let columns = set.column_names();
        let mut rows = Vec::with_capacity(self.dataset.n_pairs());
        let mut targets = Vec::with_capacity(self.dataset.n_pairs());

        for pair in self.dataset.pairs() {
            let a = self
                .dataset
                .person(&pair.person_a)
                .ok_or_else(|| Error::UnknownPerson(pair.person_a.clone()))?;
            let b = self
                .dataset
                .person(&pair.person_b)
                .ok_or_else(|| Error::UnknownPerson(pair.person_b.clone()))?;

            let mut row = Vec::with_capacity(columns.len());
            row.extend_from_slice(a.traits.as_slice());
            row.extend_from_slice(b.traits.as_slice());
            row.extend_from_slice(pair.resonance.as_slice());
            row.push(pair.feasibility);

            if set.numerology {
                push_life_path_block(&mut row, a.life_path.as_ref(), b.life_path.as_ref());
            }
            if set.astrology {
                push_zodiac_block(&mut row, a.zodiac.as_ref(), b.zodiac.as_ref());
            }

            debug_assert_eq!(row.len(), columns.len());
            rows.push(row);
            targets.push(target_for(pair));
        }

        Ok(FeatureMatrix { columns, rows, targets })
    }
}

fn target_for(pair: &Pair) -> f64 {
    pair.true_score.unwrap_or(pair.observed_score)
}

fn push_life_path_block(
    row: &mut Vec<f64>,
    a: Option<&LifePathProfile>,
    b: Option<&LifePathProfile>,
) {
    for profile in [a, b] {
        match profile {
            Some(p) => {
                row.push(p.number as f64);
                row.push(p.autonomy_bias);
                row.push(p.novelty_bias);
                row.push(p.abstraction_bias);
            }
            None => row.extend_from_slice(&[0.0; 4]),
        }
    }

    match (a, b) {
        (Some(pa), Some(pb)) => {
            row.push(pa.number.abs_diff(pb.number) as f64);
            row.push(if pa.number % 3 == pb.number % 3 { 1.0 } else { 0.0 });
            row.push(numerology_affinity(pa.number, pb.number));
        }
        _ => row.extend_from_slice(&[0.0; 3]),
    }
}

fn push_zodiac_block(row: &mut Vec<f64>, a: Option<&ZodiacProfile>, b: Option<&ZodiacProfile>) {
    for profile in [a, b] {
        match profile {
            Some(p) => {
                row.push(p.novelty_bias);
                row.push(p.stability_bias);
                row.push(p.abstraction_bias);
                row.push(p.emotional_sensitivity);
            }
            None => row.extend_from_slice(&[0.0; 4]),
        }
    }

    match (a, b) {
        (Some(pa), Some(pb)) => {
            row.push(if pa.sign == pb.sign { 1.0 } else { 0.0 });
            row.push(if pa.sign.element() == pb.sign.element() { 1.0 } else { 0.0 });
            row.push(element_affinity(pa.sign.element(), pb.sign.element()));
        }
        _ => row.extend_from_slice(&[0.0; 3]),
    }
}
