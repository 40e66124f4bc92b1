//! Persons, pairs, and the dataset container.
//!
//! ## Referential Integrity
//!
//! Pairs reference persons by id. `Dataset::add_pair` rejects dangling
//! references, and the JSON loader re-validates through the same path, so
//! any `Dataset` in memory satisfies the invariant. Persons live in a
//! `BTreeMap` keyed by id, which keeps iteration order (and therefore
//! serialization and feature extraction order) deterministic.
//!
//! ## Soulmate Labels
//!
//! Labeling is an ownership-transfer operation: `with_soulmate_labels`
//! consumes the dataset and returns it with every pair's flag set from a
//! percentile threshold over the chosen score column. Nothing mutates in
//! place behind a shared reference.

mod persist;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::theory::ZodiacSign;
use crate::types::{OutcomeVector, ResonanceVector, TraitVector};

/// Numerology attributes derived from a birthdate.
///
/// Bias fields shift sampled trait distributions in the plain generator;
/// simulation worlds leave them at 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifePathProfile {
    /// Life path number, 1-9.
    pub number: u8,
    pub autonomy_bias: f64,
    pub novelty_bias: f64,
    pub abstraction_bias: f64,
}

/// Astrology attributes derived from a birthdate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacProfile {
    pub sign: ZodiacSign,
    pub novelty_bias: f64,
    pub stability_bias: f64,
    pub abstraction_bias: f64,
    pub emotional_sensitivity: f64,
}

/// A person: latent traits plus optional derived theory attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub traits: TraitVector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_path: Option<LifePathProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zodiac: Option<ZodiacProfile>,
}

/// An observed pair with resonance, outcomes, and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub person_a: String,
    pub person_b: String,
    pub resonance: ResonanceVector,
    pub outcome: OutcomeVector,
    /// Soulmate score computed from the outcome vector.
    #[serde(rename = "s")]
    pub observed_score: f64,
    /// Ground-truth score, present only in simulated worlds.
    #[serde(rename = "s_true", default, skip_serializing_if = "Option::is_none")]
    pub true_score: Option<f64>,
    /// Binary top-tier label, set by `Dataset::with_soulmate_labels`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soulmate_flag: Option<bool>,
    pub feasibility: f64,
    /// Resonance vectors observed in other contexts or at other times.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_resonances: Vec<ResonanceVector>,
}

/// Which score column drives soulmate labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSource {
    /// Always the observed score.
    Observed,
    /// The ground-truth score when present, else the observed score.
    PreferTrue,
}

impl Pair {
    fn label_score(&self, source: LabelSource) -> f64 {
        match source {
            LabelSource::Observed => self.observed_score,
            LabelSource::PreferTrue => self.true_score.unwrap_or(self.observed_score),
        }
    }
}

/// Container for persons and pairs with validated references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    persons: BTreeMap<String, Person>,
    pairs: Vec<Pair>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person, replacing any existing person with the same id.
    pub fn add_person(&mut self, person: Person) {
        self.persons.insert(person.id.clone(), person);
    }

    /// Append a pair. Fails if either referenced person id is unknown.
    pub fn add_pair(&mut self, pair: Pair) -> Result<()> {
        if !self.persons.contains_key(&pair.person_a) {
            return Err(Error::UnknownPerson(pair.person_a));
        }
        if !self.persons.contains_key(&pair.person_b) {
            return Err(Error::UnknownPerson(pair.person_b));
        }
        self.pairs.push(pair);
        Ok(())
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Persons in id order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn n_persons(&self) -> usize {
        self.persons.len()
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Label the top `top_fraction` of pairs as soulmates.
    ///
    /// The threshold is the linear-interpolated `(1 - top_fraction)`
    /// percentile of the chosen score column; a pair is flagged when its
    /// score is >= the threshold. Returns the annotated dataset.
    pub fn with_soulmate_labels(mut self, source: LabelSource, top_fraction: f64) -> Self {
        if self.pairs.is_empty() {
            return self;
        }

        let scores: Vec<f64> = self.pairs.iter().map(|p| p.label_score(source)).collect();
        let threshold = percentile(&scores, (1.0 - top_fraction.clamp(0.0, 1.0)) * 100.0);

        for pair in &mut self.pairs {
            pair.soulmate_flag = Some(pair.label_score(source) >= threshold);
        }
        self
    }
}

/// Linear-interpolated percentile of `values` at `q` (0-100).
///
/// Matches the common "linear" definition: rank = q/100 × (n-1), with
/// interpolation between the two bracketing order statistics.
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let t = rank - lo as f64;
        sorted[lo] + t * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            traits: TraitVector::uniform(0.5),
            birthdate: None,
            life_path: None,
            zodiac: None,
        }
    }

    fn pair(a: &str, b: &str, score: f64) -> Pair {
        Pair {
            person_a: a.to_string(),
            person_b: b.to_string(),
            resonance: ResonanceVector::uniform(0.5),
            outcome: OutcomeVector::default(),
            observed_score: score,
            true_score: None,
            soulmate_flag: None,
            feasibility: 1.0,
            context_resonances: Vec::new(),
        }
    }

    #[test]
    fn test_add_pair_validates_references() {
        let mut ds = Dataset::new();
        ds.add_person(person("a"));
        ds.add_person(person("b"));

        assert!(ds.add_pair(pair("a", "b", 1.0)).is_ok());

        let err = ds.add_pair(pair("a", "ghost", 1.0)).unwrap_err();
        assert!(matches!(err, Error::UnknownPerson(id) if id == "ghost"));
        assert_eq!(ds.n_pairs(), 1, "Rejected pair should not be appended");
    }

    #[test]
    fn test_person_iteration_is_ordered() {
        let mut ds = Dataset::new();
        ds.add_person(person("c"));
        ds.add_person(person("a"));
        ds.add_person(person("b"));

        let ids: Vec<_> = ds.persons().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_percentile_interpolation() {
        let values = vec![0.0, 1.0, 2.0, 3.0];
        // rank = 0.5 * 3 = 1.5 -> halfway between 1.0 and 2.0
        assert!((percentile(&values, 50.0) - 1.5).abs() < 1e-12);
        assert!((percentile(&values, 0.0) - 0.0).abs() < 1e-12);
        assert!((percentile(&values, 100.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_soulmate_labels_top_fraction() {
        let mut ds = Dataset::new();
        for id in ["a", "b", "c", "d", "e"] {
            ds.add_person(person(id));
        }
        for (i, score) in [0.1, 0.2, 0.3, 0.4, 0.5].iter().enumerate() {
            let a = ["a", "b", "c", "d", "e"][i];
            ds.add_pair(pair(a, "a", *score)).unwrap();
        }

        let labeled = ds.with_soulmate_labels(LabelSource::Observed, 0.2);
        let flags: Vec<bool> = labeled
            .pairs()
            .iter()
            .map(|p| p.soulmate_flag.unwrap())
            .collect();
        // 80th percentile of [0.1..0.5] is 0.42; only the 0.5 pair clears it
        assert_eq!(flags, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_soulmate_labels_prefer_true_score() {
        let mut ds = Dataset::new();
        ds.add_person(person("a"));
        ds.add_person(person("b"));

        let mut low_observed = pair("a", "b", 0.0);
        low_observed.true_score = Some(0.9);
        ds.add_pair(low_observed).unwrap();
        ds.add_pair(pair("a", "b", 0.5)).unwrap();

        let labeled = ds.with_soulmate_labels(LabelSource::PreferTrue, 0.5);
        let flags: Vec<bool> = labeled
            .pairs()
            .iter()
            .map(|p| p.soulmate_flag.unwrap())
            .collect();
        // Ground truth 0.9 beats observed 0.5
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_labels_on_empty_dataset() {
        let ds = Dataset::new().with_soulmate_labels(LabelSource::Observed, 0.1);
        assert_eq!(ds.n_pairs(), 0);
    }
}
