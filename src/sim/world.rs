//! Synthetic world generation and single-world evaluation.
//!
//! ## Generative Model
//!
//! Every pair's ground-truth score is assembled from four terms:
//!
//! ```text
//! S_true = clamp(C_total + sa·A + sn·N + ε, 0, 1)
//! ```
//!
//! where `C_total` is the deterministic compatibility blend, `A` and `N`
//! are the astrology / numerology affinities from the rule tables, `sa`
//! and `sn` are the configured effect strengths (a term is zeroed when its
//! strength is not positive), and `ε ~ N(0, noise_std)`. Outcome
//! components are then sampled as random fractions of `S_true`, with
//! toxicity scaled by `1 - S_true`, and the observed score is recomputed
//! from the outcome vector. The injected effects are therefore recoverable
//! from data, which is exactly what the ablation pipeline is tested on.
//!
//! All randomness flows through one `StdRng` seeded from the config; the
//! same config regenerates the same world bit for bit.

use anyhow::Context;
use chrono::NaiveDate;
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ablation::{run_ablation_study, AblationConfig, ASTROLOGY_KEY, BASELINE_KEY, NUMEROLOGY_KEY};
use crate::dataset::{
    Dataset, LabelSource, LifePathProfile, Pair, Person, ZodiacProfile,
};
use crate::decision::{Decision, DecisionThresholds};
use crate::error::{Error, Result};
use crate::scoring::CompatibilityScorer;
use crate::theory::{element_affinity, life_path_number, numerology_affinity, ZodiacSign};
use crate::types::{OutcomeVector, ResonanceVector, TraitVector};

/// Configuration for one synthetic world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub name: String,
    pub n_persons: usize,
    pub n_pairs: usize,
    /// Fraction of pairs labeled as soulmates.
    pub top_fraction: f64,
    /// Astrology effect strength; 0.0 makes the signal irrelevant.
    pub astro_effect: f64,
    /// Numerology effect strength; 0.0 makes the signal irrelevant.
    pub num_effect: f64,
    /// Standard deviation of the Gaussian noise on S_true.
    pub noise_std: f64,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "world".into(),
            n_persons: 100,
            n_pairs: 200,
            top_fraction: 0.1,
            astro_effect: 0.0,
            num_effect: 0.0,
            noise_std: 0.1,
            seed: 42,
        }
    }
}

fn random_birthdate(rng: &mut StdRng) -> NaiveDate {
    let year = rng.gen_range(1980..=2000);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).expect("day 1..=28 is valid in every month")
}

/// Generate one person. `sample_biases` draws the trait-bias attributes
/// the way the plain sample generator does; simulation worlds leave them
/// at zero so only the affinity structure carries signal.
fn generate_person(rng: &mut StdRng, id: String, sample_biases: bool) -> Person {
    let birthdate = random_birthdate(rng);
    let traits = TraitVector::from_fn(|_| rng.gen());

    let number = life_path_number(birthdate);
    let life_path = if sample_biases {
        LifePathProfile {
            number,
            autonomy_bias: rng.gen::<f64>() * 0.3 + (number as f64 / 9.0) * 0.2,
            novelty_bias: rng.gen::<f64>() * 0.3 + ((number % 3) as f64 / 3.0) * 0.2,
            abstraction_bias: rng.gen::<f64>() * 0.3 + ((number / 3) as f64 / 3.0) * 0.2,
        }
    } else {
        LifePathProfile {
            number,
            autonomy_bias: 0.0,
            novelty_bias: 0.0,
            abstraction_bias: 0.0,
        }
    };

    let sign = ZodiacSign::from_date(birthdate);
    let zodiac = if sample_biases {
        ZodiacProfile {
            sign,
            novelty_bias: rng.gen::<f64>() * 0.3,
            stability_bias: rng.gen::<f64>() * 0.3,
            abstraction_bias: rng.gen::<f64>() * 0.3,
            emotional_sensitivity: rng.gen::<f64>() * 0.3,
        }
    } else {
        ZodiacProfile {
            sign,
            novelty_bias: 0.0,
            stability_bias: 0.0,
            abstraction_bias: 0.0,
            emotional_sensitivity: 0.0,
        }
    };

    Person {
        id,
        traits,
        birthdate: Some(birthdate),
        life_path: Some(life_path),
        zodiac: Some(zodiac),
    }
}

fn distinct_indices(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let a = rng.gen_range(0..n);
    loop {
        let b = rng.gen_range(0..n);
        if b != a {
            return (a, b);
        }
    }
}

fn astro_affinity(a: &Person, b: &Person) -> f64 {
    match (&a.zodiac, &b.zodiac) {
        (Some(za), Some(zb)) => element_affinity(za.sign.element(), zb.sign.element()),
        _ => 0.0,
    }
}

fn num_affinity(a: &Person, b: &Person) -> f64 {
    match (&a.life_path, &b.life_path) {
        (Some(la), Some(lb)) => numerology_affinity(la.number, lb.number),
        _ => 0.0,
    }
}

/// Generate a synthetic world with ground-truth scores.
pub fn generate_world(config: &WorldConfig) -> Result<Dataset> {
    if config.n_persons < 2 {
        return Err(Error::InvalidConfig(format!(
            "world `{}` needs at least 2 persons, got {}",
            config.name, config.n_persons
        )));
    }
    // Normal::new accepts any finite std_dev, including negative ones
    if !(config.noise_std >= 0.0) {
        return Err(Error::InvalidConfig(format!(
            "world `{}` needs a non-negative noise_std, got {}",
            config.name, config.noise_std
        )));
    }
    let noise = Normal::new(0.0, config.noise_std)
        .map_err(|e| Error::InvalidConfig(format!("noise_std {}: {e}", config.noise_std)))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let scorer = CompatibilityScorer::default();
    let mut dataset = Dataset::new();

    let persons: Vec<Person> = (0..config.n_persons)
        .map(|i| generate_person(&mut rng, format!("person_{i}"), false))
        .collect();
    for person in &persons {
        dataset.add_person(person.clone());
    }

    for _ in 0..config.n_pairs {
        let (i, j) = distinct_indices(&mut rng, persons.len());
        let (a, b) = (&persons[i], &persons[j]);

        let resonance = ResonanceVector::from_fn(|_| rng.gen());
        let feasibility = rng.gen_range(0.7..1.0);
        let base = scorer
            .total_compatibility(&a.traits, &b.traits, &resonance, feasibility)
            .total;

        let astro_term = if config.astro_effect > 0.0 {
            config.astro_effect * astro_affinity(a, b)
        } else {
            0.0
        };
        let num_term = if config.num_effect > 0.0 {
            config.num_effect * num_affinity(a, b)
        } else {
            0.0
        };

        let s_true = (base + astro_term + num_term + noise.sample(&mut rng)).clamp(0.0, 1.0);

        let outcome = OutcomeVector {
            longevity: rng.gen_range(0.5..1.0) * s_true,
            satisfaction: rng.gen_range(0.5..1.0) * s_true,
            growth: rng.gen_range(0.5..1.0) * s_true,
            conflict_toxicity: rng.gen_range(0.0..0.5) * (1.0 - s_true),
            repair_efficiency: rng.gen_range(0.5..1.0) * s_true,
            trajectory_alignment: rng.gen_range(0.5..1.0) * s_true,
        };
        let observed_score = scorer.soulmate_score(&outcome);

        dataset.add_pair(Pair {
            person_a: a.id.clone(),
            person_b: b.id.clone(),
            resonance,
            outcome,
            observed_score,
            true_score: Some(s_true),
            soulmate_flag: None,
            feasibility,
            context_resonances: Vec::new(),
        })?;
    }

    debug!(
        world = %config.name,
        n_persons = config.n_persons,
        n_pairs = config.n_pairs,
        "generated world dataset"
    );
    Ok(dataset)
}

/// Generate a plain dataset without ground truth: sampled bias attributes,
/// independent outcomes, and a handful of context resonances per pair.
pub fn generate_sample_dataset(n_persons: usize, n_pairs: usize, seed: u64) -> Result<Dataset> {
    if n_persons < 2 {
        return Err(Error::InvalidConfig(format!(
            "sample dataset needs at least 2 persons, got {n_persons}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let scorer = CompatibilityScorer::default();
    let mut dataset = Dataset::new();

    let persons: Vec<Person> = (0..n_persons)
        .map(|i| generate_person(&mut rng, format!("person_{i}"), true))
        .collect();
    for person in &persons {
        dataset.add_person(person.clone());
    }

    for _ in 0..n_pairs {
        let (i, j) = distinct_indices(&mut rng, persons.len());
        let (a, b) = (&persons[i], &persons[j]);

        let resonance = ResonanceVector::from_fn(|_| rng.gen());
        let outcome = OutcomeVector {
            longevity: rng.gen(),
            satisfaction: rng.gen(),
            growth: rng.gen(),
            conflict_toxicity: rng.gen_range(0.0..0.5),
            repair_efficiency: rng.gen(),
            trajectory_alignment: rng.gen(),
        };
        let n_contexts = rng.gen_range(0..3);
        let context_resonances = (0..n_contexts)
            .map(|_| ResonanceVector::from_fn(|_| rng.gen()))
            .collect();

        dataset.add_pair(Pair {
            person_a: a.id.clone(),
            person_b: b.id.clone(),
            resonance,
            observed_score: scorer.soulmate_score(&outcome),
            outcome,
            true_score: None,
            soulmate_flag: None,
            feasibility: rng.gen_range(0.7..1.0),
            context_resonances,
        })?;
    }

    Ok(dataset)
}

/// KEEP/DISCARD verdicts for the two theory signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecisions {
    pub astrology: Decision,
    pub numerology: Decision,
}

/// Outcome of evaluating one world under one threshold setting and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldResult {
    pub world: String,
    pub seed: u64,
    pub astro_effect: f64,
    pub num_effect: f64,
    pub decisions: SignalDecisions,
    pub expected: SignalDecisions,
    pub astro_correct: bool,
    pub num_correct: bool,
    /// Best classification F1 across the baseline and single-theory models.
    pub best_f1: f64,
}

fn expected_decision(effect: f64) -> Decision {
    if effect > 0.0 {
        Decision::Keep
    } else {
        Decision::Discard
    }
}

/// Generate a world under `seed`, run the ablation, and grade the
/// per-signal verdicts against the world's known effect strengths.
pub fn evaluate_world(
    config: &WorldConfig,
    thresholds: &DecisionThresholds,
    seed: u64,
) -> anyhow::Result<WorldResult> {
    let world_config = WorldConfig {
        seed,
        ..config.clone()
    };
    let dataset = generate_world(&world_config)?
        .with_soulmate_labels(LabelSource::PreferTrue, world_config.top_fraction);

    let ablation_config = AblationConfig {
        seed,
        thresholds: *thresholds,
        ..AblationConfig::default()
    };
    let report = run_ablation_study(&dataset, &ablation_config)?;

    let decisions = SignalDecisions {
        astrology: report
            .decision(ASTROLOGY_KEY)
            .with_context(|| format!("world `{}`: no astrology verdict", config.name))?,
        numerology: report
            .decision(NUMEROLOGY_KEY)
            .with_context(|| format!("world `{}`: no numerology verdict", config.name))?,
    };
    let expected = SignalDecisions {
        astrology: expected_decision(config.astro_effect),
        numerology: expected_decision(config.num_effect),
    };

    let best_f1 = [BASELINE_KEY, ASTROLOGY_KEY, NUMEROLOGY_KEY]
        .iter()
        .filter_map(|key| report.variant(key))
        .filter_map(|v| v.classification.map(|c| c.f1))
        .fold(0.0, f64::max);

    Ok(WorldResult {
        world: config.name.clone(),
        seed,
        astro_effect: config.astro_effect,
        num_effect: config.num_effect,
        astro_correct: decisions.astrology == expected.astrology,
        num_correct: decisions.numerology == expected.numerology,
        decisions,
        expected,
        best_f1,
    })
}
