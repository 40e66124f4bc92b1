//! Typed errors for construction-time and persistence failures.
//!
//! Numerical degradations (singular regression systems, zero-denominator
//! metrics) are defined values, not errors. Only structural problems
//! surface here: wrong vector arity, dangling person references, bad
//! generator configuration, and I/O at the persistence boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A trait vector was constructed with the wrong number of entries.
    #[error("trait vector has {got} entries, expected 32")]
    TraitArity { got: usize },

    /// A resonance vector was constructed with the wrong number of entries.
    #[error("resonance vector has {got} entries, expected 7")]
    ResonanceArity { got: usize },

    /// A pair referenced a person id that is not in the dataset.
    #[error("pair references unknown person id `{0}`")]
    UnknownPerson(String),

    /// A generator or evaluator was given an unusable configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
