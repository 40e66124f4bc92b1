//! Derived categorical attributes and their affinity rule tables.
//!
//! Two candidate "theories" produce structured pair features from nothing
//! but a birthdate. Both rule tables are designed to be orthogonal to each
//! other: astrology works over a 4-element partition of the calendar,
//! numerology over exact values and modulo-3 classes of a digit sum.
//!
//! The simulation uses these tables as injected ground-truth signals; the
//! ablation pipeline then has to rediscover (or reject) them from data.

mod life_path;
mod zodiac;

pub use life_path::{life_path_number, numerology_affinity};
pub use zodiac::{element_affinity, Element, ZodiacSign};

use serde::{Deserialize, Serialize};

/// The candidate theories under ablation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TheoryKind {
    Astrology,
    Numerology,
}

impl TheoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TheoryKind::Astrology => "astrology",
            TheoryKind::Numerology => "numerology",
        }
    }
}

impl std::fmt::Display for TheoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
