//! Life path numbers and the numerology affinity table.

use chrono::{Datelike, NaiveDate};

/// Life path number: digit sum of YYYYMMDD, reduced to 1-9.
///
/// ```
/// use chrono::NaiveDate;
/// use pairmap::theory::life_path_number;
///
/// let d = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
/// // 1+9+9+0+0+5+1+5 = 30 -> 3+0 = 3
/// assert_eq!(life_path_number(d), 3);
/// ```
pub fn life_path_number(birthdate: NaiveDate) -> u8 {
    let mut total = digit_sum(birthdate.year().unsigned_abs())
        + digit_sum(birthdate.month())
        + digit_sum(birthdate.day());
    while total > 9 {
        total = digit_sum(total);
    }
    total as u8
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Numerology affinity between two life path numbers, in [-0.3, 1.0].
///
/// | Condition              | Affinity |
/// |------------------------|----------|
/// | Exact match            | 1.0      |
/// | Same modulo-3 class    | 0.7      |
/// | Adjacent (diff == 1)   | 0.5      |
/// | Close (diff <= 3)      | 0.2      |
/// | Far apart              | -0.3     |
///
/// The modulo-3 classes keep this table structurally independent of the
/// element-based astrology table.
pub fn numerology_affinity(a: u8, b: u8) -> f64 {
    let diff = a.abs_diff(b);
    if diff == 0 {
        1.0
    } else if a % 3 == b % 3 {
        0.7
    } else if diff == 1 {
        0.5
    } else if diff <= 3 {
        0.2
    } else {
        -0.3
    }
}
