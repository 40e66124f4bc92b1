//! Deterministic seeded train/test splits.

use rand::prelude::*;

/// Permute `0..n` under a seeded RNG and take the first
/// `floor(n * test_fraction)` indices as the test set.
///
/// The same `(n, test_fraction, seed)` triple always yields the same
/// split; the remaining indices form the train set in permuted order.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (n as f64 * test_fraction) as usize;
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(10, 0.2, 42);
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_split_truncates_fraction() {
        // 7 * 0.2 = 1.4 -> 1 test sample
        let (train, test) = train_test_split(7, 0.2, 42);
        assert_eq!(test.len(), 1);
        assert_eq!(train.len(), 6);
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = train_test_split(100, 0.25, 7);
        let b = train_test_split(100, 0.25, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_differs_across_seeds() {
        let (_, test_a) = train_test_split(100, 0.25, 7);
        let (_, test_b) = train_test_split(100, 0.25, 8);
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn test_split_partitions_indices() {
        let (mut train, mut test) = train_test_split(50, 0.3, 3);
        train.append(&mut test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }
}
