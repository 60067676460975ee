//! Seeded train/test partitioning.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{HamspamError, Result};

/// Shuffle `rows` with `seed` and split off `ceil(n * test_size)` rows for testing.
///
/// Returns `(train, test)`. The same input and seed always produce the same
/// partition. The train partition is never empty.
pub fn train_test_split<T: Clone>(
    rows: &[T],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(HamspamError::invalid_argument(format!(
            "test_size must be in [0, 1), got {test_size}"
        )));
    }
    if rows.is_empty() {
        return Err(HamspamError::invalid_argument("Cannot split an empty dataset"));
    }

    let n = rows.len();
    let n_test = ((n as f64 * test_size).ceil() as usize).min(n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    let train = train_idx.iter().map(|&i| rows[i].clone()).collect();
    let test = test_idx.iter().map(|&i| rows[i].clone()).collect();

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let rows: Vec<usize> = (0..10).collect();
        let (train, test) = train_test_split(&rows, 0.2, 42).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        // ceil(11 * 0.2) = 3
        let rows: Vec<usize> = (0..11).collect();
        let (train, test) = train_test_split(&rows, 0.2, 42).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn test_split_is_a_partition() {
        let rows: Vec<usize> = (0..50).collect();
        let (train, test) = train_test_split(&rows, 0.2, 7).unwrap();

        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, rows);
    }

    #[test]
    fn test_split_is_reproducible() {
        let rows: Vec<usize> = (0..100).collect();
        let first = train_test_split(&rows, 0.2, 42).unwrap();
        let second = train_test_split(&rows, 0.2, 42).unwrap();
        assert_eq!(first, second);

        let other_seed = train_test_split(&rows, 0.2, 43).unwrap();
        assert_ne!(first, other_seed);
    }

    #[test]
    fn test_single_row_stays_in_train() {
        let (train, test) = train_test_split(&["only"], 0.2, 42).unwrap();
        assert_eq!(train, vec!["only"]);
        assert!(test.is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        let rows = vec![1, 2, 3];
        assert!(train_test_split(&rows, 1.0, 42).is_err());
        assert!(train_test_split(&rows, -0.1, 42).is_err());
        assert!(train_test_split::<u8>(&[], 0.2, 42).is_err());
    }
}
