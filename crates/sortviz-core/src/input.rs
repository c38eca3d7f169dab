//! Random input arrays.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, VizError};

/// Shape of a generated input array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomArrayOptions {
    pub size: usize,
    /// Inclusive lower bound.
    pub min_value: i64,
    /// Inclusive upper bound.
    pub max_value: i64,
    /// Fixed seed for reproducible arrays; `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for RandomArrayOptions {
    fn default() -> Self {
        Self {
            size: 100,
            min_value: 8,
            max_value: 160,
            seed: None,
        }
    }
}

impl RandomArrayOptions {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

/// Uniform integers in `min_value..=max_value`.
pub fn generate_random_array(options: &RandomArrayOptions) -> Result<Vec<i64>> {
    if options.max_value < options.min_value {
        return Err(VizError::InvalidValueRange {
            min: options.min_value,
            max: options.max_value,
        });
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    log::debug!(
        "generating {} values in {}..={} (seed {seed})",
        options.size,
        options.min_value,
        options.max_value
    );

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..options.size)
        .map(|_| rng.random_range(options.min_value..=options.max_value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(size: usize, seed: u64) -> RandomArrayOptions {
        RandomArrayOptions {
            seed: Some(seed),
            ..RandomArrayOptions::with_size(size)
        }
    }

    #[test]
    fn defaults() {
        let options = RandomArrayOptions::default();
        assert_eq!(options.size, 100);
        assert_eq!((options.min_value, options.max_value), (8, 160));
        assert!(options.seed.is_none());
    }

    #[test]
    fn values_stay_in_bounds() {
        let values = generate_random_array(&seeded(500, 7)).unwrap();
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (8..=160).contains(v)));
    }

    #[test]
    fn same_seed_same_array() {
        let a = generate_random_array(&seeded(64, 42)).unwrap();
        let b = generate_random_array(&seeded(64, 42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_value_range() {
        let options = RandomArrayOptions {
            min_value: 5,
            max_value: 5,
            ..seeded(10, 1)
        };
        assert_eq!(generate_random_array(&options).unwrap(), vec![5; 10]);
    }

    #[test]
    fn empty_size_is_allowed() {
        assert!(generate_random_array(&seeded(0, 3)).unwrap().is_empty());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let options = RandomArrayOptions {
            min_value: 10,
            max_value: 2,
            ..RandomArrayOptions::default()
        };
        assert_eq!(
            generate_random_array(&options).unwrap_err(),
            VizError::InvalidValueRange { min: 10, max: 2 }
        );
    }
}
