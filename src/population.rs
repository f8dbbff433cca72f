//! Contiguous population storage.
//!
//! A population is one flat bit matrix (`size` rows of `string_length`
//! bits each) plus an index-aligned fitness vector. Two populations of
//! the same shape act as current/next generation buffers; the driver
//! swaps their roles instead of copying bit content.

use crate::error::{EngineError, EngineResult};
use rand::Rng;

/// A fixed-shape population of bitstring individuals.
///
/// Individual `i` occupies bits `[i * string_length, (i + 1) *
/// string_length)` of the flat matrix. Fitness scores are cached per
/// individual and marked stale whenever bit content changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    bits: Vec<bool>,
    fitness: Vec<f64>,
    evaluated: bool,
    size: usize,
    string_length: usize,
}

impl Population {
    /// Allocate a zeroed population of `size` individuals of
    /// `string_length` bits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `size` is zero or odd
    /// (pairwise variation requires an even count), or if
    /// `string_length` is below 2 (one-point crossover needs an
    /// interior point).
    pub fn new(size: usize, string_length: usize) -> EngineResult<Self> {
        if size == 0 || size % 2 != 0 {
            return Err(EngineError::InvalidConfiguration {
                field: "population_size",
                message: format!("must be even and nonzero, got {size}"),
            });
        }
        if string_length < 2 {
            return Err(EngineError::InvalidConfiguration {
                field: "string_length",
                message: format!("must be at least 2, got {string_length}"),
            });
        }
        Ok(Self {
            bits: vec![false; size * string_length],
            fitness: vec![0.0; size],
            evaluated: false,
            size,
            string_length,
        })
    }

    /// Fill every bit uniformly at random and mark fitness stale.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for bit in &mut self.bits {
            *bit = rng.gen_bool(0.5);
        }
        self.evaluated = false;
    }

    /// Number of individuals.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bits per individual.
    #[must_use]
    pub fn string_length(&self) -> usize {
        self.string_length
    }

    /// The bits of individual `i`.
    #[must_use]
    pub fn individual(&self, i: usize) -> &[bool] {
        let start = i * self.string_length;
        &self.bits[start..start + self.string_length]
    }

    /// Mutable bits of individual `i`. Marks fitness stale.
    pub fn individual_mut(&mut self, i: usize) -> &mut [bool] {
        self.evaluated = false;
        let start = i * self.string_length;
        &mut self.bits[start..start + self.string_length]
    }

    /// The whole bit matrix, row-major.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Mutable access to the whole bit matrix. Marks fitness stale.
    pub fn bits_mut(&mut self) -> &mut [bool] {
        self.evaluated = false;
        &mut self.bits
    }

    /// Cached fitness scores, index-aligned with individuals.
    ///
    /// Only meaningful when [`Population::is_evaluated`] returns true.
    #[must_use]
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Whether the cached fitness reflects the current bit content.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Mark the cached fitness stale.
    pub fn invalidate_fitness(&mut self) {
        self.evaluated = false;
    }

    /// Split borrow for the evaluation pass: read-only rows alongside
    /// writable scores.
    pub(crate) fn rows_and_scores_mut(&mut self) -> (&[bool], &mut [f64]) {
        (&self.bits, &mut self.fitness)
    }

    /// Mark the cached fitness current. Called once scores are written.
    pub(crate) fn mark_evaluated(&mut self) {
        self.evaluated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_new_rejects_odd_size() {
        let err = Population::new(3, 8).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfiguration {
                field: "population_size",
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(Population::new(0, 8).is_err());
    }

    #[test]
    fn test_new_rejects_short_strings() {
        let err = Population::new(4, 1).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfiguration {
                field: "string_length",
                ..
            }
        ));
    }

    #[test]
    fn test_rows_are_disjoint_slices() {
        let mut pop = Population::new(4, 8).unwrap();
        pop.individual_mut(2).fill(true);

        assert!(pop.individual(2).iter().all(|&b| b));
        assert!(pop.individual(1).iter().all(|&b| !b));
        assert!(pop.individual(3).iter().all(|&b| !b));
    }

    #[test]
    fn test_randomize_is_deterministic() {
        let mut a = Population::new(10, 32).unwrap();
        let mut b = Population::new(10, 32).unwrap();

        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);
        a.randomize(&mut rng_a);
        b.randomize(&mut rng_b);

        assert_eq!(a.bits(), b.bits());
    }

    #[test]
    fn test_bit_access_marks_fitness_stale() {
        let mut pop = Population::new(4, 8).unwrap();
        pop.rows_and_scores_mut().1.fill(1.0);
        pop.mark_evaluated();
        assert!(pop.is_evaluated());

        pop.individual_mut(0)[0] = true;
        assert!(!pop.is_evaluated());
    }
}
