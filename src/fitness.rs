//! Fitness evaluation.
//!
//! The engine treats scoring as a pluggable collaborator: anything
//! implementing [`Evaluator`] can drive a run. Scores are computed
//! independently per individual, which makes the population pass
//! embarrassingly parallel.

// Popcounts are converted to f64 scores
#![allow(clippy::cast_precision_loss)]

use crate::population::Population;
use rayon::prelude::*;

/// A scoring function over individual bitstrings.
///
/// Implementations must be deterministic and side-effect free, and the
/// returned scores must be totally ordered (never NaN): the engine
/// compares them with strict `>` and breaks ties first-seen.
pub trait Evaluator: Sync {
    /// Score one individual's bits. Higher is better.
    fn score(&self, bits: &[bool]) -> f64;
}

/// The OneMax objective: count of set bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneMax;

impl Evaluator for OneMax {
    fn score(&self, bits: &[bool]) -> f64 {
        bits.iter().filter(|&&b| b).count() as f64
    }
}

/// Score every individual into the population's fitness vector.
///
/// Rows are scored in parallel; output placement is index-aligned, so
/// the result is identical to a sequential pass.
pub fn evaluate_population<E: Evaluator>(population: &mut Population, evaluator: &E) {
    let string_length = population.string_length();
    let (bits, scores) = population.rows_and_scores_mut();
    bits.par_chunks(string_length)
        .zip(scores.par_iter_mut())
        .for_each(|(row, slot)| *slot = evaluator.score(row));
    population.mark_evaluated();
}

/// Summary statistics over a fitness vector.
#[derive(Debug, Clone, Copy)]
pub struct FitnessStats {
    /// Highest score in the population.
    pub best: f64,
    /// Lowest score in the population.
    pub worst: f64,
    /// Mean score.
    pub mean: f64,
    /// Standard deviation of scores.
    pub std_dev: f64,
}

impl FitnessStats {
    /// Compute statistics from a fitness vector.
    #[must_use]
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                best: 0.0,
                worst: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let variance =
            scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;

        Self {
            best,
            worst,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onemax_counts_set_bits() {
        let bits = [true, false, true, true, false];
        assert!((OneMax.score(&bits) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_onemax_all_clear() {
        assert!(OneMax.score(&[false; 16]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evaluate_population_aligns_scores() {
        let mut pop = Population::new(4, 4).unwrap();
        pop.individual_mut(1).fill(true);
        pop.individual_mut(3)[0] = true;

        evaluate_population(&mut pop, &OneMax);

        assert!(pop.is_evaluated());
        let expected = [0.0, 4.0, 0.0, 1.0];
        for (score, want) in pop.fitness().iter().zip(expected) {
            assert!((score - want).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_pluggable_evaluator() {
        /// Inverse objective: count of clear bits.
        struct ZeroMax;
        impl Evaluator for ZeroMax {
            fn score(&self, bits: &[bool]) -> f64 {
                bits.iter().filter(|&&b| !b).count() as f64
            }
        }

        let mut pop = Population::new(2, 8).unwrap();
        pop.individual_mut(0).fill(true);
        evaluate_population(&mut pop, &ZeroMax);

        assert!(pop.fitness()[0].abs() < f64::EPSILON);
        assert!((pop.fitness()[1] - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fitness_stats() {
        let scores = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = FitnessStats::from_scores(&scores);

        assert!((stats.mean - 3.0).abs() < 0.001);
        assert!((stats.best - 5.0).abs() < 0.001);
        assert!((stats.worst - 1.0).abs() < 0.001);
        assert!((stats.std_dev - 2.0f64.sqrt()).abs() < 0.001);
    }

    #[test]
    fn test_fitness_stats_empty() {
        let stats = FitnessStats::from_scores(&[]);
        assert!(stats.best.abs() < f64::EPSILON);
        assert!(stats.std_dev.abs() < f64::EPSILON);
    }
}
