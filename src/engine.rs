//! Main generational loop.
//!
//! The driver wires the stages together: evaluate the current buffer,
//! track the best individual seen, select parents, produce children
//! into the next buffer, then swap buffer roles. All allocation
//! happens before the first generation; the loop itself only moves
//! bits between the two pre-sized buffers.

use crate::error::{EngineError, EngineResult};
use crate::fitness::{Evaluator, FitnessStats, evaluate_population};
use crate::planner::{DrawConfig, DrawPlanner, PlanStrategy};
use crate::population::Population;
use crate::selection::select_parents;
use crate::variation::populate_children;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// Configuration for an evolution run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed; a fixed seed reproduces the run exactly.
    pub seed: u64,
    /// Number of individuals (even, nonzero).
    pub population_size: usize,
    /// Bits per individual (at least 2).
    pub string_length: usize,
    /// Number of generations to run (at least 1).
    pub epochs: usize,
    /// Candidate draws per tournament (at least 1; 1 means uniform
    /// random selection).
    pub tournament_rounds: usize,
    /// Per-bit mutation probability in `[0, 1]`.
    pub mutation_rate: f64,
    /// Per-pair crossover probability in `[0, 1]`.
    pub crossover_rate: f64,
    /// Draw planning strategy.
    pub plan: PlanStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            population_size: 100,
            string_length: 1000,
            epochs: 500,
            tournament_rounds: 3,
            mutation_rate: 0.001,
            crossover_rate: 0.95,
            plan: PlanStrategy::PerGeneration,
        }
    }
}

impl EngineConfig {
    /// Validate every scalar.
    ///
    /// Runs before any random state is created, so a rejected
    /// configuration consumes no draws.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.epochs == 0 {
            return Err(EngineError::InvalidConfiguration {
                field: "epochs",
                message: "must be at least 1".to_string(),
            });
        }
        self.draw_config().validate()
    }

    fn draw_config(&self) -> DrawConfig {
        DrawConfig {
            population_size: self.population_size,
            string_length: self.string_length,
            tournament_rounds: self.tournament_rounds,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
        }
    }
}

/// Per-generation progress event: the best score seen so far.
///
/// Emitted once per generation after best tracking, so a run's
/// sequence of events is non-decreasing in `best_fitness`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Progress {
    /// Generation index, starting at 0.
    pub epoch: usize,
    /// Best score observed up to and including this generation.
    pub best_fitness: f64,
}

/// Fitness statistics for a single generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochStats {
    /// Generation index.
    pub epoch: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
}

/// Statistics for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Statistics per generation.
    pub epochs: Vec<EpochStats>,
    /// Generation where the best individual was first observed.
    pub best_epoch: usize,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// The best individual observed across a run.
///
/// Owns its bits; the originating population buffer is overwritten as
/// the run continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestResult {
    /// The individual's score.
    pub fitness: f64,
    /// The individual's bits.
    pub bits: Vec<bool>,
}

impl BestResult {
    /// The bits rendered as a `0`/`1` string.
    #[must_use]
    pub fn bits_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// Run the engine with an observer invoked once per generation.
///
/// # Errors
///
/// Returns `InvalidConfiguration` for a rejected configuration and
/// `DrawExhausted` on a planner/driver horizon mismatch.
pub fn run_with_observer<E, F>(
    config: &EngineConfig,
    evaluator: &E,
    mut observer: F,
) -> EngineResult<(BestResult, RunStats)>
where
    E: Evaluator,
    F: FnMut(Progress),
{
    config.validate()?;
    let start_time = std::time::Instant::now();

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut current = Population::new(config.population_size, config.string_length)?;
    current.randomize(&mut rng);
    let mut next = Population::new(config.population_size, config.string_length)?;
    let mut planner = DrawPlanner::new(rng, config.draw_config(), config.plan, config.epochs)?;

    let mut parents = vec![0usize; config.population_size];
    let mut best: Option<BestResult> = None;
    let mut best_epoch = 0;
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        evaluate_population(&mut current, evaluator);

        let stats = FitnessStats::from_scores(current.fitness());
        history.push(EpochStats {
            epoch,
            best_fitness: stats.best,
            mean_fitness: stats.mean,
            fitness_std: stats.std_dev,
        });

        // Replace the best only on a strictly greater score; the
        // champion's bits are copied out because its buffer slot is
        // overwritten next generation.
        let (champion, score) = argmax(current.fitness());
        if best.as_ref().is_none_or(|b| score > b.fitness) {
            best = Some(BestResult {
                fitness: score,
                bits: current.individual(champion).to_vec(),
            });
            best_epoch = epoch;
        }
        if let Some(b) = &best {
            observer(Progress {
                epoch,
                best_fitness: b.fitness,
            });
        }

        let batch = planner.batch(epoch)?;
        select_parents(
            current.fitness(),
            &batch.tournament,
            config.tournament_rounds,
            &mut parents,
        );
        populate_children(&current, &parents, batch, &mut next);
        std::mem::swap(&mut current, &mut next);
    }

    let Some(best) = best else {
        return Err(EngineError::InvalidConfiguration {
            field: "epochs",
            message: "must be at least 1".to_string(),
        });
    };

    Ok((
        best,
        RunStats {
            epochs: history,
            best_epoch,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        },
    ))
}

/// Run the engine without progress observation.
///
/// # Errors
///
/// Same conditions as [`run_with_observer`].
pub fn run<E: Evaluator>(
    config: &EngineConfig,
    evaluator: &E,
) -> EngineResult<(BestResult, RunStats)> {
    run_with_observer(config, evaluator, |_| {})
}

/// First-seen index of the maximum score.
fn argmax(scores: &[f64]) -> (usize, f64) {
    let mut best_ix = 0;
    for (ix, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best_ix] {
            best_ix = ix;
        }
    }
    (best_ix, scores[best_ix])
}
