//! Batched random draw planning.
//!
//! All randomness a generation consumes is drawn in one fixed order
//! (tournament indices, crossover participation, crossover points,
//! mutation triggers) so that a seed fully determines a run. The
//! planner owns the generator; nothing else in the engine touches
//! random state after initialization.

use crate::error::{EngineError, EngineResult};
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// When the planner materializes its draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlanStrategy {
    /// Refill one reusable batch at the start of each generation.
    #[default]
    PerGeneration,
    /// Materialize every generation's batch at construction, trading
    /// memory for a draw-free generational loop.
    Upfront,
}

/// Shape and rate parameters for draw planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawConfig {
    /// Number of individuals (even, nonzero).
    pub population_size: usize,
    /// Bits per individual (at least 2).
    pub string_length: usize,
    /// Candidate draws per tournament (at least 1).
    pub tournament_rounds: usize,
    /// Per-bit mutation probability in `[0, 1]`.
    pub mutation_rate: f64,
    /// Per-pair crossover probability in `[0, 1]`.
    pub crossover_rate: f64,
}

impl DrawConfig {
    /// Validate the shape and rates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(EngineError::InvalidConfiguration {
                field: "population_size",
                message: format!("must be even and nonzero, got {}", self.population_size),
            });
        }
        if self.string_length < 2 {
            return Err(EngineError::InvalidConfiguration {
                field: "string_length",
                message: format!("must be at least 2, got {}", self.string_length),
            });
        }
        if self.tournament_rounds == 0 {
            return Err(EngineError::InvalidConfiguration {
                field: "tournament_rounds",
                message: "must be at least 1".to_string(),
            });
        }
        validate_rate("mutation_rate", self.mutation_rate)?;
        validate_rate("crossover_rate", self.crossover_rate)?;
        Ok(())
    }
}

fn validate_rate(field: &'static str, rate: f64) -> EngineResult<()> {
    if rate.is_nan() || !(0.0..=1.0).contains(&rate) {
        return Err(EngineError::InvalidConfiguration {
            field,
            message: format!("must be within [0, 1], got {rate}"),
        });
    }
    Ok(())
}

/// One generation's worth of pre-drawn randomness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    /// Tournament candidate indices in `[0, population_size)`,
    /// `tournament_rounds` consecutive draws per child slot.
    pub tournament: Vec<usize>,
    /// Per-pair crossover participation, one entry per consecutive
    /// child pair.
    pub cross_mask: Vec<bool>,
    /// Per-pair crossover points in `[1, string_length - 1]`.
    pub cross_points: Vec<usize>,
    /// Per-bit mutation triggers over the whole next generation,
    /// row-major.
    pub mutation_mask: Vec<bool>,
}

impl DrawBatch {
    fn with_shape(config: &DrawConfig) -> Self {
        let n = config.population_size;
        Self {
            tournament: vec![0; n * config.tournament_rounds],
            cross_mask: vec![false; n / 2],
            cross_points: vec![0; n / 2],
            mutation_mask: vec![false; n * config.string_length],
        }
    }

    /// Refill every collection from `rng` in the canonical order:
    /// tournament draws, participation, points, mutation triggers.
    fn fill<R: Rng>(&mut self, config: &DrawConfig, rng: &mut R) {
        let n = config.population_size;
        for draw in &mut self.tournament {
            *draw = rng.gen_range(0..n);
        }
        for flag in &mut self.cross_mask {
            *flag = rng.gen_bool(config.crossover_rate);
        }
        for point in &mut self.cross_points {
            *point = rng.gen_range(1..config.string_length);
        }
        for trigger in &mut self.mutation_mask {
            *trigger = rng.gen_bool(config.mutation_rate);
        }
    }
}

/// Produces the randomness stream for a run, one batch per generation.
#[derive(Debug, Clone)]
pub struct DrawPlanner {
    config: DrawConfig,
    strategy: PlanStrategy,
    rng: SmallRng,
    scratch: DrawBatch,
    pregenerated: Vec<DrawBatch>,
}

impl DrawPlanner {
    /// Build a planner over an already-seeded generator.
    ///
    /// With [`PlanStrategy::Upfront`] this draws all `epochs` batches
    /// immediately; with [`PlanStrategy::PerGeneration`] it draws
    /// nothing until [`DrawPlanner::batch`] is called. Either way the
    /// generator stream is consumed in the same order, so strategy
    /// choice does not change a run.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` (before consuming any draw) if
    /// the shape or rates are invalid.
    pub fn new(
        rng: SmallRng,
        config: DrawConfig,
        strategy: PlanStrategy,
        epochs: usize,
    ) -> EngineResult<Self> {
        config.validate()?;
        let mut planner = Self {
            config,
            strategy,
            rng,
            scratch: DrawBatch::with_shape(&config),
            pregenerated: Vec::new(),
        };
        if strategy == PlanStrategy::Upfront {
            planner.pregenerated.reserve_exact(epochs);
            for _ in 0..epochs {
                let mut batch = DrawBatch::with_shape(&config);
                batch.fill(&config, &mut planner.rng);
                planner.pregenerated.push(batch);
            }
        }
        Ok(planner)
    }

    /// The draws for `epoch`.
    ///
    /// Per-generation planning expects epochs to be requested in run
    /// order; each call refills the shared batch.
    ///
    /// # Errors
    ///
    /// Returns `DrawExhausted` if up-front draws were generated and
    /// `epoch` lies beyond that horizon.
    pub fn batch(&mut self, epoch: usize) -> EngineResult<&DrawBatch> {
        match self.strategy {
            PlanStrategy::PerGeneration => {
                self.scratch.fill(&self.config, &mut self.rng);
                Ok(&self.scratch)
            }
            PlanStrategy::Upfront => {
                let horizon = self.pregenerated.len();
                self.pregenerated
                    .get(epoch)
                    .ok_or(EngineError::DrawExhausted { epoch, horizon })
            }
        }
    }
}
