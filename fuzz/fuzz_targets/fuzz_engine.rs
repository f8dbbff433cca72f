#![no_main]

use arbitrary::Arbitrary;
use evobits::{EngineConfig, EngineError, OneMax, PlanStrategy, run};
use libfuzzer_sys::fuzz_target;

/// Structured input for engine fuzzing.
#[derive(Arbitrary, Debug)]
struct EngineInput {
    /// RNG seed.
    seed: u64,
    /// Population size (capped; odd values exercise rejection).
    population_size: u8,
    /// String length (capped; short values exercise rejection).
    string_length: u8,
    /// Epoch count (capped to keep iterations fast).
    epochs: u8,
    /// Tournament rounds (zero exercises rejection).
    tournament_rounds: u8,
    /// Mutation rate, unconstrained to exercise range validation.
    mutation_rate: f64,
    /// Crossover rate, unconstrained to exercise range validation.
    crossover_rate: f64,
    /// Whether to pre-generate all randomness.
    upfront: bool,
}

fn rate_invalid(rate: f64) -> bool {
    rate.is_nan() || !(0.0..=1.0).contains(&rate)
}

fuzz_target!(|input: EngineInput| {
    // Cap sizes to avoid slow iterations
    let config = EngineConfig {
        seed: input.seed,
        population_size: usize::from(input.population_size % 32),
        string_length: usize::from(input.string_length % 64),
        epochs: usize::from(input.epochs % 8),
        tournament_rounds: usize::from(input.tournament_rounds % 6),
        mutation_rate: input.mutation_rate,
        crossover_rate: input.crossover_rate,
        plan: if input.upfront {
            PlanStrategy::Upfront
        } else {
            PlanStrategy::PerGeneration
        },
    };

    match run(&config, &OneMax) {
        Ok((best, stats)) => {
            // Loop invariants: full-length best, one stats entry per epoch
            assert_eq!(best.bits.len(), config.string_length);
            assert_eq!(stats.epochs.len(), config.epochs);
            assert!(best.fitness >= 0.0);
            assert!(stats.best_epoch < config.epochs);
        }
        Err(EngineError::InvalidConfiguration { .. }) => {
            // Rejected configurations must actually be invalid
            assert!(
                config.population_size == 0
                    || config.population_size % 2 != 0
                    || config.string_length < 2
                    || config.epochs == 0
                    || config.tournament_rounds == 0
                    || rate_invalid(config.mutation_rate)
                    || rate_invalid(config.crossover_rate)
            );
        }
        Err(EngineError::DrawExhausted { .. }) => {
            panic!("driver requested draws beyond its own horizon");
        }
    }
});
