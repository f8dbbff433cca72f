// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Evobits: a vectorized genetic algorithm engine for fixed-length
//! bitstrings.
//!
//! The engine evolves a population of bit arrays against a pluggable
//! fitness function using tournament selection, one-point crossover,
//! and per-bit mutation. It is built for throughput and
//! reproducibility:
//! - One contiguous bit matrix per generation buffer, no
//!   per-individual allocation
//! - Double buffering: generations swap buffer roles instead of
//!   copying bits
//! - All randomness drawn in batches from one owned, seeded generator
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Generational Driver          │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │         Fitness Evaluation          │
//! ├─────────────────────────────────────┤
//! │  Population Buffers │ Draw Planner  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use evobits::{EngineConfig, OneMax, run};
//!
//! let config = EngineConfig {
//!     population_size: 20,
//!     string_length: 64,
//!     epochs: 50,
//!     ..EngineConfig::default()
//! };
//! let (best, _stats) = run(&config, &OneMax)?;
//! assert_eq!(best.bits.len(), 64);
//! # Ok::<(), evobits::EngineError>(())
//! ```

pub mod engine;
pub mod error;
pub mod fitness;
pub mod planner;
pub mod population;
pub mod selection;
pub mod variation;

pub use engine::{
    BestResult, EngineConfig, EpochStats, Progress, RunStats, run, run_with_observer,
};
pub use error::{EngineError, EngineResult};
pub use fitness::{Evaluator, FitnessStats, OneMax, evaluate_population};
pub use planner::{DrawBatch, DrawConfig, DrawPlanner, PlanStrategy};
pub use population::Population;
pub use selection::select_parents;
pub use variation::populate_children;
