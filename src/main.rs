//! Evobits CLI - run the bitstring evolution engine from the command line.

// Allow print in the CLI binary and intentional casts for display
#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use clap::{Parser, ValueEnum};
use evobits::{EngineConfig, EngineError, OneMax, PlanStrategy, Progress, run_with_observer};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::process::ExitCode;

/// Evobits - a vectorized genetic algorithm engine
#[derive(Parser, Debug)]
#[command(name = "evobits")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed (default: derived from the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Population size (must be even)
    #[arg(short, long, default_value = "100")]
    population: usize,

    /// Bits per individual
    #[arg(short, long, default_value = "1000")]
    length: usize,

    /// Number of generations
    #[arg(short, long, default_value = "500")]
    epochs: usize,

    /// Tournament rounds per parent selection
    #[arg(short, long, default_value = "3")]
    rounds: usize,

    /// Per-bit mutation probability (default: 1 / length)
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Per-pair crossover probability
    #[arg(short, long, default_value = "0.95")]
    crossover_rate: f64,

    /// Pre-generate all randomness for the whole run up front
    #[arg(long)]
    upfront: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Show a progress bar instead of per-generation lines
    #[arg(long)]
    progress: bool,

    /// Suppress per-generation output
    #[arg(short, long)]
    quiet: bool,
}

/// Output format for run results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
struct CliError {
    message: String,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// JSON output payload.
#[derive(Debug, Serialize)]
struct RunSummary {
    config: EngineConfig,
    best_fitness: f64,
    best_bits: String,
    best_epoch: usize,
    elapsed_seconds: f64,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<(), CliError> {
    let default_mutation_rate = 1.0 / args.length.max(1) as f64;
    let config = EngineConfig {
        seed: args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(42)
        }),
        population_size: args.population,
        string_length: args.length,
        epochs: args.epochs,
        tournament_rounds: args.rounds,
        mutation_rate: args.mutation_rate.unwrap_or(default_mutation_rate),
        crossover_rate: args.crossover_rate,
        plan: if args.upfront {
            PlanStrategy::Upfront
        } else {
            PlanStrategy::PerGeneration
        },
    };

    let text = args.format == OutputFormat::Text;
    if text && !args.quiet {
        println!("Starting evolution:");
        println!("  Population: {}", config.population_size);
        println!("  String length: {}", config.string_length);
        println!("  Generations: {}", config.epochs);
        println!("  Seed: {}", config.seed);
        println!();
    }

    let bar = (text && args.progress).then(|| {
        let pb = ProgressBar::new(config.epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations (best: {msg})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        pb
    });

    let on_progress = |progress: Progress| {
        if let Some(pb) = &bar {
            pb.set_position(progress.epoch as u64 + 1);
            pb.set_message(progress.best_fitness.to_string());
        } else if text && !args.quiet {
            println!("Gen {:>5}: best={}", progress.epoch, progress.best_fitness);
        }
    };

    let (best, stats) = run_with_observer(&config, &OneMax, on_progress)?;

    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }

    match args.format {
        OutputFormat::Text => {
            if !args.quiet {
                println!();
            }
            println!("Evolution complete!");
            println!("  Best fitness: {}", best.fitness);
            println!("  Best generation: {}", stats.best_epoch);
            println!("  Best bitstring: {}", best.bits_string());
            println!("  Elapsed time: {:.1}s", stats.elapsed_seconds);
        }
        OutputFormat::Json => {
            let summary = RunSummary {
                config,
                best_fitness: best.fitness,
                best_bits: best.bits_string(),
                best_epoch: stats.best_epoch,
                elapsed_seconds: stats.elapsed_seconds,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
