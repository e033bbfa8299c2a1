//! dynbeta: dynamic β-schedule KL controller tooling.
//!
//! Provides subcommands for exercising the crate from the command line:
//!
//! - `simulate` -- Step the controller over synthetic grouped reward batches
//! - `score`    -- Score completions from a JSONL file against ground truths

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use dynbeta::config::DynBetaConfig;
use dynbeta::reward::{compute_score, GroundTruth};
use dynbeta::sim;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Dynamic beta-schedule KL controller tooling.
#[derive(Parser)]
#[command(name = "dynbeta", version, about)]
struct Cli {
    /// Path to a JSON configuration file (uses defaults if not provided).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the controller over synthetic reward batches and print the trace.
    Simulate {
        /// Override the number of simulated steps.
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Score completions from a JSONL file.
    Score {
        /// Path to a JSONL file with {data_source, completion, ground_truth}
        /// records.
        input: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Initialise tracing (reads RUST_LOG env var, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            serde_json::from_str::<DynBetaConfig>(&text)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        }
        None => DynBetaConfig::default(),
    };

    match cli.command {
        Commands::Simulate { steps } => {
            if let Some(steps) = steps {
                config.sim.steps = steps;
            }
            cmd_simulate(&config)
        }
        Commands::Score { input } => cmd_score(&input),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_simulate(config: &DynBetaConfig) -> Result<()> {
    tracing::info!(
        steps = config.sim.steps,
        beta_min = config.controller.beta_min,
        beta_max = config.controller.beta_max,
        "Starting beta-schedule simulation"
    );

    let trace = sim::run(&config.controller, &config.sim)?;

    println!("step  success_rate  beta");
    for step in &trace {
        println!(
            "{:>4}  {:>12.3}  {:.6}",
            step.step, step.success_rate, step.beta
        );
    }

    Ok(())
}

/// One record of the `score` subcommand's input file.
#[derive(Debug, Deserialize)]
struct ScoreRecord {
    data_source: String,
    completion: String,
    ground_truth: Value,
    #[serde(default)]
    extra_info: Option<Value>,
}

fn cmd_score(input: &PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut total = 0.0;
    let mut count = 0usize;

    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ScoreRecord = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse record on line {}", lineno + 1))?;

        let ground_truth = match &record.ground_truth {
            Value::String(s) => GroundTruth::Text(s.clone()),
            other => GroundTruth::Structured(other.clone()),
        };

        let score = compute_score(
            &record.data_source,
            &record.completion,
            &ground_truth,
            record.extra_info.as_ref(),
        );
        total += score;
        count += 1;
        println!("{}  {}  {:.1}", lineno + 1, record.data_source, score);
    }

    if count > 0 {
        println!("mean  {:.4}  ({count} records)", total / count as f64);
    } else {
        println!("no records scored");
    }

    Ok(())
}
