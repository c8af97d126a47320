//! roam CLI - headless driver for the obstacle-avoidance simulation.
//!
//! - `roam run` - step a scenario and print a summary or per-tick snapshots
//! - `roam check` - validate a scenario file
//! - `roam init` - write the default scenario

mod report;
mod scenario;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use roam_tools::{TraceEvent, TraceSink};

use crate::report::{RunSummary, Snapshot};
use crate::scenario::{Scenario, DEFAULT_SCENARIO};

#[derive(Parser)]
#[command(name = "roam")]
#[command(about = "Headless obstacle-avoidance simulation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario for a fixed number of ticks
    Run {
        /// Scenario file (defaults to the built-in layout)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to run
        #[arg(short = 'n', long, default_value_t = 600)]
        ticks: u64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write trace events to stderr as JSON lines
        #[arg(long)]
        trace: bool,

        /// Pace ticks at this rate instead of running flat out
        #[arg(long)]
        hz: Option<f64>,
    },

    /// Validate a scenario file
    Check {
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Write the default scenario
    Init {
        #[arg(short, long, default_value = "roam.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Summary,
    Jsonl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            format,
            trace,
            hz,
        } => run_scenario(scenario.as_deref(), ticks, format, trace, hz),
        Commands::Check { scenario } => check_scenario(&scenario),
        Commands::Init { output, force } => init_scenario(&output, force),
    }
}

/// Writes each event as a JSON line on stderr, keeping stdout for run output.
struct StderrTraceSink;

impl TraceSink for StderrTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => eprintln!("{line}"),
            Err(err) => tracing::warn!(error = %err, "Failed to encode trace event"),
        }
    }
}

fn run_scenario(
    path: Option<&Path>,
    ticks: u64,
    format: OutputFormat,
    trace: bool,
    hz: Option<f64>,
) -> Result<()> {
    let scenario = Scenario::load_or_default(path)?;
    let mut sim = scenario.build().context("Invalid scenario")?;

    let period = match hz {
        Some(hz) if hz.is_finite() && hz > 0.0 => Some(Duration::from_secs_f64(1.0 / hz)),
        Some(hz) => bail!("--hz must be a positive rate, got {hz}"),
        None => None,
    };

    tracing::info!(
        ticks,
        obstacles = sim.world().obstacles().len(),
        model = ?sim.config().sensor_model,
        "Starting run"
    );

    let mut sink = trace.then_some(StderrTraceSink);
    let mut summary = RunSummary::default();
    let mut next_deadline = Instant::now();

    for _ in 0..ticks {
        match sink.as_mut() {
            Some(sink) => sim.step_traced(sink),
            None => sim.step(),
        };

        let report = sim
            .last_report()
            .copied()
            .context("Simulation stepped without a report")?;
        summary.record(sim.state(), &report);

        if format == OutputFormat::Jsonl {
            println!("{}", serde_json::to_string(&Snapshot::capture(&sim))?);
        }

        if let Some(period) = period {
            next_deadline += period;
            if let Some(wait) = next_deadline.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    tracing::info!(
        violations = summary.violations,
        recoveries = summary.recoveries,
        "Run finished"
    );

    if format == OutputFormat::Summary {
        summary.print();
    }
    Ok(())
}

fn check_scenario(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let sim = scenario
        .build()
        .with_context(|| format!("Invalid scenario {}", path.display()))?;

    println!("Scenario OK: {}", path.display());
    println!(
        "  arena {}x{}, {} obstacles",
        scenario.arena.width,
        scenario.arena.height,
        sim.world().obstacles().len()
    );
    println!(
        "  agent at ({}, {}) heading {}",
        sim.position().x,
        sim.position().y,
        sim.heading()
    );
    Ok(())
}

fn init_scenario(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    std::fs::write(output, DEFAULT_SCENARIO)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote default scenario to {}", output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit the obstacles and tuning sections");
    println!("  2. Run: roam run --scenario {}", output.display());
    Ok(())
}
