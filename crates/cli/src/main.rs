//! Combat rotation simulator binary.
//!
//! Loads a scenario and its catalogs from a data directory, runs one or more
//! seeded encounters and prints the result.
//!
//! # Examples
//!
//! ```bash
//! # One run of the sample scenario
//! cargo run -p castsim-cli -- --data-dir data
//!
//! # 1000 trials of a 3 minute encounter, as JSON
//! cargo run -p castsim-cli -- --scenario data/scenario.ron --trials 1000 --seconds 180 --json
//!
//! # Engine event trace
//! RUST_LOG=castsim=trace cargo run -p castsim-cli -- --verbose
//! ```

mod report;

use std::path::PathBuf;

use anyhow::Result;
use castsim_content::{ContentFactory, ScenarioLoader};
use castsim_core::TracingObserver;
use clap::Parser;

/// Deterministic combat rotation simulator
#[derive(Parser)]
#[command(name = "castsim")]
#[command(about = "Simulates a caster's damage rotation over an encounter", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (defaults to scenario.ron in the data directory)
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Directory holding spells.ron and items.ron
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Number of consecutive seeded runs
    #[arg(short, long, default_value_t = 1)]
    trials: u32,

    /// Encounter length, overriding the scenario
    #[arg(long, value_name = "SECONDS")]
    seconds: Option<u64>,

    /// Base seed, overriding the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Log engine events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let factory = ContentFactory::new(&cli.data_dir);
    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::load(path)?,
        None => factory.load_default_scenario()?,
    };
    if let Some(seed) = cli.seed {
        scenario.options.random_seed = seed;
    }
    let seconds = cli
        .seconds
        .unwrap_or(scenario.options.encounter.duration_secs);

    tracing::info!(
        scenario = %scenario.name,
        trials = cli.trials,
        seconds,
        seed = scenario.options.random_seed,
        "Starting simulation"
    );

    let mut sim = factory.build_simulation(&scenario)?;
    if cli.verbose {
        sim = sim.with_observer(TracingObserver);
    }

    if cli.trials <= 1 {
        let metrics = sim.run(seconds)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        } else {
            report::print_run(&scenario.name, &metrics, seconds);
        }
    } else {
        let summary = sim.run_trials(cli.trials, seconds)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            report::print_trials(&scenario.name, &summary);
        }
    }

    tracing::info!("Simulation complete");
    Ok(())
}

/// Logs to stderr so JSON on stdout stays machine-readable.
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
