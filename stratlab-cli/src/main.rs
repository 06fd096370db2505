//! StratLab CLI: run, validate and fingerprint framework configurations.
//!
//! Commands:
//! - `run`: simulate a TOML run config and save its artifacts
//! - `validate`: build the model set and report the framework mode
//! - `hash`: print the run and framework fingerprints
//!
//! Log verbosity follows `RUST_LOG`; `--verbose` raises the default to debug.
//! Debug trace lines from runs with `debug = true` go to the
//! `stratlab::trace` target at info level.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::prelude::*;

use stratlab_core::components::factory::build_model_set;
use stratlab_runner::{run_simulation, save_artifacts, RunConfig, RunResult};

#[derive(Parser)]
#[command(
    name = "stratlab",
    about = "StratLab CLI: strategy framework controller simulations"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a run config and save manifest.json, fills.csv, equity.csv and report.md.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Override the config's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check that a run config builds and report the framework mode it selects.
    Validate {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the configuration fingerprints.
    Hash {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            output_dir,
            seed,
            json,
        } => run_cmd(&config, &output_dir, seed, json),
        Commands::Validate { config } => validate_cmd(&config),
        Commands::Hash { config } => hash_cmd(&config),
    }
}

fn load(path: &Path) -> Result<RunConfig> {
    RunConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

fn run_cmd(config_path: &Path, output_dir: &Path, seed: Option<u64>, json: bool) -> Result<()> {
    let mut config = load(config_path)?;
    if let Some(seed) = seed {
        config.run.seed = seed;
    }
    info!(config = %config_path.display(), hash = %config.config_hash().short(), "running");

    let result = run_simulation(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    let run_dir = save_artifacts(&result, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn validate_cmd(config_path: &Path) -> Result<()> {
    let config = load(config_path)?;
    let framework = config.framework_config();
    let mut models = build_model_set(&framework, &config.symbols())?;
    let mode = models
        .validate()
        .with_context(|| format!("validating {}", config_path.display()))?;

    println!("Config:       {}", config_path.display());
    println!("Mode:         {mode}");
    println!(
        "Selection:    {}",
        framework
            .universe_selection
            .as_ref()
            .map_or("(default)", |c| c.component_type.as_str())
    );
    println!("Alpha:        {}", models.alpha_name());
    println!("Portfolio:    {}", framework.portfolio_construction.component_type);
    println!("Risk:         {}", framework.risk_management.component_type);
    println!("Execution:    {}", framework.execution.component_type);
    println!("Symbols:      {}", config.symbols().len());
    Ok(())
}

fn hash_cmd(config_path: &Path) -> Result<()> {
    let config = load(config_path)?;
    println!("run:       {}", config.config_hash());
    println!("framework: {}", config.framework_config().config_hash());
    Ok(())
}

fn print_summary(result: &RunResult) {
    println!("=== Simulation Summary ===");
    println!("Config hash:    {}", result.config_hash);
    println!("Mode:           {}", result.mode);
    println!("Period:         {} to {}", result.start, result.end);
    println!(
        "Ticks:          {} ({} processed, {} refresh only, {} disabled)",
        result.ticks.total(),
        result.ticks.processed,
        result.ticks.refresh_only,
        result.ticks.disabled
    );
    println!("Refreshes:      {}", result.universe_refreshes);
    println!("Insights:       {}", result.insights_generated);
    println!("Orders:         {}", result.orders_submitted);
    println!("Fills:          {}", result.fills.len());
    println!("Rejections:     {}", result.rejections.len());
    println!("Final value:    ${:.2}", result.final_value);
    println!("Total return:   {:.2}%", result.total_return() * 100.0);
    for p in &result.positions {
        println!("  {:<10} {:>12.2} @ {:.2}", p.symbol.ticker, p.quantity, p.mark);
    }
}
