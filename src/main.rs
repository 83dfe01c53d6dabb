//! swarmopt runner binary

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swarmopt::{
    print_population, Himmelblau, LogbookCallback, Objective, Rastrigin, Schwefel, Swarm,
    SwarmConfig, SwarmError,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "swarmopt")]
#[command(about = "Particle swarm optimization of benchmark landscapes")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// JSON configuration file (overrides the preset)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Number of particles
    #[arg(short, long, global = true)]
    population: Option<usize>,

    /// Number of generations
    #[arg(short, long, global = true)]
    generations: Option<u32>,

    /// Reset the swarm best at the start of every generation
    #[arg(long, global = true)]
    reset_per_generation: bool,

    /// Write the logbook as JSON to this file
    #[arg(long, global = true)]
    logbook: Option<PathBuf>,

    /// Do not print the per-generation logbook stream
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Logging level
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Clone, Copy)]
enum Mode {
    /// Minimize the Schwefel function
    Single,
    /// Minimize the Himmelblau and Rastrigin functions together
    Multi,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let outcome = match args.mode {
        Mode::Single => run::<1>(&args, SwarmConfig::schwefel(), &[&Schwefel]),
        Mode::Multi => run::<2>(
            &args,
            SwarmConfig::himmelblau_rastrigin(),
            &[&Himmelblau, &Rastrigin],
        ),
    };

    if let Err(e) = outcome {
        error!("Run failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(args: &Args, preset: SwarmConfig) -> Result<SwarmConfig, SwarmError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            SwarmConfig::from_json_file(path)?
        }
        None => preset,
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(population) = args.population {
        config.population_size = population;
    }
    if let Some(generations) = args.generations {
        config.generation_count = generations;
    }
    if args.reset_per_generation {
        config.reset_per_generation = true;
    }

    Ok(config)
}

fn run<const M: usize>(
    args: &Args,
    preset: SwarmConfig,
    objectives: &[&dyn Objective; M],
) -> Result<(), SwarmError> {
    let config = build_config(args, preset)?;
    let mut swarm = Swarm::<M>::from_config(config)?;

    print_population("Initial population", swarm.particles());

    let mut callback = LogbookCallback::<M>::new(!args.quiet);
    swarm.run(objectives, &mut callback)?;

    callback.print_summary(swarm.particles());

    if let Some(path) = &args.logbook {
        std::fs::write(path, callback.logbook().to_json()?)?;
        info!("Logbook written to {:?}", path);
    }

    Ok(())
}
