//! Grouping Experiment CLI.
//!
//! Commands:
//! - analyze: Show the round limits for one configuration
//! - compare: Compare round limits across several configurations
//! - run: Drive a session, interactively or for a fixed number of rounds

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use grouping_experiment::driver::{advance, run_interactive};
use grouping_experiment::generator::{GeneratorConfig, ParticipantGenerator};
use grouping_experiment::report::{bounds_report, comparison_table};
use grouping_experiment::results::save_history;
use grouping_kernel::{EngineConfig, RoundBounds, Session, compare_scenarios};

const DEFAULT_SCENARIOS: &[(usize, usize)] = &[
    (50, 10),
    (30, 6),
    (24, 4),
    (40, 8),
    (60, 12),
    (20, 5),
    (15, 3),
];

#[derive(Parser)]
#[command(name = "grouping-experiment")]
#[command(version)]
#[command(about = "Repeat-avoiding group rounds for social events")]
struct Cli {
    /// Engine config file (TOML)
    #[arg(long, env = "GROUPING_CONFIG")]
    config: Option<PathBuf>,

    /// Random seed for the search (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Search iterations per round (overrides the config file)
    #[arg(long)]
    iterations: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the round limits for one configuration
    Analyze {
        /// Total participants
        #[arg(long, default_value = "50")]
        people: usize,

        /// Participants per group
        #[arg(long, default_value = "10")]
        group_size: usize,
    },

    /// Compare several configurations
    Compare {
        /// Scenarios as PEOPLE:GROUP_SIZE (repeatable). Default: a built-in list
        #[arg(long = "scenario", value_parser = parse_scenario)]
        scenarios: Vec<(usize, usize)>,
    },

    /// Run grouping rounds over a synthetic population
    Run {
        /// Total participants
        #[arg(long, default_value = "72")]
        people: usize,

        /// Participants per group
        #[arg(long, default_value = "12")]
        group_size: usize,

        /// Run this many rounds without prompting, then exit
        #[arg(long)]
        rounds: Option<usize>,

        /// Seed for participant generation
        #[arg(long)]
        population_seed: Option<u64>,

        /// History output file (default: timestamped name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let engine_config = load_engine_config(&cli)?;

    match cli.command {
        Commands::Analyze { people, group_size } => {
            let bounds = RoundBounds::analyze(people, group_size)?;
            print!("{}", bounds_report(&bounds));
        }

        Commands::Compare { scenarios } => {
            let scenarios = if scenarios.is_empty() {
                DEFAULT_SCENARIOS.to_vec()
            } else {
                scenarios
            };
            let results = compare_scenarios(&scenarios);
            print!("{}", comparison_table(&scenarios, &results));
        }

        Commands::Run {
            people,
            group_size,
            rounds,
            population_seed,
            output,
        } => {
            let participants = ParticipantGenerator::new(GeneratorConfig {
                count: people,
                seed: population_seed,
            })
            .generate();
            info!(people = people, "Generated participants");

            let mut session = Session::new(participants, group_size, &engine_config)?;
            print!("{}", bounds_report(session.bounds()));

            let mut out = io::stdout();

            match rounds {
                Some(count) => {
                    for _ in 0..count {
                        advance(&mut session, &mut out)?;
                    }
                    if let Some(path) = output {
                        save_history(&session.export(), &path)?;
                        writeln!(out, "History saved to {}", path.display())?;
                    }
                }
                None => {
                    run_interactive(&mut session, io::stdin().lock(), &mut out, output)?;
                }
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn load_engine_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(iterations) = cli.iterations {
        config.search.max_iterations = iterations;
    }
    config.validate()?;
    Ok(config)
}

fn parse_scenario(s: &str) -> Result<(usize, usize)> {
    let Some((people, size)) = s.split_once(':') else {
        bail!("Invalid scenario '{}'. Expected PEOPLE:GROUP_SIZE", s);
    };
    let people = people
        .trim()
        .parse()
        .with_context(|| format!("Invalid people count in '{}'", s))?;
    let size = size
        .trim()
        .parse()
        .with_context(|| format!("Invalid group size in '{}'", s))?;
    Ok((people, size))
}
