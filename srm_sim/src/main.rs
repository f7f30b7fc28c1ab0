//! # SRM Simulator Binary
//!
//! Evaluate one switched-reluctance motor configuration, step it
//! interactively, or sweep every coil/pole count combination.
//!
//! # Usage
//!
//! ```bash
//! # Full revolution of the classic 3 coil / 4 pole motor
//! srm_sim run --coils 3 --poles 4
//!
//! # Step a motor three times, printing alignments after each step
//! srm_sim step --coils 6 --poles 8 -n 3
//!
//! # Rank all combinations up to 20 coils and 20 poles, JSON output
//! srm_sim sweep --max 20 --output json
//!
//! # Verbose logging
//! srm_sim -v run
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use srm_common::config::{ConfigError, LogLevel, SimConfig};
use srm_common::consts::{DEFAULT_CONFIG_PATH, DEFAULT_SESSION_FILE};
use srm_common::motor::MotorConfig;
use srm_sim::model::MotorModel;
use srm_sim::report::{format_alignments, format_state, format_summary, format_table};
use srm_sim::session::{SessionRecord, SessionStore};
use srm_sim::{rank, run, sweep};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// SRM simulator - switched-reluctance motor stepping and configuration sweep
#[derive(Parser, Debug)]
#[command(name = "srm_sim")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Switched-reluctance motor step simulator")]
#[command(long_about = None)]
struct Args {
    /// Path to configuration file (srm.toml). Defaults apply if it is missing.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Session file remembering last-used values (overrides `session_file`).
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Motor overrides shared by all subcommands.
#[derive(clap::Args, Debug, Clone, Copy)]
struct MotorArgs {
    /// Overall motor diameter
    #[arg(long)]
    outer_diameter: Option<f64>,

    /// Coil (and pole) diameter
    #[arg(long)]
    coil_diameter: Option<f64>,

    /// Number of stator coils
    #[arg(long = "coils")]
    coil_count: Option<usize>,

    /// Number of rotor poles
    #[arg(long = "poles")]
    pole_count: Option<usize>,
}

impl MotorArgs {
    fn apply(&self, mut motor: MotorConfig) -> MotorConfig {
        if let Some(v) = self.outer_diameter {
            motor.outer_diameter = v;
        }
        if let Some(v) = self.coil_diameter {
            motor.coil_diameter = v;
        }
        if let Some(v) = self.coil_count {
            motor.coil_count = v;
        }
        if let Some(v) = self.pole_count {
            motor.pole_count = v;
        }
        motor
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one full revolution
    Run {
        #[command(flatten)]
        motor: MotorArgs,

        /// Result format
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Step the motor interactively
    Step {
        #[command(flatten)]
        motor: MotorArgs,

        /// Number of steps to take
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Run and rank every coil/pole count combination
    Sweep {
        #[command(flatten)]
        motor: MotorArgs,

        /// Largest coil and pole count
        #[arg(long = "max")]
        max_count: Option<usize>,

        /// Keep enumeration order instead of ranking
        #[arg(long)]
        unsorted: bool,

        /// Worker threads (0 = available parallelism)
        #[arg(long)]
        threads: Option<usize>,

        /// Result format
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run_cli() {
        error!("srm_sim failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Tracing needs the configured level; config errors surface after setup.
    let loaded = SimConfig::load_or_default(&args.config);
    let level = loaded.as_ref().map(|c| c.log_level).unwrap_or_default();
    setup_tracing(&args, level);

    let config = loaded?;
    // The motor section may be overridden below; only the sweep bounds are final here.
    config.sweep.validate()?;
    info!("SRM simulator v{} starting", env!("CARGO_PKG_VERSION"));

    let session_path = args
        .session
        .clone()
        .or_else(|| config.session_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let store = SessionStore::new(&session_path);
    let mut record = match store.load() {
        Ok(Some(record)) => {
            info!("Restored session from {:?}", store.path());
            record
        }
        Ok(None) => SessionRecord::new(),
        Err(e) => {
            warn!("Ignoring unreadable session file: {}", e);
            SessionRecord::new()
        }
    };

    match args.command {
        Command::Run { motor, output } => {
            let motor = resolve_motor(&motor, record.motor, config.motor)?;
            let result = run(&motor)?;
            match output {
                OutputFormat::Text => print!("{}", format_summary(&result)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            record.motor = Some(motor);
        }

        Command::Step { motor, count } => {
            let motor = resolve_motor(&motor, record.motor, config.motor)?;
            step_interactively(&motor, count)?;
            record.motor = Some(motor);
        }

        Command::Sweep {
            motor,
            max_count,
            unsorted,
            threads,
            output,
        } => {
            let motor = resolve_motor(&motor, record.motor, config.motor)?;
            let max_count = max_count
                .or(record.sweep_max)
                .unwrap_or(config.sweep.max_count);
            let threads = threads.unwrap_or(config.sweep.threads);

            let mut results = sweep(&motor, max_count, threads)?;
            if config.sweep.sorted && !unsorted {
                rank(&mut results);
            }
            match output {
                OutputFormat::Text => print!("{}", format_table(&results)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            }
            record.motor = Some(motor);
            record.sweep_max = Some(max_count);
        }
    }

    if let Err(e) = store.save(&record) {
        warn!("Failed to save session: {}", e);
    }
    Ok(())
}

/// Final motor: CLI flags over the session record over the config file.
fn resolve_motor(
    overrides: &MotorArgs,
    session: Option<MotorConfig>,
    configured: MotorConfig,
) -> Result<MotorConfig, ConfigError> {
    let motor = overrides.apply(session.unwrap_or(configured));
    motor.validate()?;
    Ok(motor)
}

/// Step one model `count` times, stopping at the first failure.
fn step_interactively(motor: &MotorConfig, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut model = MotorModel::new(*motor)?;
    print!("{}", format_alignments(&model.alignments()));
    println!("{}", format_state(&model.state()));

    for n in 1..=count {
        match model.step() {
            Ok(outcome) => {
                println!(
                    "step {}: L{} pulls P{} by {:.3}°",
                    n, outcome.coil_index, outcome.pole_index, outcome.step_angle
                );
                print!("{}", format_alignments(&model.alignments()));
                println!("{}", format_state(&outcome.state));
                if outcome.revolution_complete {
                    println!("full revolution complete");
                }
            }
            Err(e) => {
                println!("step {}: {}", n, e);
                break;
            }
        }
    }
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and configured level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
