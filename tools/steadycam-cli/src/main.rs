//! Steadycam CLI — drive and inspect the stabilization core headlessly.
//!
//! Usage:
//!   steadycam simulate [OPTIONS]          Run a session against synthetic or recorded tilt
//!   steadycam offset --mode M G,B ...     Compute offsets for explicit samples
//!   steadycam modes                       Show mode presets
//!   steadycam config show|init            Inspect or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod motion;

use motion::MotionKind;

#[derive(Parser)]
#[command(
    name = "steadycam",
    about = "Tilt-driven preview stabilization, headless",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a stabilization session and print every transform it writes
    Simulate {
        /// Stabilization mode: cinematic|standard|auto|off (defaults to config)
        #[arg(short, long)]
        mode: Option<String>,

        /// Synthetic device motion
        #[arg(long, value_enum, default_value = "shake")]
        motion: MotionKind,

        /// Replay a recorded JSONL orientation trace instead of synthetic motion
        #[arg(long, conflicts_with = "motion")]
        trace: Option<PathBuf>,

        /// Peak tilt of synthetic motion (degrees)
        #[arg(long, default_value = "12.0")]
        amplitude: f64,

        /// How long to run (seconds)
        #[arg(short, long, default_value = "3.0")]
        duration_secs: f64,

        /// Display refresh rate (defaults to config)
        #[arg(long)]
        fps: Option<u32>,

        /// Orientation sensor rate (defaults to config)
        #[arg(long)]
        sensor_hz: Option<u32>,

        /// Simulate a host without an orientation sensor
        #[arg(long)]
        no_sensor: bool,

        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Compute offsets for explicit GAMMA,BETA samples in order
    Offset {
        /// Stabilization mode: cinematic|standard|auto|off
        #[arg(short, long, default_value = "cinematic")]
        mode: String,

        /// Samples as GAMMA,BETA in degrees
        #[arg(required = true, allow_hyphen_values = true)]
        samples: Vec<String>,
    },

    /// Show mode presets
    Modes,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = steadycam_common::config::AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    steadycam_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Simulate {
            mode,
            motion,
            trace,
            amplitude,
            duration_secs,
            fps,
            sensor_hz,
            no_sensor,
            json,
        } => {
            commands::simulate::run(
                &config,
                mode,
                motion,
                trace,
                amplitude,
                duration_secs,
                fps,
                sensor_hz,
                no_sensor,
                json,
            )
            .await
        }
        Commands::Offset { mode, samples } => commands::offset::run(mode, samples),
        Commands::Modes => commands::modes::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
