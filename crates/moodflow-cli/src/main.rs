//! MoodFlow CLI
//!
//! Runs the mood pipeline from the command line and prints the result as JSON.
//!
//! # Commands
//!
//! - `analyze`: Run one pipeline pass for a mood text
//! - `config`: Print the effective configuration with credentials masked
//!
//! Exit code 0 on success, 1 on any error.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use moodflow_core::config::LoggingConfig;
use moodflow_core::{Config, CoreResult};

mod commands;

/// MoodFlow - mood analysis, affect regulation and music recommendation
#[derive(Parser)]
#[command(name = "moodflow")]
#[command(version)]
#[command(about = "Turn a mood entry into an affect state, a regulation plan and a recommendation")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file. Without it, config/ and MOODFLOW__* variables are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a mood entry and print the pipeline result
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print the effective configuration (credentials masked)
    Config(commands::config::ConfigArgs),
}

fn load_config(path: Option<&Path>) -> CoreResult<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The config decides the default log level, so it is loaded first and
    // its error reported once logging is up.
    let config = load_config(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(cli.verbose, &logging);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Commands::Analyze(args) => commands::analyze::handle_analyze(args, &config).await,
        Commands::Config(args) => commands::config::handle_config(args, &config),
    };

    std::process::exit(exit_code);
}
