//! navcheck CLI - Navigation configuration validator.
//!
//! Provides commands for:
//! - `check`: Validate a site configuration file
//! - `diff`: List sidebar routes added or removed between two configurations
//! - `theme`: Show which component renders each layout slot

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DiffArgs, ThemeArgs};
use output::Output;

/// navcheck - Navigation configuration validator.
#[derive(Parser)]
#[command(name = "navcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a site configuration.
    Check(CheckArgs),
    /// Compare sidebar routes of two site configurations.
    Diff(DiffArgs),
    /// Show resolved theme layouts.
    Theme(ThemeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for check command
    let verbose = matches!(&cli.command, Commands::Check(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Diff(args) => args.execute(),
        Commands::Theme(args) => args.execute(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
